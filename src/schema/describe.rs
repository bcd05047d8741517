//! Serialize shapes into the JSON Schema document a provider expects.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{FieldKind, FieldSpec, Shape};

/// Wire form of a shape: the name, the JSON Schema body, and whether the
/// provider may enforce it in strict mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

impl SchemaDocument {
    /// Compact JSON text of the schema body.
    pub fn to_json_string(&self) -> String {
        self.schema.to_string()
    }
}

/// Describe `shape` as a JSON Schema document.
///
/// Pure function of the shape: the same shape always yields byte-identical
/// output. Declared bounds are only emitted for non-strict shapes, since
/// strict structured-output mode rejects those keywords; they are enforced
/// locally either way.
pub fn describe(shape: &Shape) -> SchemaDocument {
    let strict = shape.is_strict();
    SchemaDocument {
        name: shape.name().to_string(),
        schema: object_schema(shape, !strict),
        strict,
    }
}

fn object_schema(shape: &Shape, with_bounds: bool) -> Value {
    let mut properties = Map::new();
    for field in shape.fields() {
        properties.insert(field.name.clone(), field_schema(&field.spec, with_bounds));
    }
    let required: Vec<&str> = shape.required_fields().collect();

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    if let Some(description) = shape.description() {
        schema.insert("description".into(), json!(description));
    }
    schema.insert("properties".into(), Value::Object(properties));
    schema.insert("required".into(), json!(required));
    schema.insert(
        "additionalProperties".into(),
        json!(shape.allow_additional()),
    );
    Value::Object(schema)
}

fn field_schema(spec: &FieldSpec, with_bounds: bool) -> Value {
    let mut schema = match &spec.kind {
        FieldKind::Object(shape) => match object_schema(shape, with_bounds) {
            Value::Object(map) => map,
            _ => Map::new(),
        },
        FieldKind::Array(element) => {
            let mut map = Map::new();
            map.insert("type".into(), json!("array"));
            map.insert("items".into(), field_schema(element, with_bounds));
            map
        }
        FieldKind::Enum(values) => {
            let mut map = Map::new();
            map.insert("type".into(), json!("string"));
            map.insert("enum".into(), json!(values));
            map
        }
        kind => {
            let mut map = Map::new();
            map.insert("type".into(), json!(kind.type_name()));
            map
        }
    };

    if let Some(ref description) = spec.description {
        schema.insert("description".into(), json!(description));
    }

    if with_bounds {
        let bounds = &spec.bounds;
        if let Some(min) = bounds.minimum {
            schema.insert("minimum".into(), json!(min));
        }
        if let Some(min) = bounds.exclusive_minimum {
            schema.insert("exclusiveMinimum".into(), json!(min));
        }
        if let Some(len) = bounds.min_length {
            schema.insert("minLength".into(), json!(len));
        }
        if let Some(count) = bounds.min_items {
            schema.insert("minItems".into(), json!(count));
        }
    }

    Value::Object(schema)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::schema::{FieldSpec, Shape};

    #[test]
    fn describes_nested_arrays_of_objects() {
        let item = Arc::new(
            Shape::object("item")
                .field("name", FieldSpec::string().with_description("Name"), true)
                .build()
                .unwrap(),
        );
        let shape = Shape::object("list")
            .field("items", FieldSpec::array(FieldSpec::object(item)), true)
            .build()
            .unwrap();

        let doc = describe(&shape);

        assert!(doc.strict);
        assert_eq!(
            doc.schema,
            json!({
                "type": "object",
                "properties": {
                    "items": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": {"type": "string", "description": "Name"}
                            },
                            "required": ["name"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["items"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn bounds_only_appear_in_non_strict_documents() {
        let strict = Shape::object("s")
            .field("n", FieldSpec::integer().minimum(1.0), true)
            .build()
            .unwrap();
        let loose = Shape::object("l")
            .field("n", FieldSpec::integer().minimum(1.0), true)
            .allow_additional(true)
            .build()
            .unwrap();

        assert!(describe(&strict).schema["properties"]["n"].get("minimum").is_none());
        assert_eq!(describe(&loose).schema["properties"]["n"]["minimum"], json!(1.0));
    }

    #[test]
    fn enum_values_keep_declaration_order() {
        let shape = Shape::object("e")
            .field("unit", FieldSpec::enumeration(["cups", "grams", "drops"]), true)
            .build()
            .unwrap();

        let doc = describe(&shape);

        assert_eq!(
            doc.schema["properties"]["unit"]["enum"],
            json!(["cups", "grams", "drops"])
        );
    }
}
