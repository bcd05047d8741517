//! Validate parsed provider output against a shape.

use serde_json::Value;

use super::{FieldKind, FieldSpec, Shape};
use crate::error::{GenerationError, Result};

const ROOT: &str = "$";

/// Validate `value` against `shape`, recursively.
///
/// At each object level, missing required fields are reported first, then
/// undeclared fields (strict shapes only), then the declared fields' values
/// in declaration order. Returns the first violation as
/// `GenerationError::SchemaViolation` with a dotted path such as
/// `recipes[0].ingredients[2].unit`.
pub fn validate(value: &Value, shape: &Shape) -> Result<()> {
    validate_object(value, shape, ROOT)
}

fn validate_object(value: &Value, shape: &Shape, path: &str) -> Result<()> {
    let Some(obj) = value.as_object() else {
        return Err(GenerationError::violation(
            path,
            format!("expected object '{}', got {}", shape.name(), json_type_name(value)),
        ));
    };

    for name in shape.required_fields() {
        if !obj.contains_key(name) {
            return Err(GenerationError::violation(
                child_path(path, name),
                format!("missing required field '{name}'"),
            ));
        }
    }

    if !shape.allow_additional() {
        if let Some(extra) = obj.keys().find(|key| shape.field(key).is_none()) {
            return Err(GenerationError::violation(
                child_path(path, extra),
                format!("field '{extra}' is not allowed by shape '{}'", shape.name()),
            ));
        }
    }

    for field in shape.fields() {
        if let Some(field_value) = obj.get(&field.name) {
            validate_field(field_value, &field.spec, &child_path(path, &field.name))?;
        }
    }

    Ok(())
}

fn validate_field(value: &Value, spec: &FieldSpec, path: &str) -> Result<()> {
    match &spec.kind {
        FieldKind::Object(shape) => return validate_object(value, shape, path),
        FieldKind::Array(element) => {
            let Some(items) = value.as_array() else {
                return Err(type_mismatch(path, "array", value));
            };
            if let Some(min) = spec.bounds.min_items {
                if items.len() < min {
                    return Err(GenerationError::violation(
                        path,
                        format!("expected at least {min} item(s), got {}", items.len()),
                    ));
                }
            }
            for (index, item) in items.iter().enumerate() {
                validate_field(item, element, &format!("{path}[{index}]"))?;
            }
            return Ok(());
        }
        FieldKind::Enum(allowed) => {
            let Some(text) = value.as_str() else {
                return Err(type_mismatch(path, "string", value));
            };
            if !allowed.iter().any(|candidate| candidate == text) {
                return Err(GenerationError::violation(
                    path,
                    format!("'{text}' is not one of [{}]", allowed.join(", ")),
                ));
            }
            return Ok(());
        }
        kind => {
            if !value_matches_kind(value, kind) {
                return Err(type_mismatch(path, kind.type_name(), value));
            }
        }
    }

    check_scalar_bounds(value, spec, path)
}

fn check_scalar_bounds(value: &Value, spec: &FieldSpec, path: &str) -> Result<()> {
    let bounds = &spec.bounds;

    if let Some(number) = value.as_f64() {
        if let Some(min) = bounds.minimum {
            if number < min {
                return Err(GenerationError::violation(
                    path,
                    format!("{number} is below the minimum of {min}"),
                ));
            }
        }
        if let Some(min) = bounds.exclusive_minimum {
            if number <= min {
                return Err(GenerationError::violation(
                    path,
                    format!("{number} must be greater than {min}"),
                ));
            }
        }
    }

    if let (Some(min), Some(text)) = (bounds.min_length, value.as_str()) {
        if text.chars().count() < min {
            return Err(GenerationError::violation(
                path,
                format!("expected at least {min} character(s)"),
            ));
        }
    }

    Ok(())
}

fn value_matches_kind(value: &Value, kind: &FieldKind) -> bool {
    match kind {
        FieldKind::String => value.is_string(),
        FieldKind::Number => value.is_number(),
        FieldKind::Integer => {
            value.is_i64()
                || value.is_u64()
                || value.as_f64().is_some_and(|n| n.is_finite() && n.fract() == 0.0)
        }
        FieldKind::Boolean => value.is_boolean(),
        FieldKind::Array(_) => value.is_array(),
        FieldKind::Object(_) => value.is_object(),
        FieldKind::Enum(_) => value.is_string(),
    }
}

fn type_mismatch(path: &str, expected: &str, value: &Value) -> GenerationError {
    GenerationError::violation(
        path,
        format!("expected type '{expected}', got {}", json_type_name(value)),
    )
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == ROOT {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
