//! Structured-response shapes: the declarative contract for what the
//! generator may return.
//!
//! A [`Shape`] is a named object with an ordered list of fields. Each field
//! has a [`FieldSpec`] describing its kind, and nested objects are shapes
//! themselves, so contracts compose recursively. Shapes are built once at
//! startup through [`ShapeBuilder`] and are immutable afterwards.
//!
//! ```
//! use recipe_relay::schema::{FieldSpec, Shape};
//!
//! let shape = Shape::object("quote")
//!     .field("quote", FieldSpec::string().min_length(1), true)
//!     .build()
//!     .unwrap();
//! assert!(shape.validate(&serde_json::json!({"quote": "Salt to taste."})).is_ok());
//! ```

pub mod describe;
pub mod recipes;
pub mod registry;
pub mod validate;

pub use describe::{describe, SchemaDocument};
pub use registry::SchemaRegistry;
pub use validate::validate;

use std::collections::HashSet;
use std::sync::Arc;

use strum::{Display, EnumString};

use crate::error::{GenerationError, Result};

/// The kind of value a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    /// Ordered sequence whose elements all match the inner spec.
    Array(Box<FieldSpec>),
    /// Nested object described by its own shape.
    Object(Arc<Shape>),
    /// String restricted to a fixed vocabulary.
    Enum(Vec<String>),
}

impl FieldKind {
    /// JSON type keyword for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String | Self::Enum(_) => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

/// Declared bounds on a field's value. Enforced by validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounds {
    pub minimum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub min_length: Option<usize>,
    pub min_items: Option<usize>,
}

impl Bounds {
    pub fn is_empty(&self) -> bool {
        self.minimum.is_none()
            && self.exclusive_minimum.is_none()
            && self.min_length.is_none()
            && self.min_items.is_none()
    }
}

/// Type and constraint description for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    /// Advisory text for the generator. Never enforced.
    pub description: Option<String>,
    pub bounds: Bounds,
}

impl FieldSpec {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            description: None,
            bounds: Bounds::default(),
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn array(element: FieldSpec) -> Self {
        Self::new(FieldKind::Array(Box::new(element)))
    }

    pub fn object(shape: Arc<Shape>) -> Self {
        Self::new(FieldKind::Object(shape))
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldKind::Enum(values.into_iter().map(Into::into).collect()))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn minimum(mut self, minimum: f64) -> Self {
        self.bounds.minimum = Some(minimum);
        self
    }

    pub fn exclusive_minimum(mut self, minimum: f64) -> Self {
        self.bounds.exclusive_minimum = Some(minimum);
        self
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.bounds.min_length = Some(len);
        self
    }

    pub fn min_items(mut self, count: usize) -> Self {
        self.bounds.min_items = Some(count);
        self
    }

    /// True when every object reachable from this field is strict.
    fn is_strict(&self) -> bool {
        match &self.kind {
            FieldKind::Array(element) => element.is_strict(),
            FieldKind::Object(shape) => shape.is_strict(),
            _ => true,
        }
    }
}

/// A named field inside a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub spec: FieldSpec,
    pub required: bool,
}

/// Which persona family a shape belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ShapeDomain {
    Recipe,
    Quote,
    #[default]
    General,
}

/// Marks the array field of a collection shape that holds the items.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionField {
    pub field: String,
    /// Plural noun used when asking for N items, e.g. "recipes".
    pub item_label: String,
}

/// A named structural contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    name: String,
    description: Option<String>,
    fields: Vec<Field>,
    allow_additional: bool,
    domain: ShapeDomain,
    collection: Option<CollectionField>,
}

impl Shape {
    /// Start building an object shape. Shapes are strict unless
    /// [`ShapeBuilder::allow_additional`] says otherwise.
    pub fn object(name: impl Into<String>) -> ShapeBuilder {
        ShapeBuilder {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            allow_additional: false,
            domain: ShapeDomain::default(),
            collection: None,
        }
    }

    /// Synthesize a collection around `item`: `<name>Collection { items: [item] }`.
    pub fn collection_of(item: Arc<Shape>) -> Result<Shape> {
        let label = format!("{} items", item.name);
        Shape::object(format!("{}Collection", item.name))
            .description(format!("An object containing an array of {} objects", item.name))
            .domain(item.domain)
            .field(
                "items",
                FieldSpec::array(FieldSpec::object(Arc::clone(&item))).min_items(1),
                true,
            )
            .collection("items", label)
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }

    pub fn allow_additional(&self) -> bool {
        self.allow_additional
    }

    pub fn domain(&self) -> ShapeDomain {
        self.domain
    }

    pub fn collection(&self) -> Option<&CollectionField> {
        self.collection.as_ref()
    }

    pub fn is_collection(&self) -> bool {
        self.collection.is_some()
    }

    /// Strict all the way down: every object forbids additional fields and
    /// requires every field it declares.
    pub fn is_strict(&self) -> bool {
        !self.allow_additional
            && self
                .fields
                .iter()
                .all(|f| f.required && f.spec.is_strict())
    }

    /// Check `value` against this shape.
    pub fn validate(&self, value: &serde_json::Value) -> Result<()> {
        validate(value, self)
    }
}

/// Builder for [`Shape`].
#[derive(Debug)]
pub struct ShapeBuilder {
    name: String,
    description: Option<String>,
    fields: Vec<Field>,
    allow_additional: bool,
    domain: ShapeDomain,
    collection: Option<CollectionField>,
}

impl ShapeBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn domain(mut self, domain: ShapeDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn allow_additional(mut self, allow: bool) -> Self {
        self.allow_additional = allow;
        self
    }

    /// Add a field. Declaration order is preserved.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec, required: bool) -> Self {
        self.fields.push(Field {
            name: name.into(),
            spec,
            required,
        });
        self
    }

    /// Declare which array field holds the items of a collection shape.
    pub fn collection(mut self, field: impl Into<String>, item_label: impl Into<String>) -> Self {
        self.collection = Some(CollectionField {
            field: field.into(),
            item_label: item_label.into(),
        });
        self
    }

    /// Finish the shape, rejecting duplicate fields and a collection marker
    /// that does not point at an array field.
    pub fn build(self) -> Result<Shape> {
        if self.name.trim().is_empty() {
            return Err(GenerationError::Configuration(
                "shape name must not be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(GenerationError::Configuration(format!(
                    "shape '{}' declares field '{}' twice",
                    self.name, field.name
                )));
            }
        }

        if let Some(ref collection) = self.collection {
            let is_array = self
                .fields
                .iter()
                .find(|f| f.name == collection.field)
                .is_some_and(|f| matches!(f.spec.kind, FieldKind::Array(_)));
            if !is_array {
                return Err(GenerationError::Configuration(format!(
                    "collection field '{}' of shape '{}' must be a declared array",
                    collection.field, self.name
                )));
            }
        }

        Ok(Shape {
            name: self.name,
            description: self.description,
            fields: self.fields,
            allow_additional: self.allow_additional,
            domain: self.domain,
            collection: self.collection,
        })
    }
}
