//! Schema Registry: the named shapes this process may request.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{describe, recipes, SchemaDocument, Shape};
use crate::error::{GenerationError, Result};

/// Name-indexed set of shapes.
///
/// Populated once at startup and then shared read-only, usually behind an
/// `Arc`; there is no way to mutate it through a shared reference.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    shapes: BTreeMap<String, Arc<Shape>>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the canonical `singleRecipe`, `recipeCollection`
    /// and `quote` shapes.
    pub fn standard() -> Result<Self> {
        let mut registry = Self::new();
        let single = registry.register(recipes::single_recipe_shape()?)?;
        registry.register(recipes::recipe_collection_shape(single)?)?;
        registry.register(recipes::quote_shape()?)?;
        Ok(registry)
    }

    /// Add a shape. Names are unique.
    pub fn register(&mut self, shape: Shape) -> Result<Arc<Shape>> {
        if self.shapes.contains_key(shape.name()) {
            return Err(GenerationError::Configuration(format!(
                "shape '{}' is already registered",
                shape.name()
            )));
        }
        let shape = Arc::new(shape);
        self.shapes
            .insert(shape.name().to_string(), Arc::clone(&shape));
        Ok(shape)
    }

    /// Look up a shape by name.
    pub fn get(&self, name: &str) -> Result<Arc<Shape>> {
        self.shapes
            .get(name)
            .cloned()
            .ok_or_else(|| GenerationError::UnknownShape(name.to_string()))
    }

    /// Wire document for `shape`. Deterministic.
    pub fn describe(&self, shape: &Shape) -> SchemaDocument {
        describe(shape)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::recipes::{QUOTE, RECIPE_COLLECTION, SINGLE_RECIPE};
    use crate::schema::FieldSpec;

    #[test]
    fn standard_registry_holds_canonical_shapes() {
        let registry = SchemaRegistry::standard().unwrap();

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec![QUOTE, RECIPE_COLLECTION, SINGLE_RECIPE]);
    }

    #[test]
    fn get_unknown_shape_fails() {
        let registry = SchemaRegistry::standard().unwrap();

        let err = registry.get("pancakes").unwrap_err();

        assert!(matches!(err, GenerationError::UnknownShape(name) if name == "pancakes"));
    }

    #[test]
    fn register_rejects_duplicate_names() {
        let mut registry = SchemaRegistry::new();
        let shape = || {
            Shape::object("dup")
                .field("a", FieldSpec::string(), true)
                .build()
                .unwrap()
        };
        registry.register(shape()).unwrap();

        assert!(matches!(
            registry.register(shape()),
            Err(GenerationError::Configuration(_))
        ));
    }
}
