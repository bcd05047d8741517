//! Canonical recipe and quote shapes, plus the typed values they describe.

use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString, VariantNames};

use super::{FieldSpec, Shape, ShapeDomain};
use crate::error::Result;

pub const SINGLE_RECIPE: &str = "singleRecipe";
pub const RECIPE_COLLECTION: &str = "recipeCollection";
pub const QUOTE: &str = "quote";

/// Measurement units an ingredient may use.
///
/// The solids variants and `Drops` carry usage guidance for the generator
/// (drops are for liquids); that guidance is advisory and not checked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Unit {
    Grams,
    Kilograms,
    Liters,
    Milliliters,
    Cups,
    TablespoonsSolidsPlantsPowders,
    TeaspoonsSolidsPlantsPowders,
    Tablespoons,
    Teaspoons,
    Drops,
    Pieces,
}

/// One ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ingredient {
    pub item: String,
    pub amount: f64,
    pub unit: Unit,
}

/// A single generated recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<Ingredient>,
    /// Steps, in order.
    pub instructions: Vec<String>,
    #[serde(rename = "estimatedCookingTime", deserialize_with = "whole_u32")]
    pub estimated_cooking_time_minutes: u32,
    #[serde(deserialize_with = "whole_u32")]
    pub servings: u32,
}

/// Accepts `4` and `4.0` alike, as the `integer` field kind does.
fn whole_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return u32::try_from(n).map_err(D::Error::custom);
    }
    match number.as_f64() {
        Some(n) if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n) => Ok(n as u32),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {number}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeCollection {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quote {
    pub quote: String,
}

fn ingredient_shape() -> Result<Shape> {
    Shape::object("ingredient")
        .domain(ShapeDomain::Recipe)
        .field(
            "item",
            FieldSpec::string()
                .with_description("Ingredient name, lowercase")
                .min_length(1),
            true,
        )
        .field(
            "amount",
            FieldSpec::number()
                .with_description("The numerical amount of the ingredient (e.g., 2, 1.5)")
                .exclusive_minimum(0.0),
            true,
        )
        .field(
            "unit",
            FieldSpec::enumeration(Unit::VARIANTS.iter().copied()).with_description(
                "The unit of measurement for the ingredient. Whole pieces only should be \
                 measured in pieces, like chicken or sheep",
            ),
            true,
        )
        .build()
}

/// `singleRecipe`: one recipe object.
pub fn single_recipe_shape() -> Result<Shape> {
    let ingredient = Arc::new(ingredient_shape()?);
    Shape::object(SINGLE_RECIPE)
        .domain(ShapeDomain::Recipe)
        .field(
            "title",
            FieldSpec::string()
                .with_description("The title of the recipe")
                .min_length(1),
            true,
        )
        .field(
            "ingredients",
            FieldSpec::array(FieldSpec::object(ingredient)).with_description(
                "List of ingredients with item names, amounts, and units. Cloves, loaves, \
                 butter, plants, yogurts, seasonings, cheese and powders are preferably in \
                 grams or kilograms, otherwise in pieces, teaspoons, tablespoons, cups, liters \
                 or milliliters; drops are reserved for liquids",
            ),
            true,
        )
        .field(
            "instructions",
            FieldSpec::array(FieldSpec::string())
                .with_description("Step-by-step instructions for the recipe"),
            true,
        )
        .field(
            "estimatedCookingTime",
            FieldSpec::integer()
                .with_description("Cooking time in minutes")
                .minimum(0.0),
            true,
        )
        .field(
            "servings",
            FieldSpec::integer()
                .with_description("Number of servings")
                .minimum(1.0),
            true,
        )
        .build()
}

/// `recipeCollection`: a non-empty list of `singleRecipe`.
pub fn recipe_collection_shape(single: Arc<Shape>) -> Result<Shape> {
    Shape::object(RECIPE_COLLECTION)
        .description("An object containing an array of recipes")
        .domain(ShapeDomain::Recipe)
        .field(
            "recipes",
            FieldSpec::array(FieldSpec::object(single))
                .with_description("An array of recipe objects")
                .min_items(1),
            true,
        )
        .collection("recipes", "recipes")
        .build()
}

/// `quote`: one short quote.
pub fn quote_shape() -> Result<Shape> {
    Shape::object(QUOTE)
        .domain(ShapeDomain::Quote)
        .field(
            "quote",
            FieldSpec::string()
                .with_description("A random quote about cooking")
                .min_length(1),
            true,
        )
        .build()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn unit_wire_names_are_snake_case() {
        assert_eq!(
            Unit::TablespoonsSolidsPlantsPowders.to_string(),
            "tablespoons_solids_plants_powders"
        );
        assert_eq!(Unit::from_str("drops").unwrap(), Unit::Drops);
        assert_eq!(Unit::VARIANTS.len(), 11);
    }

    #[test]
    fn canonical_shapes_are_strict() {
        let single = Arc::new(single_recipe_shape().unwrap());

        assert!(single.is_strict());
        assert!(recipe_collection_shape(single).unwrap().is_strict());
        assert!(quote_shape().unwrap().is_strict());
    }

    #[test]
    fn recipe_serializes_cooking_time_under_wire_name() {
        let recipe = Recipe {
            title: "Toast".into(),
            ingredients: vec![],
            instructions: vec!["Toast the bread.".into()],
            estimated_cooking_time_minutes: 3,
            servings: 1,
        };

        let value = serde_json::to_value(&recipe).unwrap();

        assert_eq!(value["estimatedCookingTime"], 3);
    }

    #[test]
    fn whole_float_counts_deserialize() {
        let recipe: Recipe = serde_json::from_value(serde_json::json!({
            "title": "Toast",
            "ingredients": [],
            "instructions": ["Toast the bread."],
            "estimatedCookingTime": 3.0,
            "servings": 2.0
        }))
        .unwrap();

        assert_eq!(recipe.estimated_cooking_time_minutes, 3);
        assert_eq!(recipe.servings, 2);
    }

    #[test]
    fn fractional_or_negative_counts_are_rejected() {
        for servings in [serde_json::json!(2.5), serde_json::json!(-1)] {
            let result = serde_json::from_value::<Recipe>(serde_json::json!({
                "title": "Toast",
                "ingredients": [],
                "instructions": [],
                "estimatedCookingTime": 3,
                "servings": servings
            }));
            assert!(result.is_err(), "{servings}");
        }
    }
}
