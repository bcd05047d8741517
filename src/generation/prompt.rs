//! System personas and user prompts.

use crate::schema::ShapeDomain;

pub const RECIPE_PERSONA: &str = "You are a recipe generator. Write ingredient names in \
lowercase. Measure cloves, loaves, butter, plants, yogurts, seasonings, cheese and powders \
in grams or kilograms where practical, otherwise in pieces, teaspoons, tablespoons, cups, \
liters or milliliters. Use the solids teaspoon and tablespoon units for plants and powders, \
measure whole items such as a chicken in pieces, and reserve drops for liquids.";

pub const QUOTE_PERSONA: &str = "You are a well-read chef who shares short, memorable \
quotes about cooking and food.";

pub const GENERAL_PERSONA: &str = "You generate structured data that strictly follows the \
given schema.";

/// Query used by the random-quote endpoint.
pub const RANDOM_QUOTE_PROMPT: &str = "Share one short, random quote about cooking.";

/// Default system prompt for a shape domain.
pub fn persona_for(domain: ShapeDomain) -> &'static str {
    match domain {
        ShapeDomain::Recipe => RECIPE_PERSONA,
        ShapeDomain::Quote => QUOTE_PERSONA,
        ShapeDomain::General => GENERAL_PERSONA,
    }
}

/// User prompt asking for `count` items of a collection.
pub fn collection_prompt(count: u32, item_label: &str, query: &str) -> String {
    format!("Generate {count} {item_label} for \"{query}\" strictly following the given schema.")
}

/// User prompt asking for a single value.
pub fn single_prompt(query: &str) -> String {
    format!("{query}\n\nRespond strictly following the given schema.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_prompt_embeds_count_and_query() {
        assert_eq!(
            collection_prompt(3, "recipes", "pasta"),
            "Generate 3 recipes for \"pasta\" strictly following the given schema."
        );
    }

    #[test]
    fn personas_differ_by_domain() {
        assert_ne!(persona_for(ShapeDomain::Recipe), persona_for(ShapeDomain::Quote));
        assert!(persona_for(ShapeDomain::Recipe).contains("drops for liquids"));
    }
}
