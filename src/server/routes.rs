//! Route handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::AppState;
use crate::error::GenerationError;
use crate::generation::prompt::RANDOM_QUOTE_PROMPT;
use crate::generation::GenerateOptions;
use crate::schema::recipes::{QUOTE, RECIPE_COLLECTION};

/// Query string of `GET /getRecipes`.
///
/// `numberOfRecipes` is kept as text: its leading integer is used, and a
/// value without one falls back to the default count instead of rejecting
/// the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeParams {
    pub recipe_query: Option<String>,
    pub number_of_recipes: Option<String>,
}

impl RecipeParams {
    fn query(&self) -> Result<&str, GenerationError> {
        self.recipe_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| {
                GenerationError::InvalidInput("Query parameter 'recipeQuery' is required".into())
            })
    }

    fn count(&self) -> Option<i64> {
        self.number_of_recipes.as_deref().and_then(leading_integer)
    }
}

/// Leading optionally-signed integer of `raw`, ignoring whatever follows
/// (`"3abc"` and `"2.5"` read as 3 and 2).
fn leading_integer(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits_len = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    let number = &text[..sign_len + digits_len];
    Some(number.parse::<i64>().unwrap_or(if number.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

/// `GET /getRecipes?recipeQuery=..&numberOfRecipes=..`
pub async fn get_recipes(
    State(state): State<AppState>,
    Query(params): Query<RecipeParams>,
) -> Result<Json<Value>, ApiError> {
    let query = params.query()?;
    let options = GenerateOptions {
        count: params.count(),
        ..GenerateOptions::default()
    };

    let output = state
        .orchestrator
        .generate(RECIPE_COLLECTION, query, options)
        .await?;
    Ok(Json(output.value))
}

/// `GET /randomQuote`
pub async fn random_quote(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let output = state
        .orchestrator
        .generate(QUOTE, RANDOM_QUOTE_PROMPT, GenerateOptions::default())
        .await?;
    Ok(Json(output.value))
}

/// `GET /health`, never gated and never calls the provider.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let shapes: Vec<&str> = state.orchestrator.registry().names().collect();
    Json(json!({
        "status": "ok",
        "provider": state.orchestrator.provider_name(),
        "shapes": shapes,
        "auth": state.auth.is_enabled(),
    }))
}
