//! The competitions endpoint: one prompt, one inference call, best-effort
//! JSON extraction over whatever the model answered.

use crate::models::Listing;
use crate::services::extract_json_array;
use crate::services::providers::GenerationParams;
use crate::startup::AppState;
use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

/// Preference string used when the caller sends none.
const DEFAULT_PREFS: &str = "general writing";

/// Output token cap for the listing prompt.
const MAX_OUTPUT_TOKENS: i32 = 500;

#[derive(Debug, Deserialize)]
pub struct CompetitionsQuery {
    pub prefs: Option<String>,
}

/// `GET /api/competitions?prefs=<string>`
///
/// Always answers 200 with a JSON body: the extracted array on success, a
/// single placeholder listing when extraction fails, or `{"error": ...}` when
/// the inference call itself fails.
pub async fn list_competitions(
    State(state): State<AppState>,
    Query(query): Query<CompetitionsQuery>,
) -> Json<Value> {
    let prefs = query.prefs.unwrap_or_else(|| DEFAULT_PREFS.to_string());
    let prompt = build_prompt(&prefs);
    let params = GenerationParams {
        max_tokens: Some(MAX_OUTPUT_TOKENS),
        ..Default::default()
    };

    match state.text_provider.generate(&prompt, &params).await {
        Ok(response) => {
            let output = response.text.unwrap_or_default();
            match extract_json_array(&output) {
                Some(listings) => {
                    tracing::debug!(
                        count = listings.as_array().map(|a| a.len()).unwrap_or(0),
                        "Extracted listings from model output"
                    );
                    Json(listings)
                }
                None => {
                    tracing::warn!(
                        output_len = output.len(),
                        "Model output did not contain a parseable JSON array"
                    );
                    Json(json!([Listing::unparsed(output)]))
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Model inference call failed");
            Json(json!({ "error": e.to_string() }))
        }
    }
}

/// Single-turn prompt asking for listings as a bare JSON array.
fn build_prompt(prefs: &str) -> String {
    format!(
        r#"IMPORTANT: Respond **only** with a valid JSON array, no extra text.

Extract writing competitions for this user input:
"{prefs}"

Return a JSON array with the following fields:
- title
- description
- url
- age_group (if known)
- genre (if known)
"#
    )
}
