use serde::{Deserialize, Serialize};

/// One writing-competition listing, as extracted from model output.
///
/// Every field is best-effort: the model may omit or garble any of them,
/// so none are validated beyond JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl Listing {
    /// Placeholder listing returned when model output defeats extraction.
    /// Carries the raw output in the description so the frontend can show it.
    pub fn unparsed(raw_output: String) -> Self {
        Listing {
            title: Some("AI output could not be parsed".to_string()),
            description: Some(raw_output),
            url: Some("#".to_string()),
            age_group: None,
            genre: None,
        }
    }
}
