//! Questionnaire payload and the resolved submitter profile.

mod age;

pub use age::{compute_age, parse_dob};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::locale::{Language, PromptContext};

/// JSON body of `POST /health_analyze`.
///
/// Every field is optional; strings, numbers and booleans are all accepted
/// and kept as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub lang: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    /// The main health concern.
    #[serde(default, deserialize_with = "lenient_text")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub referrer: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub angel: Option<String>,
}

/// Accept any JSON scalar as text; `null` becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// A request with language, age and defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub language: Language,
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
    pub country: String,
    pub concern: String,
    pub notes: String,
    pub referrer: String,
    pub angel: String,
    /// Zero when the date of birth could not be used.
    pub age: u32,
}

impl Profile {
    pub fn from_request(request: HealthRequest, today: NaiveDate) -> Self {
        let language = Language::from_tag_or_default(request.lang.as_deref());
        let dob = request.dob.unwrap_or_default();
        let age = compute_age(&dob, today).unwrap_or(0);

        let notes = request
            .details
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| language.templates().no_details.to_string());

        Self {
            language,
            name: request.name.unwrap_or_default(),
            dob,
            gender: request.gender.unwrap_or_default(),
            height: request.height.unwrap_or_default(),
            weight: request.weight.unwrap_or_default(),
            country: request.country.unwrap_or_default(),
            concern: request.condition.unwrap_or_default(),
            notes,
            referrer: request.referrer.unwrap_or_default(),
            angel: request.angel.unwrap_or_default(),
            age,
        }
    }

    pub fn prompt_context(&self) -> PromptContext<'_> {
        PromptContext {
            age: self.age,
            gender: &self.gender,
            country: &self.country,
            concern: &self.concern,
            notes: &self.notes,
        }
    }
}
