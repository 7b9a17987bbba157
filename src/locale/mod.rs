//! Localized templates
//!
//! One data-driven [`TemplateSet`] per supported [`Language`]: prompt builders,
//! report headings, field labels, disclaimer and fallback metrics. The
//! orchestration code is written once against this table.

mod en;
mod tw;
mod zh;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricGroup;

/// Supported report languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    /// Simplified Chinese
    Zh,
    /// Traditional Chinese
    Tw,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Zh, Language::Tw];

    /// Resolve a request tag, falling back to English for anything unknown.
    pub fn from_tag_or_default(tag: Option<&str>) -> Self {
        tag.and_then(|t| t.parse().ok()).unwrap_or_default()
    }

    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Tw => "tw",
        }
    }

    pub fn templates(self) -> &'static TemplateSet {
        match self {
            Language::En => &en::TEMPLATES,
            Language::Zh => &zh::TEMPLATES,
            Language::Tw => &tw::TEMPLATES,
        }
    }

    /// Minimal presentable metric set used when extraction finds nothing.
    pub fn fallback_metrics(self) -> Vec<MetricGroup> {
        self.templates()
            .fallback_metrics
            .iter()
            .map(|(title, indicators)| MetricGroup::new(*title, indicators.iter().copied()))
            .collect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error for tags outside [`Language::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language tag: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" | "zh-cn" | "zh-hans" => Ok(Language::Zh),
            "tw" | "zh-tw" | "zh-hant" => Ok(Language::Tw),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// Values interpolated into every prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub age: u32,
    pub gender: &'a str,
    pub country: &'a str,
    pub concern: &'a str,
    pub notes: &'a str,
}

/// Labels for the profile header of the emailed report.
#[derive(Debug)]
pub struct FieldLabels {
    pub name: &'static str,
    pub dob: &'static str,
    pub country: &'static str,
    pub gender: &'static str,
    pub age: &'static str,
    pub height: &'static str,
    pub weight: &'static str,
    pub concern: &'static str,
    pub notes: &'static str,
    pub referrer: &'static str,
    pub angel: &'static str,
}

/// Fallback metrics as static data: `(title, [(label, value)])`.
pub type FallbackTable = &'static [(&'static str, &'static [(&'static str, u8)])];

/// Everything language-specific about one report.
#[derive(Debug)]
pub struct TemplateSet {
    pub email_subject: &'static str,
    pub report_title: &'static str,
    pub summary_heading: &'static str,
    pub creative_heading: &'static str,
    pub metrics_heading: &'static str,
    pub disclaimer: &'static str,
    /// Used when the questionnaire has no additional details.
    pub no_details: &'static str,
    /// Shown in place of text the model could not produce.
    pub unavailable: &'static str,
    pub labels: FieldLabels,
    pub summary_prompt: fn(&PromptContext<'_>) -> String,
    pub creative_prompt: fn(&PromptContext<'_>) -> String,
    pub metrics_prompt: fn(&PromptContext<'_>) -> String,
    pub fallback_metrics: FallbackTable,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::SECTION_MARKER;

    fn ctx() -> PromptContext<'static> {
        PromptContext {
            age: 42,
            gender: "female",
            country: "Malaysia",
            concern: "poor sleep",
            notes: "works night shifts",
        }
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" ZH ".parse::<Language>().unwrap(), Language::Zh);
        assert_eq!("zh-TW".parse::<Language>().unwrap(), Language::Tw);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_unknown_or_missing_tag_falls_back_to_english() {
        assert_eq!(Language::from_tag_or_default(Some("klingon")), Language::En);
        assert_eq!(Language::from_tag_or_default(Some("")), Language::En);
        assert_eq!(Language::from_tag_or_default(None), Language::En);
        assert_eq!(Language::from_tag_or_default(Some("tw")), Language::Tw);
    }

    #[test]
    fn test_every_language_has_complete_templates() {
        for lang in Language::ALL {
            let t = lang.templates();
            assert!(!t.email_subject.is_empty(), "{lang}: email subject");
            assert!(!t.report_title.is_empty(), "{lang}: report title");
            assert!(!t.disclaimer.is_empty(), "{lang}: disclaimer");
            assert!(!t.no_details.is_empty(), "{lang}: no_details");
            assert!(!t.unavailable.is_empty(), "{lang}: unavailable");
        }
    }

    #[test]
    fn test_prompts_interpolate_context() {
        for lang in Language::ALL {
            let t = lang.templates();
            for prompt in [
                (t.summary_prompt)(&ctx()),
                (t.creative_prompt)(&ctx()),
                (t.metrics_prompt)(&ctx()),
            ] {
                assert!(prompt.contains("42"), "{lang}: age missing in {prompt}");
                assert!(prompt.contains("Malaysia"), "{lang}: country missing");
                assert!(prompt.contains("poor sleep"), "{lang}: concern missing");
            }
        }
    }

    #[test]
    fn test_metrics_prompt_requests_section_markers() {
        for lang in Language::ALL {
            let prompt = (lang.templates().metrics_prompt)(&ctx());
            assert!(prompt.contains(SECTION_MARKER), "{lang}: marker missing");
        }
    }

    #[test]
    fn test_fallback_metrics_are_complete() {
        for lang in Language::ALL {
            let groups = lang.fallback_metrics();
            assert!(!groups.is_empty(), "{lang}: empty fallback");
            assert!(groups.iter().all(MetricGroup::is_complete));
            assert!(groups
                .iter()
                .flat_map(|g| &g.indicators)
                .all(|i| i.value <= 100));
        }
    }

    #[test]
    fn test_language_serializes_as_tag() {
        assert_eq!(serde_json::to_string(&Language::Tw).unwrap(), "\"tw\"");
    }
}
