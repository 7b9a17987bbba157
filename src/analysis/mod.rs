//! Analysis orchestration
//!
//! One request flows through:
//!
//! 1. profile resolution (language, age, defaults)
//! 2. three completions run concurrently: summary, creative, metrics
//! 3. metrics extraction with the language's fallback set
//! 4. HTML rendering and email delivery
//!
//! Completion and mail failures are logged by kind and absorbed: the caller
//! always gets a complete, presentable report.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::ServiceConfig;
use crate::llm::LlmBackend;
use crate::locale::Language;
use crate::mail::Mailer;
use crate::metrics::{extract_with, MetricGroup};
use crate::profile::{HealthRequest, Profile};
use crate::report::{
    render_creative, render_email, render_footer, render_metrics, render_summary, ReportSections,
};

/// Everything produced for one request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub language: Language,
    pub sections: ReportSections,
    pub metrics: Vec<MetricGroup>,
    /// Whether the report was handed to a delivering mailer.
    pub emailed: bool,
}

/// Runs the analysis pipeline against injected backends.
pub struct HealthAnalyzer {
    config: Arc<ServiceConfig>,
    llm: Arc<dyn LlmBackend>,
    mailer: Arc<dyn Mailer>,
}

impl HealthAnalyzer {
    pub fn new(config: Arc<ServiceConfig>, llm: Arc<dyn LlmBackend>, mailer: Arc<dyn Mailer>) -> Self {
        Self { config, llm, mailer }
    }

    /// Analyze using today's local date for the age.
    pub async fn analyze(&self, request: HealthRequest) -> AnalysisOutcome {
        self.analyze_on(request, Local::now().date_naive()).await
    }

    /// Analyze with a fixed "today".
    pub async fn analyze_on(&self, request: HealthRequest, today: NaiveDate) -> AnalysisOutcome {
        let profile = Profile::from_request(request, today);
        let language = profile.language;
        let templates = language.templates();
        let ctx = profile.prompt_context();
        let llm_config = &self.config.llm;

        let summary_prompt = (templates.summary_prompt)(&ctx);
        let creative_prompt = (templates.creative_prompt)(&ctx);
        let metrics_prompt = (templates.metrics_prompt)(&ctx);

        let (summary, creative, metrics_text) = tokio::join!(
            self.complete("summary", &summary_prompt, llm_config.summary_temperature),
            self.complete("creative", &creative_prompt, llm_config.creative_temperature),
            self.complete("metrics", &metrics_prompt, llm_config.metrics_temperature),
        );

        let summary = summary.unwrap_or_else(|| templates.unavailable.to_string());
        let creative = creative.unwrap_or_else(|| templates.unavailable.to_string());
        let metrics = extract_with(
            metrics_text.as_deref().unwrap_or_default(),
            &language.fallback_metrics(),
            self.config.metrics.extractor_options(),
        );

        let sections = ReportSections {
            summary: render_summary(&summary, templates),
            creative: render_creative(&creative, templates),
            metrics: render_metrics(&metrics, templates),
            footer: render_footer(templates),
        };

        let email = render_email(&profile, &sections, templates);
        let emailed = match self.mailer.send_report(templates.email_subject, &email).await {
            Ok(()) => self.mailer.delivers(),
            Err(e) => {
                error!(mailer = self.mailer.mailer_name(), error = %e, "Email send error");
                false
            }
        };

        info!(
            lang = %language,
            age = profile.age,
            metric_groups = metrics.len(),
            mailer = self.mailer.mailer_name(),
            emailed,
            "Health analysis complete"
        );

        AnalysisOutcome {
            language,
            sections,
            metrics,
            emailed,
        }
    }

    /// One completion; `None` after logging the failure kind.
    async fn complete(&self, section: &'static str, prompt: &str, temperature: f32) -> Option<String> {
        match self.llm.complete(prompt, temperature).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(
                    backend = self.llm.backend_name(),
                    section,
                    kind = e.kind(),
                    error = %e,
                    "Completion failed, using placeholder"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, UnconfiguredBackend};
    use crate::mail::{DisabledMailer, MailError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers by prompt content so the three concurrent calls are told apart.
    struct ScriptedBackend;

    #[async_trait]
    impl LlmBackend for ScriptedBackend {
        async fn complete(&self, prompt: &str, _temperature: f32) -> Result<String, LlmError> {
            if prompt.contains("###") {
                Ok("### Sleep\nQuality: 70%\nDuration: n/a".to_string())
            } else if prompt.contains("creative") {
                Ok("🥗 Eat broccoli\n🚶 Walk daily".to_string())
            } else {
                Ok("Insight one.\nInsight two.".to_string())
            }
        }

        fn backend_name(&self) -> &'static str {
            "scripted"
        }
    }

    #[derive(Default)]
    struct CapturingMailer {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Mailer for CapturingMailer {
        async fn send_report(&self, subject: &str, html: &str) -> Result<(), MailError> {
            self.sent
                .lock()
                .unwrap()
                .push((subject.to_string(), html.to_string()));
            Ok(())
        }

        fn mailer_name(&self) -> &'static str {
            "capturing"
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn request(lang: &str) -> HealthRequest {
        HealthRequest {
            lang: Some(lang.into()),
            name: Some("Ana".into()),
            dob: Some("1990-03-15".into()),
            condition: Some("fatigue".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_successful_analysis() {
        let mailer = Arc::new(CapturingMailer::default());
        let analyzer = HealthAnalyzer::new(
            Arc::new(ServiceConfig::default()),
            Arc::new(ScriptedBackend),
            mailer.clone(),
        );

        let outcome = analyzer.analyze_on(request("en"), today()).await;

        assert_eq!(outcome.language, Language::En);
        assert_eq!(
            outcome.metrics,
            vec![MetricGroup::new("Sleep", [("Quality", 70), ("Duration", 50)])]
        );
        assert!(outcome.sections.summary.contains("Insight two."));
        assert!(outcome.sections.creative.contains("Walk daily"));
        assert!(outcome.emailed);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Your Health Insight Report");
        assert!(sent[0].1.contains("<strong>🎂 Age:</strong> 34<br>"));
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_to_placeholders_and_fallback() {
        let analyzer = HealthAnalyzer::new(
            Arc::new(ServiceConfig::default()),
            Arc::new(UnconfiguredBackend),
            Arc::new(DisabledMailer),
        );

        let outcome = analyzer.analyze_on(request("tw"), today()).await;

        assert_eq!(outcome.language, Language::Tw);
        assert_eq!(outcome.metrics, Language::Tw.fallback_metrics());
        assert!(outcome.sections.summary.contains("無法生成內容"));
        assert!(outcome.sections.creative.contains("無法生成內容"));
        assert!(outcome.sections.footer.contains("免責聲明"));
        assert!(!outcome.emailed);
    }

    #[tokio::test]
    async fn test_configured_missing_value_is_used() {
        let mut config = ServiceConfig::default();
        config.metrics.missing_value = 65;
        let analyzer = HealthAnalyzer::new(
            Arc::new(config),
            Arc::new(ScriptedBackend),
            Arc::new(DisabledMailer),
        );

        let outcome = analyzer.analyze_on(request("en"), today()).await;
        assert_eq!(outcome.metrics[0].indicators[1].value, 65);
    }
}
