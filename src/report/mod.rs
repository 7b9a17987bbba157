//! HTML report rendering
//!
//! Pure functions from model text, metrics and the submitter profile to the
//! HTML fragments returned to the caller and the full emailed report.
//! User and model text is always escaped; template strings are trusted.

mod chart;

pub use chart::render_metrics;

use std::fmt::Write as _;

use serde::Serialize;

use crate::locale::TemplateSet;
use crate::profile::Profile;

const PARAGRAPH_OPEN: &str = "<p style='margin-bottom:10px;'>";

/// The four fragments that make up a report body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSections {
    pub summary: String,
    pub creative: String,
    pub metrics: String,
    pub footer: String,
}

/// Escape text for HTML element content and single- or double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn paragraphs<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.fold(String::new(), |mut out, line| {
        let _ = write!(out, "{PARAGRAPH_OPEN}{}</p>", escape_html(line.trim()));
        out
    })
}

/// Narrative summary, one paragraph per line, blank lines included.
pub fn render_summary(text: &str, templates: &TemplateSet) -> String {
    format!(
        "<div style='font-size:16px; white-space:pre-wrap;'><strong>{}</strong><br>{}</div>",
        templates.summary_heading,
        paragraphs(text.lines())
    )
}

/// Creative suggestions, one paragraph per non-empty line.
pub fn render_creative(text: &str, templates: &TemplateSet) -> String {
    format!(
        "<h3 style='font-size:24px;'>{}</h3><br>{}",
        templates.creative_heading,
        paragraphs(text.lines().filter(|line| !line.trim().is_empty()))
    )
}

/// Disclaimer paragraph.
pub fn render_footer(templates: &TemplateSet) -> String {
    format!("<p style='color:#888;'>{}</p>", templates.disclaimer)
}

/// Full emailed report: title, profile header, sections, footer.
pub fn render_email(profile: &Profile, sections: &ReportSections, templates: &TemplateSet) -> String {
    let l = &templates.labels;
    let fields: [(&str, String); 11] = [
        (l.name, escape_html(&profile.name)),
        (l.dob, escape_html(&profile.dob)),
        (l.country, escape_html(&profile.country)),
        (l.gender, escape_html(&profile.gender)),
        (l.age, profile.age.to_string()),
        (l.height, format!("{} cm", escape_html(&profile.height))),
        (l.weight, format!("{} kg", escape_html(&profile.weight))),
        (l.concern, escape_html(&profile.concern)),
        (l.notes, escape_html(&profile.notes)),
        (l.referrer, escape_html(&profile.referrer)),
        (l.angel, escape_html(&profile.angel)),
    ];

    let mut html = format!(
        "<h4 style='text-align:center;font-size:24px;'>{}</h4><br>",
        templates.report_title
    );
    for (label, value) in &fields {
        let _ = write!(html, "<strong>{label}:</strong> {value}<br>");
    }
    let _ = write!(
        html,
        "<br>{}<br>{}<br>{}<br>{}",
        sections.summary, sections.creative, sections.metrics, sections.footer
    );
    html
}
