//! Tolerant metrics extraction.
//!
//! Scans text line by line with a single "current group" accumulator:
//!
//! - a `###` line flushes the accumulator and opens a new group
//! - a line with a colon becomes an indicator (`label: value`)
//! - anything else is prose and is skipped
//!
//! Extraction never fails. Missing or out-of-range numbers are replaced by
//! [`ExtractorOptions::missing_value`], and an input with no complete group
//! yields the caller's fallback set.

use std::sync::LazyLock;

use regex::Regex;

use super::{Indicator, MetricGroup, MAX_INDICATOR_VALUE};

/// Prefix that opens a new metric group.
pub const SECTION_MARKER: &str = "###";

/// Value used when an indicator line carries no usable number.
pub const DEFAULT_INDICATOR_VALUE: u8 = 50;

/// Leading characters models use for list items.
const BULLETS: &[char] = &['-', '•', '*', '+', '·', '–'];

/// Markdown emphasis wrapped around labels (`**Energy**`).
const EMPHASIS: &[char] = &['*', '_', '`'];

/// ASCII or fullwidth decimal digits; other scripts are treated as prose.
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9０-９]+").expect("digit-run pattern is a valid regex"));

/// Tuning knobs for [`extract_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorOptions {
    /// Substituted for missing, unparseable or out-of-range values.
    pub missing_value: u8,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            missing_value: DEFAULT_INDICATOR_VALUE,
        }
    }
}

impl ExtractorOptions {
    /// Options with a custom default, clamped into `0..=100`.
    pub fn with_missing_value(missing_value: u8) -> Self {
        Self {
            missing_value: missing_value.min(MAX_INDICATOR_VALUE),
        }
    }
}

/// Extract metric groups from `content`, or return `fallback` if none are complete.
pub fn extract(content: &str, fallback: &[MetricGroup]) -> Vec<MetricGroup> {
    extract_with(content, fallback, ExtractorOptions::default())
}

/// [`extract`] with an explicit default value policy.
pub fn extract_with(
    content: &str,
    fallback: &[MetricGroup],
    options: ExtractorOptions,
) -> Vec<MetricGroup> {
    let mut groups = Vec::new();
    let mut current = Accumulator::default();

    for line in content.lines() {
        let line = line.trim();

        if let Some(title) = section_title(line) {
            current.flush_into(&mut groups);
            current.title = title.to_string();
        } else if let Some(indicator) = parse_indicator(line, options) {
            current.indicators.push(indicator);
        }
    }
    current.flush_into(&mut groups);

    if groups.is_empty() {
        tracing::debug!(
            content_len = content.len(),
            fallback_groups = fallback.len(),
            "No complete metric groups found, using fallback set"
        );
        return fallback.to_vec();
    }

    groups
}

/// The group under construction.
#[derive(Default)]
struct Accumulator {
    title: String,
    indicators: Vec<Indicator>,
}

impl Accumulator {
    /// Append the group if complete, then reset either way.
    fn flush_into(&mut self, groups: &mut Vec<MetricGroup>) {
        let group = MetricGroup {
            title: std::mem::take(&mut self.title),
            indicators: std::mem::take(&mut self.indicators),
        };
        if group.is_complete() {
            groups.push(group);
        }
    }
}

/// Title of a section-marker line, or `None` for any other line.
fn section_title(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(SECTION_MARKER)?;
    Some(rest.trim_start_matches('#').trim())
}

/// Parse `label: value` on the first ASCII or fullwidth colon. `None` means
/// "ignore this line".
fn parse_indicator(line: &str, options: ExtractorOptions) -> Option<Indicator> {
    let (raw_label, raw_value) = line.split_once([':', '：'])?;

    let label = clean_label(raw_label);
    if label.is_empty() {
        return None;
    }

    Some(Indicator::new(label, parse_value(raw_value, options)))
}

fn clean_label(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches(|c: char| BULLETS.contains(&c) || c.is_whitespace())
        .trim_matches(|c: char| EMPHASIS.contains(&c) || c.is_whitespace())
}

fn digit_value(c: char) -> Option<u32> {
    match c {
        '０'..='９' => Some(u32::from(c) - u32::from('０')),
        _ => c.to_digit(10),
    }
}

/// First run of digits, if it fits the percentage range.
fn parse_value(raw: &str, options: ExtractorOptions) -> u8 {
    DIGIT_RUN
        .find(raw)
        .and_then(|m| {
            m.as_str()
                .chars()
                .try_fold(0u32, |acc, c| acc.checked_mul(10)?.checked_add(digit_value(c)?))
        })
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| *v <= MAX_INDICATOR_VALUE)
        .unwrap_or(options.missing_value)
}

// ============================================================================
// Tests
// ============================================================================
