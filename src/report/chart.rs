//! Horizontal bar chart for metric groups.

use std::fmt::Write as _;

use super::escape_html;
use crate::locale::TemplateSet;
use crate::metrics::{MetricGroup, MAX_INDICATOR_VALUE};

/// Bar colours, one per group, cycling.
const PALETTE: &[&str] = &["#5E9CA0", "#FF9F6B", "#9D8DF1", "#6BCB77", "#F4A261", "#4D96FF"];

/// Render each group as a titled block of percentage bars.
pub fn render_metrics(groups: &[MetricGroup], templates: &TemplateSet) -> String {
    let mut html = format!(
        "<div style='margin-top:20px;'><h3 style='font-size:24px;'>{}</h3>",
        templates.metrics_heading
    );

    for (idx, group) in groups.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let _ = write!(
            html,
            "<div style='margin-bottom:16px;'><strong style='font-size:18px;'>{}</strong><br>",
            escape_html(&group.title)
        );
        for indicator in &group.indicators {
            let value = indicator.value.min(MAX_INDICATOR_VALUE);
            let _ = write!(
                html,
                "<div style='display:flex;align-items:center;margin:6px 0;'>\
                 <span style='width:180px;'>{label}</span>\
                 <div style='flex:1;background:#eee;border-radius:5px;'>\
                 <div style='width:{value}%;background:{color};height:14px;border-radius:5px;'></div>\
                 </div>\
                 <span style='margin-left:10px;'>{value}%</span></div>",
                label = escape_html(&indicator.label),
            );
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}
