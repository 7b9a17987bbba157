use super::{FieldLabels, PromptContext, TemplateSet};

pub(super) static TEMPLATES: TemplateSet = TemplateSet {
    email_subject: "Your Health Insight Report",
    report_title: "🎉 Global Health Insights",
    summary_heading: "🧠 Summary:",
    creative_heading: "💡 Creative Suggestions:",
    metrics_heading: "📊 Health Metrics:",
    disclaimer: "🛡️ Disclaimer:<br>🩺 This platform offers general lifestyle suggestions. \
                 Please consult a licensed medical professional for diagnosis or treatment decisions.",
    no_details: "No additional details provided",
    unavailable: "⚠️ Unable to generate content",
    labels: FieldLabels {
        name: "👤 Name",
        dob: "🗓️ DOB",
        country: "🌍 Country",
        gender: "⚧️ Gender",
        age: "🎂 Age",
        height: "📏 Height",
        weight: "⚖️ Weight",
        concern: "📌 Concern",
        notes: "📝 Notes",
        referrer: "💬 Referrer",
        angel: "👼 Angel",
    },
    summary_prompt,
    creative_prompt,
    metrics_prompt,
    fallback_metrics: &[(
        "General Health",
        &[("Energy", 60), ("Sleep Quality", 60), ("Stress Balance", 60)],
    )],
};

fn summary_prompt(c: &PromptContext<'_>) -> String {
    format!(
        "{age}-year-old {gender} from {country} is facing '{concern}'. Additional details: {notes}.\n\
         Please write 4 factual and relevant insights in paragraph form using third person tone (avoid 'you').\n\
         Use global statistics, regional trends and clear outcomes if possible.",
        age = c.age,
        gender = c.gender,
        country = c.country,
        concern = c.concern,
        notes = c.notes,
    )
}

fn creative_prompt(c: &PromptContext<'_>) -> String {
    format!(
        "Please suggest 10 creative health habits for a {age}-year-old {gender} from {country} with '{concern}'. \
         Include emojis and brief explanations (e.g., '🥗 Eat broccoli: reduces inflammation'). \
         Keep each idea short and focused on lifestyle.",
        age = c.age,
        gender = c.gender,
        country = c.country,
        concern = c.concern,
    )
}

fn metrics_prompt(c: &PromptContext<'_>) -> String {
    format!(
        "Estimate health indicators for a {age}-year-old {gender} from {country} dealing with '{concern}' \
         (notes: {notes}), compared with peers of the same age and region.\n\
         Output exactly 3 sections. Start each section with a line '### <Section Title>', \
         followed by 3 lines in the form '<Indicator>: <NN>%'.\n\
         Use whole numbers between 0 and 100. No other text.",
        age = c.age,
        gender = c.gender,
        country = c.country,
        concern = c.concern,
        notes = c.notes,
    )
}
