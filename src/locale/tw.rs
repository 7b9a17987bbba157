use super::{FieldLabels, PromptContext, TemplateSet};

pub(super) static TEMPLATES: TemplateSet = TemplateSet {
    email_subject: "您的健康洞察報告",
    report_title: "🎉 全球健康洞察",
    summary_heading: "🧠 摘要：",
    creative_heading: "💡 創意建議：",
    metrics_heading: "📊 健康指標：",
    disclaimer: "🛡️ 免責聲明：<br>🩺 本平台提供一般健康建議，如有需要請諮詢專業醫生。",
    no_details: "無補充說明",
    unavailable: "⚠️ 無法生成內容",
    labels: FieldLabels {
        name: "👤 姓名",
        dob: "🗓️ 出生日期",
        country: "🌍 國家",
        gender: "⚧️ 性別",
        age: "🎂 年齡",
        height: "📏 身高",
        weight: "⚖️ 體重",
        concern: "📌 健康困擾",
        notes: "📝 補充說明",
        referrer: "💬 推薦人",
        angel: "👼 天使",
    },
    summary_prompt,
    creative_prompt,
    metrics_prompt,
    fallback_metrics: &[("整體健康", &[("精力", 60), ("睡眠品質", 60), ("壓力平衡", 60)])],
};

fn summary_prompt(c: &PromptContext<'_>) -> String {
    format!(
        "這位{age}歲的{gender}來自{country}，健康困擾為「{concern}」。補充說明：{notes}。\n\
         請用第三人稱撰寫4段分析建議，包含真實資訊、趨勢與建議（請避免使用「你」）。",
        age = c.age,
        gender = c.gender,
        country = c.country,
        concern = c.concern,
        notes = c.notes,
    )
}

fn creative_prompt(c: &PromptContext<'_>) -> String {
    format!(
        "請提出10項實用、生活化的健康改善建議，適用於{country}一位{age}歲的{gender}，主要問題為「{concern}」。\
         每項建議使用emoji和簡潔說明（例如：🍅 吃番茄——有助於攝取茄紅素）。",
        age = c.age,
        gender = c.gender,
        country = c.country,
        concern = c.concern,
    )
}

fn metrics_prompt(c: &PromptContext<'_>) -> String {
    format!(
        "請為來自{country}的一位{age}歲{gender}（健康困擾：「{concern}」，補充說明：{notes}）估算健康指標，\
         並與同年齡、同地區族群比較。\n\
         請輸出3個部分，每部分第一行為「### 標題」，接著3行格式為「指標名稱: NN%」（使用半形冒號）。\n\
         數值為0到100的整數，不要輸出其他內容。",
        age = c.age,
        gender = c.gender,
        country = c.country,
        concern = c.concern,
        notes = c.notes,
    )
}
