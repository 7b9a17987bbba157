use super::{FieldLabels, PromptContext, TemplateSet};

pub(super) static TEMPLATES: TemplateSet = TemplateSet {
    email_subject: "您的健康洞察报告",
    report_title: "🎉 全球健康洞察",
    summary_heading: "🧠 摘要：",
    creative_heading: "💡 创意建议：",
    metrics_heading: "📊 健康指标：",
    disclaimer: "🛡️ 免责声明：<br>🩺 本平台提供一般健康建议，如有需要请咨询专业医生。",
    no_details: "无补充说明",
    unavailable: "⚠️ 无法生成内容",
    labels: FieldLabels {
        name: "👤 姓名",
        dob: "🗓️ 出生日期",
        country: "🌍 国家",
        gender: "⚧️ 性别",
        age: "🎂 年龄",
        height: "📏 身高",
        weight: "⚖️ 体重",
        concern: "📌 健康问题",
        notes: "📝 补充说明",
        referrer: "💬 推荐人",
        angel: "👼 天使",
    },
    summary_prompt,
    creative_prompt,
    metrics_prompt,
    fallback_metrics: &[("整体健康", &[("精力", 60), ("睡眠质量", 60), ("压力平衡", 60)])],
};

fn summary_prompt(c: &PromptContext<'_>) -> String {
    format!(
        "一位{age}岁的{gender}来自{country}，主要健康问题为“{concern}”。补充说明：{notes}。\n\
         请以第三人称的方式撰写4段简洁明了的分析内容，引用全球趋势或相关统计，避免使用“你”。",
        age = c.age,
        gender = c.gender,
        country = c.country,
        concern = c.concern,
        notes = c.notes,
    )
}

fn creative_prompt(c: &PromptContext<'_>) -> String {
    format!(
        "请列出10个简洁有趣的健康生活习惯建议，适用于{country}一位{age}岁的{gender}，健康问题为“{concern}”。\
         每项建议加上Emoji和简短说明（例如：🥗 吃西兰花——有助于减缓炎症）。",
        age = c.age,
        gender = c.gender,
        country = c.country,
        concern = c.concern,
    )
}

fn metrics_prompt(c: &PromptContext<'_>) -> String {
    format!(
        "请为来自{country}的一位{age}岁{gender}（健康问题：“{concern}”，补充说明：{notes}）估算健康指标，\
         与同年龄、同地区人群比较。\n\
         请输出3个部分，每部分第一行为“### 标题”，随后3行格式为“指标名称: NN%”（使用英文冒号）。\n\
         数值为0到100的整数，不要输出其他内容。",
        age = c.age,
        gender = c.gender,
        country = c.country,
        concern = c.concern,
        notes = c.notes,
    )
}
