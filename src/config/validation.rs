//! Config validation: unknown-key detection with Levenshtein suggestions.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

/// A non-fatal config warning (typo, misplaced secret).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of `ServiceConfig`, sorted.
///
/// Maintained by hand to match the structs in service_config.rs.
pub const KNOWN_CONFIG_KEYS: &[&str] = &[
    "llm",
    "llm.base_url",
    "llm.creative_temperature",
    "llm.max_tokens",
    "llm.metrics_temperature",
    "llm.model",
    "llm.summary_temperature",
    "llm.timeout_secs",
    "metrics",
    "metrics.missing_value",
    "server",
    "server.addr",
    "server.cors_origins",
    "server.max_body_bytes",
    "smtp",
    "smtp.enabled",
    "smtp.host",
    "smtp.port",
    "smtp.recipient",
    "smtp.timeout_secs",
    "smtp.username",
];

/// Keys that must come from the environment instead.
const SECRET_KEYS: &[(&str, &str)] = &[
    ("llm.api_key", "OPENAI_API_KEY"),
    ("smtp.password", "SMTP_PASSWORD"),
];

// ============================================================================
// Key Walking
// ============================================================================

/// Collect every dotted key path present in a TOML value.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Closest known key within edit distance 3; ties go to the first in sort order.
pub fn suggest_correction(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(k, _)| k.to_string())
}

/// Warn about unknown keys and secrets placed in the file.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let mut warnings = Vec::new();

    for key in walk_toml_keys(&value, "") {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }

        if let Some((_, env)) = SECRET_KEYS.iter().find(|(k, _)| *k == key) {
            warnings.push(ValidationWarning {
                message: format!("Config key '{key}' is ignored; set {env} in the environment"),
                field: key,
                suggestion: None,
            });
            continue;
        }

        let suggestion = suggest_correction(&key, KNOWN_CONFIG_KEYS);
        warnings.push(ValidationWarning {
            message: format!("Unknown config key '{key}'"),
            field: key,
            suggestion,
        });
    }

    warnings
}
