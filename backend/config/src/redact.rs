//! Config redaction: produce safe-to-log config snapshots by masking
//! sensitive fields (API keys, tokens, secrets).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Field names whose string values are secrets.
static SENSITIVE_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "apikey",
    "openaiApiKey",
    "geminiApiKey",
    "googleSearchApiKey",
    "token",
    "secret",
    "password",
];

/// Bare secret shapes caught regardless of key name (e.g. `sk-...`).
static SECRET_VALUE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(sk|AIza)[A-Za-z0-9_\-]{8,}$").unwrap());

fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
        || lower.ends_with("apikey")
        || lower.ends_with("token")
        || lower.ends_with("secret")
}

fn redact_string(s: &str, key: &str) -> Value {
    if (is_sensitive_key(key) || SECRET_VALUE_PATTERN.is_match(s)) && !s.is_empty() {
        // Preserve a short prefix hint for debugging which key is loaded.
        let hint = if s.len() > 4 {
            format!("{}***", &s[..4])
        } else {
            "***".to_string()
        };
        return Value::String(hint);
    }
    Value::String(s.to_string())
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) => redact_string(s, key),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}

/// Redact a config JSON value, masking all sensitive fields.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_api_key_field() {
        let v = json!({ "openaiApiKey": "sk-abcdef123456" });
        let r = redact(&v);
        let key = r["openaiApiKey"].as_str().unwrap();
        assert!(key.ends_with("***"));
        assert!(!key.contains("abcdef"));
    }

    #[test]
    fn redacts_secret_shaped_value_under_any_key() {
        let v = json!({ "note": "sk-verysecretvalue" });
        let r = redact(&v);
        assert!(r["note"].as_str().unwrap().ends_with("***"));
    }

    #[test]
    fn passthrough_non_sensitive() {
        let v = json!({ "logLevel": "debug", "port": 8080 });
        let r = redact(&v);
        assert_eq!(r["logLevel"], "debug");
        assert_eq!(r["port"], 8080);
    }

    #[test]
    fn short_secret_fully_masked() {
        let v = json!({ "token": "abc" });
        let r = redact(&v);
        assert_eq!(r["token"], "***");
    }
}
