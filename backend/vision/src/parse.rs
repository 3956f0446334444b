//! Model-reply cleanup and parsing.
//!
//! Vision models wrap JSON in markdown fences or lead with prose despite the
//! prompt. We strip that, try a clean parse, and fall back to pulling
//! individual fields out with regexes when the JSON is malformed.

use beanscan_core::{CoffeeExtraction, ProcessingMethod};
use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").unwrap());

/// `"key": "value"` fragments survive most malformed replies.
static KEY_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([A-Za-z]+)"\s*:\s*"([^"]*)""#).unwrap());

static ROAST_LEVEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(light|medium-light|medium-dark|medium|dark|french|espresso)\s+roast\b")
        .unwrap()
});

static NOTES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:tasting|flavou?r)\s+notes?\s*(?:of|:)?\s*([^.\n]+)").unwrap()
});

/// Producing countries commonly printed on bags; used only by the fallback.
static ORIGINS: &[&str] = &[
    "Ethiopia", "Colombia", "Kenya", "Brazil", "Guatemala", "Honduras",
    "Costa Rica", "El Salvador", "Peru", "Rwanda", "Burundi", "Indonesia",
    "Sumatra", "Yemen", "Panama", "Mexico", "Nicaragua", "Uganda", "Vietnam",
];

/// Strip markdown fences and surrounding chatter down to the JSON object.
pub fn clean_response_text(raw: &str) -> String {
    let text = match FENCE_RE.captures(raw) {
        Some(caps) => caps[1].to_string(),
        None => raw.to_string(),
    };
    // Drop any prose before the first `{` and after the last `}`.
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => text[start..=end].to_string(),
        _ => text.trim().to_string(),
    }
}

/// Parse a model reply into an extraction record plus how we got it.
pub fn parse_response(raw: &str) -> (CoffeeExtraction, ProcessingMethod) {
    let cleaned = clean_response_text(raw);
    if let Ok(extraction) = serde_json::from_str::<CoffeeExtraction>(&cleaned) {
        return (extraction, ProcessingMethod::VisionLlm);
    }

    let fallback = fallback_extract(raw);
    if fallback.is_empty() {
        (CoffeeExtraction::unable_to_extract(), ProcessingMethod::Failed)
    } else {
        (fallback, ProcessingMethod::RegexFallback)
    }
}

/// Best-effort field extraction from a reply that did not parse as JSON.
pub fn fallback_extract(raw: &str) -> CoffeeExtraction {
    let mut ex = CoffeeExtraction::default();

    for caps in KEY_VALUE_RE.captures_iter(raw) {
        let value = caps[2].trim();
        if value.is_empty() {
            continue;
        }
        match caps[1].to_ascii_lowercase().as_str() {
            "roaster" => ex.roaster = Some(value.to_string()),
            "productname" => ex.product_name = Some(value.to_string()),
            "origin" => ex.origin = Some(value.to_string()),
            "region" => ex.region = Some(value.to_string()),
            "varietal" => ex.varietal = Some(value.to_string()),
            "processingmethod" => ex.processing_method = Some(value.to_string()),
            "roastlevel" => ex.roast_level = Some(value.to_string()),
            "altitude" => ex.altitude = Some(value.to_string()),
            "harvestyear" => ex.harvest_year = Some(value.to_string()),
            "price" => ex.price = Some(value.to_string()),
            "weight" => ex.weight = Some(value.to_string()),
            _ => {}
        }
    }

    if ex.roast_level.is_none() {
        if let Some(caps) = ROAST_LEVEL_RE.captures(raw) {
            ex.roast_level = Some(caps[1].to_lowercase());
        }
    }

    if ex.origin.is_none() {
        ex.origin = ORIGINS
            .iter()
            .find(|c| raw.to_lowercase().contains(&c.to_lowercase()))
            .map(|c| c.to_string());
    }

    if ex.flavor_notes.is_empty() {
        if let Some(caps) = NOTES_RE.captures(raw) {
            ex.flavor_notes = caps[1]
                .split(|c| c == ',' || c == '&')
                .flat_map(|part| part.split(" and "))
                .map(|s| s.trim().trim_end_matches('.').to_string())
                .filter(|s| !s.is_empty() && s.len() < 40)
                .collect();
        }
    }

    ex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let raw = "```json\n{\"roaster\": \"Heart\"}\n```";
        assert_eq!(clean_response_text(raw), "{\"roaster\": \"Heart\"}");
    }

    #[test]
    fn strips_leading_chatter() {
        let raw = "Sure! Here is the data: {\"origin\": \"Kenya\"} hope that helps";
        assert_eq!(clean_response_text(raw), "{\"origin\": \"Kenya\"}");
    }

    #[test]
    fn clean_parse_is_vision_llm() {
        let raw = "```json\n{\"roaster\": \"Onyx\", \"flavorNotes\": [\"peach\", \"honey\"]}\n```";
        let (ex, method) = parse_response(raw);
        assert_eq!(method, ProcessingMethod::VisionLlm);
        assert_eq!(ex.roaster.as_deref(), Some("Onyx"));
        assert_eq!(ex.flavor_notes.len(), 2);
    }

    #[test]
    fn malformed_json_uses_regex_fallback() {
        // Trailing comma breaks the parse, fragments survive.
        let raw = r#"{"roaster": "Sey", "origin": "Ethiopia", badtoken,}"#;
        let (ex, method) = parse_response(raw);
        assert_eq!(method, ProcessingMethod::RegexFallback);
        assert_eq!(ex.roaster.as_deref(), Some("Sey"));
        assert_eq!(ex.origin.as_deref(), Some("Ethiopia"));
    }

    #[test]
    fn prose_reply_falls_back_to_keywords() {
        let raw = "The bag shows a medium roast coffee from Colombia with tasting notes of chocolate, caramel and orange.";
        let (ex, method) = parse_response(raw);
        assert_eq!(method, ProcessingMethod::RegexFallback);
        assert_eq!(ex.roast_level.as_deref(), Some("medium"));
        assert_eq!(ex.origin.as_deref(), Some("Colombia"));
        assert_eq!(ex.flavor_notes, vec!["chocolate", "caramel", "orange"]);
    }

    #[test]
    fn hopeless_reply_yields_placeholder() {
        let (ex, method) = parse_response("I cannot see anything in this picture.");
        assert_eq!(method, ProcessingMethod::Failed);
        assert_eq!(ex.product_name.as_deref(), Some("Unable to extract"));
    }
}
