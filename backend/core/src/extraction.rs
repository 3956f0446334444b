//! The coffee extraction record: a flat bag of optional attributes read off
//! a coffee bag label. Built once per scan and discarded.

use serde::{Deserialize, Serialize};

/// Structured metadata extracted from a coffee-bag photo.
///
/// Every field is optional; the vision model fills whatever the label shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoffeeExtraction {
    pub roaster: Option<String>,
    pub product_name: Option<String>,
    pub origin: Option<String>,
    pub region: Option<String>,
    pub varietal: Option<String>,
    /// Washed, natural, honey, anaerobic...
    pub processing_method: Option<String>,
    pub roast_level: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flavor_notes: Vec<String>,
    pub altitude: Option<String>,
    pub harvest_year: Option<String>,
    pub price: Option<String>,
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub brew_recommendations: Vec<String>,
}

/// Number of attribute slots, used for confidence scoring.
pub const FIELD_COUNT: usize = 13;

impl CoffeeExtraction {
    /// The fixed record substituted when nothing could be extracted.
    pub fn unable_to_extract() -> Self {
        Self {
            product_name: Some("Unable to extract".to_string()),
            ..Default::default()
        }
    }

    /// Count of populated attribute slots.
    pub fn populated_field_count(&self) -> usize {
        let mut n = 0;
        let opts = [
            &self.roaster,
            &self.product_name,
            &self.origin,
            &self.region,
            &self.varietal,
            &self.processing_method,
            &self.roast_level,
            &self.altitude,
            &self.harvest_year,
            &self.price,
            &self.weight,
        ];
        for o in opts {
            if o.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false) {
                n += 1;
            }
        }
        if !self.flavor_notes.is_empty() {
            n += 1;
        }
        if !self.brew_recommendations.is_empty() {
            n += 1;
        }
        n
    }

    /// True when no field carries data at all.
    pub fn is_empty(&self) -> bool {
        self.populated_field_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(CoffeeExtraction::default().is_empty());
    }

    #[test]
    fn counts_populated_fields() {
        let ex = CoffeeExtraction {
            roaster: Some("Heart".into()),
            origin: Some("Ethiopia".into()),
            flavor_notes: vec!["blueberry".into(), "cocoa".into()],
            ..Default::default()
        };
        assert_eq!(ex.populated_field_count(), 3);
    }

    #[test]
    fn whitespace_only_does_not_count() {
        let ex = CoffeeExtraction {
            roaster: Some("   ".into()),
            ..Default::default()
        };
        assert!(ex.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let ex = CoffeeExtraction {
            product_name: Some("Colombia Huila".into()),
            roast_level: Some("medium".into()),
            ..Default::default()
        };
        let v = serde_json::to_value(&ex).unwrap();
        assert_eq!(v["productName"], "Colombia Huila");
        assert_eq!(v["roastLevel"], "medium");
    }

    #[test]
    fn deserializes_partial_object() {
        let ex: CoffeeExtraction =
            serde_json::from_str(r#"{"roaster": "Onyx", "flavorNotes": ["peach"]}"#).unwrap();
        assert_eq!(ex.roaster.as_deref(), Some("Onyx"));
        assert_eq!(ex.flavor_notes, vec!["peach"]);
        assert!(ex.origin.is_none());
    }
}
