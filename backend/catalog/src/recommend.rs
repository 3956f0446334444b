//! Brew recommender: fill in brew suggestions when the bag shows none.

use tracing::debug;

/// Recommend brew methods for a roast level.
///
/// MOCK: static table keyed on roast level; a real recommender would weigh
/// origin, processing, and user history.
pub fn brew_recommendations(roast_level: Option<&str>) -> Vec<String> {
    let level = roast_level.unwrap_or("").to_lowercase();
    debug!(roast_level = %level, "generating brew recommendations");

    let picks: &[&str] = if level.contains("light") {
        &["Pour-over (V60), 1:16, medium-fine grind", "Aeropress, inverted, 1:15"]
    } else if level.contains("dark") || level.contains("french") || level.contains("espresso") {
        &["Espresso, 1:2, 27-30s", "Moka pot, medium grind"]
    } else {
        &["Drip, 1:16, medium grind", "French press, 1:15, coarse grind, 4 min"]
    };

    picks.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_roast_gets_pourover() {
        let recs = brew_recommendations(Some("Light"));
        assert!(recs.iter().any(|r| r.contains("Pour-over")));
    }

    #[test]
    fn dark_roast_gets_espresso() {
        let recs = brew_recommendations(Some("medium-dark"));
        assert!(recs.iter().any(|r| r.contains("Espresso")));
    }

    #[test]
    fn unknown_roast_gets_defaults() {
        let recs = brew_recommendations(None);
        assert!(!recs.is_empty());
    }
}
