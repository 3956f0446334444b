//! Roaster matcher: normalize a scanned roaster name against known roasters.

use tracing::debug;

/// Small seed list until a real roaster database is wired up.
const KNOWN_ROASTERS: &[&str] = &[
    "Heart Roasters",
    "Onyx Coffee Lab",
    "Sey Coffee",
    "Counter Culture Coffee",
    "Intelligentsia",
    "Stumptown Coffee Roasters",
    "Blue Bottle Coffee",
    "Verve Coffee Roasters",
    "George Howell Coffee",
    "Ruby Coffee Roasters",
];

/// A (possibly unmatched) roaster lookup result.
#[derive(Debug, Clone, PartialEq)]
pub struct RoasterMatch {
    pub canonical_name: String,
    pub match_confidence: f32,
}

pub struct RoasterMatcher;

/// Shortest scanned fragment allowed to canonicalize via substring match;
/// generic words like "Coffee" must not rewrite the scanned name.
const MIN_PARTIAL_LEN: usize = 8;

impl RoasterMatcher {
    /// Match a scanned name against the known-roaster list.
    pub fn match_name(scanned: &str) -> RoasterMatch {
        let needle = scanned.trim().to_lowercase();
        debug!(scanned, "matching roaster name");

        if needle.is_empty() {
            return RoasterMatch { canonical_name: String::new(), match_confidence: 0.0 };
        }

        for known in KNOWN_ROASTERS {
            let hay = known.to_lowercase();
            if hay == needle
                || (needle.len() >= MIN_PARTIAL_LEN && hay.contains(&needle))
                || needle.contains(&hay)
            {
                // MOCK: fixed confidence until a real similarity score exists.
                return RoasterMatch {
                    canonical_name: known.to_string(),
                    match_confidence: 0.92,
                };
            }
        }

        RoasterMatch {
            canonical_name: scanned.trim().to_string(),
            match_confidence: 0.4,
        }
    }
}
