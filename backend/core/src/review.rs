//! Aggregated review data returned by `/api/reviews` and attached to scans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Star-count histogram. Buckets always sum to the total review count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    #[serde(rename = "1")]
    pub one: u32,
    #[serde(rename = "2")]
    pub two: u32,
    #[serde(rename = "3")]
    pub three: u32,
    #[serde(rename = "4")]
    pub four: u32,
    #[serde(rename = "5")]
    pub five: u32,
}

impl RatingDistribution {
    pub fn total(&self) -> u32 {
        self.one + self.two + self.three + self.four + self.five
    }
}

/// A single displayed review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub author: String,
    pub rating: f32,
    pub text: String,
    pub source: String,
    pub date: DateTime<Utc>,
}

/// Aggregated (or fabricated) review summary for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub total_reviews: u32,
    pub average_rating: f32,
    pub rating_distribution: RatingDistribution,
    pub recent_reviews: Vec<ReviewEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_page: Option<String>,
}
