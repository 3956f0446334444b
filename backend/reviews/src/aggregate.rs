//! Aggregation over the handful of sources that scraped successfully:
//! count-weighted average rating plus a synthetic star histogram.

use beanscan_core::{RatingDistribution, ReviewSummary};

use crate::scrape::ScrapedRating;

/// Count-weighted average; a source with no visible count still carries
/// weight 1 so it is not silently dropped.
pub fn weighted_average(sources: &[ScrapedRating]) -> f32 {
    if sources.is_empty() {
        return 0.0;
    }
    let mut weight_sum = 0.0f64;
    let mut rating_sum = 0.0f64;
    for s in sources {
        let weight = s.review_count.max(1) as f64;
        weight_sum += weight;
        rating_sum += s.rating as f64 * weight;
    }
    // One decimal place, like the sites we scrape display.
    ((rating_sum / weight_sum) * 10.0).round() as f32 / 10.0
}

/// Derive a plausible star histogram around `average` whose buckets sum to
/// exactly `total`. Mass falls off with distance from the average; any
/// rounding remainder lands in the bucket nearest the average.
pub fn synth_distribution(average: f32, total: u32) -> RatingDistribution {
    let mut dist = RatingDistribution::default();
    if total == 0 {
        return dist;
    }

    let weights: Vec<f64> = (1..=5)
        .map(|star| {
            let d = (star as f64 - average as f64).abs();
            1.0 / (1.0 + d).powi(3)
        })
        .collect();
    let weight_sum: f64 = weights.iter().sum();

    let mut counts = [0u32; 5];
    let mut assigned = 0u32;
    for (i, w) in weights.iter().enumerate() {
        let c = ((total as f64) * w / weight_sum).floor() as u32;
        counts[i] = c;
        assigned += c;
    }
    // Remainder to the bucket nearest the average.
    let peak = (average.round().clamp(1.0, 5.0) as usize) - 1;
    counts[peak] += total - assigned;

    dist.one = counts[0];
    dist.two = counts[1];
    dist.three = counts[2];
    dist.four = counts[3];
    dist.five = counts[4];
    dist
}

/// Build the summary for scraped data.
pub fn aggregate(sources: &[ScrapedRating], product_page: Option<String>) -> ReviewSummary {
    let average = weighted_average(sources);
    // Counts come out of third-party HTML; sum wide and saturate.
    let mut total = sources
        .iter()
        .map(|s| s.review_count as u64)
        .sum::<u64>()
        .min(u32::MAX as u64) as u32;
    if total == 0 {
        // Ratings were visible but counts were not.
        total = sources.len() as u32;
    }

    ReviewSummary {
        total_reviews: total,
        average_rating: average,
        rating_distribution: synth_distribution(average, total),
        recent_reviews: Vec::new(),
        product_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(rating: f32, count: u32) -> ScrapedRating {
        ScrapedRating { rating, review_count: count, url: "https://x.example".into() }
    }

    #[test]
    fn weighted_average_leans_toward_bigger_source() {
        let avg = weighted_average(&[src(5.0, 90), src(3.0, 10)]);
        assert!((avg - 4.8).abs() < 0.01, "got {avg}");
    }

    #[test]
    fn average_between_min_and_max() {
        let sources = [src(4.1, 10), src(4.9, 25), src(3.8, 0)];
        let avg = weighted_average(&sources);
        assert!(avg >= 3.8 && avg <= 4.9);
    }

    #[test]
    fn zero_count_sources_still_count() {
        let avg = weighted_average(&[src(4.0, 0), src(5.0, 0)]);
        assert!((avg - 4.5).abs() < 0.01);
    }

    #[test]
    fn distribution_sums_to_total() {
        for (avg, total) in [(4.6, 123), (1.2, 7), (3.0, 1), (5.0, 10_000), (4.4, 2)] {
            let d = synth_distribution(avg, total);
            assert_eq!(d.total(), total, "avg={avg} total={total}");
        }
    }

    #[test]
    fn distribution_peaks_near_average() {
        let d = synth_distribution(4.7, 1000);
        assert!(d.five >= d.four);
        assert!(d.four >= d.three);
        assert!(d.one <= d.two);
    }

    #[test]
    fn zero_total_distribution_is_empty() {
        assert_eq!(synth_distribution(4.5, 0).total(), 0);
    }

    #[test]
    fn aggregate_summary_is_consistent() {
        let sources = [src(4.5, 100), src(4.0, 50)];
        let summary = aggregate(&sources, Some("https://shop.example/p".into()));
        assert_eq!(summary.total_reviews, 150);
        assert_eq!(summary.rating_distribution.total(), summary.total_reviews);
        assert!(summary.average_rating > 4.0 && summary.average_rating < 4.6);
        assert_eq!(summary.product_page.as_deref(), Some("https://shop.example/p"));
    }

    #[test]
    fn absurd_scraped_counts_saturate_instead_of_wrapping() {
        let sources = [src(4.5, u32::MAX), src(4.0, u32::MAX)];
        let summary = aggregate(&sources, None);
        assert_eq!(summary.total_reviews, u32::MAX);
        assert_eq!(summary.rating_distribution.total(), u32::MAX);
    }

    #[test]
    fn aggregate_without_counts_uses_source_count() {
        let sources = [src(4.5, 0), src(4.0, 0)];
        let summary = aggregate(&sources, None);
        assert_eq!(summary.total_reviews, 2);
        assert_eq!(summary.rating_distribution.total(), 2);
    }
}
