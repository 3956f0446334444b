//! Per-source scraping: render a page and pattern-match rating and
//! review-count shapes out of its visible text.
//!
//! These are best-effort regexes over arbitrary third-party HTML; a miss is
//! normal and the caller just drops the source.

use beanscan_browser::PageRenderer;
use beanscan_core::BeanScanError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

/// One source's scraped numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedRating {
    pub rating: f32,
    pub review_count: u32,
    pub url: String,
}

/// `4.6 out of 5`, `4.6/5`
static RATING_OUT_OF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d(?:\.\d)?)\s*(?:out of|/)\s*5\b").unwrap());

/// `★ 4.6`, `⭐4.6`
static STAR_RATING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[★⭐]\s*(\d(?:\.\d)?)").unwrap());

/// `4.6 stars`
static STARS_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d(?:\.\d)?)\s*stars?\b").unwrap());

/// `1,234 reviews`, `87 ratings`, `12 customer reviews`
static REVIEW_COUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\d,]+)\s*(?:customer\s+|global\s+)?(?:reviews|ratings)\b").unwrap()
});

/// Scrape one source URL.
pub async fn scrape_source(
    renderer: &PageRenderer,
    url: &str,
) -> Result<ScrapedRating, BeanScanError> {
    let html = renderer.render(url).await.map_err(|e| BeanScanError::ScrapeFailed {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let text = visible_text(&html);
    let rating = extract_rating(&text).ok_or_else(|| BeanScanError::ScrapeFailed {
        url: url.to_string(),
        message: "no rating pattern in page text".into(),
    })?;
    let review_count = extract_review_count(&text).unwrap_or(0);

    debug!(url, rating, review_count, "scraped source");
    Ok(ScrapedRating { rating, review_count, url: url.to_string() })
}

/// Page text as a reader would see it: tags stripped, script/style dropped,
/// whitespace collapsed.
pub fn visible_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut out = String::new();
    collect_text(doc.root_element(), &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    if matches!(el.value().name(), "script" | "style" | "noscript") {
        return;
    }
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_el) = ElementRef::wrap(child) {
            collect_text(child_el, out);
        }
    }
}

/// First plausible star rating in the text, in (0, 5].
pub fn extract_rating(text: &str) -> Option<f32> {
    for re in [&*RATING_OUT_OF_RE, &*STAR_RATING_RE, &*STARS_WORD_RE] {
        for caps in re.captures_iter(text) {
            if let Ok(r) = caps[1].parse::<f32>() {
                if r > 0.0 && r <= 5.0 {
                    return Some(r);
                }
            }
        }
    }
    None
}

/// First review/rating count in the text.
pub fn extract_review_count(text: &str) -> Option<u32> {
    let caps = REVIEW_COUNT_RE.captures(text)?;
    caps[1].replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_out_of_five_rating() {
        assert_eq!(extract_rating("Rated 4.6 out of 5 by customers"), Some(4.6));
        assert_eq!(extract_rating("Score: 4.2/5"), Some(4.2));
    }

    #[test]
    fn extracts_star_glyph_rating() {
        assert_eq!(extract_rating("★ 4.8 · bestseller"), Some(4.8));
    }

    #[test]
    fn rejects_out_of_range_rating() {
        assert_eq!(extract_rating("9.9 out of 5 nonsense"), None);
    }

    #[test]
    fn extracts_review_count_with_commas() {
        assert_eq!(extract_review_count("1,234 reviews"), Some(1234));
        assert_eq!(extract_review_count("87 customer ratings"), Some(87));
    }

    #[test]
    fn visible_text_skips_script_and_tags() {
        let html = r#"<html><head><script>var x = "5 stars";</script></head>
            <body><h1>Colombia</h1><p>4.6 out of 5 — 120 reviews</p></body></html>"#;
        let text = visible_text(html);
        assert!(text.contains("Colombia"));
        assert!(text.contains("4.6 out of 5"));
        assert!(!text.contains("var x"));
    }

    #[test]
    fn full_page_extraction() {
        let html = r#"<html><body>
            <div class="rating">4.4 out of 5</div>
            <span>210 reviews</span>
        </body></html>"#;
        let text = visible_text(html);
        assert_eq!(extract_rating(&text), Some(4.4));
        assert_eq!(extract_review_count(&text), Some(210));
    }
}
