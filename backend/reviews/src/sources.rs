//! Candidate scrape sources: the discovered product page plus generated
//! URL guesses for common retailer patterns. At most three are tried.

/// Hard bound on concurrent scrape targets per request.
pub const MAX_SOURCES: usize = 3;

/// Lowercase, alphanumeric, hyphen-separated.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_dash = true;
    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

/// URL guesses for where this product's reviews might live.
pub fn url_guesses(roaster: &str, product_name: &str) -> Vec<String> {
    let roaster_slug = slugify(roaster);
    let product_slug = slugify(product_name);
    let query = format!("{roaster_slug}+{product_slug}+coffee");

    let mut guesses = Vec::new();
    if !roaster_slug.is_empty() && !product_slug.is_empty() {
        // Shopify storefront pattern most roasters use.
        guesses.push(format!(
            "https://www.{}.com/products/{}",
            roaster_slug.replace('-', ""),
            product_slug
        ));
    }
    guesses.push(format!("https://www.amazon.com/s?k={query}"));
    guesses.push(format!("https://www.tradecoffee.com/search?q={query}"));
    guesses
}

/// Final source list: discovered page first, guesses after, deduped,
/// truncated to [`MAX_SOURCES`].
pub fn build_sources(
    product_page: Option<&str>,
    roaster: &str,
    product_name: &str,
) -> Vec<String> {
    let mut sources = Vec::new();
    if let Some(page) = product_page {
        sources.push(page.to_string());
    }
    for guess in url_guesses(roaster, product_name) {
        if !sources.contains(&guess) {
            sources.push(guess);
        }
    }
    sources.truncate(MAX_SOURCES);
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Heart Roasters"), "heart-roasters");
        assert_eq!(slugify("  Colombia, Huila!  "), "colombia-huila");
    }

    #[test]
    fn slugify_collapses_runs() {
        assert_eq!(slugify("a -- b"), "a-b");
    }

    #[test]
    fn discovered_page_comes_first() {
        let sources = build_sources(Some("https://shop.example/p/1"), "Heart", "Colombia");
        assert_eq!(sources[0], "https://shop.example/p/1");
        assert_eq!(sources.len(), MAX_SOURCES);
    }

    #[test]
    fn at_most_three_sources() {
        let sources = build_sources(None, "Heart Roasters", "Colombia Huila");
        assert!(sources.len() <= MAX_SOURCES);
        assert!(sources[0].contains("heartroasters.com/products/colombia-huila"));
    }

    #[test]
    fn dedupes_discovered_page_matching_a_guess() {
        let guess = url_guesses("Heart", "Colombia").remove(0);
        let sources = build_sources(Some(&guess), "Heart", "Colombia");
        assert_eq!(sources.iter().filter(|s| **s == guess).count(), 1);
    }
}
