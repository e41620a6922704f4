// src/fetch/html.rs
// =============================================================================
// This module extracts related searches from a search results page.
//
// The page lists them like this:
//
//   <ul class="AdaptiveRelatedSearches-items">
//     <li><a class="js-nav" href="/search?q=kittens&src=typd">
//       <strong>kittens</strong>
//     </a></li>
//     ...
//   </ul>
//
// For every link we keep:
// - the visible text, without inner markup ("kittens")
// - the href, without the trailing tracking parameter ("/search?q=kittens")
//
// Only the first list on the page is used.
// =============================================================================

use scraper::{Html, Selector};

use super::{RelatedSearches, MAX_RELATED};
use crate::error::FetchError;

const LIST_SELECTOR: &str = "ul.AdaptiveRelatedSearches-items";
const LINK_SELECTOR: &str = "a.js-nav";

/// Extracts up to five (name, query path) pairs from a results page.
///
/// Returns FetchError::MissingRelatedSearches when the list is absent or
/// contains no usable links.
pub fn extract_related_searches(html: &str) -> Result<RelatedSearches, FetchError> {
    let list_selector = parse_selector(LIST_SELECTOR)?;
    let link_selector = parse_selector(LINK_SELECTOR)?;

    let document = Html::parse_document(html);

    let list = document
        .select(&list_selector)
        .next()
        .ok_or(FetchError::MissingRelatedSearches)?;

    let mut related = RelatedSearches::default();

    for link in list.select(&link_selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        // text() walks every text node, so <strong> and friends disappear
        let name = link
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ");

        if name.is_empty() {
            continue;
        }

        related.names.push(name);
        related.queries.push(strip_tracking(href));

        if related.len() == MAX_RELATED {
            break;
        }
    }

    if related.is_empty() {
        return Err(FetchError::MissingRelatedSearches);
    }

    Ok(related)
}

fn parse_selector(selector: &str) -> Result<Selector, FetchError> {
    Selector::parse(selector).map_err(|e| FetchError::Selector(format!("{selector}: {e}")))
}

// Removes the "src=..." tracking parameter the site appends to every link.
// Every other query parameter is kept, in its original order and encoding.
//
// Examples:
//   "/search?q=kittens&src=typd"  -> "/search?q=kittens"
//   "/hashtag/cats?src=hash"      -> "/hashtag/cats"
//   "/search?src=typd&q=cats"     -> "/search?q=cats"
//   "/search?q=dogs"              -> "/search?q=dogs"
fn strip_tracking(href: &str) -> String {
    let Some((path, query)) = href.split_once('?') else {
        return href.to_string();
    };

    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty() && *pair != "src" && !pair.starts_with("src="))
        .collect();

    if kept.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, kept.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: &str) -> String {
        format!(
            r#"<html><body>
                <div class="sidebar">
                    <ul class="AdaptiveRelatedSearches-items">{items}</ul>
                </div>
            </body></html>"#
        )
    }

    #[test]
    fn test_extracts_names_and_queries() {
        let html = page(
            r#"
            <li><a class="js-nav" href="/search?q=kittens&src=typd"><strong>kittens</strong></a></li>
            <li><a class="js-nav" href="/search?q=felines&src=typd">big <strong>felines</strong></a></li>
            "#,
        );

        let related = extract_related_searches(&html).unwrap();
        assert_eq!(related.names, vec!["kittens", "big felines"]);
        assert_eq!(related.queries, vec!["/search?q=kittens", "/search?q=felines"]);
    }

    #[test]
    fn test_keeps_at_most_five() {
        let items: String = (1..=7)
            .map(|i| format!(r#"<li><a class="js-nav" href="/search?q=t{i}&src=typd">t{i}</a></li>"#))
            .collect();

        let related = extract_related_searches(&page(&items)).unwrap();
        assert_eq!(related.len(), 5);
        assert_eq!(related.names.last().unwrap(), "t5");
    }

    #[test]
    fn test_missing_list_is_an_error() {
        let html = r#"<html><body><p>Nothing here</p></body></html>"#;
        let result = extract_related_searches(html);
        assert!(matches!(result, Err(FetchError::MissingRelatedSearches)));
    }

    #[test]
    fn test_list_without_links_is_an_error() {
        let html = page(r#"<li><a href="/search?q=x">not a nav link</a></li>"#);
        let result = extract_related_searches(&html);
        assert!(matches!(result, Err(FetchError::MissingRelatedSearches)));
    }

    #[test]
    fn test_strip_tracking() {
        assert_eq!(strip_tracking("/search?q=kittens&src=typd"), "/search?q=kittens");
        assert_eq!(strip_tracking("/hashtag/cats?src=hash"), "/hashtag/cats");
        assert_eq!(strip_tracking("/search?q=dogs"), "/search?q=dogs");
    }

    #[test]
    fn test_strip_tracking_keeps_other_parameters() {
        assert_eq!(strip_tracking("/search?src=typd&q=cats"), "/search?q=cats");
        assert_eq!(
            strip_tracking("/search?q=a&src=typd&f=live"),
            "/search?q=a&f=live"
        );
        assert_eq!(strip_tracking("/search?q=big%20cats&src=typd"), "/search?q=big%20cats");
        assert_eq!(strip_tracking("/search?source=web&q=x"), "/search?source=web&q=x");
    }

    #[test]
    fn test_leading_src_parameter_in_page() {
        let html = page(r#"<li><a class="js-nav" href="/search?src=typd&q=cats">cats</a></li>"#);
        let related = extract_related_searches(&html).unwrap();
        assert_eq!(related.queries, vec!["/search?q=cats"]);
    }
}
