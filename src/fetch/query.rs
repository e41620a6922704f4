// src/fetch/query.rs
// =============================================================================
// Builds the query path for the seed term.
//
// Only the seed needs this. Every later query path comes straight from the
// href of a related-search link.
//
// Examples:
//   "#rustlang"     -> "/hashtag/rustlang"
//   "rust language" -> "/search?q=rust+language"
// =============================================================================

use url::form_urlencoded;

/// Returns the query path that fetches the related searches of `seed`.
pub fn query_for_seed(seed: &str) -> String {
    match seed.strip_prefix('#') {
        Some(tag) => format!("/hashtag/{}", encode(tag)),
        None => format!("/search?q={}", encode(seed)),
    }
}

// Percent-encodes a term for use in a query path
fn encode(term: &str) -> String {
    form_urlencoded::byte_serialize(term.as_bytes()).collect()
}
