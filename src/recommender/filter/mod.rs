//! Post-retrieval narrowing by category and by location.
//!
//! Both filters look at the raw user query, not the expanded one, and fall
//! back to the unfiltered head of their input rather than returning nothing.


use tracing::debug;

use super::document::IndexedDocument;

pub const DEFAULT_FILTER_LIMIT: usize = 10;

/// Category label → keywords matched against both query and metadata.
/// Only the first category mentioned by the query is used.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("한식", &["한식"]),
    ("중식", &["중식", "중국"]),
    ("일식", &["일식", "일본"]),
    ("양식", &["양식", "서양"]),
    ("카페", &["카페", "커피"]),
    ("치킨", &["치킨"]),
    ("피자", &["피자"]),
    ("분식", &["분식"]),
];

/// Query substrings that signal a location constraint, in scan order
pub const LOCATION_TRIGGERS: [&str; 8] = ["구", "동", "로", "길", "장안", "권선", "팔달", "영통"];

/// Canonical address term for a location trigger
#[inline]
pub fn resolve_location_trigger(trigger: &str) -> &str {
    match trigger {
        "장안" => "장안구",
        "권선" => "권선구",
        "팔달" => "팔달구",
        "영통" => "영통구",
        other => other,
    }
}

/// Address terms implied by a raw query; duplicates are kept
#[inline]
pub fn location_terms(raw_query: &str) -> Vec<&'static str> {
    LOCATION_TRIGGERS
        .into_iter()
        .filter(|trigger| raw_query.contains(trigger))
        .map(resolve_location_trigger)
        .collect()
}

/// Keep documents whose category matches the first category named in the query
#[inline]
pub fn filter_by_category<'a>(
    docs: &[&'a IndexedDocument],
    raw_query: &str,
    limit: usize,
) -> Vec<&'a IndexedDocument> {
    let matched = CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| raw_query.contains(kw)));

    let Some((label, keywords)) = matched else {
        debug!("No category in query, keeping first {} of {}", limit, docs.len());
        return head(docs, limit);
    };

    let filtered: Vec<&IndexedDocument> = docs
        .iter()
        .copied()
        .filter(|doc| keywords.iter().any(|kw| doc.metadata.category.contains(kw)))
        .take(limit)
        .collect();

    if filtered.is_empty() {
        debug!("Category {} matched no documents, falling back", label);
        head(docs, limit)
    } else {
        debug!("Category {} kept {} documents", label, filtered.len());
        filtered
    }
}

/// Keep documents whose address contains any location term from the query
#[inline]
pub fn filter_by_location<'a>(
    docs: &[&'a IndexedDocument],
    raw_query: &str,
    limit: usize,
) -> Vec<&'a IndexedDocument> {
    let terms = location_terms(raw_query);
    if terms.is_empty() {
        return head(docs, limit);
    }

    let filtered: Vec<&IndexedDocument> = docs
        .iter()
        .copied()
        .filter(|doc| terms.iter().any(|term| doc.metadata.address.contains(term)))
        .take(limit)
        .collect();

    if filtered.is_empty() {
        debug!("Location terms {:?} matched no documents, falling back", terms);
        head(docs, limit)
    } else {
        debug!("Location terms {:?} kept {} documents", terms, filtered.len());
        filtered
    }
}

fn head<'a>(docs: &[&'a IndexedDocument], limit: usize) -> Vec<&'a IndexedDocument> {
    docs.iter().copied().take(limit).collect()
}
