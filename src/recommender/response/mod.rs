#[cfg(test)]
mod tests;

use itertools::Itertools;

use super::document::IndexedDocument;

pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;

/// Shown when the filtered candidate list is empty
pub const NO_MATCH_MESSAGE: &str = "죄송합니다. 검색 조건에 맞는 음식점을 찾을 수 없습니다.";

/// Format the final recommendation text.
///
/// Documents are deduplicated by restaurant name in first-seen order and
/// truncated to `max_results` before formatting. Empty metadata prints as
/// an empty value.
#[inline]
pub fn compose_response(query: &str, docs: &[&IndexedDocument], max_results: usize) -> String {
    if docs.is_empty() {
        return NO_MATCH_MESSAGE.to_string();
    }

    let top: Vec<&IndexedDocument> = docs
        .iter()
        .copied()
        .unique_by(|doc| doc.metadata.name.as_str())
        .take(max_results)
        .collect();

    let header = format!("'{query}' 검색 결과 ({}개 추천):\n", top.len());

    let entries = top.iter().enumerate().map(|(i, doc)| {
        let meta = &doc.metadata;
        format!(
            "{}. 🍽️ {} ({})\n   📍 {}\n   📞 {}\n",
            i + 1,
            meta.name,
            meta.category,
            meta.address,
            meta.phone,
        )
    });

    std::iter::once(header).chain(entries).join("\n")
}

