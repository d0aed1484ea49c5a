//! Restaurant records to indexable documents.
//!
//! The document text repeats name, category, address and location keywords in
//! an unlabeled trailing line so that short queries share more surface terms
//! with the text they should match.


use fancy_regex::Regex;
use itertools::Itertools;
use std::sync::LazyLock;
use tracing::debug;

use crate::data::RestaurantRecord;

const DISTRICTS: [&str; 4] = ["장안구", "권선구", "팔달구", "영통구"];
const CATEGORY_PADDING: &str = "음식점 식당 레스토랑";
const MAX_ROAD_KEYWORDS: usize = 2;

static NEIGHBORHOOD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[가-힣]+동").expect("regex is valid"));
static ROAD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[가-힣]+로").expect("regex is valid"));

/// Metadata stored next to each embedding; every field is always present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub name: String,
    pub category: String,
    pub address: String,
    pub phone: String,
    pub location_keywords: String,
}

/// One indexable unit per restaurant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDocument {
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl IndexedDocument {
    #[inline]
    pub fn from_record(record: &RestaurantRecord) -> Self {
        let name = record.name.trim();
        let category = record.category.trim();
        let address = record.address().trim();
        let phone = record.phone.trim();
        let keywords = extract_location_keywords(address);

        let content = format!(
            "업소명: {name}\n\
             업종: {category} {CATEGORY_PADDING}\n\
             주소: {address}\n\
             지역: {keywords}\n\
             전화번호: {phone}\n\
             \n\
             {name} {category} {address} {keywords}"
        );

        Self {
            content,
            metadata: DocumentMetadata {
                name: name.to_string(),
                category: category.to_string(),
                address: address.to_string(),
                phone: phone.to_string(),
                location_keywords: keywords,
            },
        }
    }
}

/// One document per record, in record order
#[inline]
pub fn build_documents(records: &[RestaurantRecord]) -> Vec<IndexedDocument> {
    let documents: Vec<IndexedDocument> = records.iter().map(IndexedDocument::from_record).collect();
    debug!("Built {} documents", documents.len());
    documents
}

/// District, every `…동` neighborhood and the first two `…로` roads in an
/// address, deduplicated in first-seen order and joined with spaces.
#[inline]
pub fn extract_location_keywords(address: &str) -> String {
    let district = DISTRICTS
        .iter()
        .filter_map(|district| address.find(district).map(|at| (at, *district)))
        .min_by_key(|(at, _)| *at)
        .map(|(_, district)| district.to_string());

    let neighborhoods = find_all(&NEIGHBORHOOD_PATTERN, address, usize::MAX);
    let roads = find_all(&ROAD_PATTERN, address, MAX_ROAD_KEYWORDS);

    district
        .into_iter()
        .chain(neighborhoods)
        .chain(roads)
        .unique()
        .join(" ")
}

fn find_all(pattern: &Regex, haystack: &str, limit: usize) -> Vec<String> {
    pattern
        .find_iter(haystack)
        .filter_map(Result::ok)
        .take(limit)
        .map(|m| m.as_str().to_string())
        .collect()
}
