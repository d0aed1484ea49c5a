use super::*;
use crate::recommender::document::DocumentMetadata;

fn doc(name: &str, category: &str, address: &str, phone: &str) -> IndexedDocument {
    IndexedDocument {
        content: String::new(),
        metadata: DocumentMetadata {
            name: name.to_string(),
            category: category.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            location_keywords: String::new(),
        },
    }
}

#[test]
fn formats_header_and_entries() {
    let docs = [
        doc("장안한식", "한식", "수원시 장안구 연무동 1", "031-111-1111"),
        doc("영통치킨", "치킨", "수원시 영통구 매탄동 2", "031-222-2222"),
    ];
    let refs: Vec<&IndexedDocument> = docs.iter().collect();

    let response = compose_response("맛집", &refs, DEFAULT_MAX_RECOMMENDATIONS);

    let expected = "'맛집' 검색 결과 (2개 추천):\n\
                    \n\
                    1. 🍽️ 장안한식 (한식)\n   📍 수원시 장안구 연무동 1\n   📞 031-111-1111\n\
                    \n\
                    2. 🍽️ 영통치킨 (치킨)\n   📍 수원시 영통구 매탄동 2\n   📞 031-222-2222\n";
    assert_eq!(response, expected);
}

#[test]
fn duplicate_names_are_listed_once() {
    let docs = [
        doc("장안한식", "한식", "수원시 장안구 연무동 1", "031-111-1111"),
        doc("장안한식", "한식", "수원시 장안구 정자동 9", "031-999-9999"),
        doc("영통치킨", "치킨", "수원시 영통구 매탄동 2", "031-222-2222"),
    ];
    let refs: Vec<&IndexedDocument> = docs.iter().collect();

    let response = compose_response("맛집", &refs, DEFAULT_MAX_RECOMMENDATIONS);

    assert!(response.starts_with("'맛집' 검색 결과 (2개 추천):"));
    assert_eq!(response.matches("장안한식").count(), 1);
    // the first occurrence wins
    assert!(response.contains("연무동 1"));
    assert!(!response.contains("정자동 9"));
    assert!(response.contains("2. 🍽️ 영통치킨"));
}

#[test]
fn output_is_capped_at_max_results() {
    let docs: Vec<IndexedDocument> = (0..8)
        .map(|i| doc(&format!("식당{i}"), "한식", "수원시", "031"))
        .collect();
    let refs: Vec<&IndexedDocument> = docs.iter().collect();

    let response = compose_response("한식", &refs, DEFAULT_MAX_RECOMMENDATIONS);

    assert!(response.starts_with("'한식' 검색 결과 (5개 추천):"));
    assert!(response.contains("5. 🍽️ 식당4"));
    assert!(!response.contains("식당5"));
    assert_eq!(response.matches("🍽️").count(), 5);
}

#[test]
fn empty_fields_print_as_empty_values() {
    let docs = [doc("이름만", "", "", "")];
    let refs: Vec<&IndexedDocument> = docs.iter().collect();

    let response = compose_response("q", &refs, DEFAULT_MAX_RECOMMENDATIONS);

    assert_eq!(
        response,
        "'q' 검색 결과 (1개 추천):\n\n1. 🍽️ 이름만 ()\n   📍 \n   📞 \n"
    );
    assert!(!response.contains("정보없음"));
}

#[test]
fn empty_candidates_produce_no_match_message() {
    assert_eq!(
        compose_response("한식", &[], DEFAULT_MAX_RECOMMENDATIONS),
        NO_MATCH_MESSAGE
    );
}
