
use itertools::Itertools;
use tracing::debug;

/// Synonyms added per cuisine when the query mentions any of them
const CUISINE_EXPANSION_TERMS: usize = 3;

/// Cuisine category → synonym terms, in match order
pub const CUISINE_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "한식",
        &[
            "한식", "한국음식", "한국요리", "정식", "백반", "국밥", "찌개", "갈비", "불고기",
        ],
    ),
    (
        "중식",
        &["중식", "중국음식", "중국요리", "짜장면", "짬뽕", "탕수육", "마라탕"],
    ),
    (
        "일식",
        &["일식", "일본음식", "일본요리", "초밥", "라멘", "돈까스", "우동", "스시"],
    ),
    (
        "양식",
        &["양식", "서양음식", "파스타", "스테이크", "피자", "햄버거"],
    ),
    (
        "카페",
        &["카페", "커피", "디저트", "음료", "베이커리", "빵집"],
    ),
    (
        "치킨",
        &["치킨", "닭", "프라이드", "양념치킨", "후라이드"],
    ),
    ("분식", &["분식", "떡볶이", "순대", "튀김", "김밥"]),
    ("술집", &["술집", "포장마차", "맥주", "소주", "안주"]),
];

/// District short name → sub-area terms
pub const DISTRICT_SUB_AREAS: &[(&str, &[&str])] = &[
    ("장안", &["장안구", "장안동", "정자동", "파장동", "영화동"]),
    ("권선", &["권선구", "권선동", "구운동", "금곡동"]),
    ("팔달", &["팔달구", "팔달동", "행궁동", "매교동"]),
    ("영통", &["영통구", "영통동", "매탄동", "원천동"]),
];

/// Broaden a raw query with cuisine synonyms and district sub-areas.
///
/// Matching is plain substring containment. The result always starts with the
/// query itself and holds each term once.
#[inline]
pub fn expand_query(query: &str) -> String {
    let cuisine_terms = CUISINE_SYNONYMS
        .iter()
        .filter(|(_, synonyms)| synonyms.iter().any(|term| query.contains(term)))
        .flat_map(|(_, synonyms)| synonyms.iter().take(CUISINE_EXPANSION_TERMS));

    let area_terms = DISTRICT_SUB_AREAS
        .iter()
        .filter(|(district, _)| query.contains(district))
        .flat_map(|(_, areas)| areas.iter());

    let expanded = std::iter::once(query)
        .chain(cuisine_terms.copied())
        .chain(area_terms.copied())
        .unique()
        .join(" ");

    debug!("Expanded query {:?} to {:?}", query, expanded);
    expanded
}
