use super::*;

fn record(name: &str, category: &str, position: Option<(f64, f64)>) -> RestaurantRecord {
    RestaurantRecord {
        name: name.to_string(),
        category: category.to_string(),
        latitude: position.map(|(lat, _)| lat),
        longitude: position.map(|(_, lon)| lon),
        ..RestaurantRecord::default()
    }
}

fn fixture() -> Vec<RestaurantRecord> {
    vec![
        record("원천카페", "카페", Some((37.3000, 127.0100))),
        record("팔달분식", "분식", Some((37.2700, 127.0200))),
        record("좌표없음", "분식", None),
        record("영통치킨", "치킨", Some((37.2600, 127.0500))),
    ]
}

fn names(records: &[&RestaurantRecord]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

#[test]
fn haversine_matches_known_distances() {
    let seoul_city_hall = Coordinates::new(37.5663, 126.9779);
    let distance = haversine_km(SUWON_CITY_HALL, seoul_city_hall);
    assert!((distance - 33.955).abs() < 0.01, "got {distance}");

    // One degree of latitude
    let one_degree = haversine_km(Coordinates::new(37.0, 127.0), Coordinates::new(38.0, 127.0));
    assert!((one_degree - 111.195).abs() < 0.001, "got {one_degree}");
}

#[test]
fn haversine_is_symmetric_and_zero_on_identity() {
    let a = Coordinates::new(37.27, 127.02);
    let b = Coordinates::new(37.26, 127.05);
    assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    assert!(haversine_km(a, a).abs() < 1e-9);
}

#[test]
fn ranking_skips_unplaceable_records_and_sorts_ascending() {
    let records = fixture();

    let ranked = rank_by_distance(&records, SUWON_CITY_HALL);

    let order: Vec<&str> = ranked.iter().map(|r| r.record.name.as_str()).collect();
    assert_eq!(order, vec!["팔달분식", "영통치킨", "원천카페"]);
    assert!((ranked[0].distance_km - 1.042).abs() < 0.01);
    assert!(ranked.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
}

#[test]
fn ranking_ties_keep_input_order() {
    let records = vec![
        record("first", "한식", Some((37.27, 127.02))),
        record("second", "한식", Some((37.27, 127.02))),
    ];

    let ranked = rank_by_distance(&records, SUWON_CITY_HALL);
    assert_eq!(ranked[0].record.name, "first");
    assert_eq!(ranked[1].record.name, "second");
}

#[test]
fn category_selection_is_exact_membership() {
    let records = fixture();

    let selected = filter_by_categories(&records, &["분식"]);
    assert_eq!(names(&selected), vec!["팔달분식", "좌표없음"]);

    // "카" is not a category even though "카페" contains it
    assert!(filter_by_categories(&records, &["카"]).is_empty());
}

#[test]
fn empty_selection_selects_nothing() {
    let records = fixture();
    let none: [&str; 0] = [];
    assert!(filter_by_categories(&records, &none).is_empty());
}

#[test]
fn all_categories_select_everything() {
    let records = fixture();
    let all = crate::data::categories(&records);
    assert_eq!(filter_by_categories(&records, &all).len(), records.len());
}

#[test]
fn map_view_centers_on_mean_position() {
    let records = fixture();

    let view = map_view(&records);

    assert_eq!(view.zoom, FOCUSED_ZOOM);
    assert!((view.center.latitude - 37.2766667).abs() < 1e-6);
    assert!((view.center.longitude - 127.0266667).abs() < 1e-6);
}

#[test]
fn map_view_without_coordinates_uses_city_hall() {
    let records = vec![record("좌표없음", "분식", None)];

    let view = map_view(&records);
    assert_eq!(view.center, SUWON_CITY_HALL);
    assert_eq!(view.zoom, DEFAULT_ZOOM);

    let empty: Vec<RestaurantRecord> = Vec::new();
    assert_eq!(map_view(&empty).center, SUWON_CITY_HALL);
}
