use anyhow::{Context, Result};
use console::style;
use dialoguer::Input;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::EatsError;
use crate::config::Config;
use crate::data::{self, RestaurantRecord};
use crate::embeddings::embedder_from_config;
use crate::geo::{self, Coordinates, NominatimGeocoder};
use crate::recommender::Recommender;

const REPL_PROMPT: &str = "🔍 검색어";
const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "종료"];
const RESULT_SEPARATOR_WIDTH: usize = 50;

/// Where a nearby search measures from
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Coordinates(Coordinates),
    Address(String),
}

/// What one line typed into the interactive loop means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Exit,
    Empty,
    Query(&'a str),
}

#[inline]
pub fn classify_input(line: &str) -> ReplInput<'_> {
    let line = line.trim();
    if line.is_empty() {
        ReplInput::Empty
    } else if EXIT_COMMANDS.contains(&line.to_lowercase().as_str()) {
        ReplInput::Exit
    } else {
        ReplInput::Query(line)
    }
}

/// Load the restaurant snapshot, preferring an explicit path over the configured one
#[inline]
pub fn load_snapshot(config: &Config, data_path: Option<&Path>) -> Result<Vec<RestaurantRecord>> {
    let path = data_path.unwrap_or(&config.data.csv_path);
    let records = data::load_records(path).map_err(|e| EatsError::Data(format!("{e:#}")))?;
    Ok(records)
}

/// Build a recommender over the records with the configured embedder
#[inline]
pub fn build_recommender(config: &Config, records: &[RestaurantRecord]) -> Result<Recommender> {
    let embedder =
        embedder_from_config(config).map_err(|e| EatsError::Embedding(format!("{e:#}")))?;
    let recommender = Recommender::build(records, embedder, config.recommender)?;
    Ok(recommender)
}

fn prepare_recommender(config: &Config, data_path: Option<&Path>) -> Result<Recommender> {
    eprintln!("{}", style("🔄 데이터 로딩 중...").yellow());
    let records = load_snapshot(config, data_path)?;
    eprintln!("📊 총 {}개 음식점 데이터 로드됨", records.len());

    let recommender = build_recommender(config, &records)?;
    eprintln!("{}", style("✅ 벡터 저장소 준비 완료!").green());
    Ok(recommender)
}

/// Answer a single query and print the recommendation
#[inline]
pub fn search_restaurants(config: &Config, query: &str, data_path: Option<PathBuf>) -> Result<()> {
    let recommender = prepare_recommender(config, data_path.as_deref())?;
    let response = recommender
        .search(query)
        .with_context(|| format!("Search failed for {query:?}"))?;
    println!("{response}");
    Ok(())
}

/// Interactive recommendation loop; errors are reported and the loop continues
#[inline]
pub fn run_recommendation_repl(config: &Config, data_path: Option<PathBuf>) -> Result<()> {
    let recommender = prepare_recommender(config, data_path.as_deref())?;

    println!();
    println!("🍽️ 수원시 음식점 추천 시스템입니다!");
    println!("💡 예시: '한식 맛집', '장안구 중식당', '영통동 카페', '권선구 치킨집'");
    println!("🚪 종료: 'exit' 입력");
    println!();

    let attended = console::user_attended();
    let stdin = io::stdin();

    loop {
        let line = if attended {
            Input::new()
                .with_prompt(REPL_PROMPT)
                .allow_empty(true)
                .interact_text()
                .context("Failed to read query")?
        } else {
            match read_piped_query(&mut stdin.lock())? {
                Some(line) => line,
                None => break,
            }
        };

        match classify_input(&line) {
            ReplInput::Exit => {
                println!("👋 시스템을 종료합니다.");
                break;
            }
            ReplInput::Empty => {
                println!("{}", style("⚠️ 검색어를 입력해주세요.").yellow());
            }
            ReplInput::Query(query) => match recommender.search(query) {
                Ok(response) => {
                    println!();
                    println!("{response}");
                    println!();
                    println!("{}", "-".repeat(RESULT_SEPARATOR_WIDTH));
                }
                Err(e) => {
                    error!("Search failed for {:?}: {}", query, e);
                    println!("{}", style(format!("❌ 오류: {e}")).red());
                }
            },
        }
    }

    Ok(())
}

// Input without a terminal; `None` once the input is exhausted
fn read_piped_query<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("Failed to read query")?;
    Ok((read > 0).then_some(line))
}

/// Print the distinct categories of the snapshot
#[inline]
pub fn list_categories(config: &Config, data_path: Option<PathBuf>) -> Result<()> {
    let records = load_snapshot(config, data_path.as_deref())?;
    let categories = data::categories(&records);

    println!("업종 ({}개):", categories.len());
    for category in &categories {
        println!("  • {category}");
    }
    Ok(())
}

fn selected_categories(records: &[RestaurantRecord], requested: Vec<String>) -> Vec<String> {
    if requested.is_empty() {
        data::categories(records)
    } else {
        requested
    }
}

/// Print placeable restaurants of the selected categories and the initial map framing
#[inline]
pub fn list_restaurants(
    config: &Config,
    categories: Vec<String>,
    data_path: Option<PathBuf>,
) -> Result<()> {
    let records = load_snapshot(config, data_path.as_deref())?;
    let selected = selected_categories(&records, categories);
    let placeable = data::with_coordinates(&records);
    let shown = geo::filter_by_categories(placeable, &selected);
    let view = geo::map_view(shown.iter().copied());

    println!("📍 수원시 착한가격업소 & 모범음식점 지도");
    println!(
        "🗺️  중심: {:.6}, {:.6} (zoom {})",
        view.center.latitude, view.center.longitude, view.zoom
    );
    println!("{}개 업소", shown.len());
    println!();

    for record in &shown {
        let Some(position) = Coordinates::of(record) else {
            continue;
        };
        println!("🍽️ {} ({})", record.name, record.category);
        println!("   📍 {}", record.address());
        println!("   📞 {}", record.phone);
        println!(
            "   🌐 {:.6}, {:.6}",
            position.latitude, position.longitude
        );
    }
    Ok(())
}

/// Rank restaurants of the selected categories by distance from an origin
#[inline]
pub fn show_nearby(
    config: &Config,
    origin: Origin,
    categories: Vec<String>,
    limit: usize,
    data_path: Option<PathBuf>,
) -> Result<()> {
    let origin = match origin {
        Origin::Coordinates(coordinates) => coordinates,
        Origin::Address(address) => {
            let geocoder = NominatimGeocoder::new(&config.geocoder)
                .map_err(|e| EatsError::Geocoding(format!("{e:#}")))?;
            let found = geocoder
                .geocode(&address)
                .map_err(|e| EatsError::Geocoding(format!("{e:#}")))?;

            let Some(location) = found else {
                warn!("No geocoding result for {:?}", address);
                println!(
                    "{}",
                    style("주소 변환에 실패했습니다. 더 정확한 주소를 입력해주세요.").red()
                );
                return Ok(());
            };

            println!(
                "{}",
                style(format!("📍 변환된 위치: {}", location.label)).green()
            );
            println!(
                "→ 위도: {:.6}, 경도: {:.6}",
                location.coordinates.latitude, location.coordinates.longitude
            );
            location.coordinates
        }
    };

    let records = load_snapshot(config, data_path.as_deref())?;
    let selected = selected_categories(&records, categories);
    let candidates = geo::filter_by_categories(&records, &selected);
    let ranked = geo::rank_by_distance(candidates, origin);
    info!("{} restaurants ranked by distance", ranked.len());

    if ranked.is_empty() {
        println!("선택된 업종에서 거리를 계산할 수 있는 업소가 없습니다.");
        return Ok(());
    }

    println!("📌 거리 계산 결과 (최단 거리 기준)");
    println!();
    for (rank, entry) in ranked.iter().take(limit).enumerate() {
        let record = entry.record;
        println!(
            "{}. {} ({}) {:.2} km",
            rank + 1,
            record.name,
            record.category,
            entry.distance_km
        );
        println!("   📍 {}", record.address());
        println!("   📞 {}", record.phone);
    }
    Ok(())
}
