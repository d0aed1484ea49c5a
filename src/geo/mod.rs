//! Distances, category selection and map framing for restaurant records.

pub mod geocode;

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::data::RestaurantRecord;

pub use geocode::{GeocodedLocation, NominatimGeocoder};

/// Mean Earth radius (IUGG)
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Map center used when no record has coordinates
pub const SUWON_CITY_HALL: Coordinates = Coordinates {
    latitude: 37.2636,
    longitude: 127.0286,
};

pub const DEFAULT_ZOOM: u8 = 12;
pub const FOCUSED_ZOOM: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Coordinates of a record, when it has both
    #[inline]
    pub fn of(record: &RestaurantRecord) -> Option<Self> {
        record
            .coordinates()
            .map(|(latitude, longitude)| Self::new(latitude, longitude))
    }
}

/// A restaurant with its distance from the search origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedRestaurant<'a> {
    pub record: &'a RestaurantRecord,
    pub distance_km: f64,
}

/// Initial framing for a map of records
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
}

/// Great-circle distance in kilometres
#[inline]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let half_d_lat = (b.latitude - a.latitude).to_radians() / 2.0;
    let half_d_lon = (b.longitude - a.longitude).to_radians() / 2.0;

    let h = (lat_a.cos() * lat_b.cos()).mul_add(half_d_lon.sin().powi(2), half_d_lat.sin().powi(2));
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Records with coordinates, nearest first. Equal distances keep input order.
#[inline]
pub fn rank_by_distance<'a, I>(records: I, origin: Coordinates) -> Vec<RankedRestaurant<'a>>
where
    I: IntoIterator<Item = &'a RestaurantRecord>,
{
    let mut ranked: Vec<RankedRestaurant<'a>> = records
        .into_iter()
        .filter_map(|record| {
            Coordinates::of(record).map(|position| RankedRestaurant {
                record,
                distance_km: haversine_km(origin, position),
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    debug!("Ranked {} restaurants by distance", ranked.len());
    ranked
}

/// Records whose category is one of `selected`. Nothing selected selects nothing.
#[inline]
pub fn filter_by_categories<'a, I, S>(records: I, selected: &[S]) -> Vec<&'a RestaurantRecord>
where
    I: IntoIterator<Item = &'a RestaurantRecord>,
    S: AsRef<str>,
{
    records
        .into_iter()
        .filter(|record| {
            let category = record.category.trim();
            selected.iter().any(|wanted| wanted.as_ref() == category)
        })
        .collect()
}

/// Center on the mean position of the records, or on city hall when none are placeable
#[inline]
pub fn map_view<'a, I>(records: I) -> MapView
where
    I: IntoIterator<Item = &'a RestaurantRecord>,
{
    let (count, lat_sum, lon_sum) = records
        .into_iter()
        .filter_map(Coordinates::of)
        .fold((0_usize, 0.0_f64, 0.0_f64), |(n, lat, lon), c| {
            (n + 1, lat + c.latitude, lon + c.longitude)
        });

    if count == 0 {
        return MapView {
            center: SUWON_CITY_HALL,
            zoom: DEFAULT_ZOOM,
        };
    }

    let count = count as f64;
    MapView {
        center: Coordinates::new(lat_sum / count, lon_sum / count),
        zoom: FOCUSED_ZOOM,
    }
}
