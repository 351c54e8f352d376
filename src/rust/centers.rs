use serde::Serialize;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecyclingCenter {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Center,
    User,
}

/// One pin on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapMarker {
    pub label: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub kind: MarkerKind,
}

pub const RECYCLING_CENTERS: [RecyclingCenter; 4] = [
    RecyclingCenter { name: "Green Earth Recycling", lat: 31.5001, lon: 76.2003 },
    RecyclingCenter { name: "EcoWaste Solutions", lat: 31.4956, lon: 76.2054 },
    RecyclingCenter { name: "Sustainable Recycling Hub", lat: 31.4823, lon: 76.1987 },
    RecyclingCenter { name: "Zero Waste Facility", lat: 31.4789, lon: 76.1921 },
];

/// Fixed "your location" pin, also the map's center.
pub const USER_LOCATION: (f64, f64) = (31.4818, 76.1905);

/// All pins: the centers in order, then the user location.
pub fn map_markers() -> Vec<MapMarker> {
    RECYCLING_CENTERS
        .iter()
        .map(|c| MapMarker {
            label: c.name,
            lat: c.lat,
            lon: c.lon,
            kind: MarkerKind::Center,
        })
        .chain(std::iter::once(MapMarker {
            label: "Your Location",
            lat: USER_LOCATION.0,
            lon: USER_LOCATION.1,
            kind: MarkerKind::User,
        }))
        .collect()
}

/// Great-circle distance in kilometres (haversine).
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());
    let a = ((lat2 - lat1) / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * ((lon2 - lon1) / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Centers sorted nearest first from `origin`, with their distances.
pub fn nearest_from(origin: (f64, f64)) -> Vec<(RecyclingCenter, f64)> {
    let mut centers: Vec<_> = RECYCLING_CENTERS
        .iter()
        .map(|c| (*c, distance_km(origin, (c.lat, c.lon))))
        .collect();
    centers.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    centers
}
