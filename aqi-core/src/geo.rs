//! Great-circle distance and the small table of known cities.

use crate::models::{CitySelection, Coordinates};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default map centre (geographic centre of India) and zoom.
pub const DEFAULT_MAP_CENTER: Coordinates = Coordinates::new(20.5937, 78.9629);
pub const DEFAULT_MAP_ZOOM: u8 = 5;

/// Zoom used when centring on the user's position.
pub const USER_LOCATION_ZOOM: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownCity {
    pub name: &'static str,
    pub state: &'static str,
    pub location: Coordinates,
}

impl KnownCity {
    pub fn selection(&self) -> CitySelection {
        CitySelection::new(self.name, self.state)
    }
}

const fn city(name: &'static str, state: &'static str, lat: f64, lng: f64) -> KnownCity {
    KnownCity {
        name,
        state,
        location: Coordinates::new(lat, lng),
    }
}

/// Cities considered when picking the one nearest to the user.
pub const NEAREST_CANDIDATES: [KnownCity; 6] = [
    city("Delhi", "Delhi", 28.6139, 77.2090),
    city("Mumbai", "Maharashtra", 19.0760, 72.8777),
    city("Bangalore", "Karnataka", 12.9716, 77.5946),
    city("Chennai", "Tamil Nadu", 13.0827, 80.2707),
    city("Kolkata", "West Bengal", 22.5726, 88.3639),
    city("Hyderabad", "Telangana", 17.3850, 78.4867),
];

/// Cities whose coordinates are known for forecast generation requests.
pub const KNOWN_CITIES: [KnownCity; 8] = [
    NEAREST_CANDIDATES[0],
    NEAREST_CANDIDATES[1],
    NEAREST_CANDIDATES[2],
    NEAREST_CANDIDATES[3],
    NEAREST_CANDIDATES[4],
    NEAREST_CANDIDATES[5],
    city("Pune", "Maharashtra", 18.5204, 73.8567),
    city("Ahmedabad", "Gujarat", 23.0225, 72.5714),
];

/// Fallback when geolocation is unavailable or denied.
pub const DEFAULT_CITY: KnownCity = NEAREST_CANDIDATES[0];

/// Haversine distance between two points, in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// The candidate closest to `position`, with its distance in kilometres.
/// Ties keep the earlier candidate.
pub fn nearest_city(position: Coordinates) -> (KnownCity, f64) {
    let mut best = NEAREST_CANDIDATES[0];
    let mut best_distance = haversine_km(position, best.location);
    for candidate in NEAREST_CANDIDATES.iter().skip(1) {
        let distance = haversine_km(position, candidate.location);
        if distance < best_distance {
            best = *candidate;
            best_distance = distance;
        }
    }
    (best, best_distance)
}

/// Coordinates for a city name, defaulting to Delhi for unknown cities.
pub fn coordinates_for_city(name: &str) -> Coordinates {
    KNOWN_CITIES
        .iter()
        .find(|known| known.name.eq_ignore_ascii_case(name))
        .map(|known| known.location)
        .unwrap_or(DEFAULT_CITY.location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_at_known_city() {
        for candidate in NEAREST_CANDIDATES {
            let (nearest, distance) = nearest_city(candidate.location);
            assert_eq!(nearest.name, candidate.name);
            assert_eq!(distance, 0.0);
        }
    }

    #[test]
    fn test_haversine_delhi_mumbai() {
        let d = haversine_km(NEAREST_CANDIDATES[0].location, NEAREST_CANDIDATES[1].location);
        // Roughly 1150 km as the crow flies.
        assert!((1100.0..1200.0).contains(&d), "unexpected distance {d}");
        let back = haversine_km(NEAREST_CANDIDATES[1].location, NEAREST_CANDIDATES[0].location);
        assert!((d - back).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_city_for_nearby_point() {
        // Navi Mumbai
        let (nearest, distance) = nearest_city(Coordinates::new(19.03, 73.03));
        assert_eq!(nearest.name, "Mumbai");
        assert!(distance < 25.0);
    }

    #[test]
    fn test_coordinates_for_city() {
        assert_eq!(coordinates_for_city("pune"), Coordinates::new(18.5204, 73.8567));
        assert_eq!(coordinates_for_city("Atlantis"), DEFAULT_CITY.location);
    }
}
