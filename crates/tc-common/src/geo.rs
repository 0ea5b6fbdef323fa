//! Geographic helpers: great-circle distance and land/sea classification.

/// Mean Earth radius in kilometers (IUGG), as used by common great-circle
/// implementations.
pub const EARTH_RADIUS_KM: f64 = 6371.009;

/// Great-circle distance between two points, in kilometers.
///
/// Uses the haversine formula on a spherical Earth. Longitudes may be given
/// either in [-180, 180) or [0, 360); the result is the same.
pub fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Wrap a longitude into [-180, 180).
pub fn normalize_lon(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Land/sea classifier supplied by a geography collaborator.
///
/// The parsers only call this; they never decide what is land themselves.
pub trait LandMask: Send + Sync {
    /// True if the point lies over land.
    fn is_land(&self, lon: f64, lat: f64) -> bool;
}

impl<F> LandMask for F
where
    F: Fn(f64, f64) -> bool + Send + Sync,
{
    fn is_land(&self, lon: f64, lat: f64) -> bool {
        self(lon, lat)
    }
}
