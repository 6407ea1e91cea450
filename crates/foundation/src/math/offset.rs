use crate::bounds::LatLon;

/// Kilometers per degree used by the flat-earth offset approximation.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Moves `origin` by `distance_km` along `bearing_rad` (0 = north, clockwise).
///
/// The same km-per-degree factor is applied to both axes, which is only a
/// reasonable approximation for short distances away from the poles.
pub fn offset_by_km(origin: LatLon, distance_km: f64, bearing_rad: f64) -> LatLon {
    let deg = distance_km / KM_PER_DEGREE;
    LatLon::new(
        origin.lat + deg * bearing_rad.cos(),
        origin.lon + deg * bearing_rad.sin(),
    )
}
