use foundation::LatLon;

use crate::state::{Origin, Spot};

/// Origin → spot route: the line drawn on the nav viewport and the deep link
/// handed to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationRoute {
    pub line: [LatLon; 2],
    pub url: String,
}

/// Builds the route, or `None` when either end is missing.
pub fn build_route(
    origin: Option<&Origin>,
    spot: Option<&Spot>,
    directions_base_url: &str,
) -> Option<NavigationRoute> {
    let (origin, spot) = (origin?, spot?);
    Some(NavigationRoute {
        line: [origin.point, spot.position],
        url: directions_url(directions_base_url, origin.point, spot.position),
    })
}

pub fn directions_url(base: &str, from: LatLon, to: LatLon) -> String {
    format!(
        "{}/{},{}/{},{}",
        base.trim_end_matches('/'),
        from.lat,
        from.lon,
        to.lat,
        to.lon
    )
}
