//! Route paths shared by the backend and its clients.

/// `POST`: body [`crate::HotspotsRequest`], reply [`crate::HotspotsResponse`].
pub const HOTSPOTS_PATH: &str = "/api/hotspots";

/// `GET` route pattern, as registered on the server.
pub const SPOT_DETAIL_ROUTE: &str = "/api/spot/:token/:id";

pub const HEALTH_PATH: &str = "/healthz";

/// Path segments of a spot detail request, unescaped.
///
/// Clients push these through a URL builder so ids with spaces
/// (e.g. `"Spot 3"`) are percent-encoded per segment.
pub fn spot_detail_segments<'a>(token: &'a str, spot_id: &'a str) -> [&'a str; 4] {
    ["api", "spot", token, spot_id]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_segments_match_route_pattern() {
        let segs = spot_detail_segments("tok", "Spot 1");
        let pattern: Vec<&str> = SPOT_DETAIL_ROUTE.trim_start_matches('/').split('/').collect();
        assert_eq!(pattern.len(), segs.len());
        assert_eq!(&pattern[..2], &segs[..2]);
        assert_eq!(segs[3], "Spot 1");
    }
}
