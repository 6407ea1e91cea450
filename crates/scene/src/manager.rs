use foundation::{LatLon, LatLonBounds};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::surface::{MapSurface, Marker, Overlay, OverlayId, Polyline, ViewportId, ViewportRole};

/// Viewport framing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Center of every viewport before any origin is known.
    pub default_center: LatLon,
    pub search_initial_zoom: u8,
    pub results_initial_zoom: u8,
    pub nav_initial_zoom: u8,
    /// Search viewport zoom after an origin is placed.
    pub origin_zoom: u8,
    /// Results viewport zoom after each refresh.
    pub results_zoom: u8,
    pub route_padding_px: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: LatLon::new(51.505, -0.09),
            search_initial_zoom: 13,
            results_initial_zoom: 9,
            nav_initial_zoom: 9,
            origin_zoom: 12,
            results_zoom: 9,
            route_padding_px: 30,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewports {
    pub search: ViewportId,
    pub results: ViewportId,
    pub nav: ViewportId,
}

/// A spot as the results viewport needs it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpotMarker<'a> {
    pub id: &'a str,
    pub position: LatLon,
}

pub const RESULTS_ORIGIN_POPUP: &str = "Start";

/// Owns the three viewports and the transient overlays drawn on them.
///
/// Invariants after every operation:
/// - search viewport: at most one origin marker
/// - results viewport: exactly the overlays of the latest refresh
/// - nav viewport: at most one route line
///
/// Before [`SurfaceManager::init_maps`] every operation is a no-op.
#[derive(Debug)]
pub struct SurfaceManager<S> {
    surface: S,
    config: MapConfig,
    viewports: Option<Viewports>,
    origin_marker: Option<OverlayId>,
    result_overlays: Vec<OverlayId>,
    route: Option<OverlayId>,
}

impl<S: MapSurface> SurfaceManager<S> {
    pub fn new(surface: S, config: MapConfig) -> Self {
        Self {
            surface,
            config,
            viewports: None,
            origin_marker: None,
            result_overlays: Vec::new(),
            route: None,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn viewports(&self) -> Option<Viewports> {
        self.viewports
    }

    pub fn is_ready(&self) -> bool {
        self.viewports.is_some()
    }

    /// Creates the three viewports. Calling it again keeps the existing ones.
    pub fn init_maps(&mut self) -> Viewports {
        if let Some(vps) = self.viewports {
            return vps;
        }
        let center = self.config.default_center;
        let vps = Viewports {
            search: self.surface.create_viewport(
                ViewportRole::Search,
                center,
                self.config.search_initial_zoom,
            ),
            results: self.surface.create_viewport(
                ViewportRole::Results,
                center,
                self.config.results_initial_zoom,
            ),
            nav: self
                .surface
                .create_viewport(ViewportRole::Nav, center, self.config.nav_initial_zoom),
        };
        debug!(?vps, "maps initialized");
        self.viewports = Some(vps);
        vps
    }

    /// Replaces the search viewport origin marker and recenters on it.
    pub fn set_origin(&mut self, point: LatLon, label: &str) {
        let Some(vps) = self.viewports else {
            debug!("set_origin before init_maps; ignored");
            return;
        };
        if let Some(old) = self.origin_marker.take() {
            self.surface.remove_overlay(old);
        }
        let marker = Marker::pin(point).with_popup(label, true);
        self.origin_marker = Some(self.surface.add_overlay(vps.search, Overlay::Marker(marker)));
        self.surface.set_view(vps.search, point, self.config.origin_zoom);
    }

    /// Clears the previous result overlays, then draws the origin pin and one
    /// marker per spot. Returns the number of markers now on the viewport.
    pub fn refresh_results<'a>(
        &mut self,
        origin: LatLon,
        spots: impl IntoIterator<Item = SpotMarker<'a>>,
    ) -> usize {
        let Some(vps) = self.viewports else {
            debug!("refresh_results before init_maps; ignored");
            return 0;
        };
        let removed = self.clear_results();
        self.surface
            .set_view(vps.results, origin, self.config.results_zoom);

        let origin_pin = Marker::pin(origin).with_popup(RESULTS_ORIGIN_POPUP, false);
        let id = self
            .surface
            .add_overlay(vps.results, Overlay::Marker(origin_pin));
        self.result_overlays.push(id);

        for spot in spots {
            let marker = Marker::spot(spot.position, spot.id);
            let id = self.surface.add_overlay(vps.results, Overlay::Marker(marker));
            self.result_overlays.push(id);
        }
        debug!(
            removed,
            added = self.result_overlays.len(),
            "results viewport refreshed"
        );
        self.result_overlays.len()
    }

    /// Draws the single origin → spot line and frames it.
    pub fn draw_route(&mut self, from: LatLon, to: LatLon) -> Option<LatLonBounds> {
        let Some(vps) = self.viewports else {
            debug!("draw_route before init_maps; ignored");
            return None;
        };
        if let Some(old) = self.route.take() {
            self.surface.remove_overlay(old);
        }
        let line = Polyline::new(vec![from, to]);
        let bounds = line.bounds();
        self.route = Some(self.surface.add_overlay(vps.nav, Overlay::Polyline(line)));
        if let Some(bounds) = bounds {
            self.surface
                .fit_bounds(vps.nav, bounds, self.config.route_padding_px);
        }
        bounds
    }

    pub fn result_overlay_count(&self) -> usize {
        self.result_overlays.len()
    }

    pub fn has_origin_marker(&self) -> bool {
        self.origin_marker.is_some()
    }

    pub fn has_route(&self) -> bool {
        self.route.is_some()
    }

    fn clear_results(&mut self) -> usize {
        let n = self.result_overlays.len();
        for id in self.result_overlays.drain(..) {
            self.surface.remove_overlay(id);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::{MapConfig, SpotMarker, SurfaceManager};
    use crate::surface::MarkerStyle;
    use crate::world::World;
    use foundation::LatLon;

    fn manager() -> SurfaceManager<World> {
        let mut m = SurfaceManager::new(World::new(), MapConfig::default());
        m.init_maps();
        m
    }

    fn spots(ids: &[&'static str]) -> Vec<SpotMarker<'static>> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| SpotMarker {
                id,
                position: LatLon::new(51.0 + i as f64 * 0.1, 0.0),
            })
            .collect()
    }

    #[test]
    fn operations_before_init_are_noops() {
        let mut m = SurfaceManager::new(World::new(), MapConfig::default());
        m.set_origin(LatLon::new(1.0, 1.0), "x");
        assert_eq!(m.refresh_results(LatLon::new(1.0, 1.0), spots(&["A"])), 0);
        assert!(m.draw_route(LatLon::new(0.0, 0.0), LatLon::new(1.0, 1.0)).is_none());
        assert_eq!(m.surface().overlay_count(), 0);
        assert_eq!(m.surface().viewport_count(), 0);
    }

    #[test]
    fn init_maps_is_idempotent() {
        let mut m = manager();
        let again = m.init_maps();
        assert_eq!(m.viewports(), Some(again));
        assert_eq!(m.surface().viewport_count(), 3);
    }

    #[test]
    fn set_origin_twice_leaves_one_marker() {
        let mut m = manager();
        let vps = m.viewports().expect("ready");
        m.set_origin(LatLon::new(51.5074, -0.1278), "London");
        m.set_origin(LatLon::new(48.8566, 2.3522), "Paris");

        let markers = m.surface().markers(vps.search);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].popup.as_deref(), Some("Paris"));
        assert!(markers[0].open_popup);

        let vp = m.surface().viewport(vps.search).expect("viewport");
        assert_eq!(vp.center, LatLon::new(48.8566, 2.3522));
        assert_eq!(vp.zoom, 12);
    }

    #[test]
    fn refresh_replaces_all_previous_markers() {
        let mut m = manager();
        let vps = m.viewports().expect("ready");
        let origin = LatLon::new(51.0, 0.0);

        assert_eq!(m.refresh_results(origin, spots(&["A", "B", "C"])), 4);
        assert_eq!(m.surface().marker_count(vps.results), 4);

        assert_eq!(m.refresh_results(origin, spots(&["D"])), 2);
        let markers = m.surface().markers(vps.results);
        assert_eq!(markers.len(), 2);
        let pins = markers.iter().filter(|mk| mk.style == MarkerStyle::Pin).count();
        assert_eq!(pins, 1);
        assert!(markers.iter().any(|mk| mk.popup.as_deref() == Some("D")));
        assert!(!markers.iter().any(|mk| mk.popup.as_deref() == Some("A")));
    }

    #[test]
    fn refresh_recenters_on_origin() {
        let mut m = manager();
        let vps = m.viewports().expect("ready");
        let origin = LatLon::new(35.6895, 139.6917);
        m.refresh_results(origin, Vec::new());
        let vp = m.surface().viewport(vps.results).expect("viewport");
        assert_eq!(vp.center, origin);
        assert_eq!(vp.zoom, 9);
    }

    #[test]
    fn route_is_replaced_and_framed() {
        let mut m = manager();
        let vps = m.viewports().expect("ready");
        m.draw_route(LatLon::new(0.0, 0.0), LatLon::new(1.0, 1.0));
        let bounds = m
            .draw_route(LatLon::new(10.0, 10.0), LatLon::new(12.0, 14.0))
            .expect("bounds");

        assert_eq!(m.surface().polyline_count(vps.nav), 1);
        let vp = m.surface().viewport(vps.nav).expect("viewport");
        let fitted = vp.fitted.expect("fitted");
        assert_eq!(fitted.bounds, bounds);
        assert_eq!(fitted.padding_px, 30);
    }
}
