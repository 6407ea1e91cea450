use foundation::arena::Arena;
use foundation::{LatLon, LatLonBounds};
use tracing::trace;

use crate::surface::{
    MapSurface, Marker, Overlay, OverlayId, Polyline, ViewportId, ViewportRole,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FittedBounds {
    pub bounds: LatLonBounds,
    pub padding_px: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub role: ViewportRole,
    pub center: LatLon,
    pub zoom: u8,
    /// Last `fit_bounds` request; cleared by `set_view`.
    pub fitted: Option<FittedBounds>,
}

/// In-memory map surface.
///
/// Records viewport state and live overlays without drawing anything. Used by
/// headless hosts and as the reference surface in tests.
#[derive(Debug, Default)]
pub struct World {
    viewports: Vec<Viewport>,
    overlays: Arena<(ViewportId, Overlay)>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self, id: ViewportId) -> Option<&Viewport> {
        self.viewports.get(id.0 as usize)
    }

    pub fn viewport_count(&self) -> usize {
        self.viewports.len()
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(id.0).map(|(_, o)| o)
    }

    /// Live overlays of one viewport in creation-slot order.
    pub fn overlays(&self, viewport: ViewportId) -> Vec<(OverlayId, &Overlay)> {
        self.overlays
            .iter()
            .filter(|(_, (vp, _))| *vp == viewport)
            .map(|(h, (_, o))| (OverlayId(h), o))
            .collect()
    }

    pub fn markers(&self, viewport: ViewportId) -> Vec<&Marker> {
        self.overlays(viewport)
            .into_iter()
            .filter_map(|(_, o)| match o {
                Overlay::Marker(m) => Some(m),
                Overlay::Polyline(_) => None,
            })
            .collect()
    }

    pub fn polylines(&self, viewport: ViewportId) -> Vec<&Polyline> {
        self.overlays(viewport)
            .into_iter()
            .filter_map(|(_, o)| match o {
                Overlay::Polyline(p) => Some(p),
                Overlay::Marker(_) => None,
            })
            .collect()
    }

    pub fn marker_count(&self, viewport: ViewportId) -> usize {
        self.overlays(viewport)
            .iter()
            .filter(|(_, o)| o.is_marker())
            .count()
    }

    pub fn polyline_count(&self, viewport: ViewportId) -> usize {
        self.overlays(viewport)
            .iter()
            .filter(|(_, o)| o.is_polyline())
            .count()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }
}

impl MapSurface for World {
    fn create_viewport(&mut self, role: ViewportRole, center: LatLon, zoom: u8) -> ViewportId {
        let id = ViewportId(self.viewports.len() as u32);
        self.viewports.push(Viewport {
            role,
            center,
            zoom,
            fitted: None,
        });
        trace!(viewport = id.0, role = role.name(), "viewport created");
        id
    }

    fn set_view(&mut self, viewport: ViewportId, center: LatLon, zoom: u8) {
        let Some(vp) = self.viewports.get_mut(viewport.0 as usize) else {
            return;
        };
        vp.center = center;
        vp.zoom = zoom;
        vp.fitted = None;
    }

    fn fit_bounds(&mut self, viewport: ViewportId, bounds: LatLonBounds, padding_px: u32) {
        let Some(vp) = self.viewports.get_mut(viewport.0 as usize) else {
            return;
        };
        vp.center = bounds.center();
        vp.fitted = Some(FittedBounds { bounds, padding_px });
    }

    fn add_overlay(&mut self, viewport: ViewportId, overlay: Overlay) -> OverlayId {
        OverlayId(self.overlays.insert((viewport, overlay)))
    }

    fn remove_overlay(&mut self, overlay: OverlayId) -> bool {
        self.overlays.remove(overlay.0).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::World;
    use crate::surface::{MapSurface, Marker, Overlay, Polyline, ViewportRole};
    use foundation::{LatLon, LatLonBounds};

    #[test]
    fn overlays_are_scoped_to_their_viewport() {
        let mut world = World::new();
        let a = world.create_viewport(ViewportRole::Search, LatLon::new(0.0, 0.0), 13);
        let b = world.create_viewport(ViewportRole::Results, LatLon::new(0.0, 0.0), 9);

        world.add_overlay(a, Overlay::Marker(Marker::pin(LatLon::new(1.0, 1.0))));
        world.add_overlay(b, Overlay::Marker(Marker::spot(LatLon::new(2.0, 2.0), "S")));
        world.add_overlay(
            b,
            Overlay::Polyline(Polyline::new(vec![LatLon::new(0.0, 0.0), LatLon::new(1.0, 1.0)])),
        );

        assert_eq!(world.marker_count(a), 1);
        assert_eq!(world.marker_count(b), 1);
        assert_eq!(world.polyline_count(b), 1);
        assert_eq!(world.overlay_count(), 3);
    }

    #[test]
    fn removed_overlay_cannot_be_removed_twice() {
        let mut world = World::new();
        let vp = world.create_viewport(ViewportRole::Nav, LatLon::new(0.0, 0.0), 9);
        let id = world.add_overlay(vp, Overlay::Marker(Marker::pin(LatLon::new(0.0, 0.0))));
        assert!(world.remove_overlay(id));
        assert!(!world.remove_overlay(id));
        assert!(world.overlay(id).is_none());
    }

    #[test]
    fn set_view_clears_fitted_bounds() {
        let mut world = World::new();
        let vp = world.create_viewport(ViewportRole::Nav, LatLon::new(0.0, 0.0), 9);
        let bounds = LatLonBounds::new(LatLon::new(0.0, 0.0), LatLon::new(2.0, 4.0));
        world.fit_bounds(vp, bounds, 30);
        let state = world.viewport(vp).expect("viewport");
        assert_eq!(state.center, LatLon::new(1.0, 2.0));
        assert_eq!(state.fitted.map(|f| f.padding_px), Some(30));

        world.set_view(vp, LatLon::new(5.0, 5.0), 12);
        let state = world.viewport(vp).expect("viewport");
        assert!(state.fitted.is_none());
        assert_eq!(state.zoom, 12);
    }
}
