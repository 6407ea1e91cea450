//! Rendering capability consumed by the map surface manager.
//!
//! A `MapSurface` owns the real widgets (tile layers, marker icons, popups).
//! The flow only ever talks to it through viewport and overlay ids.

use foundation::handles::Handle;
use foundation::{LatLon, LatLonBounds};

/// Which of the three map displays a viewport backs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ViewportRole {
    Search,
    Results,
    Nav,
}

impl ViewportRole {
    pub fn name(self) -> &'static str {
        match self {
            ViewportRole::Search => "search",
            ViewportRole::Results => "results",
            ViewportRole::Nav => "nav",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ViewportId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OverlayId(pub Handle);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Plain pin, used for the origin.
    Pin,
    /// Point of interest carrying its identifier.
    Spot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLon,
    pub style: MarkerStyle,
    pub popup: Option<String>,
    pub open_popup: bool,
}

impl Marker {
    pub fn pin(position: LatLon) -> Self {
        Self {
            position,
            style: MarkerStyle::Pin,
            popup: None,
            open_popup: false,
        }
    }

    pub fn spot(position: LatLon, label: impl Into<String>) -> Self {
        Self {
            position,
            style: MarkerStyle::Spot,
            popup: Some(label.into()),
            open_popup: false,
        }
    }

    pub fn with_popup(mut self, text: impl Into<String>, open: bool) -> Self {
        self.popup = Some(text.into());
        self.open_popup = open;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<LatLon>,
}

impl Polyline {
    pub fn new(points: Vec<LatLon>) -> Self {
        Self { points }
    }

    pub fn bounds(&self) -> Option<LatLonBounds> {
        LatLonBounds::from_points(&self.points)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Marker(Marker),
    Polyline(Polyline),
}

impl Overlay {
    pub fn is_marker(&self) -> bool {
        matches!(self, Overlay::Marker(_))
    }

    pub fn is_polyline(&self) -> bool {
        matches!(self, Overlay::Polyline(_))
    }
}

/// Viewport creation, view changes and overlay add/remove.
pub trait MapSurface {
    fn create_viewport(&mut self, role: ViewportRole, center: LatLon, zoom: u8) -> ViewportId;

    fn set_view(&mut self, viewport: ViewportId, center: LatLon, zoom: u8);

    /// Frames `bounds` inside the viewport, leaving `padding_px` on every side.
    fn fit_bounds(&mut self, viewport: ViewportId, bounds: LatLonBounds, padding_px: u32);

    fn add_overlay(&mut self, viewport: ViewportId, overlay: Overlay) -> OverlayId;

    /// Returns `false` if the overlay was already gone.
    fn remove_overlay(&mut self, overlay: OverlayId) -> bool;
}

impl<S: MapSurface + ?Sized> MapSurface for Box<S> {
    fn create_viewport(&mut self, role: ViewportRole, center: LatLon, zoom: u8) -> ViewportId {
        (**self).create_viewport(role, center, zoom)
    }

    fn set_view(&mut self, viewport: ViewportId, center: LatLon, zoom: u8) {
        (**self).set_view(viewport, center, zoom)
    }

    fn fit_bounds(&mut self, viewport: ViewportId, bounds: LatLonBounds, padding_px: u32) {
        (**self).fit_bounds(viewport, bounds, padding_px)
    }

    fn add_overlay(&mut self, viewport: ViewportId, overlay: Overlay) -> OverlayId {
        (**self).add_overlay(viewport, overlay)
    }

    fn remove_overlay(&mut self, overlay: OverlayId) -> bool {
        (**self).remove_overlay(overlay)
    }
}
