//! Remote query pipeline and screen orchestration.
//!
//! Control flow for every user action:
//! - check the action is a defined forward move from the active screen
//! - issue a [`Ticket`] capturing the active screen and generation
//! - run the single round trip
//! - drop the reply if the ticket is no longer current, otherwise mutate the
//!   session state, refresh the affected viewport and move to the next screen
//!
//! Each round trip is also exposed as a `begin_*` / `finish_*` pair so hosts
//! that keep the UI responsive during a request can drive it themselves.

use std::sync::Arc;

use foundation::LatLon;
use protocol::{HotspotsRequest, HotspotsResponse, SessionToken, SpotDetailResponse};
use runtime::{Event, EventBus, GenerationGuard, Ticket};
use scene::{MapSurface, SpotMarker, SurfaceManager};
use tracing::{debug, info, warn};

use crate::backend::SpotBackend;
use crate::config::FlowConfig;
use crate::error::{BackendError, FlowError, InputError, RemoteOp};
use crate::location::{DEVICE_ORIGIN_LABEL, DeviceLocator, FixedLocator, LocateError};
use crate::navigation::build_route;
use crate::place::{Place, PlaceResolver, StaticGazetteer};
use crate::screen::{Screen, ViewController};
use crate::state::{Origin, ResultSet, SessionState, Spot};
use crate::views::{DetailsView, NavView, SpotListView};

/// What a user action ended up doing.
#[must_use]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State was updated and this screen is now active.
    Shown(Screen),
    /// The action is not defined from the active screen, or a precondition
    /// was missing; nothing happened.
    Skipped,
    /// The reply arrived after the session moved on and was dropped.
    Discarded,
}

/// Place lookup in flight.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    pub ticket: Ticket<Screen>,
    pub query: String,
}

/// Device position request in flight.
#[derive(Debug, Clone)]
pub struct PendingLocate {
    pub ticket: Ticket<Screen>,
}

#[derive(Debug, Clone)]
pub struct PendingHotspots {
    pub ticket: Ticket<Screen>,
    pub request: HotspotsRequest,
}

#[derive(Debug, Clone)]
pub struct PendingDetail {
    pub ticket: Ticket<Screen>,
    pub index: usize,
    pub token: SessionToken,
    pub spot_id: String,
}

pub struct SpotFinder<S> {
    config: FlowConfig,
    state: SessionState,
    views: ViewController,
    maps: SurfaceManager<S>,
    guard: GenerationGuard<Screen>,
    events: EventBus,
    backend: Arc<dyn SpotBackend>,
    resolver: Arc<dyn PlaceResolver>,
    locator: Arc<dyn DeviceLocator>,
    details: Option<DetailsView>,
    nav: Option<NavView>,
}

impl<S: MapSurface> SpotFinder<S> {
    /// Builds a session with the built-in gazetteer and no device location.
    pub fn new(config: FlowConfig, surface: S, backend: Arc<dyn SpotBackend>) -> Self {
        let resolver = Arc::new(StaticGazetteer::new(config.fallback_point));
        Self {
            maps: SurfaceManager::new(surface, config.maps.clone()),
            config,
            state: SessionState::new(),
            views: ViewController::new(),
            guard: GenerationGuard::new(Screen::Search),
            events: EventBus::new(),
            backend,
            resolver,
            locator: Arc::new(FixedLocator::Unsupported),
            details: None,
            nav: None,
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn PlaceResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_locator(mut self, locator: Arc<dyn DeviceLocator>) -> Self {
        self.locator = locator;
        self
    }

    /// Creates the viewports, then shows the search screen.
    pub fn start(&mut self) {
        self.maps.init_maps();
        self.show(Screen::Search);
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn backend(&self) -> Arc<dyn SpotBackend> {
        Arc::clone(&self.backend)
    }

    pub fn resolver(&self) -> Arc<dyn PlaceResolver> {
        Arc::clone(&self.resolver)
    }

    pub fn locator(&self) -> Arc<dyn DeviceLocator> {
        Arc::clone(&self.locator)
    }

    pub fn screen(&self) -> Screen {
        self.views.active()
    }

    pub fn views(&self) -> &ViewController {
        &self.views
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn maps(&self) -> &SurfaceManager<S> {
        &self.maps
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn spot_list(&self) -> Option<SpotListView> {
        self.state.results().map(SpotListView::from_results)
    }

    pub fn details(&self) -> Option<&DetailsView> {
        self.details.as_ref()
    }

    pub fn nav(&self) -> Option<&NavView> {
        self.nav.as_ref()
    }

    /// Shows `screen` with no precondition and no data change.
    pub fn show(&mut self, screen: Screen) {
        self.views.show(screen);
        let generation = self.guard.enter(screen);
        self.events.emit(generation, "screen", screen.name());
        info!(screen = screen.name(), generation = generation.0, "screen shown");
    }

    /// Backward transition from the active screen; `None` on the search screen.
    pub fn back(&mut self) -> Option<Screen> {
        let prev = self.screen().previous()?;
        self.show(prev);
        Some(prev)
    }

    /// Resolves `text` to an origin, then fetches hotspots around it.
    pub async fn search_place(&mut self, text: &str) -> Result<Outcome, FlowError> {
        let Some(pending) = self.begin_search(text)? else {
            return Ok(Outcome::Skipped);
        };
        let place = self.resolver.resolve(&pending.query).await;
        match self.finish_search(pending, place) {
            Outcome::Shown(_) => self.fetch_hotspots().await,
            other => Ok(other),
        }
    }

    /// Starts a place lookup. `None` off the search screen.
    pub fn begin_search(&mut self, text: &str) -> Result<Option<PendingSearch>, FlowError> {
        if !self.on_screen(Screen::Search, "search") {
            return Ok(None);
        }
        let query = text.trim();
        if query.is_empty() {
            return Err(InputError::EmptyQuery.into());
        }
        let ticket = self.guard.issue();
        self.events
            .emit(ticket.generation, "request", format!("resolve {query}"));
        Ok(Some(PendingSearch {
            ticket,
            query: query.to_string(),
        }))
    }

    /// Applies a resolved place as the new origin.
    pub fn finish_search(&mut self, pending: PendingSearch, place: Place) -> Outcome {
        if !self.accept(&pending.ticket, "resolve") {
            return Outcome::Discarded;
        }
        self.set_origin(place.point, &place.name);
        Outcome::Shown(Screen::Search)
    }

    /// Uses the device position as origin, then fetches hotspots around it.
    pub async fn use_device_location(&mut self) -> Result<Outcome, FlowError> {
        let Some(pending) = self.begin_locate() else {
            return Ok(Outcome::Skipped);
        };
        let fix = self.locator.locate().await;
        match self.finish_locate(pending, fix)? {
            Outcome::Shown(_) => self.fetch_hotspots().await,
            other => Ok(other),
        }
    }

    /// Starts a device position request. `None` off the search screen.
    pub fn begin_locate(&mut self) -> Option<PendingLocate> {
        if !self.on_screen(Screen::Search, "locate") {
            return None;
        }
        let ticket = self.guard.issue();
        self.events.emit(ticket.generation, "request", "locate");
        Some(PendingLocate { ticket })
    }

    /// Applies a device fix. Stale replies are dropped before their error is
    /// looked at, so a late failure is never reported.
    pub fn finish_locate(
        &mut self,
        pending: PendingLocate,
        fix: Result<LatLon, LocateError>,
    ) -> Result<Outcome, FlowError> {
        if !self.accept(&pending.ticket, "locate") {
            return Ok(Outcome::Discarded);
        }
        let point = fix.map_err(InputError::from)?;
        self.set_origin(point, DEVICE_ORIGIN_LABEL);
        Ok(Outcome::Shown(Screen::Search))
    }

    /// Replaces the origin and its search-viewport marker.
    pub fn set_origin(&mut self, point: LatLon, label: &str) {
        self.state.set_origin(Origin::new(point, label));
        self.maps.set_origin(point, label);
        let generation = self.guard.advance();
        debug!(lat = point.lat, lon = point.lon, label, generation = generation.0, "origin set");
    }

    pub async fn fetch_hotspots(&mut self) -> Result<Outcome, FlowError> {
        let Some(pending) = self.begin_hotspots() else {
            return Ok(Outcome::Skipped);
        };
        let reply = self.backend.fetch_hotspots(pending.request.clone()).await;
        self.finish_hotspots(pending, reply)
    }

    /// Captures the hotspot request for the current origin.
    ///
    /// `None` off the search screen or without an origin.
    pub fn begin_hotspots(&mut self) -> Option<PendingHotspots> {
        if !self.on_screen(Screen::Search, "hotspots") {
            return None;
        }
        let origin = self.state.origin()?;
        let request = HotspotsRequest {
            origin: origin.to_payload(),
        };
        let ticket = self.guard.issue();
        self.events
            .emit(ticket.generation, "request", format!("hotspots {}", origin.label));
        Some(PendingHotspots { ticket, request })
    }

    pub fn finish_hotspots(
        &mut self,
        pending: PendingHotspots,
        reply: Result<HotspotsResponse, BackendError>,
    ) -> Result<Outcome, FlowError> {
        if !self.accept(&pending.ticket, "hotspots") {
            return Ok(Outcome::Discarded);
        }
        let response = reply.map_err(|err| {
            warn!(error = %err, "hotspot fetch failed");
            FlowError::remote(RemoteOp::Hotspots, err)
        })?;

        let spots: Vec<Spot> = response.spots.into_iter().map(Spot::from).collect();
        self.state
            .replace_results(ResultSet::new(response.token, spots));
        self.details = None;
        self.nav = None;

        let origin = pending.request.origin.position();
        if let Some(results) = self.state.results() {
            let markers = results.spots().iter().map(|s| SpotMarker {
                id: s.id.as_str(),
                position: s.position,
            });
            let count = self.maps.refresh_results(origin, markers);
            debug!(spots = results.len(), markers = count, "results refreshed");
        }

        self.show(Screen::Results);
        Ok(Outcome::Shown(Screen::Results))
    }

    /// Fetches the detail cards for the spot at `index` of the displayed list.
    pub async fn select_spot(&mut self, index: usize) -> Result<Outcome, FlowError> {
        let Some(pending) = self.begin_detail(index) else {
            return Ok(Outcome::Skipped);
        };
        let reply = self
            .backend
            .fetch_spot_detail(pending.token.clone(), pending.spot_id.clone())
            .await;
        self.finish_detail(pending, reply)
    }

    /// `None` off the results screen or for an index outside the list.
    pub fn begin_detail(&mut self, index: usize) -> Option<PendingDetail> {
        if !self.on_screen(Screen::Results, "detail") {
            return None;
        }
        let results = self.state.results()?;
        let spot = results.get(index)?;
        let pending = PendingDetail {
            ticket: self.guard.issue(),
            index,
            token: results.token().to_string(),
            spot_id: spot.id.clone(),
        };
        self.events.emit(
            pending.ticket.generation,
            "request",
            format!("detail {}", pending.spot_id),
        );
        Some(pending)
    }

    /// Applies a detail reply. The selection only changes on success.
    pub fn finish_detail(
        &mut self,
        pending: PendingDetail,
        reply: Result<SpotDetailResponse, BackendError>,
    ) -> Result<Outcome, FlowError> {
        if !self.accept(&pending.ticket, "detail") {
            return Ok(Outcome::Discarded);
        }
        let detail = reply.map_err(|err| {
            warn!(error = %err, spot = %pending.spot_id, "spot detail fetch failed");
            FlowError::remote(RemoteOp::SpotDetail, err)
        })?;

        let Some(spot) = self.state.select(pending.index) else {
            return Ok(Outcome::Skipped);
        };
        self.details = Some(DetailsView::build(spot, &detail));
        self.show(Screen::Details);
        Ok(Outcome::Shown(Screen::Details))
    }

    /// Draws the route to the selected spot and shows the nav screen.
    ///
    /// Skipped without any side effect off the details screen or when origin
    /// or selection is missing.
    pub fn confirm_selection(&mut self) -> Outcome {
        if !self.on_screen(Screen::Details, "confirm") {
            return Outcome::Skipped;
        }
        let Some(route) = build_route(
            self.state.origin(),
            self.state.selected_spot(),
            &self.config.directions_base_url,
        ) else {
            debug!("confirm without origin or selection; skipped");
            return Outcome::Skipped;
        };
        let [from, to] = route.line;
        self.maps.draw_route(from, to);
        self.nav = Some(NavView::new(route.url));
        self.show(Screen::Nav);
        Outcome::Shown(Screen::Nav)
    }

    fn on_screen(&self, expected: Screen, action: &'static str) -> bool {
        let active = self.screen();
        if active != expected {
            debug!(action, active = active.name(), "action not available here; skipped");
            return false;
        }
        true
    }

    fn accept(&mut self, ticket: &Ticket<Screen>, what: &'static str) -> bool {
        if self.guard.is_current(ticket) {
            return true;
        }
        let current = self.guard.generation();
        debug!(
            request = what,
            issued = ticket.generation.0,
            current = current.0,
            "stale reply dropped"
        );
        self.events.emit(current, "discard", what);
        false
    }
}
