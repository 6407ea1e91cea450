//! Runs the flow's round trips as background tasks.
//!
//! Every request is spawned with its pending ticket and reports back on a
//! channel. The command loop keeps reading input meanwhile, so a reply may
//! land after the user moved on; the flow then drops it.

use foundation::LatLon;
use protocol::{HotspotsResponse, SpotDetailResponse};
use scene::World;
use session::{
    BackendError, FlowError, LocateError, Outcome, PendingDetail, PendingHotspots, PendingLocate,
    PendingSearch, Place, SpotFinder,
};
use tokio::sync::mpsc;
use tracing::debug;

use crate::commands::Command;
use crate::render::render;

/// A finished round trip, still carrying the ticket it was issued under.
pub enum Reply {
    Place(PendingSearch, Place),
    Located(PendingLocate, Result<LatLon, LocateError>),
    Hotspots(PendingHotspots, Result<HotspotsResponse, BackendError>),
    Detail(PendingDetail, Result<SpotDetailResponse, BackendError>),
}

pub struct Driver {
    finder: SpotFinder<World>,
    tx: mpsc::UnboundedSender<Reply>,
    rx: mpsc::UnboundedReceiver<Reply>,
    in_flight: usize,
}

impl Driver {
    pub fn new(finder: SpotFinder<World>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            finder,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn finder(&self) -> &SpotFinder<World> {
        &self.finder
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Next finished round trip. Pending forever when nothing is in flight.
    pub async fn next_reply(&mut self) -> Option<Reply> {
        self.rx.recv().await
    }

    /// Runs one command and returns the lines to print.
    pub fn handle(&mut self, cmd: Command) -> Vec<String> {
        let started = match cmd {
            Command::Search(text) => match self.finder.begin_search(&text) {
                Ok(pending) => pending.map(|p| self.spawn_search(p)).is_some(),
                Err(err) => return self.screen_with(error_line(&err)),
            },
            Command::Gps => self
                .finder
                .begin_locate()
                .map(|p| self.spawn_locate(p))
                .is_some(),
            Command::Select(index) => self
                .finder
                .begin_detail(index)
                .map(|p| self.spawn_detail(p))
                .is_some(),
            Command::Go => self.finder.confirm_selection() != Outcome::Skipped,
            Command::Back => self.finder.back().is_some(),
            Command::Status | Command::Help | Command::Quit => true,
        };
        if started {
            self.screen_lines()
        } else {
            self.screen_with(SKIPPED.to_string())
        }
    }

    /// Applies a finished round trip. Dropped replies print nothing.
    pub fn apply(&mut self, reply: Reply) -> Vec<String> {
        self.in_flight = self.in_flight.saturating_sub(1);
        let result = match reply {
            Reply::Place(pending, place) => match self.finder.finish_search(pending, place) {
                Outcome::Shown(_) => Ok(self.start_hotspots()),
                other => Ok(other),
            },
            Reply::Located(pending, fix) => self
                .finder
                .finish_locate(pending, fix)
                .map(|outcome| match outcome {
                    Outcome::Shown(_) => self.start_hotspots(),
                    other => other,
                }),
            Reply::Hotspots(pending, reply) => self.finder.finish_hotspots(pending, reply),
            Reply::Detail(pending, reply) => self.finder.finish_detail(pending, reply),
        };
        match result {
            Ok(Outcome::Discarded) => {
                debug!("stale reply dropped");
                Vec::new()
            }
            Ok(_) => self.screen_lines(),
            Err(err) => self.screen_with(error_line(&err)),
        }
    }

    fn start_hotspots(&mut self) -> Outcome {
        match self.finder.begin_hotspots() {
            Some(pending) => {
                let backend = self.finder.backend();
                let tx = self.tx.clone();
                self.in_flight += 1;
                tokio::spawn(async move {
                    let reply = backend.fetch_hotspots(pending.request.clone()).await;
                    let _ = tx.send(Reply::Hotspots(pending, reply));
                });
                Outcome::Shown(self.finder.screen())
            }
            None => Outcome::Skipped,
        }
    }

    fn spawn_search(&mut self, pending: PendingSearch) {
        let resolver = self.finder.resolver();
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let place = resolver.resolve(&pending.query).await;
            let _ = tx.send(Reply::Place(pending, place));
        });
    }

    fn spawn_locate(&mut self, pending: PendingLocate) {
        let locator = self.finder.locator();
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let fix = locator.locate().await;
            let _ = tx.send(Reply::Located(pending, fix));
        });
    }

    fn spawn_detail(&mut self, pending: PendingDetail) {
        let backend = self.finder.backend();
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let reply = backend
                .fetch_spot_detail(pending.token.clone(), pending.spot_id.clone())
                .await;
            let _ = tx.send(Reply::Detail(pending, reply));
        });
    }

    fn screen_lines(&self) -> Vec<String> {
        let mut lines = render(&self.finder);
        if self.in_flight > 0 {
            lines.push(format!("({} request(s) pending)", self.in_flight));
        }
        lines
    }

    fn screen_with(&self, message: String) -> Vec<String> {
        let mut lines = vec![message];
        lines.extend(self.screen_lines());
        lines
    }
}

const SKIPPED: &str = "! nothing to do here yet";

fn error_line(err: &FlowError) -> String {
    format!("! {err}")
}
