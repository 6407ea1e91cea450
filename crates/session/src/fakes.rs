//! Scripted collaborators for flow tests.

use std::collections::VecDeque;

use parking_lot::Mutex;

use protocol::{HotspotsRequest, HotspotsResponse, SessionToken, SpotDetailResponse, SpotPayload};

use crate::backend::{BoxFuture, SpotBackend};
use crate::error::BackendError;

#[derive(Default)]
pub struct ScriptedBackend {
    hotspots: Mutex<VecDeque<Result<HotspotsResponse, BackendError>>>,
    details: Mutex<VecDeque<Result<SpotDetailResponse, BackendError>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_hotspots(self, reply: Result<HotspotsResponse, BackendError>) -> Self {
        self.hotspots.lock().push_back(reply);
        self
    }

    pub fn push_detail(self, reply: Result<SpotDetailResponse, BackendError>) -> Self {
        self.details.lock().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl SpotBackend for ScriptedBackend {
    fn fetch_hotspots(
        &self,
        request: HotspotsRequest,
    ) -> BoxFuture<'_, Result<HotspotsResponse, BackendError>> {
        self.calls
            .lock()
            .push(format!("hotspots {}", request.origin.label));
        let reply = self
            .hotspots
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted reply".into())));
        Box::pin(async move { reply })
    }

    fn fetch_spot_detail(
        &self,
        token: SessionToken,
        spot_id: String,
    ) -> BoxFuture<'_, Result<SpotDetailResponse, BackendError>> {
        self.calls
            .lock()
            .push(format!("detail {token} {spot_id}"));
        let reply = self
            .details
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted reply".into())));
        Box::pin(async move { reply })
    }
}

pub fn hotspots(token: &str, spots: &[(&str, f64)]) -> HotspotsResponse {
    HotspotsResponse {
        token: token.to_string(),
        spots: spots
            .iter()
            .enumerate()
            .map(|(i, (id, distance_km))| SpotPayload {
                id: id.to_string(),
                lat: 51.5 + i as f64 * 0.01,
                lon: -0.1,
                distance_km: *distance_km,
            })
            .collect(),
    }
}

pub fn detail(probability: f64) -> SpotDetailResponse {
    serde_json::from_value(serde_json::json!({
        "fish_card": { "probability": probability, "details": { "Bait recommended": "Worms" } },
        "weather_card": { "wind_speed": 5.5, "temp": 12, "condition": "Windy", "source": "OpenWeatherMap" }
    }))
    .expect("detail fixture")
}

pub fn server_error(status: u16, message: &str) -> BackendError {
    BackendError::Status {
        status,
        message: Some(message.to_string()),
    }
}
