//! Wire format of the spot backend (JSON over HTTP).
//!
//! - `POST /api/hotspots` with [`HotspotsRequest`] → [`HotspotsResponse`]
//! - `GET /api/spot/{token}/{id}` → [`SpotDetailResponse`]
//!
//! Every non-2xx reply carries an [`ErrorBody`].

use foundation::LatLon;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque token binding a spot list to subsequent detail requests.
pub type SessionToken = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginPayload {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
}

impl OriginPayload {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotsRequest {
    pub origin: OriginPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotPayload {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub distance_km: f64,
}

impl SpotPayload {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotsResponse {
    pub token: SessionToken,
    pub spots: Vec<SpotPayload>,
}

/// Fish probability card. `details` keeps the server's key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishCard {
    pub probability: f64,
    #[serde(default)]
    pub details: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fish_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCard {
    pub wind_speed: f64,
    pub temp: f64,
    pub condition: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotDetailResponse {
    pub fish_card: FishCard,
    pub weather_card: WeatherCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
