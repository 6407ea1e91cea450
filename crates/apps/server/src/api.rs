use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use protocol::{
    ErrorBody, HotspotsRequest, HotspotsResponse, SpotDetailResponse, HEALTH_PATH,
    HOTSPOTS_PATH, SPOT_DETAIL_ROUTE,
};
use tracing::{debug, info};

use crate::mock::{generate_fish_card, generate_spots, generate_weather_card, MockConfig};
use crate::tokens::{Lookup, TokenStore};

#[derive(Clone, Default)]
pub struct AppState {
    pub mock: Arc<MockConfig>,
    pub tokens: Arc<TokenStore>,
}

impl AppState {
    pub fn new(mock: MockConfig) -> Self {
        Self {
            mock: Arc::new(mock),
            tokens: Arc::new(TokenStore::default()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(healthz))
        .route(HOTSPOTS_PATH, post(post_hotspots))
        .route(SPOT_DETAIL_ROUTE, get(get_spot))
        .with_state(state)
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (status, Json(ErrorBody::new(message)))
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

/// Takes the raw body so a missing or malformed origin maps to one 400 reply
/// instead of axum's own rejection text.
async fn post_hotspots(State(state): State<AppState>, body: Bytes) -> ApiResult<HotspotsResponse> {
    let req: HotspotsRequest = serde_json::from_slice(&body).map_err(|err| {
        debug!("rejected hotspots request: {err}");
        api_error(StatusCode::BAD_REQUEST, "Origin required")
    })?;
    let origin = req.origin.position();
    if !origin.is_finite() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Origin required"));
    }

    let spots = generate_spots(&mut rand::thread_rng(), origin, &state.mock);
    let token = state.tokens.issue(spots.iter().map(|s| s.id.clone()));
    info!(
        label = %req.origin.label,
        spots = spots.len(),
        %token,
        live_tokens = state.tokens.len(),
        "hotspots issued"
    );
    Ok(Json(HotspotsResponse { token, spots }))
}

async fn get_spot(
    State(state): State<AppState>,
    Path((token, id)): Path<(String, String)>,
) -> ApiResult<SpotDetailResponse> {
    match state.tokens.lookup(&token, &id) {
        Lookup::Found => {}
        Lookup::UnknownToken => {
            return Err(api_error(StatusCode::NOT_FOUND, "Unknown session token"))
        }
        Lookup::UnknownSpot => return Err(api_error(StatusCode::NOT_FOUND, "Unknown spot")),
    }
    Ok(Json(spot_detail()))
}

fn spot_detail() -> SpotDetailResponse {
    let mut rng = rand::thread_rng();
    SpotDetailResponse {
        fish_card: generate_fish_card(&mut rng),
        weather_card: generate_weather_card(&mut rng),
    }
}
