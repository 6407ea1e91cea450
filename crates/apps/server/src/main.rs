use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod mock;
mod tokens;

use api::AppState;
use mock::MockConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr: SocketAddr = env::var("SPOTFINDER_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
        .parse()
        .context("invalid SPOTFINDER_ADDR")?;

    let defaults = MockConfig::default();
    let mock = MockConfig {
        spot_count: env_var_usize("SPOTFINDER_SPOT_COUNT", defaults.spot_count),
        min_km: env_var_f64("SPOTFINDER_MIN_KM", defaults.min_km),
        max_km: env_var_f64("SPOTFINDER_MAX_KM", defaults.max_km),
    };
    info!(?mock, "mock data settings");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    let app = api::router(AppState::new(mock))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("spot backend listening on http://{addr}");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn env_var_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_var_f64(key: &str, default: f64) -> f64 {
    finite_or(env::var(key).ok().as_deref(), default)
}

/// `NaN` and infinities parse as `f64` but cannot bound a distance range.
fn finite_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::finite_or;

    #[test]
    fn non_finite_distances_fall_back_to_default() {
        assert_eq!(finite_or(Some("12.5"), 2.0), 12.5);
        assert_eq!(finite_or(Some(" 7 "), 2.0), 7.0);
        assert_eq!(finite_or(Some("NaN"), 2.0), 2.0);
        assert_eq!(finite_or(Some("inf"), 50.0), 50.0);
        assert_eq!(finite_or(Some("-infinity"), 50.0), 50.0);
        assert_eq!(finite_or(Some("far"), 50.0), 50.0);
        assert_eq!(finite_or(None, 50.0), 50.0);
    }
}
