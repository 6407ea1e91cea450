//! Text rendering of the active screen.

use scene::World;
use session::{Screen, SpotFinder};

pub fn render(finder: &SpotFinder<World>) -> Vec<String> {
    let screen = finder.screen();
    let mut out = vec![format!("[{}]", screen.name())];
    match screen {
        Screen::Search => search_lines(finder, &mut out),
        Screen::Results => results_lines(finder, &mut out),
        Screen::Details => {
            if let Some(details) = finder.details() {
                out.extend(details.lines());
            }
        }
        Screen::Nav => {
            if let Some(nav) = finder.nav() {
                out.push(format!("{}: {}", nav.link_text, nav.url));
            }
        }
    }
    out.push(map_line(finder, screen));
    out
}

fn search_lines(finder: &SpotFinder<World>, out: &mut Vec<String>) {
    match finder.state().origin() {
        Some(origin) => out.push(format!(
            "Origin: {} ({:.4}, {:.4})",
            origin.label, origin.point.lat, origin.point.lon
        )),
        None => out.push("No origin yet. Try `search <place>` or `gps`.".to_string()),
    }
}

fn results_lines(finder: &SpotFinder<World>, out: &mut Vec<String>) {
    let Some(list) = finder.spot_list() else {
        out.push("No results.".to_string());
        return;
    };
    if let Some(origin) = finder.state().origin() {
        out.push(format!("{} spots near {}", list.count, origin.label));
    }
    for (i, entry) in list.entries.iter().enumerate() {
        out.push(format!("{:>3}. {} ({})", i + 1, entry.id, entry.distance_text));
    }
}

fn map_line(finder: &SpotFinder<World>, screen: Screen) -> String {
    let maps = finder.maps();
    let Some(vps) = maps.viewports() else {
        return "map: not initialized".to_string();
    };
    let world = maps.surface();
    let (vp, what) = match screen {
        Screen::Search => (vps.search, "markers"),
        Screen::Results => (vps.results, "markers"),
        Screen::Details => return String::from("map: hidden"),
        Screen::Nav => (vps.nav, "route lines"),
    };
    let count = match screen {
        Screen::Nav => world.polyline_count(vp),
        _ => world.marker_count(vp),
    };
    let center = world
        .viewport(vp)
        .map(|v| format!(" centered on {:.4}, {:.4} z{}", v.center.lat, v.center.lon, v.zoom))
        .unwrap_or_default();
    format!("map: {count} {what}{center}")
}

#[cfg(test)]
mod tests {
    use super::render;
    use scene::World;
    use session::{FlowConfig, SpotFinder};
    use std::sync::Arc;

    use crate::http::HttpBackend;

    #[test]
    fn fresh_session_renders_search_prompt() {
        let backend = HttpBackend::new("http://127.0.0.1:9").expect("backend");
        let mut finder = SpotFinder::new(FlowConfig::default(), World::new(), Arc::new(backend));
        finder.start();
        let lines = render(&finder);
        assert_eq!(lines[0], "[search]");
        assert!(lines[1].starts_with("No origin yet"));
        assert_eq!(lines[2], "map: 0 markers centered on 51.5050, -0.0900 z13");
    }

    async fn stub_backend() -> String {
        use axum::routing::{get, post};
        use axum::{Json, Router};
        use serde_json::json;

        let app = Router::new()
            .route(
                "/api/hotspots",
                post(|| async {
                    Json(json!({
                        "token": "t1",
                        "spots": [
                            { "id": "Spot 1", "lat": 48.9, "lon": 2.4, "distance_km": 12.5 },
                            { "id": "Spot 2", "lat": 48.86, "lon": 2.36, "distance_km": 2.1 }
                        ]
                    }))
                }),
            )
            .route(
                "/api/spot/:token/:id",
                get(|| async {
                    Json(json!({
                        "fish_card": { "probability": 64, "details": { "Technique": "Spinning" }, "fish_type": "Pike" },
                        "weather_card": { "wind_speed": 3.2, "temp": 18, "condition": "Cloudy", "source": "OpenWeatherMap" }
                    }))
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn search_select_go_over_http() {
        let backend = HttpBackend::new(&stub_backend().await).expect("backend");
        let mut finder = SpotFinder::new(FlowConfig::default(), World::new(), Arc::new(backend));
        finder.start();

        let _ = finder.search_place("Paris").await.expect("search");
        let lines = render(&finder);
        assert_eq!(
            lines,
            vec![
                "[results]".to_string(),
                "2 spots near Paris".to_string(),
                "  1. Spot 2 (2.1 km)".to_string(),
                "  2. Spot 1 (12.5 km)".to_string(),
                "map: 3 markers centered on 48.8566, 2.3522 z9".to_string(),
            ]
        );

        let _ = finder.select_spot(0).await.expect("select");
        let lines = render(&finder);
        assert_eq!(lines[0], "[details]");
        assert!(lines.contains(&"Likely species: Pike".to_string()));
        assert!(lines.contains(&"Source: OpenWeatherMap".to_string()));

        let _ = finder.confirm_selection();
        let lines = render(&finder);
        assert_eq!(lines[0], "[nav]");
        assert_eq!(
            lines[1],
            "Open turn-by-turn in Google Maps: https://www.google.com/maps/dir/48.8566,2.3522/48.86,2.36"
        );
        assert!(lines[2].starts_with("map: 1 route lines"));
    }
}
