//! Read-only view models for the results, details and nav screens.

use std::fmt;

use protocol::SpotDetailResponse;
use serde_json::Value;

use crate::state::{ResultSet, Spot};

pub const EXTERNAL_LINK_TEXT: &str = "Open turn-by-turn in Google Maps";

#[derive(Debug, Clone, PartialEq)]
pub struct SpotListEntry {
    pub id: String,
    pub distance_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotListView {
    pub count: usize,
    pub entries: Vec<SpotListEntry>,
}

impl SpotListView {
    pub fn from_results(results: &ResultSet) -> Self {
        let entries: Vec<SpotListEntry> = results
            .spots()
            .iter()
            .map(|s| SpotListEntry {
                id: s.id.clone(),
                distance_text: distance_text(s.distance_km),
            })
            .collect();
        Self {
            count: entries.len(),
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Fish and weather cards for the selected spot.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub spot_id: String,
    pub distance_text: String,
    /// `"lat, lon"` at four decimals.
    pub coords_text: String,
    pub probability_text: String,
    pub species: Option<String>,
    pub fish: Vec<KeyValue>,
    pub weather: Vec<KeyValue>,
    pub source_text: String,
}

impl DetailsView {
    pub fn build(spot: &Spot, detail: &SpotDetailResponse) -> Self {
        let fish_card = &detail.fish_card;
        let w = &detail.weather_card;
        Self {
            spot_id: spot.id.clone(),
            distance_text: distance_text(spot.distance_km),
            coords_text: format!("{:.4}, {:.4}", spot.position.lat, spot.position.lon),
            probability_text: format!("{}%", fish_card.probability),
            species: fish_card.fish_type.clone(),
            fish: fish_card
                .details
                .iter()
                .map(|(k, v)| KeyValue::new(k.as_str(), value_text(v)))
                .collect(),
            weather: vec![
                KeyValue::new("Wind speed (m/s)", w.wind_speed.to_string()),
                KeyValue::new("Temp (°C)", w.temp.to_string()),
                KeyValue::new("Condition", w.condition.as_str()),
            ],
            source_text: format!("Source: {}", w.source),
        }
    }

    /// Plain-text rendering, one line per element, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![
            format!(
                "Selected: {} — Distance: {}",
                self.spot_id, self.distance_text
            ),
            format!("Coords: {}", self.coords_text),
            format!("Fish probability: {}", self.probability_text),
        ];
        if let Some(species) = &self.species {
            out.push(format!("Likely species: {species}"));
        }
        out.extend(self.fish.iter().map(KeyValue::to_string));
        out.extend(self.weather.iter().map(KeyValue::to_string));
        out.push(self.source_text.clone());
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub url: String,
    pub link_text: String,
}

impl NavView {
    pub fn new(url: String) -> Self {
        Self {
            url,
            link_text: EXTERNAL_LINK_TEXT.to_string(),
        }
    }
}

fn distance_text(km: f64) -> String {
    format!("{km} km")
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::LatLon;
    use pretty_assertions::assert_eq;

    fn detail() -> SpotDetailResponse {
        serde_json::from_value(serde_json::json!({
            "fish_card": {
                "probability": 63,
                "details": { "Best time": "Morning", "Depth": "2-14m", "Rods": 2 },
                "fish_type": "Pike"
            },
            "weather_card": { "wind_speed": 3.2, "temp": 18, "condition": "Sunny", "source": "OpenWeatherMap" }
        }))
        .expect("detail")
    }

    #[test]
    fn list_view_follows_display_order() {
        let rs = ResultSet::new(
            "t".into(),
            vec![
                Spot { id: "A".into(), position: LatLon::new(0.0, 0.0), distance_km: 5.0 },
                Spot { id: "B".into(), position: LatLon::new(0.0, 0.0), distance_km: 2.5 },
            ],
        );
        let view = SpotListView::from_results(&rs);
        assert_eq!(view.count, 2);
        assert_eq!(
            view.entries,
            vec![
                SpotListEntry { id: "B".into(), distance_text: "2.5 km".into() },
                SpotListEntry { id: "A".into(), distance_text: "5 km".into() },
            ]
        );
    }

    #[test]
    fn details_view_renders_cards() {
        let spot = Spot {
            id: "Spot 4".into(),
            position: LatLon::new(51.123456, -0.98761),
            distance_km: 12.3,
        };
        let view = DetailsView::build(&spot, &detail());
        assert_eq!(view.coords_text, "51.1235, -0.9876");
        assert_eq!(view.probability_text, "63%");
        assert_eq!(
            view.lines(),
            vec![
                "Selected: Spot 4 — Distance: 12.3 km".to_string(),
                "Coords: 51.1235, -0.9876".to_string(),
                "Fish probability: 63%".to_string(),
                "Likely species: Pike".to_string(),
                "Best time: Morning".to_string(),
                "Depth: 2-14m".to_string(),
                "Rods: 2".to_string(),
                "Wind speed (m/s): 3.2".to_string(),
                "Temp (°C): 18".to_string(),
                "Condition: Sunny".to_string(),
                "Source: OpenWeatherMap".to_string(),
            ]
        );
    }
}
