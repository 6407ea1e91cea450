//! Randomized stand-in data for hotspots and spot cards.

use std::f64::consts::TAU;

use foundation::LatLon;
use foundation::math::offset_by_km;
use protocol::{FishCard, SpotPayload, WeatherCard};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{Map, Value};

const BEST_TIMES: &[&str] = &["Morning", "Afternoon", "Evening", "Night"];
const BAITS: &[&str] = &["Worms", "Lures", "Flies", "Corn", "Shrimp"];
const TECHNIQUES: &[&str] = &["Bottom fishing", "Float fishing", "Spinning", "Trolling"];
const CONDITIONS: &[&str] = &["Sunny", "Cloudy", "Rainy", "Windy", "Foggy"];
const SPECIES: &[(&str, u32)] = &[
    ("Bass", 35),
    ("Trout", 25),
    ("Pike", 15),
    ("Salmon", 10),
    ("Carp", 10),
    ("Catfish", 5),
];
const WEATHER_SOURCE: &str = "OpenWeatherMap";

#[derive(Debug, Clone, PartialEq)]
pub struct MockConfig {
    pub spot_count: usize,
    pub min_km: f64,
    pub max_km: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            spot_count: 15,
            min_km: 2.0,
            max_km: 50.0,
        }
    }
}

/// Spots scattered around `origin` at random bearings, named `Spot 1..=n`.
pub fn generate_spots<R: Rng>(rng: &mut R, origin: LatLon, cfg: &MockConfig) -> Vec<SpotPayload> {
    let (lo, hi) = if cfg.min_km <= cfg.max_km {
        (cfg.min_km, cfg.max_km)
    } else {
        (cfg.max_km, cfg.min_km)
    };
    (0..cfg.spot_count)
        .map(|i| {
            let bearing = rng.gen_range(0.0..TAU);
            let distance = rng.gen_range(lo..=hi);
            let p = offset_by_km(origin, distance, bearing);
            SpotPayload {
                id: format!("Spot {}", i + 1),
                lat: p.lat,
                lon: p.lon,
                distance_km: round1(distance),
            }
        })
        .collect()
}

pub fn generate_fish_card<R: Rng>(rng: &mut R) -> FishCard {
    let mut details = Map::new();
    details.insert("Best time".into(), pick(rng, BEST_TIMES));
    details.insert("Bait recommended".into(), pick(rng, BAITS));
    details.insert(
        "Depth".into(),
        Value::String(format!(
            "{}-{}m",
            rng.gen_range(1..=10),
            rng.gen_range(11..=20)
        )),
    );
    details.insert("Technique".into(), pick(rng, TECHNIQUES));

    let fish_type = WeightedIndex::new(SPECIES.iter().map(|(_, w)| *w))
        .ok()
        .map(|dist| SPECIES[dist.sample(rng)].0.to_string());

    FishCard {
        probability: f64::from(rng.gen_range(10u8..=95)),
        details,
        fish_type,
    }
}

pub fn generate_weather_card<R: Rng>(rng: &mut R) -> WeatherCard {
    WeatherCard {
        wind_speed: round1(rng.gen_range(0.0..=15.0)),
        temp: f64::from(rng.gen_range(5i8..=30)),
        condition: CONDITIONS
            .choose(rng)
            .copied()
            .unwrap_or("Sunny")
            .to_string(),
        source: WEATHER_SOURCE.to_string(),
    }
}

fn pick<R: Rng>(rng: &mut R, options: &[&str]) -> Value {
    Value::String(options.choose(rng).copied().unwrap_or_default().to_string())
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
