use std::collections::BTreeMap;

use foundation::LatLon;

use crate::backend::BoxFuture;

/// A resolved place: a point plus the label to show for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub point: LatLon,
    pub name: String,
}

impl Place {
    pub fn new(lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            point: LatLon::new(lat, lon),
            name: name.into(),
        }
    }
}

/// Free-text place lookup.
///
/// Resolution never fails: text that matches nothing resolves to the
/// resolver's fallback point, labelled with the query itself.
pub trait PlaceResolver: Send + Sync {
    fn resolve<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Place>;
}

/// Fixed table of known places keyed by lowercase name.
#[derive(Debug, Clone)]
pub struct StaticGazetteer {
    places: BTreeMap<String, Place>,
    fallback: LatLon,
}

impl StaticGazetteer {
    /// Gazetteer preloaded with the built-in city list.
    pub fn new(fallback: LatLon) -> Self {
        Self::empty(fallback)
            .with_place("london", Place::new(51.5074, -0.1278, "London"))
            .with_place("new york", Place::new(40.7128, -74.0060, "New York"))
            .with_place("tokyo", Place::new(35.6895, 139.6917, "Tokyo"))
            .with_place("paris", Place::new(48.8566, 2.3522, "Paris"))
            .with_place("sydney", Place::new(-33.8688, 151.2093, "Sydney"))
    }

    pub fn empty(fallback: LatLon) -> Self {
        Self {
            places: BTreeMap::new(),
            fallback,
        }
    }

    pub fn with_place(mut self, key: &str, place: Place) -> Self {
        self.places.insert(normalize(key), place);
        self
    }

    pub fn lookup(&self, query: &str) -> Place {
        match self.places.get(&normalize(query)) {
            Some(place) => place.clone(),
            None => Place {
                point: self.fallback,
                name: query.trim().to_string(),
            },
        }
    }
}

impl PlaceResolver for StaticGazetteer {
    fn resolve<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Place> {
        Box::pin(async move { self.lookup(query) })
    }
}

fn normalize(q: &str) -> String {
    q.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{Place, StaticGazetteer};
    use foundation::LatLon;

    const FALLBACK: LatLon = LatLon::new(51.5074, -0.1278);

    #[test]
    fn known_place_is_case_and_space_insensitive() {
        let g = StaticGazetteer::new(FALLBACK);
        assert_eq!(g.lookup("london"), Place::new(51.5074, -0.1278, "London"));
        assert_eq!(g.lookup("  New York "), Place::new(40.7128, -74.0060, "New York"));
    }

    #[test]
    fn unmatched_text_falls_back_with_query_label() {
        let g = StaticGazetteer::new(FALLBACK);
        let p = g.lookup("Atlantis");
        assert_eq!(p.point, FALLBACK);
        assert_eq!(p.name, "Atlantis");
    }

    #[test]
    fn resolve_matches_lookup() {
        use super::PlaceResolver;
        let g = StaticGazetteer::new(LatLon::new(0.0, 0.0)).with_place("home", Place::new(1.0, 2.0, "Home"));
        let p = pollster::block_on(g.resolve("HOME"));
        assert_eq!(p, Place::new(1.0, 2.0, "Home"));
    }
}
