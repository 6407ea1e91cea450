use foundation::LatLon;
use protocol::{OriginPayload, SessionToken, SpotPayload};

/// Where the search starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    pub point: LatLon,
    pub label: String,
}

impl Origin {
    pub fn new(point: LatLon, label: impl Into<String>) -> Self {
        Self {
            point,
            label: label.into(),
        }
    }

    pub fn to_payload(&self) -> OriginPayload {
        OriginPayload {
            lat: self.point.lat,
            lon: self.point.lon,
            label: self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    pub id: String,
    pub position: LatLon,
    pub distance_km: f64,
}

impl From<SpotPayload> for Spot {
    fn from(p: SpotPayload) -> Self {
        Self {
            position: p.position(),
            id: p.id,
            distance_km: p.distance_km,
        }
    }
}

/// One successful hotspot query: the token it was issued under and its spots
/// in display order (ascending distance, ties in arrival order).
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    token: SessionToken,
    spots: Vec<Spot>,
}

impl ResultSet {
    pub fn new(token: SessionToken, mut spots: Vec<Spot>) -> Self {
        // `sort_by` is stable.
        spots.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Self { token, spots }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn get(&self, index: usize) -> Option<&Spot> {
        self.spots.get(index)
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}

/// Per-session record of origin, result set and selection.
///
/// The selection is an index into the current result set and is dropped
/// whenever that set is replaced, so it can never point at a stale spot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    origin: Option<Origin>,
    results: Option<ResultSet>,
    selected: Option<usize>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = Some(origin);
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.results.as_ref().map(ResultSet::token)
    }

    pub fn replace_results(&mut self, results: ResultSet) {
        self.results = Some(results);
        self.selected = None;
    }

    /// Selects the spot at `index` of the current result set.
    ///
    /// Out-of-range indices leave the selection untouched and return `None`.
    pub fn select(&mut self, index: usize) -> Option<&Spot> {
        let results = self.results.as_ref()?;
        let spot = results.get(index)?;
        self.selected = Some(index);
        Some(spot)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_spot(&self) -> Option<&Spot> {
        let index = self.selected?;
        self.results.as_ref()?.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(id: &str, distance_km: f64) -> Spot {
        Spot {
            id: id.to_string(),
            position: LatLon::new(0.0, 0.0),
            distance_km,
        }
    }

    fn ids(rs: &ResultSet) -> Vec<&str> {
        rs.spots().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn spots_sorted_ascending_by_distance() {
        let rs = ResultSet::new("t".into(), vec![spot("A", 5.0), spot("B", 2.0)]);
        assert_eq!(ids(&rs), vec!["B", "A"]);
    }

    #[test]
    fn ties_keep_arrival_order() {
        let rs = ResultSet::new(
            "t".into(),
            vec![spot("C", 3.0), spot("A", 1.0), spot("D", 3.0), spot("B", 3.0)],
        );
        assert_eq!(ids(&rs), vec!["A", "C", "D", "B"]);
    }

    #[test]
    fn replacing_results_clears_selection() {
        let mut state = SessionState::new();
        state.replace_results(ResultSet::new("t1".into(), vec![spot("A", 1.0)]));
        assert!(state.select(0).is_some());
        assert_eq!(state.selected_spot().map(|s| s.id.as_str()), Some("A"));

        state.replace_results(ResultSet::new("t2".into(), vec![spot("Z", 1.0)]));
        assert!(state.selected_spot().is_none());
        assert_eq!(state.token(), Some("t2"));
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut state = SessionState::new();
        assert!(state.select(0).is_none());
        state.replace_results(ResultSet::new("t".into(), vec![spot("A", 1.0)]));
        state.select(0);
        assert!(state.select(5).is_none());
        assert_eq!(state.selected_index(), Some(0));
    }
}
