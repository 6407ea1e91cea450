use serde::{Deserialize, Serialize};

/// WGS84 position in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Geographic axis-aligned bounds (south-west / north-east corners).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLonBounds {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

impl LatLonBounds {
    pub fn new(south_west: LatLon, north_east: LatLon) -> Self {
        LatLonBounds {
            south_west,
            north_east,
        }
    }

    pub fn from_point(p: LatLon) -> Self {
        Self::new(p, p)
    }

    /// Smallest bounds containing every finite point; `None` if there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLon>) -> Option<Self> {
        let mut out: Option<Self> = None;
        for p in points.into_iter().filter(|p| p.is_finite()) {
            match out.as_mut() {
                Some(b) => b.extend(*p),
                None => out = Some(Self::from_point(*p)),
            }
        }
        out
    }

    pub fn extend(&mut self, p: LatLon) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lon = self.south_west.lon.min(p.lon);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lon = self.north_east.lon.max(p.lon);
    }

    pub fn contains(&self, p: LatLon) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lon >= self.south_west.lon
            && p.lon <= self.north_east.lon
    }

    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lon + self.north_east.lon) / 2.0,
        )
    }
}
