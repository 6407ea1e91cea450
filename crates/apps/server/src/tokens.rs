use std::collections::{HashMap, HashSet, VecDeque};

use parking_lot::Mutex;
use uuid::Uuid;

pub const DEFAULT_TOKEN_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found,
    UnknownToken,
    UnknownSpot,
}

/// Remembers which spot ids each issued token covers.
///
/// Oldest tokens are evicted once `capacity` is reached.
#[derive(Debug)]
pub struct TokenStore {
    capacity: usize,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    order: VecDeque<String>,
    spots: HashMap<String, HashSet<String>>,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TOKEN_CAPACITY)
    }
}

impl TokenStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn issue<I>(&self, spot_ids: I) -> String
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let token = Uuid::new_v4().to_string();
        let ids = spot_ids.into_iter().map(Into::into).collect();

        let mut inner = self.inner.lock();
        while inner.order.len() >= self.capacity {
            let Some(old) = inner.order.pop_front() else {
                break;
            };
            inner.spots.remove(&old);
        }
        inner.order.push_back(token.clone());
        inner.spots.insert(token.clone(), ids);
        token
    }

    pub fn lookup(&self, token: &str, spot_id: &str) -> Lookup {
        let inner = self.inner.lock();
        match inner.spots.get(token) {
            None => Lookup::UnknownToken,
            Some(ids) if ids.contains(spot_id) => Lookup::Found,
            Some(_) => Lookup::UnknownSpot,
        }
    }

    /// Tokens currently retained.
    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_distinguishes_token_and_spot() {
        let store = TokenStore::default();
        assert_eq!(store.len(), 0);
        let token = store.issue(["Spot 1", "Spot 2"]);
        assert_eq!(store.lookup(&token, "Spot 2"), Lookup::Found);
        assert_eq!(store.lookup(&token, "Spot 9"), Lookup::UnknownSpot);
        assert_eq!(store.lookup("nope", "Spot 1"), Lookup::UnknownToken);
    }

    #[test]
    fn oldest_token_is_evicted() {
        let store = TokenStore::with_capacity(2);
        let a = store.issue(["A"]);
        let b = store.issue(["B"]);
        let c = store.issue(["C"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup(&a, "A"), Lookup::UnknownToken);
        assert_eq!(store.lookup(&b, "B"), Lookup::Found);
        assert_eq!(store.lookup(&c, "C"), Lookup::Found);
    }
}
