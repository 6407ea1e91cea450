use std::future::Future;
use std::pin::Pin;

use protocol::{HotspotsRequest, HotspotsResponse, SessionToken, SpotDetailResponse};

use crate::error::BackendError;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The spot backend: hotspot ranking plus per-spot fish/weather cards.
///
/// Each call is a single attempt. Implementations do not retry, cache or
/// deduplicate.
pub trait SpotBackend: Send + Sync {
    fn fetch_hotspots(
        &self,
        request: HotspotsRequest,
    ) -> BoxFuture<'_, Result<HotspotsResponse, BackendError>>;

    fn fetch_spot_detail(
        &self,
        token: SessionToken,
        spot_id: String,
    ) -> BoxFuture<'_, Result<SpotDetailResponse, BackendError>>;
}
