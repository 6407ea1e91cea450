use foundation::LatLon;
use thiserror::Error;

use crate::backend::BoxFuture;
use crate::error::InputError;

/// Label given to an origin taken from the device position.
pub const DEVICE_ORIGIN_LABEL: &str = "My Location";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("geolocation unsupported")]
    Unsupported,
    /// Carries the human-readable reason from the device.
    #[error("{0}")]
    Failed(String),
}

impl From<LocateError> for InputError {
    fn from(err: LocateError) -> Self {
        match err {
            LocateError::Unsupported => InputError::GeolocationUnsupported,
            LocateError::Failed(message) => InputError::Geolocation(message),
        }
    }
}

/// Asynchronous device position source.
pub trait DeviceLocator: Send + Sync {
    fn locate(&self) -> BoxFuture<'_, Result<LatLon, LocateError>>;
}

/// Locator with a predetermined answer, for hosts without positioning.
#[derive(Debug, Clone, PartialEq)]
pub enum FixedLocator {
    Unsupported,
    At(LatLon),
    Failing(String),
}

impl DeviceLocator for FixedLocator {
    fn locate(&self) -> BoxFuture<'_, Result<LatLon, LocateError>> {
        let result = match self {
            FixedLocator::Unsupported => Err(LocateError::Unsupported),
            FixedLocator::At(p) => Ok(*p),
            FixedLocator::Failing(m) => Err(LocateError::Failed(m.clone())),
        };
        Box::pin(async move { result })
    }
}
