use thiserror::Error;

/// Problems with what the user asked for. Reported immediately, no state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Enter a place name to search")]
    EmptyQuery,
    #[error("Geolocation not supported")]
    GeolocationUnsupported,
    #[error("Failed to get location: {0}")]
    Geolocation(String),
}

/// Failure of a single backend round trip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// Non-2xx reply; `message` is the body's `error` field when present.
    #[error("backend replied {status}")]
    Status { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl BackendError {
    /// The server-provided message, if it is non-empty.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::Status {
                message: Some(m), ..
            } if !m.trim().is_empty() => Some(m.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RemoteOp {
    Hotspots,
    SpotDetail,
}

impl RemoteOp {
    pub fn fallback_message(self) -> &'static str {
        match self {
            RemoteOp::Hotspots => "Failed to fetch hotspots",
            RemoteOp::SpotDetail => "Failed to fetch spot details",
        }
    }
}

/// Every user-visible failure of the flow. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{message}")]
    Remote {
        op: RemoteOp,
        message: String,
        #[source]
        cause: BackendError,
    },
}

impl FlowError {
    pub fn remote(op: RemoteOp, cause: BackendError) -> Self {
        let message = cause
            .server_message()
            .unwrap_or(op.fallback_message())
            .to_string();
        FlowError::Remote { op, message, cause }
    }
}
