use linkharvest_core::FetchedPage;
use thiserror::Error;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        request_id: RequestId,
        result: Result<FetchedPage, FetchError>,
    },
}

/// Categorized fetch failure. `message` is user-displayable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Failure category, used for logging and by callers that branch on cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("connection refused")]
    ConnectionRefused,
    #[error("host not found")]
    HostNotFound,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timed out")]
    Timeout,
    #[error("rate limited, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
    #[error("body over {max_bytes} bytes (declared {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("network error")]
    Network,
}
