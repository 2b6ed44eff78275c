//! Link harvester engine: listing extraction, page fetching and IO sinks.
mod decode;
mod engine;
mod export;
mod fetch;
mod persist;
mod rate_limit;
mod resolve;
mod rows;
mod sanitize;
mod types;

pub use decode::{decode_body, DecodedBody};
pub use engine::EngineHandle;
pub use export::{
    ExportError, ExportSink, FileExportSink, WriterExportSink, DEFAULT_EXPORT_FILENAME,
};
pub use fetch::{Clock, FetchSettings, PageFetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use rate_limit::FixedWindowLimiter;
pub use resolve::{is_absolute, resolve_full_url};
pub use rows::{ExtractError, RowExtractor};
pub use sanitize::strip_scripts_and_styles;
pub use types::{EngineEvent, FailureKind, FetchError, RequestId};
