use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for an extracted record.
///
/// Ids come from a process-wide monotonic counter, so they are unique across
/// every extraction pass of the running process and safe to hand out from
/// several threads at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u64);

impl RecordId {
    /// Allocates a fresh id that has never been returned before in this process.
    pub fn fresh() -> Self {
        Self(NEXT_RECORD_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Rebuilds an id from its raw value, e.g. when loading a persisted selection.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One downloadable entry discovered in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    /// Link target exactly as written in the markup.
    pub href: String,
    /// `href` resolved against the base URL, or `href` itself without one.
    pub full_url: String,
    pub title: String,
    pub text: String,
    /// Empty when the listing has no size cell or shows a placeholder.
    pub size: String,
    /// Empty when the listing has no date cell or shows a placeholder.
    pub date: String,
    pub region: Option<String>,
}

impl Record {
    /// Compares everything except the id.
    pub fn same_content(&self, other: &Record) -> bool {
        self.href == other.href
            && self.full_url == other.full_url
            && self.title == other.title
            && self.text == other.text
            && self.size == other.size
            && self.date == other.date
            && self.region == other.region
    }
}
