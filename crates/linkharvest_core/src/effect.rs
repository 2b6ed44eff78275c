use crate::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the row extractor over `html`.
    ExtractRows {
        html: String,
        base_url: Option<String>,
    },
    /// Fetch and sanitize a listing page.
    FetchPage { url: String },
    /// Store the current selection blob.
    PersistSelection { ids: Vec<RecordId> },
    /// Deliver newline-joined URLs to a sink.
    EmitExport {
        target: ExportTarget,
        text: String,
        count: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    File,
    Clipboard,
}

/// Returned by a sink after a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub target: ExportTarget,
    pub destination: String,
    pub count: usize,
}
