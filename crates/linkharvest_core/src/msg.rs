use crate::{ExportReceipt, ExportTarget, FetchedPage, Record, RecordId, SelectMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User replaced the HTML source buffer.
    HtmlInputChanged(String),
    /// User edited the base URL used to build full links.
    BaseUrlChanged(String),
    /// User asked to parse the HTML buffer.
    ParseClicked,
    /// Row extractor finished.
    RowsExtracted(Result<Vec<Record>, String>),
    /// User asked to fetch a listing page by URL.
    FetchClicked(String),
    /// Fetch collaborator finished.
    PageFetched(Result<FetchedPage, String>),
    QueryChanged(String),
    FacetToggled(String),
    /// Clears facets and the query.
    FiltersCleared,
    RecordToggled(RecordId),
    SelectAllVisible(SelectMode),
    DeselectAllClicked,
    /// Remove one entry from the "currently selected" review list.
    RemoveSelected(RecordId),
    ClearSelectedClicked,
    UndoClicked,
    ShowSelectedToggled,
    ExportClicked(ExportTarget),
    /// Export sink finished.
    ExportFinished(Result<ExportReceipt, String>),
    /// Restore a persisted selection at startup.
    RestoreSelection(Vec<RecordId>),
    /// The current notice has been shown to the user.
    NoticeDismissed,
    /// Reset inputs, records, filters and selection.
    ClearDataClicked,
    NoOp,
}
