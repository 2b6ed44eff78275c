use crate::{Notice, Record, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub record_count: usize,
    pub visible_count: usize,
    pub selected_count: usize,
    pub visible: Vec<RecordRowView>,
    /// Selected records in record-set order, regardless of filters.
    pub selected: Vec<RecordRowView>,
    pub query: String,
    pub active_facets: Vec<String>,
    pub base_url: String,
    pub has_html_input: bool,
    pub notice: Option<Notice>,
    pub loading: bool,
    pub can_undo: bool,
    pub show_selected: bool,
    pub empty_message: Option<&'static str>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRowView {
    pub id: RecordId,
    pub title: String,
    pub href: String,
    /// Only set when it differs from `href`.
    pub full_url: Option<String>,
    pub size: Option<String>,
    pub date: Option<String>,
    pub region: Option<String>,
    pub selected: bool,
}

impl RecordRowView {
    pub(crate) fn from_record(record: &Record, selected: bool) -> Self {
        let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());
        Self {
            id: record.id,
            title: record.title.clone(),
            href: record.href.clone(),
            full_url: (record.full_url != record.href).then(|| record.full_url.clone()),
            size: non_empty(&record.size),
            date: non_empty(&record.date),
            region: record.region.clone(),
            selected,
        }
    }
}
