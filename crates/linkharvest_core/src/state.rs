use std::sync::Arc;

use crate::filter::{compute_visible, ActiveFacets};
use crate::view_model::{AppViewModel, RecordRowView};
use crate::{PatternCatalog, Record, RecordId, SelectionStore};

/// Output of the fetch-and-sanitize collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub html: String,
    pub url: String,
    /// RFC3339 timestamp of the fetch.
    pub fetched_utc: String,
}

/// The single user-facing message slot: an error or a success, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    catalog: Arc<PatternCatalog>,
    html_input: String,
    base_url: String,
    records: Vec<Record>,
    query: String,
    facets: ActiveFacets,
    selection: SelectionStore,
    show_selected: bool,
    loading: bool,
    notice: Option<Notice>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_catalog(PatternCatalog::builtin())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Arc<PatternCatalog>) -> Self {
        Self {
            catalog,
            html_input: String::new(),
            base_url: String::new(),
            records: Vec::new(),
            query: String::new(),
            facets: ActiveFacets::new(),
            selection: SelectionStore::new(),
            show_selected: false,
            loading: false,
            notice: None,
            dirty: false,
        }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn html_input(&self) -> &str {
        &self.html_input
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn visible_records(&self) -> Vec<&Record> {
        compute_visible(&self.records, &self.query, &self.facets, &self.catalog)
    }

    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.visible_records().iter().map(|record| record.id).collect()
    }

    /// Returns and clears the render flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let row = |record: &Record| RecordRowView::from_record(record, self.selection.contains(record.id));
        let visible: Vec<RecordRowView> = self.visible_records().into_iter().map(row).collect();
        let selected: Vec<RecordRowView> = self
            .selection
            .selected_records(&self.records)
            .into_iter()
            .map(row)
            .collect();

        let empty_message = if !visible.is_empty() {
            None
        } else if !self.query.trim().is_empty() || !self.facets.is_empty() {
            Some("No links match your search/filter criteria")
        } else {
            Some("No links found in the HTML source")
        };

        AppViewModel {
            record_count: self.records.len(),
            visible_count: visible.len(),
            selected_count: selected.len(),
            visible,
            selected,
            query: self.query.clone(),
            active_facets: self.facets.ids().to_vec(),
            base_url: self.base_url.clone(),
            has_html_input: !self.html_input.trim().is_empty(),
            notice: self.notice.clone(),
            loading: self.loading,
            can_undo: self.selection.can_undo(),
            show_selected: self.show_selected,
            empty_message,
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Error(message.into()));
        self.mark_dirty();
    }

    pub(crate) fn set_success(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Success(message.into()));
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.mark_dirty();
    }

    pub(crate) fn set_html_input(&mut self, html: String) {
        self.html_input = html;
        self.mark_dirty();
    }

    pub(crate) fn set_base_url(&mut self, base_url: String) {
        self.base_url = base_url;
        self.mark_dirty();
    }

    pub(crate) fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.selection.reset();
        self.mark_dirty();
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
        self.mark_dirty();
    }

    pub(crate) fn facets_mut(&mut self) -> &mut ActiveFacets {
        self.mark_dirty();
        &mut self.facets
    }

    pub(crate) fn selection_mut(&mut self) -> &mut SelectionStore {
        self.mark_dirty();
        &mut self.selection
    }

    pub(crate) fn toggle_show_selected(&mut self) {
        self.show_selected = !self.show_selected;
        self.mark_dirty();
    }

    /// Back to a blank session; the catalog is kept.
    pub(crate) fn clear_data(&mut self) {
        *self = Self::with_catalog(Arc::clone(&self.catalog));
        self.mark_dirty();
    }
}
