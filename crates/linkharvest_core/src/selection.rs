//! Selected record ids with an undo history of prior snapshots.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::record::{Record, RecordId};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no actions to undo")]
    NothingToUndo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Union the visible ids into the current selection.
    Add,
    /// Replace the selection with exactly the visible ids.
    Replace,
}

/// What produced the state that follows a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    Select(RecordId),
    Deselect(RecordId),
    SelectAllVisible,
    ReplaceWithVisible,
    DeselectAll,
    RemoveFromSelected(RecordId),
    ClearAllSelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub previous: BTreeSet<RecordId>,
    pub action: SelectionAction,
}

/// Every mutating call records the pre-call snapshot before changing
/// anything, so `undo` always returns to the state right before the latest
/// mutation. Undo itself is not recorded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionStore {
    selected: BTreeSet<RecordId>,
    history: Vec<HistoryEntry>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a persisted id set with an empty history.
    pub fn restored(ids: impl IntoIterator<Item = RecordId>) -> Self {
        Self {
            selected: ids.into_iter().collect(),
            history: Vec::new(),
        }
    }

    pub fn toggle(&mut self, id: RecordId) -> SelectionAction {
        let action = if self.selected.contains(&id) {
            SelectionAction::Deselect(id)
        } else {
            SelectionAction::Select(id)
        };
        self.record(action);
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        action
    }

    pub fn select_all_visible(
        &mut self,
        mode: SelectMode,
        visible: impl IntoIterator<Item = RecordId>,
    ) -> SelectionAction {
        let action = match mode {
            SelectMode::Add => SelectionAction::SelectAllVisible,
            SelectMode::Replace => SelectionAction::ReplaceWithVisible,
        };
        self.record(action);
        if mode == SelectMode::Replace {
            self.selected.clear();
        }
        self.selected.extend(visible);
        action
    }

    pub fn deselect_all(&mut self) -> SelectionAction {
        self.record(SelectionAction::DeselectAll);
        self.selected.clear();
        SelectionAction::DeselectAll
    }

    pub fn remove(&mut self, id: RecordId) -> SelectionAction {
        let action = SelectionAction::RemoveFromSelected(id);
        self.record(action);
        self.selected.remove(&id);
        action
    }

    pub fn clear(&mut self) -> SelectionAction {
        self.record(SelectionAction::ClearAllSelected);
        self.selected.clear();
        SelectionAction::ClearAllSelected
    }

    /// Restores the snapshot taken before the most recent mutation and
    /// returns the action that was undone.
    pub fn undo(&mut self) -> Result<SelectionAction, SelectionError> {
        let entry = self.history.pop().ok_or(SelectionError::NothingToUndo)?;
        self.selected = entry.previous;
        Ok(entry.action)
    }

    /// Drops both the selection and its history.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.history.clear();
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.selected.iter().copied().collect()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Selected records in record-set order, drawn from the full set rather
    /// than any filtered view.
    pub fn selected_records<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records
            .iter()
            .filter(|record| self.selected.contains(&record.id))
            .collect()
    }

    /// Newline-joined full URLs of the selected records, in record order.
    pub fn export_text(&self, records: &[Record]) -> String {
        self.selected_records(records)
            .iter()
            .map(|record| record.full_url.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn record(&mut self, action: SelectionAction) {
        self.history.push(HistoryEntry {
            previous: self.selected.clone(),
            action,
        });
    }
}
