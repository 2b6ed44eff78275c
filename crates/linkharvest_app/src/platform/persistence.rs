use std::fs;
use std::io;
use std::path::PathBuf;

use harvest_logging::{harvest_error, harvest_info, harvest_warn};
use linkharvest_core::RecordId;
use linkharvest_engine::AtomicFileWriter;
use serde::{Deserialize, Serialize};

const SELECTION_FILENAME: &str = ".linkharvest_selection.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
struct PersistedSelection {
    selected: Vec<u64>,
}

/// Keyed blob holding the selected record ids.
pub struct SelectionFile {
    writer: AtomicFileWriter,
}

impl SelectionFile {
    pub fn new(state_dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(state_dir),
        }
    }

    fn path(&self) -> PathBuf {
        self.writer.dir().join(SELECTION_FILENAME)
    }

    /// Missing, unreadable or malformed blobs all load as an empty selection.
    pub fn load(&self) -> Vec<RecordId> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                harvest_warn!("Failed to read persisted selection from {:?}: {}", path, err);
                return Vec::new();
            }
        };

        let state: PersistedSelection = match ron::from_str(&content) {
            Ok(state) => state,
            Err(err) => {
                harvest_warn!("Failed to parse persisted selection from {:?}: {}", path, err);
                return Vec::new();
            }
        };

        harvest_info!(
            "Loaded {} persisted selections from {:?}",
            state.selected.len(),
            path
        );
        state.selected.into_iter().map(RecordId::from_raw).collect()
    }

    /// Writes the blob atomically, or removes it for an empty selection.
    /// Failures are logged; the in-memory selection stays authoritative.
    pub fn save(&self, ids: &[RecordId]) {
        if ids.is_empty() {
            if let Err(err) = self.writer.remove(SELECTION_FILENAME) {
                harvest_error!("Failed to remove persisted selection: {}", err);
            }
            return;
        }

        let state = PersistedSelection {
            selected: ids.iter().map(|id| id.raw()).collect(),
        };
        let content = match ron::ser::to_string_pretty(&state, ron::ser::PrettyConfig::new()) {
            Ok(text) => text,
            Err(err) => {
                harvest_error!("Failed to serialize persisted selection: {}", err);
                return;
            }
        };

        if let Err(err) = self.writer.write(SELECTION_FILENAME, &content) {
            harvest_error!(
                "Failed to write persisted selection to {:?}: {}",
                self.writer.dir(),
                err
            );
        }
    }
}
