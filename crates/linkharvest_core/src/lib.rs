//! Link harvester core: record model, facet filtering, selection history,
//! and the pure application state machine.
mod catalog;
mod effect;
mod filter;
mod msg;
mod record;
mod selection;
mod state;
mod update;
mod view_model;

pub use catalog::{CatalogError, FacetKind, PatternCatalog, PatternRule};
pub use effect::{Effect, ExportReceipt, ExportTarget};
pub use filter::{compute_visible, ActiveFacets};
pub use msg::Msg;
pub use record::{Record, RecordId};
pub use selection::{HistoryEntry, SelectMode, SelectionAction, SelectionError, SelectionStore};
pub use state::{AppState, FetchedPage, Notice};
pub use update::update;
pub use view_model::{AppViewModel, RecordRowView};
