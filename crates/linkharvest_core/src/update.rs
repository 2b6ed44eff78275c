use crate::{AppState, Effect, ExportTarget, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::HtmlInputChanged(html) => {
            state.set_html_input(html);
            Vec::new()
        }
        Msg::BaseUrlChanged(base_url) => {
            state.set_base_url(base_url);
            Vec::new()
        }
        Msg::ParseClicked => {
            if state.html_input().trim().is_empty() {
                state.set_error("Please enter HTML source code");
                return (state, Vec::new());
            }
            state.clear_notice();
            state.set_loading(true);
            let base_url = state.base_url().trim();
            let base_url = (!base_url.is_empty()).then(|| base_url.to_string());
            vec![Effect::ExtractRows {
                html: state.html_input().to_string(),
                base_url,
            }]
        }
        Msg::RowsExtracted(result) => {
            state.set_loading(false);
            match result {
                Ok(records) => {
                    let count = records.len();
                    state.replace_records(records);
                    state.set_success(format!("Successfully parsed {count} links"));
                    vec![persist(&state)]
                }
                Err(message) => {
                    state.set_error(format!("Error parsing HTML: {message}"));
                    Vec::new()
                }
            }
        }
        Msg::FetchClicked(url) => {
            let url = url.trim();
            if url.is_empty() {
                state.set_error("Please enter a URL to fetch");
                return (state, Vec::new());
            }
            state.clear_notice();
            state.set_loading(true);
            vec![Effect::FetchPage {
                url: url.to_string(),
            }]
        }
        Msg::PageFetched(result) => {
            state.set_loading(false);
            match result {
                Ok(page) => {
                    if state.base_url().trim().is_empty() {
                        state.set_base_url(page.url.clone());
                    }
                    let bytes = page.html.len();
                    state.set_html_input(page.html);
                    state.set_success(format!("Fetched {bytes} bytes from {}", page.url));
                }
                Err(message) => state.set_error(message),
            }
            Vec::new()
        }
        Msg::QueryChanged(query) => {
            state.set_query(query);
            Vec::new()
        }
        Msg::FacetToggled(id) => {
            if state.catalog().kind_of(&id).is_none() {
                state.set_error(format!("Unknown filter: {id}"));
                return (state, Vec::new());
            }
            state.facets_mut().toggle(&id);
            Vec::new()
        }
        Msg::FiltersCleared => {
            state.facets_mut().clear();
            state.set_query(String::new());
            Vec::new()
        }
        Msg::RecordToggled(id) => {
            state.selection_mut().toggle(id);
            vec![persist(&state)]
        }
        Msg::SelectAllVisible(mode) => {
            let visible = state.visible_ids();
            state.selection_mut().select_all_visible(mode, visible);
            vec![persist(&state)]
        }
        Msg::DeselectAllClicked => {
            state.selection_mut().deselect_all();
            vec![persist(&state)]
        }
        Msg::RemoveSelected(id) => {
            state.selection_mut().remove(id);
            vec![persist(&state)]
        }
        Msg::ClearSelectedClicked => {
            state.selection_mut().clear();
            state.set_success("Selected games list cleared");
            vec![persist(&state)]
        }
        Msg::UndoClicked => match state.selection_mut().undo() {
            Ok(_) => {
                state.set_success("Undid last selection action");
                vec![persist(&state)]
            }
            Err(_) => {
                state.set_error("No actions to undo");
                Vec::new()
            }
        },
        Msg::ShowSelectedToggled => {
            state.toggle_show_selected();
            Vec::new()
        }
        Msg::ExportClicked(target) => {
            let count = state.selection().selected_records(state.records()).len();
            if count == 0 {
                state.set_error(match target {
                    ExportTarget::File => "Please select at least one link to export",
                    ExportTarget::Clipboard => "Please select at least one link to copy",
                });
                return (state, Vec::new());
            }
            let text = state.selection().export_text(state.records());
            vec![Effect::EmitExport {
                target,
                text,
                count,
            }]
        }
        Msg::ExportFinished(result) => {
            match result {
                Ok(receipt) => state.set_success(match receipt.target {
                    ExportTarget::File => {
                        format!("Exported {} links to {}", receipt.count, receipt.destination)
                    }
                    ExportTarget::Clipboard => {
                        format!("Copied {} links to {}", receipt.count, receipt.destination)
                    }
                }),
                Err(message) => state.set_error(message),
            }
            Vec::new()
        }
        Msg::RestoreSelection(ids) => {
            *state.selection_mut() = crate::SelectionStore::restored(ids);
            vec![persist(&state)]
        }
        Msg::NoticeDismissed => {
            state.clear_notice();
            Vec::new()
        }
        Msg::ClearDataClicked => {
            state.clear_data();
            vec![persist(&state)]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn persist(state: &AppState) -> Effect {
    Effect::PersistSelection {
        ids: state.selection().ids(),
    }
}
