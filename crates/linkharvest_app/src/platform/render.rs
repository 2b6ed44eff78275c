use linkharvest_core::{AppViewModel, FacetKind, Notice, PatternCatalog, RecordRowView};

/// Lines for the visible list, followed by the selected list when the
/// review panel is open.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![summary(view)];

    if !view.query.is_empty() || !view.active_facets.is_empty() {
        let mut filters = Vec::new();
        if !view.query.is_empty() {
            filters.push(format!("query \"{}\"", view.query));
        }
        if !view.active_facets.is_empty() {
            filters.push(format!("facets [{}]", view.active_facets.join(", ")));
        }
        lines.push(format!("Filters: {}", filters.join("; ")));
    }
    if !view.base_url.is_empty() {
        lines.push(format!("Base URL: {}", view.base_url));
    }

    match view.empty_message {
        Some(message) if view.record_count > 0 || view.has_html_input => {
            lines.push(message.to_string());
        }
        Some(_) => lines.push("Load or paste HTML, then `parse`.".to_string()),
        None => {
            for (index, row) in view.visible.iter().enumerate() {
                lines.push(row_line(index + 1, row));
            }
        }
    }

    if view.show_selected {
        lines.push(String::new());
        lines.extend(render_selected(view));
    }
    lines
}

pub fn summary(view: &AppViewModel) -> String {
    let mut text = format!(
        "Showing {} of {} links ({} selected)",
        view.visible_count, view.record_count, view.selected_count
    );
    if view.can_undo {
        text.push_str(" | undo available");
    }
    if view.loading {
        text.push_str(" | loading...");
    }
    text
}

pub fn render_selected(view: &AppViewModel) -> Vec<String> {
    if view.selected.is_empty() {
        return vec!["No links selected".to_string()];
    }
    let mut lines = vec![format!("Currently selected ({}):", view.selected_count)];
    for (index, row) in view.selected.iter().enumerate() {
        let url = row.full_url.as_deref().unwrap_or(&row.href);
        lines.push(format!("{:>4}. {}  {}", index + 1, row.title, url));
    }
    lines
}

/// Every catalog rule grouped by kind, with `*` marking active ids.
pub fn render_facets(catalog: &PatternCatalog, active: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    for (kind, heading) in [
        (FacetKind::Region, "Regions"),
        (FacetKind::FileType, "File types"),
        (FacetKind::Exclusion, "Exclude"),
    ] {
        lines.push(format!("{heading}:"));
        for rule in catalog.rules(kind) {
            let mark = if active.iter().any(|id| id == rule.id()) {
                '*'
            } else {
                ' '
            };
            lines.push(format!(" {mark} {:<12} {}", rule.id(), rule.label()));
        }
    }
    lines
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Error(message) => format!("error: {message}"),
        Notice::Success(message) => format!("ok: {message}"),
    }
}

fn row_line(position: usize, row: &RecordRowView) -> String {
    let mark = if row.selected { "[x]" } else { "[ ]" };
    let mut line = format!("{position:>4}. {mark} {}", row.title);

    let details: Vec<&str> = [row.region.as_deref(), row.size.as_deref(), row.date.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !details.is_empty() {
        line.push_str(&format!("  ({})", details.join(", ")));
    }
    line.push_str(&format!("\n        {}", row.href));
    if let Some(full_url) = &row.full_url {
        line.push_str(&format!("\n        -> {full_url}"));
    }
    line
}
