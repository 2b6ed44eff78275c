use std::sync::Arc;

use harvest_logging::harvest_debug;
use linkharvest_core::{PatternCatalog, Record, RecordId};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::resolve::resolve_full_url;

/// Rows of any table, plus the `#list` / `.list` containers used by common
/// directory index templates.
const ROW_SELECTOR: &str = "table tr, #list tr, .list tr";
const ANCHOR_SELECTOR: &str = "a[href]";
const PLACEHOLDER: &str = "-";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("input is empty")]
    EmptyInput,
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
}

/// Turns the rows of an HTML directory listing into [`Record`]s.
///
/// Rows without a usable anchor are skipped silently: header rows, parent
/// directory links, fragment/script/mailto anchors.
#[derive(Debug)]
pub struct RowExtractor {
    catalog: Arc<PatternCatalog>,
    rows: Selector,
    anchor: Selector,
}

struct RowLink {
    href: String,
    title: String,
    text: String,
}

impl RowExtractor {
    pub fn new(catalog: Arc<PatternCatalog>) -> Result<Self, ExtractError> {
        Ok(Self {
            catalog,
            rows: parse_selector(ROW_SELECTOR)?,
            anchor: parse_selector(ANCHOR_SELECTOR)?,
        })
    }

    /// Extracts one record per qualifying row, in document order. Any
    /// non-blank input parses; text without rows yields no records.
    pub fn extract(&self, html: &str, base_url: Option<&str>) -> Result<Vec<Record>, ExtractError> {
        if html.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        let document = Html::parse_document(html);
        let mut records = Vec::new();
        let mut skipped = 0usize;
        for row in document.select(&self.rows) {
            match self.record_from_row(row, base_url) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        harvest_debug!(
            "Extracted {} records, skipped {} rows (base_url={:?})",
            records.len(),
            skipped,
            base_url
        );
        Ok(records)
    }

    fn record_from_row(&self, row: ElementRef<'_>, base_url: Option<&str>) -> Option<Record> {
        let anchor = row.select(&self.anchor).next()?;
        let link = read_link(anchor)?;

        let mut cells = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| cell.value().name().eq_ignore_ascii_case("td"))
            .skip(1);
        let size = cells.next().map(cell_value).unwrap_or_default();
        let date = cells.next().map(cell_value).unwrap_or_default();

        let region = self.catalog.resolve_region(&link.title).map(str::to_string);
        let full_url = resolve_full_url(&link.href, base_url);

        Some(Record {
            id: RecordId::fresh(),
            href: link.href,
            full_url,
            title: link.title,
            text: link.text,
            size,
            date,
            region,
        })
    }
}

fn read_link(anchor: ElementRef<'_>) -> Option<RowLink> {
    let href = anchor.value().attr("href")?.trim();
    let text = anchor.text().collect::<String>().trim().to_string();
    if is_navigation(href, &text) {
        return None;
    }

    let title = anchor
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| text.clone());

    Some(RowLink {
        href: href.to_string(),
        title,
        text,
    })
}

/// Anchors that belong to the listing chrome rather than its content.
fn is_navigation(href: &str, text: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    href.is_empty()
        || href == "#"
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || href == "../"
        || href == ".."
        || text.to_lowercase().contains("parent directory")
}

/// Cell text, or empty for the lone-dash placeholder.
fn cell_value(cell: ElementRef<'_>) -> String {
    let text = cell.text().collect::<String>();
    let text = text.trim();
    if text == PLACEHOLDER {
        String::new()
    } else {
        text.to_string()
    }
}

/// At least one `<` that opens a tag, comment or doctype.
fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|err| ExtractError::Selector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}
