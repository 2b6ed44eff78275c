//! Visible-set computation: text query, then exclusion facets, then
//! inclusion facets. Each stage narrows the previous one and the original
//! record order is preserved.

use crate::catalog::{PatternCatalog, PatternRule};
use crate::record::Record;

/// Ordered set of active facet ids, in activation order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveFacets {
    ids: Vec<String>,
}

impl ActiveFacets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates `id` if inactive, deactivates it otherwise. Returns whether
    /// the facet is active afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|active| active == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|active| active == id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveFacets {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut facets = Self::new();
        for id in iter {
            let id = id.into();
            if !facets.contains(&id) {
                facets.ids.push(id);
            }
        }
        facets
    }
}

/// Computes the records visible under `query` and `active` facets.
///
/// Ids in `active` that name no rule in `catalog` are ignored.
pub fn compute_visible<'a>(
    records: &'a [Record],
    query: &str,
    active: &ActiveFacets,
    catalog: &PatternCatalog,
) -> Vec<&'a Record> {
    let needle = query.trim().to_lowercase();

    let (exclusions, inclusions) = split_active(active, catalog);

    records
        .iter()
        .filter(|record| needle.is_empty() || matches_query(record, &needle))
        .filter(|record| !exclusions.iter().any(|rule| rule.matches(&record.title)))
        .filter(|record| inclusions.is_empty() || inclusions.iter().any(|rule| rule.matches(&record.title)))
        .collect()
}

fn split_active<'c>(
    active: &ActiveFacets,
    catalog: &'c PatternCatalog,
) -> (Vec<&'c PatternRule>, Vec<&'c PatternRule>) {
    let mut exclusions = Vec::new();
    let mut inclusions = Vec::new();
    for id in active.ids() {
        if let Some(rule) = catalog.exclusion(id) {
            exclusions.push(rule);
        } else if let Some(rule) = catalog.inclusion(id) {
            inclusions.push(rule);
        }
    }
    (exclusions, inclusions)
}

/// `needle` must already be trimmed and lowercased.
fn matches_query(record: &Record, needle: &str) -> bool {
    record.title.to_lowercase().contains(needle)
        || record.href.to_lowercase().contains(needle)
        || record
            .region
            .as_deref()
            .is_some_and(|region| region.to_lowercase().contains(needle))
}
