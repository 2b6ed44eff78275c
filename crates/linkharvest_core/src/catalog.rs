//! Static facet catalogs: region, file type and exclusion rules.
//!
//! Every rule is a case-insensitive regex tested against a record title.
//! Region lookup is first-match-wins in catalog order; filter composition
//! only asks whether a title matches a given rule.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::{Regex, RegexBuilder};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("facet id `{0}` is defined more than once")]
    DuplicateId(String),
    #[error("invalid pattern for facet `{id}`: {message}")]
    InvalidPattern { id: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKind {
    Region,
    FileType,
    Exclusion,
}

/// A named, immutable filter criterion.
#[derive(Debug, Clone)]
pub struct PatternRule {
    id: String,
    label: String,
    pattern: Regex,
}

impl PatternRule {
    /// Compiles `source` case-insensitively.
    pub fn new(id: &str, label: &str, source: &str) -> Result<Self, CatalogError> {
        let pattern = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|err| CatalogError::InvalidPattern {
                id: id.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self {
            id: id.to_string(),
            label: label.to_string(),
            pattern,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, title: &str) -> bool {
        self.pattern.is_match(title)
    }
}

impl PartialEq for PatternRule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.label == other.label && self.pattern() == other.pattern()
    }
}

impl Eq for PatternRule {}

/// The three facet catalogs. Ids are unique across all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCatalog {
    regions: Vec<PatternRule>,
    file_types: Vec<PatternRule>,
    exclusions: Vec<PatternRule>,
}

const REGION_RULES: &[(&str, &str, &str)] = &[
    ("usa", "USA", r"\(USA\)|\(US\)|\(United States\)"),
    ("eur", "Europe", r"\(Europe\)|\(EU\)|\(PAL\)"),
    ("jpn", "Japan", r"\(Japan\)|\(JP\)"),
    ("ger", "Germany", r"\(Germany\)|\(DE\)|\(Ger\)"),
    ("fra", "France", r"\(France\)|\(FR\)"),
    ("spa", "Spain", r"\(Spain\)|\(ES\)|\(Sp\)"),
    ("ita", "Italy", r"\(Italy\)|\(IT\)"),
    ("uk", "UK", r"\(UK\)|\(United Kingdom\)"),
    ("can", "Canada", r"\(Canada\)|\(CA\)|\(Can\)"),
    ("aus", "Australia", r"\(Australia\)|\(AU\)|\(Aus\)"),
    ("kor", "Korea", r"\(Korea\)|\(KR\)|\(Kor\)"),
    ("chn", "China", r"\(China\)|\(CN\)|\(Chn\)"),
    ("rus", "Russia", r"\(Russia\)|\(RU\)|\(Rus\)"),
    ("bra", "Brazil", r"\(Brazil\)|\(BR\)|\(Bra\)"),
    ("multi", "Multi-Language", r"\(Multi\)|\(Multi-Lang\)"),
    ("world", "World", r"\(World\)"),
];

const FILE_TYPE_RULES: &[(&str, &str, &str)] = &[
    ("zip", ".zip", r"\.zip$"),
    ("rar", ".rar", r"\.rar$"),
    ("7z", ".7z", r"\.7z$"),
    ("iso", ".iso", r"\.iso$"),
    ("bin", ".bin", r"\.bin$"),
    ("gba", ".gba", r"\.gba$"),
    ("nds", ".nds", r"\.nds$"),
    ("3ds", ".3ds", r"\.3ds$"),
];

const EXCLUSION_RULES: &[(&str, &str, &str)] = &[
    ("no-demo", "Hide Demos", r"\(Demo\)|\(Kiosk\)|\(Sample\)"),
    ("no-vc", "Hide Virtual Console", r"\(Virtual Console\)|\(VC\)"),
    ("no-wiiu", "Hide Wii U", r"\(Wii U\)|\(WiiU\)"),
    ("no-beta", "Hide Betas", r"\(Beta\)|\(Prototype\)"),
    ("no-hack", "Hide Hacks", r"\(Hack\)|\(Modified\)"),
    (
        "no-translation",
        "Hide Translations",
        r"\(Translation\)|\(Translated\)",
    ),
];

static BUILTIN: LazyLock<Arc<PatternCatalog>> = LazyLock::new(|| {
    // The tables above are literals; a failure here is a programming error.
    #[allow(clippy::expect_used)]
    let catalog = PatternCatalog::from_tables(REGION_RULES, FILE_TYPE_RULES, EXCLUSION_RULES)
        .expect("built-in facet tables");
    Arc::new(catalog)
});

impl PatternCatalog {
    /// Builds a catalog, rejecting ids that appear more than once across
    /// the three lists.
    pub fn new(
        regions: Vec<PatternRule>,
        file_types: Vec<PatternRule>,
        exclusions: Vec<PatternRule>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for rule in regions.iter().chain(&file_types).chain(&exclusions) {
            if !seen.insert(rule.id.as_str()) {
                return Err(CatalogError::DuplicateId(rule.id.clone()));
            }
        }
        Ok(Self {
            regions,
            file_types,
            exclusions,
        })
    }

    /// Builds a catalog from `(id, label, pattern)` tables.
    pub fn from_tables(
        regions: &[(&str, &str, &str)],
        file_types: &[(&str, &str, &str)],
        exclusions: &[(&str, &str, &str)],
    ) -> Result<Self, CatalogError> {
        Self::new(
            compile_table(regions)?,
            compile_table(file_types)?,
            compile_table(exclusions)?,
        )
    }

    /// The catalog used by the application, shared process-wide.
    pub fn builtin() -> Arc<PatternCatalog> {
        Arc::clone(&BUILTIN)
    }

    pub fn rules(&self, kind: FacetKind) -> &[PatternRule] {
        match kind {
            FacetKind::Region => &self.regions,
            FacetKind::FileType => &self.file_types,
            FacetKind::Exclusion => &self.exclusions,
        }
    }

    /// Label of the first region rule matching `title`.
    pub fn resolve_region(&self, title: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|rule| rule.matches(title))
            .map(PatternRule::label)
    }

    pub fn exclusion(&self, id: &str) -> Option<&PatternRule> {
        self.exclusions.iter().find(|rule| rule.id == id)
    }

    /// Looks up an inclusion facet, checking regions before file types.
    pub fn inclusion(&self, id: &str) -> Option<&PatternRule> {
        self.regions
            .iter()
            .chain(&self.file_types)
            .find(|rule| rule.id == id)
    }

    pub fn kind_of(&self, id: &str) -> Option<FacetKind> {
        [FacetKind::Region, FacetKind::FileType, FacetKind::Exclusion]
            .into_iter()
            .find(|kind| self.rules(*kind).iter().any(|rule| rule.id == id))
    }
}

fn compile_table(table: &[(&str, &str, &str)]) -> Result<Vec<PatternRule>, CatalogError> {
    table
        .iter()
        .map(|(id, label, source)| PatternRule::new(id, label, source))
        .collect()
}
