use linkharvest_core::{CatalogError, FacetKind, PatternCatalog, PatternRule};

#[test]
fn region_resolves_first_matching_rule() {
    let catalog = PatternCatalog::builtin();

    assert_eq!(
        catalog.resolve_region("Super Game (USA) (Rev 1).zip"),
        Some("USA")
    );
    assert_eq!(catalog.resolve_region("Super Game (europe).zip"), Some("Europe"));
    assert_eq!(catalog.resolve_region("Super Game (USA, Europe).zip"), None);
    assert_eq!(catalog.resolve_region("Plain Title.zip"), None);
}

#[test]
fn region_order_decides_ties() {
    let catalog = PatternCatalog::builtin();
    // Both USA and Japan match; USA comes first in the catalog.
    assert_eq!(catalog.resolve_region("Game (Japan) (USA).zip"), Some("USA"));
}

#[test]
fn builtin_catalog_sizes() {
    let catalog = PatternCatalog::builtin();
    assert_eq!(catalog.rules(FacetKind::Region).len(), 16);
    assert_eq!(catalog.rules(FacetKind::FileType).len(), 8);
    assert_eq!(catalog.rules(FacetKind::Exclusion).len(), 6);
}

#[test]
fn lookups_by_kind() {
    let catalog = PatternCatalog::builtin();

    assert_eq!(catalog.kind_of("usa"), Some(FacetKind::Region));
    assert_eq!(catalog.kind_of("zip"), Some(FacetKind::FileType));
    assert_eq!(catalog.kind_of("no-demo"), Some(FacetKind::Exclusion));
    assert_eq!(catalog.kind_of("nope"), None);

    assert!(catalog.exclusion("usa").is_none());
    assert!(catalog.inclusion("no-demo").is_none());
    assert_eq!(catalog.inclusion("zip").map(PatternRule::label), Some(".zip"));
}

#[test]
fn file_type_rules_anchor_at_end() {
    let catalog = PatternCatalog::builtin();
    let zip = catalog.inclusion("zip").unwrap();

    assert!(zip.matches("Game (USA).ZIP"));
    assert!(!zip.matches("Game.zip.torrent"));
}

#[test]
fn duplicate_ids_across_catalogs_are_rejected() {
    let err = PatternCatalog::from_tables(
        &[("bin", "Binland", r"\(Binland\)")],
        &[("bin", ".bin", r"\.bin$")],
        &[],
    )
    .unwrap_err();

    assert_eq!(err, CatalogError::DuplicateId("bin".to_string()));
}

#[test]
fn invalid_patterns_are_rejected() {
    let err = PatternRule::new("broken", "Broken", r"(unclosed").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidPattern { ref id, .. } if id == "broken"));
}
