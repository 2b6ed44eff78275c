use linkharvest_core::{compute_visible, ActiveFacets, PatternCatalog, Record, RecordId};

fn record(title: &str, href: &str) -> Record {
    let catalog = PatternCatalog::builtin();
    Record {
        id: RecordId::fresh(),
        href: href.to_string(),
        full_url: href.to_string(),
        title: title.to_string(),
        text: title.to_string(),
        size: String::new(),
        date: String::new(),
        region: catalog.resolve_region(title).map(str::to_string),
    }
}

fn sample() -> Vec<Record> {
    vec![
        record("Alpha (USA).zip", "alpha.zip"),
        record("Alpha (USA) (Demo).zip", "alpha-demo.zip"),
        record("Beta Quest (Japan).7z", "beta.7z"),
        record("Gamma (Europe) (Beta).zip", "gamma.zip"),
        record("Delta (Europe).iso", "files/delta.iso"),
    ]
}

fn titles(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.title.clone()).collect()
}

#[test]
fn no_query_no_facets_returns_everything_in_order() {
    let records = sample();
    let visible = compute_visible(&records, "  ", &ActiveFacets::new(), &PatternCatalog::builtin());
    assert_eq!(visible.len(), records.len());
    assert_eq!(visible[0].title, "Alpha (USA).zip");
    assert_eq!(visible[4].title, "Delta (Europe).iso");
}

#[test]
fn query_matches_title_href_or_region_case_insensitively() {
    let records = sample();
    let catalog = PatternCatalog::builtin();
    let none = ActiveFacets::new();

    assert_eq!(
        titles(&compute_visible(&records, " QUEST ", &none, &catalog)),
        vec!["Beta Quest (Japan).7z"]
    );
    assert_eq!(
        titles(&compute_visible(&records, "files/", &none, &catalog)),
        vec!["Delta (Europe).iso"]
    );
    // Matches both the titles and the resolved region of the two European rows.
    assert_eq!(compute_visible(&records, "europe", &none, &catalog).len(), 2);
    assert!(compute_visible(&records, "nothing-like-this", &none, &catalog).is_empty());
}

#[test]
fn exclusion_drops_only_matching_titles() {
    let records = sample();
    let catalog = PatternCatalog::builtin();
    let active: ActiveFacets = ["no-demo"].into_iter().collect();

    let visible = compute_visible(&records, "", &active, &catalog);
    assert_eq!(visible.len(), 4);
    assert!(visible.iter().all(|r| !r.title.contains("(Demo)")));
}

#[test]
fn inclusion_and_exclusion_intersect() {
    let records = sample();
    let catalog = PatternCatalog::builtin();
    let active: ActiveFacets = ["no-demo", "zip"].into_iter().collect();

    assert_eq!(
        titles(&compute_visible(&records, "", &active, &catalog)),
        vec!["Alpha (USA).zip", "Gamma (Europe) (Beta).zip"]
    );
}

#[test]
fn inclusion_facets_are_or_combined() {
    let records = sample();
    let catalog = PatternCatalog::builtin();
    let active: ActiveFacets = ["jpn", "iso"].into_iter().collect();

    assert_eq!(
        titles(&compute_visible(&records, "", &active, &catalog)),
        vec!["Beta Quest (Japan).7z", "Delta (Europe).iso"]
    );
}

#[test]
fn exclusion_facets_are_or_combined() {
    let records = sample();
    let catalog = PatternCatalog::builtin();
    let active: ActiveFacets = ["no-demo", "no-beta"].into_iter().collect();

    assert_eq!(compute_visible(&records, "", &active, &catalog).len(), 3);
}

#[test]
fn facets_match_title_not_href() {
    let mut records = vec![record("Readme", "readme.zip")];
    records[0].full_url = "https://example.com/readme.zip".to_string();
    let active: ActiveFacets = ["zip"].into_iter().collect();

    assert!(compute_visible(&records, "", &active, &PatternCatalog::builtin()).is_empty());
}

#[test]
fn unknown_facet_ids_are_ignored() {
    let records = sample();
    let active: ActiveFacets = ["not-a-facet"].into_iter().collect();
    assert_eq!(
        compute_visible(&records, "", &active, &PatternCatalog::builtin()).len(),
        records.len()
    );
}

#[test]
fn active_facets_toggle() {
    let mut facets = ActiveFacets::new();
    assert!(facets.toggle("usa"));
    assert!(facets.toggle("zip"));
    assert!(!facets.toggle("usa"));
    assert_eq!(facets.ids(), ["zip".to_string()]);
}
