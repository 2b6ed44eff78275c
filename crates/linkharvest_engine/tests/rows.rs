use linkharvest_core::PatternCatalog;
use linkharvest_engine::{ExtractError, RowExtractor};
use pretty_assertions::assert_eq;

const LISTING: &str = r##"
<html><body>
<table id="list">
  <thead><tr><th>File Name</th><th>File Size</th><th>Date</th></tr></thead>
  <tbody>
    <tr><td><a href="../">Parent directory/</a></td><td>-</td><td>-</td></tr>
    <tr><td><a href="Super%20Game%20(USA)%20(Rev%201).zip" title="Super Game (USA) (Rev 1).zip">Super Game (USA) (Rev 1).zip</a></td><td>12.3 MiB</td><td>02-Jan-2024 10:00</td></tr>
    <tr><td><a href="Other%20Game%20(Japan).7z">Other Game (Japan).7z</a></td><td>-</td><td>2024-01-03</td></tr>
    <tr><td><a href="#">Jump</a></td><td>1 KiB</td></tr>
    <tr><td><a href="javascript:void(0)">Script</a></td></tr>
    <tr><td><a href="MAILTO:admin@example.com">Mail</a></td></tr>
    <tr><td>No link here</td><td>5 KiB</td></tr>
    <tr><td><a href="/abs/Homebrew.nds">Homebrew.nds</a></td></tr>
  </tbody>
</table>
</body></html>
"##;

fn extractor() -> RowExtractor {
    RowExtractor::new(PatternCatalog::builtin()).unwrap()
}

#[test]
fn extracts_qualifying_rows_in_order() {
    let records = extractor().extract(LISTING, None).unwrap();
    let hrefs: Vec<&str> = records.iter().map(|r| r.href.as_str()).collect();

    assert_eq!(
        hrefs,
        vec![
            "Super%20Game%20(USA)%20(Rev%201).zip",
            "Other%20Game%20(Japan).7z",
            "/abs/Homebrew.nds",
        ]
    );
}

#[test]
fn reads_title_text_cells_and_region() {
    let records = extractor().extract(LISTING, None).unwrap();

    let first = &records[0];
    assert_eq!(first.title, "Super Game (USA) (Rev 1).zip");
    assert_eq!(first.text, "Super Game (USA) (Rev 1).zip");
    assert_eq!(first.size, "12.3 MiB");
    assert_eq!(first.date, "02-Jan-2024 10:00");
    assert_eq!(first.region.as_deref(), Some("USA"));

    let second = &records[1];
    assert_eq!(second.size, "", "lone dash is a placeholder");
    assert_eq!(second.date, "2024-01-03", "dashes inside a value are kept");
    assert_eq!(second.region.as_deref(), Some("Japan"));

    let third = &records[2];
    assert_eq!(third.size, "");
    assert_eq!(third.date, "");
    assert_eq!(third.region, None);
}

#[test]
fn title_attribute_wins_over_text() {
    let html = r#"<table><tr><td><a href="a.zip" title="Full Name (Europe).zip">Full Na..&gt;</a></td></tr></table>"#;
    let records = extractor().extract(html, None).unwrap();

    assert_eq!(records[0].title, "Full Name (Europe).zip");
    assert_eq!(records[0].text, "Full Na..>");
    assert_eq!(records[0].region.as_deref(), Some("Europe"));
}

#[test]
fn blank_title_attribute_falls_back_to_text() {
    let html = r#"<table><tr><td><a href="a.zip" title="  ">Visible (USA).zip</a></td></tr></table>"#;
    let records = extractor().extract(html, None).unwrap();
    assert_eq!(records[0].title, "Visible (USA).zip");
}

#[test]
fn full_url_equals_href_without_base() {
    let records = extractor().extract(LISTING, None).unwrap();
    assert!(records.iter().all(|r| r.full_url == r.href));
}

#[test]
fn full_url_joins_base() {
    let html = r#"<table>
        <tr><td><a href="Game (USA).zip">Game (USA).zip</a></td></tr>
        <tr><td><a href="/abs/path.zip">path.zip</a></td></tr>
        <tr><td><a href="https://cdn.example.net/x.zip">x.zip</a></td></tr>
    </table>"#;
    let records = extractor()
        .extract(html, Some("https://example.com/files/"))
        .unwrap();
    let urls: Vec<&str> = records.iter().map(|r| r.full_url.as_str()).collect();

    assert_eq!(
        urls,
        vec![
            "https://example.com/files/Game (USA).zip",
            "https://example.com/files/abs/path.zip",
            "https://cdn.example.net/x.zip",
        ]
    );
}

#[test]
fn only_first_anchor_of_a_row_is_used() {
    let html = r#"<table><tr>
        <td><a href="first.zip">First</a></td>
        <td><a href="second.zip">Second</a></td>
    </tr></table>"#;
    let records = extractor().extract(html, None).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].href, "first.zip");
}

#[test]
fn parent_directory_text_is_skipped_regardless_of_href() {
    let html = r#"<table><tr><td><a href="/files/">Parent Directory</a></td></tr></table>"#;
    assert!(extractor().extract(html, None).unwrap().is_empty());
}

#[test]
fn list_class_container_rows_are_found() {
    let html = r#"<div class="list"><table><tr><td><a href="x.iso">x.iso</a></td></tr></table></div>"#;
    let records = extractor().extract(html, None).unwrap();
    assert_eq!(records.len(), 1, "nested selectors must not duplicate rows");
}

#[test]
fn links_outside_tables_are_ignored() {
    let html = r#"<p><a href="loose.zip">loose</a></p><ul><li><a href="item.zip">item</a></li></ul>"#;
    assert!(extractor().extract(html, None).unwrap().is_empty());
}

#[test]
fn ids_are_unique_and_reextraction_matches_structurally() {
    let extractor = extractor();
    let first = extractor.extract(LISTING, Some("https://example.com/")).unwrap();
    let second = extractor.extract(LISTING, Some("https://example.com/")).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_ne!(a.id, b.id);
        assert!(a.same_content(b));
    }
    let mut ids: Vec<_> = first.iter().chain(&second).map(|r| r.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), first.len() * 2);
}

#[test]
fn blank_input_is_an_error() {
    assert_eq!(extractor().extract("  \n", None), Err(ExtractError::EmptyInput));
}

#[test]
fn tagless_text_yields_no_records() {
    assert_eq!(extractor().extract("just some words, 3 < 4", None), Ok(vec![]));
    assert_eq!(
        extractor().extract("Game (USA).zip 1.2M 2024-01-01", Some("https://example.com/")),
        Ok(vec![])
    );
}

#[test]
fn malformed_markup_does_not_panic() {
    let html = r#"<table><tr><td><a href="ok.zip">ok<td>5 MB<tr><td><a href=>broken</a><table"#;
    let records = extractor().extract(html, None).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].href, "ok.zip");
}
