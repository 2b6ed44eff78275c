use ego_tree::NodeId;
use scraper::{Html, Selector};

const STRIPPED: &str = "script, style";

/// Removes every `<script>` and `<style>` element and re-serializes the
/// document.
pub fn strip_scripts_and_styles(html: &str) -> String {
    let mut document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(STRIPPED) else {
        return html.to_string();
    };

    let ids: Vec<NodeId> = document.select(&selector).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
    document.html()
}
