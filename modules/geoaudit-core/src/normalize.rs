use std::sync::LazyLock;

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{Html, Selector};

/// Container tags that are removed from the document before any check runs:
/// chrome, navigation and inline forms inflate word counts and produce false
/// structural positives.
const NOISE_TAGS: [&str; 6] = ["nav", "header", "footer", "aside", "form", "noscript"];

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// An article document normalized exactly once per audit: noise containers
/// detached from the parse tree, plain text extracted from what remains.
/// Every check reads this shared view; none re-parses the raw HTML, so all
/// checks see identical content boundaries.
///
/// `<script>` elements stay in the tree — the FAQ check queries embedded
/// JSON-LD — but their text never reaches `plain_text`.
pub struct NormalizedDoc {
    plain_text: String,
    html: Html,
}

impl NormalizedDoc {
    /// Parse and noise-strip raw HTML. Never fails: malformed or empty input
    /// yields an empty tree and empty plain text.
    pub fn parse(raw_html: &str) -> Self {
        let mut html = Html::parse_document(raw_html);

        // Collect first, then detach: detaching while iterating would skip
        // siblings. Detaching an already-detached descendant is a no-op.
        let noise_ids: Vec<_> = html
            .tree
            .nodes()
            .filter_map(|node| match node.value() {
                Node::Element(el)
                    if NOISE_TAGS.contains(&el.name())
                        || el.attr("aria-modal") == Some("true") =>
                {
                    Some(node.id())
                }
                _ => None,
            })
            .collect();
        for id in noise_ids {
            if let Some(mut node) = html.tree.get_mut(id) {
                node.detach();
            }
        }

        let mut segments: Vec<&str> = Vec::new();
        collect_text(html.tree.root(), &mut segments);
        let plain_text = segments.join(" ");

        NormalizedDoc { plain_text, html }
    }

    /// Visible text with node boundaries joined by single spaces, trimmed.
    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    /// Number of elements matching `selector` in the noise-stripped tree.
    pub fn count(&self, selector: &Selector) -> usize {
        self.html.select(selector).count()
    }

    /// Whether at least one element matches `selector`.
    pub fn has(&self, selector: &Selector) -> bool {
        self.html.select(selector).next().is_some()
    }

    /// `href` attributes of all anchors, document order.
    pub fn hrefs(&self) -> Vec<&str> {
        self.html
            .select(&ANCHOR_SELECTOR)
            .filter_map(|a| a.value().attr("href"))
            .collect()
    }

    /// Concatenated text content of each element matching `selector`.
    pub fn texts(&self, selector: &Selector) -> Vec<String> {
        self.html
            .select(selector)
            .map(|el| el.text().collect::<Vec<_>>().join(" "))
            .collect()
    }
}

/// Walk the tree collecting trimmed text segments, skipping script/style
/// subtrees so code and CSS never count as prose.
fn collect_text<'a>(node: NodeRef<'a, Node>, out: &mut Vec<&'a str>) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed);
                }
            }
            Node::Element(el) => {
                if el.name() != "script" && el.name() != "style" {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_joins_nodes_with_spaces() {
        let doc = NormalizedDoc::parse("<p>Prvá veta.</p><p>Druhá veta.</p>");
        assert_eq!(doc.plain_text(), "Prvá veta. Druhá veta.");
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert_eq!(NormalizedDoc::parse("").plain_text(), "");
        let doc = NormalizedDoc::parse("<div><p>neuzavreté <b>tagy");
        assert_eq!(doc.plain_text(), "neuzavreté tagy");
    }

    #[test]
    fn test_noise_containers_are_stripped() {
        let html = r#"
            <nav>Menu</nav>
            <header>Hlavička</header>
            <article><p>Obsah článku.</p></article>
            <aside>Bočný panel</aside>
            <form><input name="q"></form>
            <noscript>Zapnite JavaScript</noscript>
            <footer>Pätička</footer>
        "#;
        let doc = NormalizedDoc::parse(html);
        assert_eq!(doc.plain_text(), "Obsah článku.");
    }

    #[test]
    fn test_modal_dialogs_are_stripped() {
        let html = r#"
            <div aria-modal="true"><p>Prihláste sa na odber noviniek!</p></div>
            <p>Text.</p>
        "#;
        let doc = NormalizedDoc::parse(html);
        assert_eq!(doc.plain_text(), "Text.");
    }

    #[test]
    fn test_script_text_excluded_but_tree_keeps_scripts() {
        let html = r#"
            <p>Viditeľný text.</p>
            <script type="application/ld+json">{"@type":"FAQPage"}</script>
            <style>p { color: red }</style>
        "#;
        let doc = NormalizedDoc::parse(html);
        assert_eq!(doc.plain_text(), "Viditeľný text.");

        let sel = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
        let texts = doc.texts(&sel);
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("FAQPage"));
    }

    #[test]
    fn test_structural_counts_ignore_noise_regions() {
        let html = r#"
            <nav><ul><li>Domov</li></ul></nav>
            <footer><table><tr><td>x</td></tr></table></footer>
            <article><h2>Sekcia</h2><ul><li>bod</li></ul></article>
        "#;
        let doc = NormalizedDoc::parse(html);
        assert_eq!(doc.count(&Selector::parse("ul").unwrap()), 1);
        assert_eq!(doc.count(&Selector::parse("table").unwrap()), 0);
        assert_eq!(doc.count(&Selector::parse("h2").unwrap()), 1);
    }

    #[test]
    fn test_hrefs_skip_nav_links() {
        let html = r#"
            <nav><a href="/domov">Domov</a></nav>
            <p><a href="https://examine.com/creatine">štúdia</a></p>
        "#;
        let doc = NormalizedDoc::parse(html);
        assert_eq!(doc.hrefs(), vec!["https://examine.com/creatine"]);
    }

    #[test]
    fn test_entities_are_decoded() {
        let doc = NormalizedDoc::parse("<p>k&aacute;va &amp; čaj</p>");
        assert_eq!(doc.plain_text(), "káva & čaj");
    }
}
