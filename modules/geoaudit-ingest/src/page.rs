use std::sync::LazyLock;

use scraper::{Html, Selector};

static META_DESCRIPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static ARTICLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
static MAIN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("main").unwrap());
static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());
static H1_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

/// Title, meta description and main content HTML extracted from a fetched
/// page (URL-list mode, where no structured feed is available).
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    pub title: String,
    pub meta_description: String,
    pub content_html: String,
}

fn element_text(el: scraper::ElementRef<'_>) -> String {
    let segments: Vec<String> = el
        .text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    segments.join(" ")
}

/// Best-effort extraction of the audit inputs from a full page:
/// - meta description from `meta[name=description]`
/// - content HTML preferring `article`, then `main`, then `body`, keeping
///   markup because the checks rely on tags
/// - title from an `h1` inside the chosen content, then any `h1`, then
///   `<title>`; empty when none exists
pub fn extract_page(html_str: &str) -> ExtractedPage {
    let document = Html::parse_document(html_str);

    let meta_description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .unwrap_or_default()
        .trim()
        .to_string();

    let content_element = document
        .select(&ARTICLE_SELECTOR)
        .find(|el| !element_text(*el).is_empty())
        .or_else(|| {
            document
                .select(&MAIN_SELECTOR)
                .find(|el| !element_text(*el).is_empty())
        })
        .or_else(|| {
            document
                .select(&BODY_SELECTOR)
                .find(|el| !element_text(*el).is_empty())
        });

    let content_html = match content_element {
        Some(el) => el.html(),
        None => document.root_element().html(),
    };

    let mut title = content_element
        .and_then(|el| el.select(&H1_SELECTOR).next())
        .or_else(|| document.select(&H1_SELECTOR).next())
        .map(element_text)
        .unwrap_or_default();
    if title.is_empty() {
        title = document
            .select(&TITLE_SELECTOR)
            .next()
            .map(element_text)
            .unwrap_or_default();
    }

    ExtractedPage {
        title,
        meta_description,
        content_html,
    }
}
