use anyhow::{bail, Result};
use geoaudit_core::Article;
use scraper::Html;
use serde_json::Value;

/// Convert an HTML-ish string to plain text with entities decoded. Safe for
/// already-plain strings. WordPress delivers titles, excerpts and meta
/// descriptions as HTML fragments.
pub fn html_to_text(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    // Parsing also decodes entities, so even tag-free input goes through it
    // when it carries an ampersand.
    if !value.contains('<') && !value.contains('&') {
        return value.trim().to_string();
    }
    let fragment = Html::parse_fragment(value);
    let segments: Vec<String> = fragment
        .root_element()
        .text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    segments.join(" ")
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn rendered_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)?
        .get("rendered")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Normalize one article object. Accepts either the mock schema
/// (`url`, `title`, `content_html`, `meta_description`) or a WordPress REST
/// post (`link`, `title.rendered`, `content.rendered`, optional
/// `yoast_head_json.description`, `excerpt.rendered` fallback).
///
/// The content keeps its HTML — the checks rely on tags. Everything else is
/// flattened to plain text. Only a missing URL is an error; every other
/// absent field becomes an empty string.
pub fn normalize_article(obj: &Value) -> Result<Article> {
    let url = {
        let direct = str_field(obj, "url");
        if direct.is_empty() {
            str_field(obj, "link")
        } else {
            direct
        }
    };
    if url.trim().is_empty() {
        bail!("Article missing url/link");
    }

    let title = match rendered_field(obj, "title") {
        Some(rendered) => html_to_text(&rendered),
        None => html_to_text(obj.get("title").and_then(Value::as_str).unwrap_or_default()),
    };

    // Keep HTML!
    let content_html = match rendered_field(obj, "content") {
        Some(rendered) => rendered,
        None => {
            let direct = str_field(obj, "content_html");
            if direct.is_empty() {
                str_field(obj, "content")
            } else {
                direct
            }
        }
    };

    let mut meta_description = html_to_text(&str_field(obj, "meta_description"));
    if meta_description.is_empty() {
        if let Some(description) = obj
            .get("yoast_head_json")
            .and_then(|yoast| yoast.get("description"))
            .and_then(Value::as_str)
        {
            meta_description = html_to_text(description);
        }
    }
    if meta_description.is_empty() {
        if let Some(excerpt) = rendered_field(obj, "excerpt") {
            meta_description = html_to_text(&excerpt);
        }
    }

    Ok(Article {
        url: url.trim().to_string(),
        title: if title.is_empty() {
            "(no title)".to_string()
        } else {
            title
        },
        content_html,
        meta_description,
    })
}

/// Placeholder for an item that could not be loaded: keeps a visible row in
/// the report (scoring 0) instead of silently dropping the article.
pub fn placeholder_article(url: &str, title: &str) -> Article {
    Article {
        url: url.to_string(),
        title: title.to_string(),
        content_html: String::new(),
        meta_description: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_html_to_text_strips_tags_and_entities() {
        assert_eq!(html_to_text("<b>Kreat&iacute;n</b> a spol."), "Kreatín a spol.");
        assert_eq!(html_to_text("už čistý text"), "už čistý text");
        assert_eq!(html_to_text("k&aacute;va"), "káva");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn test_normalize_mock_schema() {
        let obj = json!({
            "url": "https://example.sk/a",
            "title": "Kreatín",
            "content_html": "<p>Obsah</p>",
            "meta_description": "Popis",
        });
        let article = normalize_article(&obj).unwrap();
        assert_eq!(article.url, "https://example.sk/a");
        assert_eq!(article.title, "Kreatín");
        assert_eq!(article.content_html, "<p>Obsah</p>");
        assert_eq!(article.meta_description, "Popis");
    }

    #[test]
    fn test_normalize_wordpress_post() {
        let obj = json!({
            "link": "https://example.sk/wp-post",
            "title": { "rendered": "Kreat&iacute;n &amp; svaly" },
            "content": { "rendered": "<h2>Sekcia</h2><p>Text</p>" },
            "yoast_head_json": { "description": "SEO popis" },
        });
        let article = normalize_article(&obj).unwrap();
        assert_eq!(article.url, "https://example.sk/wp-post");
        assert_eq!(article.title, "Kreatín & svaly");
        // Content keeps its markup for the structural checks.
        assert_eq!(article.content_html, "<h2>Sekcia</h2><p>Text</p>");
        assert_eq!(article.meta_description, "SEO popis");
    }

    #[test]
    fn test_normalize_excerpt_fallback_for_meta() {
        let obj = json!({
            "link": "https://example.sk/x",
            "title": { "rendered": "Titulok" },
            "content": { "rendered": "<p>Text</p>" },
            "excerpt": { "rendered": "<p>Úryvok ako popis</p>" },
        });
        let article = normalize_article(&obj).unwrap();
        assert_eq!(article.meta_description, "Úryvok ako popis");
    }

    #[test]
    fn test_normalize_missing_url_is_error() {
        let obj = json!({ "title": "bez odkazu" });
        assert!(normalize_article(&obj).is_err());
    }

    #[test]
    fn test_normalize_missing_title_gets_placeholder() {
        let obj = json!({ "url": "https://example.sk/y" });
        let article = normalize_article(&obj).unwrap();
        assert_eq!(article.title, "(no title)");
        assert_eq!(article.content_html, "");
        assert_eq!(article.meta_description, "");
    }
}
