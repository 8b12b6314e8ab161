use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use geoaudit_core::Article;
use serde_json::Value;
use tracing::{info, warn};

use crate::article::{normalize_article, placeholder_article};
use crate::http::HttpClient;
use crate::page::extract_page;

/// A provider of articles to audit. Implementations load everything up
/// front; the audit core runs on the collected batch.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Article>>;
    fn name(&self) -> &str;
}

/// Articles from a JSON file: a list of article objects (mock schema or
/// WordPress post shape) or a `{"articles": [...]}` wrapper. Bad items keep
/// a placeholder row instead of being dropped.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }
}

#[async_trait]
impl ArticleSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<Article>> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Input JSON not found: {}", self.path.display()))?;
        let data: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON file {}", self.path.display()))?;

        let items = match &data {
            Value::Object(map) if map.contains_key("articles") => {
                map["articles"].as_array().cloned().unwrap_or_default()
            }
            Value::Array(items) => items.clone(),
            _ => anyhow::bail!("JSON input must be a list of articles (or an object with 'articles')"),
        };

        let mut articles = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if !item.is_object() {
                warn!(index, "Skipping non-object item");
                continue;
            }
            match normalize_article(item) {
                Ok(article) => articles.push(article),
                Err(error) => {
                    warn!(index, error = %error, "Bad article, keeping placeholder");
                    articles.push(placeholder_article(
                        &format!("(invalid) index={index}"),
                        &format!("(invalid article) index={index}"),
                    ));
                }
            }
        }
        info!(count = articles.len(), "JSON load complete");
        Ok(articles)
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Articles fetched from a plain list of URLs, one per line, `#` comments
/// allowed. A failed fetch keeps a placeholder row so the report still shows
/// the URL.
pub struct UrlListSource {
    path: PathBuf,
    client: HttpClient,
}

impl UrlListSource {
    pub fn new(path: impl Into<PathBuf>, client: HttpClient) -> Self {
        UrlListSource {
            path: path.into(),
            client,
        }
    }
}

#[async_trait]
impl ArticleSource for UrlListSource {
    async fn load(&self) -> Result<Vec<Article>> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Input URLs file not found: {}", self.path.display()))?;
        let urls: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let mut articles = Vec::with_capacity(urls.len());
        for url in urls {
            match self.client.get_text(url).await {
                Ok(html) => {
                    let page = extract_page(&html);
                    articles.push(Article {
                        url: url.to_string(),
                        title: if page.title.is_empty() {
                            url.to_string()
                        } else {
                            page.title
                        },
                        content_html: page.content_html,
                        meta_description: page.meta_description,
                    });
                }
                Err(error) => {
                    warn!(url, error = %error, "Fetch failed, keeping placeholder");
                    articles.push(placeholder_article(url, &format!("(fetch error) {url}")));
                }
            }
        }
        info!(count = articles.len(), "URL list load complete");
        Ok(articles)
    }

    fn name(&self) -> &str {
        "urls"
    }
}
