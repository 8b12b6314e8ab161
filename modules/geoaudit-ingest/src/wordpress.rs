use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use geoaudit_core::Article;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::article::{normalize_article, placeholder_article};
use crate::fetch::ArticleSource;
use crate::http::HttpClient;

/// Paging limits for the WordPress REST API.
#[derive(Debug, Clone)]
pub struct WordPressOptions {
    /// Safety limit against endless paging.
    pub max_pages: usize,
    /// Posts per page, clamped to the WP-accepted 1..=100.
    pub per_page: usize,
    /// Polite delay between page requests.
    pub sleep: Duration,
}

impl Default for WordPressOptions {
    fn default() -> Self {
        WordPressOptions {
            max_pages: 50,
            per_page: 100,
            sleep: Duration::from_millis(200),
        }
    }
}

/// Loads posts from a WordPress site via `wp-json/wp/v2/posts` with paging.
/// Accepts either the endpoint itself or a site root (expanded to the posts
/// endpoint). Stops on the first empty page, fetch error or non-list
/// response; a malformed post becomes a placeholder article.
pub struct WordPressSource {
    endpoint_or_site: String,
    options: WordPressOptions,
    client: HttpClient,
}

impl WordPressSource {
    pub fn new(endpoint_or_site: &str, options: WordPressOptions, client: HttpClient) -> Self {
        WordPressSource {
            endpoint_or_site: endpoint_or_site.to_string(),
            options,
            client,
        }
    }
}

/// Build the posts endpoint URL with paging parameters. Site roots are
/// expanded to `wp-json/wp/v2/posts`; existing query parameters survive,
/// `per_page`/`page` are replaced.
pub fn build_posts_url(endpoint_or_site: &str, per_page: usize, page: usize) -> Result<Url> {
    let base = endpoint_or_site.trim();
    if base.is_empty() {
        anyhow::bail!("Empty WordPress base URL/endpoint");
    }

    let expanded = if base.contains("/wp-json/") {
        base.to_string()
    } else {
        format!("{}/wp-json/wp/v2/posts", base.trim_end_matches('/'))
    };
    let mut url = Url::parse(&expanded).with_context(|| format!("Invalid WordPress URL: {base}"))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "per_page" && key != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("per_page", &per_page.to_string());
        pairs.append_pair("page", &page.to_string());
    }
    Ok(url)
}

#[async_trait]
impl ArticleSource for WordPressSource {
    async fn load(&self) -> Result<Vec<Article>> {
        let per_page = self.options.per_page.clamp(1, 100);
        let max_pages = self.options.max_pages.max(1);

        let mut articles = Vec::new();
        for page in 1..=max_pages {
            let url = build_posts_url(&self.endpoint_or_site, per_page, page)?;

            let data = match self.client.get_json(url.as_str()).await {
                Ok(data) => data,
                Err(error) => {
                    warn!(page, error = %error, "WordPress page fetch failed, stopping");
                    break;
                }
            };
            let posts = match data {
                Value::Array(posts) => posts,
                _ => {
                    warn!(page, "WordPress response is not a list, stopping");
                    break;
                }
            };
            if posts.is_empty() {
                break;
            }

            for (index, post) in posts.iter().enumerate() {
                if !post.is_object() {
                    continue;
                }
                match normalize_article(post) {
                    Ok(article) => articles.push(article),
                    Err(error) => {
                        warn!(page, index, error = %error, "Bad WordPress post, keeping placeholder");
                        articles.push(placeholder_article(
                            &format!("(invalid) wp_page={page} idx={index}"),
                            &format!("(invalid wp post) page={page} idx={index}"),
                        ));
                    }
                }
            }

            if !self.options.sleep.is_zero() {
                tokio::time::sleep(self.options.sleep).await;
            }
        }

        info!(count = articles.len(), "WordPress load complete");
        Ok(articles)
    }

    fn name(&self) -> &str {
        "wordpress"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expands_site_root_to_posts_endpoint() {
        let url = build_posts_url("https://example.sk/", 100, 1).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.sk/wp-json/wp/v2/posts?per_page=100&page=1"
        );
    }

    #[test]
    fn test_keeps_existing_endpoint_and_filters() {
        let url = build_posts_url(
            "https://example.sk/wp-json/wp/v2/posts?status=publish",
            50,
            3,
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.sk/wp-json/wp/v2/posts?status=publish&per_page=50&page=3"
        );
    }

    #[test]
    fn test_replaces_stale_paging_params() {
        let url = build_posts_url("https://example.sk/wp-json/wp/v2/posts?page=9", 10, 2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.sk/wp-json/wp/v2/posts?per_page=10&page=2"
        );
    }

    #[test]
    fn test_empty_base_is_error() {
        assert!(build_posts_url("  ", 10, 1).is_err());
    }
}
