//! Article ingestion: turns a WordPress REST endpoint, a JSON file or a list
//! of URLs into normalized [`Article`](geoaudit_core::Article) values for the
//! audit engine. Fetch problems degrade to placeholder articles (empty
//! content, which scores 0) so one broken item never drops a report row or
//! aborts a batch.

pub mod article;
pub mod fetch;
pub mod http;
pub mod page;
pub mod wordpress;

pub use article::{html_to_text, normalize_article};
pub use fetch::{ArticleSource, JsonFileSource, UrlListSource};
pub use http::HttpClient;
pub use wordpress::{WordPressOptions, WordPressSource};
