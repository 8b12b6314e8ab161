use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use geoaudit_core::{audit_all, AuditOptions, Auditor, Lexicon, Thresholds};
use geoaudit_ingest::{
    ArticleSource, HttpClient, JsonFileSource, UrlListSource, WordPressOptions, WordPressSource,
};
use geoaudit_report::{write_csv_report, write_html_report, ReportRow};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Source {
    /// JSON file with article objects (mock schema or WordPress posts).
    Json,
    /// WordPress REST API endpoint or site root.
    Wp,
    /// Text file with one URL per line.
    Urls,
}

/// Audits articles for 10 GEO criteria and outputs CSV/HTML reports.
#[derive(Debug, Parser)]
#[command(name = "geoaudit", version)]
struct Args {
    /// Input source type.
    #[arg(long, value_enum)]
    source: Source,

    /// Path to JSON/URLs file OR WordPress endpoint/site URL.
    #[arg(long)]
    input: String,

    /// Output CSV path.
    #[arg(long, default_value = "output/report.csv")]
    output: PathBuf,

    /// Optional HTML report output path (e.g. output/report.html).
    #[arg(long)]
    html: Option<PathBuf>,

    /// HTML report page size.
    #[arg(long, default_value_t = 10)]
    page_size: usize,

    /// Enable stricter heuristics (definition and sources checks) to reduce
    /// false positives.
    #[arg(long)]
    strict: bool,

    /// Substitute heuristic lexicon (TOML).
    #[arg(long)]
    lexicon: Option<PathBuf>,

    // Threshold overrides
    #[arg(long, default_value_t = 3)]
    min_headings: usize,
    #[arg(long, default_value_t = 3)]
    min_facts: usize,
    #[arg(long, default_value_t = 1)]
    min_lists: usize,
    #[arg(long, default_value_t = 1)]
    min_tables: usize,
    #[arg(long, default_value_t = 500)]
    min_words: usize,
    #[arg(long, default_value_t = 120)]
    meta_min: usize,
    #[arg(long, default_value_t = 160)]
    meta_max: usize,
    #[arg(long, default_value_t = 1200)]
    definition_window: usize,

    // WordPress options
    /// Max WordPress pages to fetch (safety limit).
    #[arg(long, default_value_t = 50)]
    wp_max_pages: usize,
    /// WordPress per_page (1..100).
    #[arg(long, default_value_t = 100)]
    wp_per_page: usize,
    /// Sleep between WordPress page requests, in milliseconds.
    #[arg(long, default_value_t = 200)]
    wp_sleep_ms: u64,
}

impl Args {
    fn audit_options(&self) -> AuditOptions {
        AuditOptions {
            strict: self.strict,
            thresholds: Thresholds {
                min_headings: self.min_headings,
                min_facts: self.min_facts,
                min_lists: self.min_lists,
                min_tables: self.min_tables,
                min_words: self.min_words,
                meta_min_len: self.meta_min,
                meta_max_len: self.meta_max,
                definition_window_chars: self.definition_window,
            },
        }
    }

    fn article_source(&self) -> Box<dyn ArticleSource> {
        match self.source {
            Source::Json => Box::new(JsonFileSource::new(&self.input)),
            Source::Urls => Box::new(UrlListSource::new(&self.input, HttpClient::new())),
            Source::Wp => Box::new(WordPressSource::new(
                &self.input,
                WordPressOptions {
                    max_pages: self.wp_max_pages,
                    per_page: self.wp_per_page,
                    sleep: Duration::from_millis(self.wp_sleep_ms),
                },
                HttpClient::new(),
            )),
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let lexicon = match &args.lexicon {
        Some(path) => Lexicon::from_toml_file(path)?,
        None => Lexicon::default(),
    };
    let auditor = Auditor::with_lexicon(&lexicon, args.audit_options())?;

    let source = args.article_source();
    info!(source = source.name(), input = args.input.as_str(), "Loading articles");
    let articles = source.load().await?;
    info!(count = articles.len(), strict = auditor.strict(), "Auditing articles");

    let results = audit_all(&auditor, &articles);
    let rows: Vec<ReportRow> = articles
        .iter()
        .zip(&results)
        .map(|(article, result)| ReportRow::from_result(&article.url, &article.title, result))
        .collect();

    write_csv_report(&args.output, &rows)?;
    println!("CSV report written: {}", args.output.display());

    if let Some(html_path) = &args.html {
        write_html_report(html_path, &rows, args.page_size)?;
        println!("HTML report written: {}", html_path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("geoaudit=info".parse().expect("valid directive")),
        )
        .init();

    let args = Args::parse();
    if let Err(error) = run(args).await {
        eprintln!("ERROR: {error:#}");
        std::process::exit(2);
    }
}
