use geoaudit_core::{AuditResult, Criterion, Evidence};
use serde::Serialize;

/// One flat report row per article: the stable surface reporting renders.
/// Criterion verdicts are 0/1 for CSV friendliness; recommendations are
/// joined into a single cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub url: String,
    pub title: String,
    pub score: u8,

    pub direct_answer: u8,
    pub definition: u8,
    pub headings: u8,
    pub facts: u8,
    pub sources: u8,
    pub faq: u8,
    pub lists: u8,
    pub tables: u8,
    pub word_count_ok: u8,
    pub meta_ok: u8,

    pub word_count: usize,
    pub h2_count: usize,
    pub list_count: usize,
    pub table_count: usize,
    pub meta_len: usize,

    pub recommendations: String,
}

fn as01(value: bool) -> u8 {
    u8::from(value)
}

/// Single-line cell: recommendations joined with " | ", raw newlines
/// stripped so no CSV consumer chokes.
fn join_recommendations(recommendations: &[String]) -> String {
    recommendations
        .iter()
        .map(|r| r.replace(['\n', '\r'], " ").trim().to_string())
        .filter(|r| !r.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

impl ReportRow {
    /// Flatten one audit result. The five metric columns come from the
    /// evidence of their criterion; a faulted check contributes 0.
    pub fn from_result(url: &str, title: &str, result: &AuditResult) -> Self {
        let word_count = match result.detail(Criterion::WordCountOk).map(|d| &d.evidence) {
            Some(Evidence::WordCountOk { word_count, .. }) => *word_count,
            _ => 0,
        };
        let h2_count = match result.detail(Criterion::Headings).map(|d| &d.evidence) {
            Some(Evidence::Headings { h2_count, .. }) => *h2_count,
            _ => 0,
        };
        let list_count = match result.detail(Criterion::Lists).map(|d| &d.evidence) {
            Some(Evidence::Lists { list_count, .. }) => *list_count,
            _ => 0,
        };
        let table_count = match result.detail(Criterion::Tables).map(|d| &d.evidence) {
            Some(Evidence::Tables { table_count, .. }) => *table_count,
            _ => 0,
        };
        let meta_len = match result.detail(Criterion::MetaOk).map(|d| &d.evidence) {
            Some(Evidence::MetaOk { meta_len, .. }) => *meta_len,
            _ => 0,
        };

        ReportRow {
            url: url.trim().to_string(),
            title: title.trim().to_string(),
            score: result.score,
            direct_answer: as01(result.direct_answer),
            definition: as01(result.definition),
            headings: as01(result.headings),
            facts: as01(result.facts),
            sources: as01(result.sources),
            faq: as01(result.faq),
            lists: as01(result.lists),
            tables: as01(result.tables),
            word_count_ok: as01(result.word_count_ok),
            meta_ok: as01(result.meta_ok),
            word_count,
            h2_count,
            list_count,
            table_count,
            meta_len,
            recommendations: join_recommendations(&result.recommendations),
        }
    }

    /// Row for an article whose evaluation faulted entirely: zeros across
    /// the board plus a diagnostic note. The batch still gets its row.
    pub fn failed(url: &str, title: &str, note: &str) -> Self {
        ReportRow {
            url: url.trim().to_string(),
            title: title.trim().to_string(),
            score: 0,
            direct_answer: 0,
            definition: 0,
            headings: 0,
            facts: 0,
            sources: 0,
            faq: 0,
            lists: 0,
            tables: 0,
            word_count_ok: 0,
            meta_ok: 0,
            word_count: 0,
            h2_count: 0,
            list_count: 0,
            table_count: 0,
            meta_len: 0,
            recommendations: format!("Analysis error: {note}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoaudit_core::{Article, AuditOptions, Auditor};

    #[test]
    fn test_metrics_extracted_from_evidence() {
        let auditor = Auditor::new(AuditOptions::default()).unwrap();
        let article = Article {
            url: "https://example.sk/a".to_string(),
            title: "Titulok".to_string(),
            content_html:
                "<h2>a</h2><h2>b</h2><ul><li>x</li></ul><table><tr><td>y</td></tr></table><p>pár slov</p>"
                    .to_string(),
            meta_description: "a".repeat(130),
        };
        let result = auditor.audit(&article);
        let row = ReportRow::from_result(&article.url, &article.title, &result);

        assert_eq!(row.h2_count, 2);
        assert_eq!(row.list_count, 1);
        assert_eq!(row.table_count, 1);
        assert_eq!(row.meta_len, 130);
        assert!(row.word_count > 0);
        assert_eq!(row.meta_ok, 1);
        assert_eq!(row.headings, 0); // 2 < 3
        assert_eq!(row.score, result.score);
    }

    #[test]
    fn test_recommendations_joined_single_line() {
        let auditor = Auditor::new(AuditOptions::default()).unwrap();
        let result = auditor.audit(&Article::default());
        let row = ReportRow::from_result("u", "t", &result);
        assert_eq!(row.recommendations.matches(" | ").count(), 9);
        assert!(!row.recommendations.contains('\n'));
    }

    #[test]
    fn test_failed_row() {
        let row = ReportRow::failed("https://example.sk/x", "X", "boom");
        assert_eq!(row.score, 0);
        assert_eq!(row.recommendations, "Analysis error: boom");
    }
}
