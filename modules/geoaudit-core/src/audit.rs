//! Aggregation: run the normalizer once, the ten checks in canonical order,
//! and fold verdicts into an [`AuditResult`]. Every fault is contained here —
//! a panicking check is recorded as failed, a faulting article yields a
//! degraded result, and a batch is never aborted by one bad article.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

use crate::checks;
use crate::error::AuditError;
use crate::lexicon::{CompiledLexicon, Lexicon};
use crate::normalize::NormalizedDoc;
use crate::types::{Article, AuditResult, Criterion, CriterionReport, Evidence};

/// Numeric thresholds for the checks. All overridable; these defaults match
/// the documented heuristics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds {
    pub min_headings: usize,
    pub min_facts: usize,
    pub min_lists: usize,
    pub min_tables: usize,
    pub min_words: usize,
    pub meta_min_len: usize,
    pub meta_max_len: usize,
    pub definition_window_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            min_headings: 3,
            min_facts: 3,
            min_lists: 1,
            min_tables: 1,
            min_words: 500,
            meta_min_len: 120,
            meta_max_len: 160,
            definition_window_chars: 1200,
        }
    }
}

/// Evaluation configuration. `strict` tightens the definition and sources
/// checks to reduce false positives.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    pub strict: bool,
    pub thresholds: Thresholds,
}

/// Stateless evaluator: a compiled lexicon plus options. Checks are pure
/// functions over per-call immutable inputs, so one `Auditor` can score any
/// number of articles, in any order, from multiple threads.
pub struct Auditor {
    lexicon: CompiledLexicon,
    options: AuditOptions,
}

impl Auditor {
    /// Auditor with the built-in lexicon.
    pub fn new(options: AuditOptions) -> Result<Self, AuditError> {
        Self::with_lexicon(&Lexicon::default(), options)
    }

    /// Auditor with a substitute lexicon (loaded from disk or built in tests).
    pub fn with_lexicon(lexicon: &Lexicon, options: AuditOptions) -> Result<Self, AuditError> {
        Ok(Auditor {
            lexicon: CompiledLexicon::compile(lexicon)?,
            options,
        })
    }

    pub fn strict(&self) -> bool {
        self.options.strict
    }

    /// Score one article. Never fails and never panics: malformed HTML
    /// degrades to empty text (all content checks fail), and a panicking
    /// check is recorded as failed with a fault note while the remaining
    /// checks still run.
    pub fn audit(&self, article: &Article) -> AuditResult {
        let doc = catch_unwind(AssertUnwindSafe(|| {
            NormalizedDoc::parse(&article.content_html)
        }))
        .unwrap_or_else(|_| {
            warn!(url = article.url.as_str(), "HTML normalization panicked, using empty document");
            NormalizedDoc::parse("")
        });

        let strict = self.options.strict;
        let t = &self.options.thresholds;
        let text = doc.plain_text();

        let details: Vec<CriterionReport> = Criterion::ALL
            .iter()
            .map(|&criterion| {
                let outcome = catch_unwind(AssertUnwindSafe(|| match criterion {
                    Criterion::DirectAnswer => checks::check_direct_answer(text, &self.lexicon),
                    Criterion::Definition => checks::check_definition(
                        text,
                        &article.title,
                        strict,
                        t.definition_window_chars,
                        &self.lexicon,
                    ),
                    Criterion::Headings => checks::check_headings(&doc, t.min_headings),
                    Criterion::Facts => checks::check_facts(text, t.min_facts, &self.lexicon),
                    Criterion::Sources => checks::check_sources(text, &doc, strict, &self.lexicon),
                    Criterion::Faq => checks::check_faq(text, &doc, &self.lexicon),
                    Criterion::Lists => checks::check_lists(&doc, t.min_lists),
                    Criterion::Tables => checks::check_tables(&doc, t.min_tables),
                    Criterion::WordCountOk => checks::check_word_count(text, t.min_words),
                    Criterion::MetaOk => checks::check_meta_description(
                        &article.meta_description,
                        t.meta_min_len,
                        t.meta_max_len,
                    ),
                }));

                match outcome {
                    Ok((passed, evidence)) => CriterionReport {
                        criterion,
                        passed,
                        evidence,
                        fault: None,
                    },
                    Err(payload) => {
                        let note = panic_note(payload.as_ref());
                        warn!(
                            url = article.url.as_str(),
                            criterion = criterion.key(),
                            note = note.as_str(),
                            "Criterion check panicked, recording as failed"
                        );
                        CriterionReport {
                            criterion,
                            passed: false,
                            evidence: Evidence::Missing,
                            fault: Some(note),
                        }
                    }
                }
            })
            .collect();

        let passed_of = |criterion: Criterion| {
            details
                .iter()
                .find(|d| d.criterion == criterion)
                .is_some_and(|d| d.passed)
        };

        let score = details.iter().filter(|d| d.passed).count() as u8;
        let recommendations = details
            .iter()
            .filter(|d| !d.passed)
            .map(|d| d.criterion.recommendation().to_string())
            .collect();

        AuditResult {
            direct_answer: passed_of(Criterion::DirectAnswer),
            definition: passed_of(Criterion::Definition),
            headings: passed_of(Criterion::Headings),
            facts: passed_of(Criterion::Facts),
            sources: passed_of(Criterion::Sources),
            faq: passed_of(Criterion::Faq),
            lists: passed_of(Criterion::Lists),
            tables: passed_of(Criterion::Tables),
            word_count_ok: passed_of(Criterion::WordCountOk),
            meta_ok: passed_of(Criterion::MetaOk),
            score,
            details,
            recommendations,
        }
    }
}

/// Score a batch, preserving input order. A fault while evaluating one
/// article produces a degraded result for that article only; the rest of the
/// batch proceeds.
pub fn audit_all(auditor: &Auditor, articles: &[Article]) -> Vec<AuditResult> {
    articles
        .iter()
        .map(|article| {
            catch_unwind(AssertUnwindSafe(|| auditor.audit(article))).unwrap_or_else(|payload| {
                let note = panic_note(payload.as_ref());
                warn!(
                    url = article.url.as_str(),
                    note = note.as_str(),
                    "Article evaluation panicked, emitting degraded result"
                );
                AuditResult::degraded(&note)
            })
        })
        .collect()
}

fn panic_note(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(content_html: &str, meta: &str, title: &str) -> Article {
        Article {
            url: "https://example.sk/clanok".to_string(),
            title: title.to_string(),
            content_html: content_html.to_string(),
            meta_description: meta.to_string(),
        }
    }

    #[test]
    fn test_score_equals_passed_count() {
        let auditor = Auditor::new(AuditOptions::default()).unwrap();
        let result = auditor.audit(&article("<p>Krátky text.</p>", "", ""));
        let passed = result.details.iter().filter(|d| d.passed).count();
        assert_eq!(result.score as usize, passed);
        assert_eq!(result.recommendations.len(), 10 - result.score as usize);
    }

    #[test]
    fn test_empty_article_scores_zero() {
        let auditor = Auditor::new(AuditOptions::default()).unwrap();
        let result = auditor.audit(&article("", "", ""));
        assert_eq!(result.score, 0);
        assert_eq!(result.recommendations.len(), 10);
        assert!(result.details.iter().all(|d| !d.passed));
    }

    #[test]
    fn test_recommendations_follow_canonical_order() {
        let auditor = Auditor::new(AuditOptions::default()).unwrap();
        let result = auditor.audit(&article("", "", ""));
        let expected: Vec<String> = Criterion::ALL
            .iter()
            .map(|c| c.recommendation().to_string())
            .collect();
        assert_eq!(result.recommendations, expected);
    }

    #[test]
    fn test_thresholds_are_overridable() {
        let options = AuditOptions {
            strict: false,
            thresholds: Thresholds {
                min_headings: 1,
                min_words: 3,
                ..Thresholds::default()
            },
        };
        let auditor = Auditor::new(options).unwrap();
        let result = auditor.audit(&article("<h2>Nadpis</h2><p>Tri krátke slová.</p>", "", ""));
        assert!(result.headings);
        assert!(result.word_count_ok);
    }

    #[test]
    fn test_audit_all_preserves_order() {
        let auditor = Auditor::new(AuditOptions::default()).unwrap();
        let articles = vec![
            article("", "", ""),
            article("<h2>a</h2><h2>b</h2><h2>c</h2>", "", ""),
        ];
        let results = audit_all(&auditor, &articles);
        assert_eq!(results.len(), 2);
        assert!(!results[0].headings);
        assert!(results[1].headings);
    }
}
