//! End-to-end audit scenarios.
//!
//! These verify the aggregate contract of the evaluation engine:
//! - score is always the count of passing criteria, in [0, 10]
//! - recommendations cover exactly the failed criteria, canonical order
//! - evaluation is idempotent and never fails on degenerate input
//! - a fully compliant article reaches 10, a fully deficient one 0

use geoaudit_core::{audit_all, Article, AuditOptions, Auditor, Criterion};

fn auditor(strict: bool) -> Auditor {
    Auditor::new(AuditOptions {
        strict,
        ..AuditOptions::default()
    })
    .unwrap()
}

/// An article that satisfies every criterion.
fn compliant_article() -> Article {
    let filler = "doplnok výživy pre športovcov ".repeat(130); // ~650 words
    let content_html = format!(
        r#"
        <p>Kreatín je doplnok výživy s preukázanými účinkami na silový výkon.
        Odporúčaná dávka je 5 mg denne, obsahuje 10% čistého monohydrátu
        a porcia má 200 kcal.</p>
        <h2>Ako kreatín funguje</h2>
        <p>{filler}</p>
        <h2>Dávkovanie</h2>
        <ul><li>ráno</li><li>po tréningu</li></ul>
        <h2>Porovnanie foriem</h2>
        <table><tr><th>Forma</th></tr><tr><td>monohydrát</td></tr></table>
        <ol><li>prvý krok</li></ol>
        <h2>Časté otázky</h2>
        <p>Odpovede na najčastejšie otázky o kreatíne.</p>
        <h2>Zdroje</h2>
        <p><a href="https://pubmed.ncbi.nlm.nih.gov/12345/">Štúdia</a></p>
        "#
    );
    Article {
        url: "https://example.sk/kreatin".to_string(),
        title: "Kreatín".to_string(),
        content_html,
        meta_description: "a".repeat(145),
    }
}

/// An article that fails every criterion: 480 words, one H2, no facts, no
/// sources, no FAQ, no lists or tables, 90-char meta, question intro.
fn deficient_article() -> Article {
    let filler = "obsah ".repeat(470);
    let content_html = format!(
        r#"
        <p>Naozaj potrebujete tento doplnok stravy každý deň?</p>
        <h2>Jediný nadpis</h2>
        <p>{filler}</p>
        "#
    );
    Article {
        url: "https://example.sk/slaby-clanok".to_string(),
        title: "Slabý článok".to_string(),
        content_html,
        meta_description: "a".repeat(90),
    }
}

#[test]
fn test_compliant_article_scores_ten() {
    for strict in [false, true] {
        let result = auditor(strict).audit(&compliant_article());
        assert_eq!(
            result.score, 10,
            "strict={strict}, details: {:#?}",
            result.details
        );
        assert!(result.recommendations.is_empty());
    }
}

#[test]
fn test_deficient_article_scores_zero_with_all_recommendations() {
    let result = auditor(false).audit(&deficient_article());
    assert_eq!(result.score, 0, "details: {:#?}", result.details);

    let expected: Vec<String> = Criterion::ALL
        .iter()
        .map(|c| c.recommendation().to_string())
        .collect();
    assert_eq!(result.recommendations, expected);
}

#[test]
fn test_score_matches_verdicts_for_varied_inputs() {
    let inputs = [
        compliant_article(),
        deficient_article(),
        Article::default(),
        Article {
            content_html: "<h2>a</h2><h2>b</h2><h2>c</h2><ul><li>x</li></ul>".to_string(),
            ..Article::default()
        },
    ];
    for article in &inputs {
        let result = auditor(false).audit(article);
        let verdicts = [
            result.direct_answer,
            result.definition,
            result.headings,
            result.facts,
            result.sources,
            result.faq,
            result.lists,
            result.tables,
            result.word_count_ok,
            result.meta_ok,
        ];
        let passed = verdicts.iter().filter(|v| **v).count();
        assert_eq!(result.score as usize, passed);
        assert!(result.score <= 10);
        assert_eq!(result.recommendations.len(), 10 - passed);
        assert_eq!(result.details.len(), 10);
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let auditor = auditor(true);
    let article = compliant_article();
    assert_eq!(auditor.audit(&article), auditor.audit(&article));

    let degenerate = Article::default();
    assert_eq!(auditor.audit(&degenerate), auditor.audit(&degenerate));
}

#[test]
fn test_empty_article_all_verdicts_false() {
    let result = auditor(false).audit(&Article::default());
    assert_eq!(result.score, 0);
    assert!(result.details.iter().all(|d| !d.passed));
    assert_eq!(result.recommendations.len(), 10);
}

#[test]
fn test_strict_mode_tightens_definition_against_title() {
    let mut article = compliant_article();
    article.title = "Vitamíny".to_string();

    let lenient = auditor(false).audit(&article);
    assert!(lenient.definition);

    let strict = auditor(true).audit(&article);
    assert!(!strict.definition);
    assert_eq!(strict.score, 9);
    assert_eq!(
        strict.recommendations,
        vec![Criterion::Definition.recommendation().to_string()]
    );
}

#[test]
fn test_batch_preserves_input_order() {
    let articles = vec![deficient_article(), compliant_article(), Article::default()];
    let results = audit_all(&auditor(false), &articles);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].score, 0);
    assert_eq!(results[1].score, 10);
    assert_eq!(results[2].score, 0);
}

#[test]
fn test_markup_free_plain_text_input() {
    // Plain text without any markup still normalizes and gets scored.
    let article = Article {
        content_html: "Kreatín je doplnok výživy. Obsahuje 5 mg, 10% a 200 kcal.".to_string(),
        ..Article::default()
    };
    let result = auditor(false).audit(&article);
    assert!(result.definition);
    assert!(result.facts);
    assert!(!result.headings);
}
