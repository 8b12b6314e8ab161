use serde::{Deserialize, Serialize};

/// One article to audit. All fields tolerate empty strings; an absent field
/// is an empty string, never a fatal condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub content_html: String,
    pub meta_description: String,
}

/// The ten audit criteria, in canonical order. The order governs the sequence
/// of recommendations, never the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    DirectAnswer,
    Definition,
    Headings,
    Facts,
    Sources,
    Faq,
    Lists,
    Tables,
    WordCountOk,
    MetaOk,
}

impl Criterion {
    /// Canonical evaluation order.
    pub const ALL: [Criterion; 10] = [
        Criterion::DirectAnswer,
        Criterion::Definition,
        Criterion::Headings,
        Criterion::Facts,
        Criterion::Sources,
        Criterion::Faq,
        Criterion::Lists,
        Criterion::Tables,
        Criterion::WordCountOk,
        Criterion::MetaOk,
    ];

    /// Stable snake_case identifier used in reports and serialized evidence.
    pub fn key(self) -> &'static str {
        match self {
            Criterion::DirectAnswer => "direct_answer",
            Criterion::Definition => "definition",
            Criterion::Headings => "headings",
            Criterion::Facts => "facts",
            Criterion::Sources => "sources",
            Criterion::Faq => "faq",
            Criterion::Lists => "lists",
            Criterion::Tables => "tables",
            Criterion::WordCountOk => "word_count_ok",
            Criterion::MetaOk => "meta_ok",
        }
    }

    /// Remediation text shown when this criterion fails.
    pub fn recommendation(self) -> &'static str {
        match self {
            Criterion::DirectAnswer => {
                "Pridaj priamu odpoveď hneď do úvodu (1–2 vety), bez vaty a bez otázok."
            }
            Criterion::Definition => {
                "Doplň stručnú definíciu hlavného pojmu (napr. „X je … / X znamená …“), ideálne v úvode."
            }
            Criterion::Headings => {
                "Pridaj viac H2 podnadpisov (článok sa bude lepšie skenovať a segmentovať)."
            }
            Criterion::Facts => {
                "Doplň merateľné fakty (čísla, percentá, dávkovanie, štúdie), aby bol obsah konkrétnejší."
            }
            Criterion::Sources => {
                "Doplň citácie zdrojov (odkazy) alebo sekciu „Zdroje/References/Štúdie“ s reálnymi linkami."
            }
            Criterion::Faq => {
                "Pridaj FAQ blok (FAQ/Časté otázky) – ideálne s konkrétnymi otázkami a odpoveďami."
            }
            Criterion::Lists => {
                "Pridaj zoznamy (<ul>/<ol>) pre lepšiu čitateľnosť (napr. kroky, tipy, výhody/nevýhody)."
            }
            Criterion::Tables => {
                "Ak dáva zmysel, pridaj tabuľku (porovnanie, dávkovanie, prehľad) pre rýchle skenovanie."
            }
            Criterion::WordCountOk => {
                "Doplň obsah – článok má mať aspoň 500 slov (word count z čistého textu bez HTML)."
            }
            Criterion::MetaOk => {
                "Uprav meta description na ~120–160 znakov (jasne, s benefitom a kľúčovým pojmom)."
            }
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Diagnostic evidence backing one criterion verdict. Closed per-criterion
/// variants so consumers can pattern-match without guessing field presence.
/// `Missing` stands in when a check faulted and produced nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "criterion", rename_all = "snake_case")]
pub enum Evidence {
    DirectAnswer {
        intro_excerpt: String,
        first_sentence: String,
        first_sentence_words: usize,
        banned_hits: Vec<String>,
        looks_like_question: bool,
    },
    Definition {
        definition_match: String,
        term: String,
        window_chars: usize,
    },
    Headings {
        h2_count: usize,
        min_h2: usize,
    },
    Facts {
        numbers_with_units: usize,
        min_numbers_with_units: usize,
    },
    Sources {
        has_source_section: bool,
        whitelisted_links: usize,
        http_links: usize,
    },
    Faq {
        text_hint: bool,
        has_definition_list: bool,
        has_faq_schema: bool,
    },
    Lists {
        list_count: usize,
        ul_count: usize,
        ol_count: usize,
        min_lists: usize,
    },
    Tables {
        table_count: usize,
        min_tables: usize,
    },
    WordCountOk {
        word_count: usize,
        min_words: usize,
    },
    MetaOk {
        meta_len: usize,
        min_len: usize,
        max_len: usize,
    },
    Missing,
}

/// Verdict plus evidence for one criterion. `fault` is set only when the
/// check itself panicked and was recorded as failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionReport {
    pub criterion: Criterion,
    pub passed: bool,
    pub evidence: Evidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
}

/// Aggregate audit outcome for one article. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    pub direct_answer: bool,
    pub definition: bool,
    pub headings: bool,
    pub facts: bool,
    pub sources: bool,
    pub faq: bool,
    pub lists: bool,
    pub tables: bool,
    pub word_count_ok: bool,
    pub meta_ok: bool,

    /// Count of passing criteria, 0-10, no weighting.
    pub score: u8,
    /// Per-criterion reports in canonical order.
    pub details: Vec<CriterionReport>,
    /// One remediation string per failed criterion, canonical order.
    pub recommendations: Vec<String>,
}

impl AuditResult {
    /// Report for a single criterion. The details vector always holds all
    /// ten criteria in canonical order.
    pub fn detail(&self, criterion: Criterion) -> Option<&CriterionReport> {
        self.details.iter().find(|d| d.criterion == criterion)
    }

    /// Conservative result for an article whose evaluation faulted entirely:
    /// every verdict false, score 0, one diagnostic recommendation.
    pub fn degraded(note: &str) -> Self {
        let details = Criterion::ALL
            .iter()
            .map(|&criterion| CriterionReport {
                criterion,
                passed: false,
                evidence: Evidence::Missing,
                fault: Some(note.to_string()),
            })
            .collect();
        AuditResult {
            direct_answer: false,
            definition: false,
            headings: false,
            facts: false,
            sources: false,
            faq: false,
            lists: false,
            tables: false,
            word_count_ok: false,
            meta_ok: false,
            score: 0,
            details,
            recommendations: vec![format!("Analysis error: {note}")],
        }
    }
}
