use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::AuditError;

/// Heuristic lexicon: the language-specific phrases, tokens and domains the
/// checks match against. Kept as loadable data rather than inline literals so
/// the checks stay pure functions parameterized by a lexicon value, and so
/// tests can substitute their own.
///
/// The default is the fixed Slovak lexicon the tool ships with.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Lexicon {
    /// Fluff intro phrases that signal the answer is not direct (lowercase).
    pub banned_intro_phrases: Vec<String>,
    /// Copula verbs accepted by the definition pattern ("X je ...").
    pub definition_verbs: Vec<String>,
    /// Overly generic terms that never count as a defined subject (lowercase).
    pub definition_stopwords: Vec<String>,
    /// Unit tokens that turn a number into a measurable fact.
    pub unit_tokens: Vec<String>,
    /// Section-heading words hinting at a sources/references block.
    pub source_section_hints: Vec<String>,
    /// Authoritative domains whose outbound links count as real sourcing.
    pub source_domain_whitelist: Vec<String>,
    /// Textual hints for an FAQ section.
    pub faq_hints: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon {
            banned_intro_phrases: vec_of(&[
                "v tomto článku",
                "v tomto clanku",
                "pozrieme sa",
                "poďme sa pozrieť",
                "podme sa pozriet",
                "dozviete sa",
                "zistíte",
                "zistite",
                "na úvod",
                "na uvod",
                "v dnešnom článku",
                "v dnesnom clanku",
                "predstavíme si",
                "predstavime si",
            ]),
            definition_verbs: vec_of(&["je", "znamená", "predstavuje"]),
            definition_stopwords: vec_of(&[
                "toto",
                "to",
                "ten",
                "tá",
                "ta",
                "tieto",
                "tak",
                "taky",
                "čas",
                "cas",
                "telo",
                "dnes",
                "včera",
                "vcera",
                "zajtra",
                "život",
                "zivot",
                "človek",
                "clovek",
                "ľudia",
                "ludia",
                "pravda",
                "fakt",
                "fakty",
                "informácia",
                "informacia",
            ]),
            unit_tokens: vec_of(&[
                "mg",
                "g",
                "kg",
                "%",
                "kcal",
                "ml",
                "mcg",
                "gramov",
                "miligramov",
            ]),
            source_section_hints: vec_of(&[
                "zdroje",
                "references",
                "referencie",
                "štúdie",
                "studie",
                "literatúra",
                "literatura",
            ]),
            source_domain_whitelist: vec_of(&[
                "pubmed.ncbi.nlm.nih.gov",
                "ncbi.nlm.nih.gov",
                "examine.com",
                "who.int",
                "nih.gov",
                "cdc.gov",
                "efsa.europa.eu",
                "cochranelibrary.com",
                "jamanetwork.com",
                "nejm.org",
                "nature.com",
                "science.org",
            ]),
            faq_hints: vec_of(&[
                "faq",
                "časté otázky",
                "caste otazky",
                "najčastejšie otázky",
                "najcastejsie otazky",
            ]),
        }
    }
}

impl Lexicon {
    /// Load a substitute lexicon from a TOML file. Missing keys fall back to
    /// the built-in defaults; unknown keys are rejected.
    pub fn from_toml_file(path: &Path) -> Result<Self, AuditError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

fn vec_of(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Lexicon with its regexes compiled once. All patterns are case-insensitive
/// and Unicode-aware so diacritic-bearing text matches.
#[derive(Debug)]
pub struct CompiledLexicon {
    pub(crate) banned_intro_phrases: Vec<String>,
    pub(crate) definition_stopwords: HashSet<String>,
    pub(crate) definition_re: Regex,
    pub(crate) units_re: Regex,
    pub(crate) source_hint_re: Regex,
    pub(crate) source_domain_re: Regex,
    pub(crate) faq_hint_re: Regex,
}

impl CompiledLexicon {
    pub fn compile(lexicon: &Lexicon) -> Result<Self, AuditError> {
        // "X je / X znamená / X predstavuje" with a subject of >= 3 letters.
        let definition_re = Regex::new(&format!(
            r"(?i)\b([A-Za-zÀ-ž][A-Za-zÀ-ž\-]{{2,}})\s+(?:{})\b",
            alternation(&lexicon.definition_verbs)
        ))?;

        // Number with optional decimal part, optional space, unit token.
        // A trailing \b is only valid after word characters, so symbolic
        // units like "%" get no boundary (a bare "10%" must still count).
        let unit_alts: Vec<String> = lexicon
            .unit_tokens
            .iter()
            .map(|t| {
                let escaped = regex::escape(t);
                if t.chars().last().is_some_and(|c| c.is_alphanumeric()) {
                    format!(r"{escaped}\b")
                } else {
                    escaped
                }
            })
            .collect();
        let units_re = Regex::new(&format!(
            r"(?i)\b\d+(?:[.,]\d+)?\s?(?:{})",
            join_or_unmatchable(&unit_alts)
        ))?;

        let source_hint_re = Regex::new(&format!(
            r"(?i)\b(?:{})\b",
            alternation(&lexicon.source_section_hints)
        ))?;

        let source_domain_re = Regex::new(&format!(
            r"(?i)https?://(?:www\.)?(?:{})(?:[/:?#]|$)",
            alternation(&lexicon.source_domain_whitelist)
        ))?;

        let faq_hint_re =
            Regex::new(&format!(r"(?i)\b(?:{})\b", alternation(&lexicon.faq_hints)))?;

        Ok(CompiledLexicon {
            banned_intro_phrases: lexicon
                .banned_intro_phrases
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            definition_stopwords: lexicon
                .definition_stopwords
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            definition_re,
            units_re,
            source_hint_re,
            source_domain_re,
            faq_hint_re,
        })
    }
}

/// Escaped alternation of the given items. An empty list yields a pattern
/// that can never match, so an emptied-out lexicon section disables its
/// check instead of matching everything.
fn alternation(items: &[String]) -> String {
    let escaped: Vec<String> = items.iter().map(|i| regex::escape(i)).collect();
    join_or_unmatchable(&escaped)
}

fn join_or_unmatchable(alts: &[String]) -> String {
    if alts.is_empty() {
        r"[^\s\S]".to_string()
    } else {
        alts.join("|")
    }
}
