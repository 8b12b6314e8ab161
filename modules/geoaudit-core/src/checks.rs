//! The ten criterion checks. Each is a pure function of the normalized
//! document (plus auxiliary inputs) returning a verdict and its evidence.
//! None of them panics on malformed input: absence of structure is a fail,
//! never an error.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use crate::lexicon::CompiledLexicon;
use crate::normalize::NormalizedDoc;
use crate::types::Evidence;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

static H2_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());
static UL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul").unwrap());
static OL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ol").unwrap());
static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static DL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dl").unwrap());
static JSON_LD_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

/// Prefix of `s` holding at most `n` chars, cut on a char boundary. The
/// heuristics window by characters, not bytes, so diacritics count as one.
fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn count_words(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

/// Lightweight sentence split: everything up to the first `.`/`!`/`?` that is
/// followed by whitespace (or ends the text), capped at 400 chars.
fn first_sentence(text: &str) -> String {
    let trimmed = text.trim();
    let mut end = trimmed.len();
    let mut chars = trimmed.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            match chars.peek() {
                Some(&(_, next)) if !next.is_whitespace() => continue,
                _ => {
                    end = idx + c.len_utf8();
                    break;
                }
            }
        }
    }
    char_prefix(&trimmed[..end], 400).trim().to_string()
}

/// Criterion #1: the intro answers directly. The first sentence must exist,
/// must not be (or open with) a question, must carry at least six word
/// tokens, and the first 150 chars must be free of fluff intro phrases.
pub fn check_direct_answer(plain_text: &str, lexicon: &CompiledLexicon) -> (bool, Evidence) {
    let text = plain_text.trim();
    let intro = char_prefix(text, 150);
    let intro_lower = intro.to_lowercase();

    let banned_hits: Vec<String> = lexicon
        .banned_intro_phrases
        .iter()
        .filter(|phrase| intro_lower.contains(phrase.as_str()))
        .cloned()
        .collect();

    let first = first_sentence(text);
    let word_count = count_words(&first);
    let looks_like_question = first.ends_with('?') || char_prefix(&first, 120).contains('?');

    let passed =
        !first.is_empty() && banned_hits.is_empty() && !looks_like_question && word_count >= 6;
    (
        passed,
        Evidence::DirectAnswer {
            intro_excerpt: intro.to_string(),
            first_sentence: first,
            first_sentence_words: word_count,
            banned_hits,
            looks_like_question,
        },
    )
}

/// Criterion #2: an explicit definition appears early. Looks for
/// "X je / X znamená / X predstavuje" within the first `window_chars` chars,
/// where X is at least three letters and not a generic stopword. In strict
/// mode the term must also occur in the title; an empty title disables that
/// requirement.
pub fn check_definition(
    plain_text: &str,
    title: &str,
    strict: bool,
    window_chars: usize,
    lexicon: &CompiledLexicon,
) -> (bool, Evidence) {
    let window = char_prefix(plain_text.trim(), window_chars);
    let title_lower = title.trim().to_lowercase();

    for captures in lexicon.definition_re.captures_iter(window) {
        let term = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if term.is_empty() {
            continue;
        }
        let term_lower = term.to_lowercase();
        if lexicon.definition_stopwords.contains(&term_lower) {
            continue;
        }
        if strict && !title_lower.is_empty() && !title_lower.contains(&term_lower) {
            continue;
        }
        return (
            true,
            Evidence::Definition {
                definition_match: captures.get(0).map(|m| m.as_str()).unwrap_or("").to_string(),
                term: term.to_string(),
                window_chars,
            },
        );
    }

    (
        false,
        Evidence::Definition {
            definition_match: String::new(),
            term: String::new(),
            window_chars,
        },
    )
}

/// Criterion #3: enough H2 subheadings to segment the article.
pub fn check_headings(doc: &NormalizedDoc, min_h2: usize) -> (bool, Evidence) {
    let h2_count = doc.count(&H2_SELECTOR);
    (h2_count >= min_h2, Evidence::Headings { h2_count, min_h2 })
}

/// Criterion #4: measurable facts — numbers with units (dosage, percentages,
/// energy values).
pub fn check_facts(
    plain_text: &str,
    min_numbers_with_units: usize,
    lexicon: &CompiledLexicon,
) -> (bool, Evidence) {
    let numbers_with_units = lexicon.units_re.find_iter(plain_text).count();
    (
        numbers_with_units >= min_numbers_with_units,
        Evidence::Facts {
            numbers_with_units,
            min_numbers_with_units,
        },
    )
}

/// Criterion #5: the article cites sources. Non-strict passes on a
/// sources-section hint alone or a whitelisted outbound link. Strict requires
/// a whitelisted link, or a section hint backed by at least one http(s) link
/// — deliberately lenient about where that link points.
pub fn check_sources(
    plain_text: &str,
    doc: &NormalizedDoc,
    strict: bool,
    lexicon: &CompiledLexicon,
) -> (bool, Evidence) {
    let has_source_section = lexicon.source_hint_re.is_match(plain_text);

    let hrefs = doc.hrefs();
    let whitelisted_links = hrefs
        .iter()
        .filter(|href| lexicon.source_domain_re.is_match(href))
        .count();
    let http_links = hrefs
        .iter()
        .filter(|href| {
            let lower = href.to_lowercase();
            lower.starts_with("http://") || lower.starts_with("https://")
        })
        .count();

    let passed = if strict {
        whitelisted_links > 0 || (has_source_section && http_links > 0)
    } else {
        has_source_section || whitelisted_links > 0
    };
    (
        passed,
        Evidence::Sources {
            has_source_section,
            whitelisted_links,
            http_links,
        },
    )
}

/// Criterion #6: an FAQ section — textual hint, a definition list, or
/// FAQPage structured data in an embedded JSON-LD script.
pub fn check_faq(plain_text: &str, doc: &NormalizedDoc, lexicon: &CompiledLexicon) -> (bool, Evidence) {
    let text_hint = lexicon.faq_hint_re.is_match(plain_text);
    let has_definition_list = doc.has(&DL_SELECTOR);
    let has_faq_schema = doc
        .texts(&JSON_LD_SELECTOR)
        .iter()
        .any(|script| script.contains("FAQPage"));

    (
        text_hint || has_definition_list || has_faq_schema,
        Evidence::Faq {
            text_hint,
            has_definition_list,
            has_faq_schema,
        },
    )
}

/// Criterion #7: lists for scannability.
pub fn check_lists(doc: &NormalizedDoc, min_lists: usize) -> (bool, Evidence) {
    let ul_count = doc.count(&UL_SELECTOR);
    let ol_count = doc.count(&OL_SELECTOR);
    let list_count = ul_count + ol_count;
    (
        list_count >= min_lists,
        Evidence::Lists {
            list_count,
            ul_count,
            ol_count,
            min_lists,
        },
    )
}

/// Criterion #8: at least one table.
pub fn check_tables(doc: &NormalizedDoc, min_tables: usize) -> (bool, Evidence) {
    let table_count = doc.count(&TABLE_SELECTOR);
    (
        table_count >= min_tables,
        Evidence::Tables {
            table_count,
            min_tables,
        },
    )
}

/// Criterion #9: sufficient length, counted on clean text without markup.
pub fn check_word_count(plain_text: &str, min_words: usize) -> (bool, Evidence) {
    let word_count = count_words(plain_text);
    (
        word_count >= min_words,
        Evidence::WordCountOk {
            word_count,
            min_words,
        },
    )
}

/// Criterion #10: meta description length in the snippet-friendly range.
pub fn check_meta_description(
    meta_description: &str,
    min_len: usize,
    max_len: usize,
) -> (bool, Evidence) {
    let meta_len = meta_description.trim().chars().count();
    (
        meta_len >= min_len && meta_len <= max_len,
        Evidence::MetaOk {
            meta_len,
            min_len,
            max_len,
        },
    )
}
