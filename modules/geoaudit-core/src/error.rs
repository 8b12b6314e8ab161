use thiserror::Error;

/// Errors surfaced by the audit engine. Evaluation itself never fails;
/// only loading or compiling a substitute lexicon can.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to read lexicon file: {0}")]
    LexiconIo(#[from] std::io::Error),

    #[error("Failed to parse lexicon file: {0}")]
    LexiconParse(#[from] toml::de::Error),

    #[error("Invalid lexicon pattern: {0}")]
    LexiconPattern(#[from] regex::Error),
}
