//! Languages JPlag accepts for `-l`.

use ps_core::error::{PlagError, Result};

pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "c",
    "cpp",
    "csharp",
    "emf",
    "emf-model",
    "go",
    "java",
    "javascript",
    "kotlin",
    "llvmir",
    "multi",
    "python3",
    "rlang",
    "rust",
    "scala",
    "scheme",
    "scxml",
    "swift",
    "text",
    "typescript",
];

pub fn is_supported(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang)
}

/// Fail on an unsupported language unless `tolerate` is set.
pub fn check_language(lang: &str, tolerate: bool) -> Result<()> {
    if is_supported(lang) {
        return Ok(());
    }
    if tolerate {
        tracing::warn!(lang, "running detector on unsupported language");
        return Ok(());
    }
    Err(PlagError::UnsupportedLanguage(lang.to_string()))
}
