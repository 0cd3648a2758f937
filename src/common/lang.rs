use crate::common::error::AppError;

/// Sentinel source language for automatic detection by the provider.
pub const AUTO: &str = "auto";

/// Closed vocabulary of language codes accepted by the portal. ISO-639
/// codes plus the regional variants the UI offers.
pub const SUPPORTED: &[&str] = &[
    "ar", "cs", "da", "de", "el", "en", "en-gb", "en-us", "es", "es-mx", "fi", "fr", "he", "hi",
    "hu", "id", "it", "ja", "ko", "nl", "no", "pl", "pt", "pt-br", "ro", "ru", "sv", "th", "tr",
    "uk", "vi", "zh-cn", "zh-tw",
];

pub fn is_supported(code: &str) -> bool {
    SUPPORTED.contains(&code)
}

/// Validates a language pair for a translation request. `auto` is only
/// valid as the source; a pair with identical source and target is
/// rejected unless the source is `auto`.
pub fn validate_pair(source: &str, target: &str) -> Result<(), AppError> {
    if source != AUTO && !is_supported(source) {
        return Err(AppError::validation(format!(
            "unknown source language: {source}"
        )));
    }
    if !is_supported(target) {
        return Err(AppError::validation(format!(
            "unknown target language: {target}"
        )));
    }
    if source == target {
        return Err(AppError::validation(
            "source and target language must differ",
        ));
    }
    Ok(())
}
