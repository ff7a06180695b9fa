/*!
 * Language utilities for mapping user-supplied language names to locale hints
 *
 * The document language is a free-form name typed by the user ("English",
 * "Tamil", "french"). Speech capture and synthesis want a short ISO 639-1
 * style code, so the name is resolved through isolang where possible and
 * otherwise truncated to its first two characters.
 */

use isolang::Language;

/// Check whether a language name refers to English, case-insensitively
pub fn is_english(language: &str) -> bool {
    language.trim().eq_ignore_ascii_case("english")
}

/// Resolve a language name to a two-letter locale hint
///
/// Resolution order: exact English name lookup via isolang (after
/// title-casing the input), then the first two characters of the lowercased
/// name as a last resort. The fallback mirrors how lenient speech services
/// treat locale hints; an unknown name degrades to a plausible code rather
/// than an error.
pub fn speech_locale(language: &str) -> String {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        return "en".to_string();
    }

    if let Some(lang) = Language::from_name(&title_case(trimmed)) {
        if let Some(code) = lang.to_639_1() {
            return code.to_string();
        }
        // No ISO 639-1 code exists; use the start of the 639-3 code
        return lang.to_639_3().chars().take(2).collect();
    }

    trimmed.to_lowercase().chars().take(2).collect()
}

/// Title-case a language name the way isolang's English name table spells it
fn title_case(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
