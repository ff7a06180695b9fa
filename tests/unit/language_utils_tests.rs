/*!
 * Tests for language name utilities
 */

use legalens::language_utils::{is_english, speech_locale};

/// Test English detection across casings
#[test]
fn test_isEnglish_withVariousCasings_shouldMatchCaseInsensitively() {
    assert!(is_english("English"));
    assert!(is_english("english"));
    assert!(is_english("ENGLISH"));
    assert!(is_english("  English  "));

    assert!(!is_english("Tamil"));
    assert!(!is_english("englishish"));
    assert!(!is_english(""));
}

/// Test locale resolution for known language names
#[test]
fn test_speechLocale_withKnownNames_shouldReturnIso6391Codes() {
    assert_eq!(speech_locale("English"), "en");
    assert_eq!(speech_locale("Tamil"), "ta");
    assert_eq!(speech_locale("Hindi"), "hi");
    assert_eq!(speech_locale("French"), "fr");

    // Lookup is case-insensitive on the name
    assert_eq!(speech_locale("tamil"), "ta");
    assert_eq!(speech_locale("FRENCH"), "fr");
}

/// Test the truncation fallback for unknown names
#[test]
fn test_speechLocale_withUnknownName_shouldTruncateToTwoChars() {
    assert_eq!(speech_locale("Valyrian"), "va");
    assert_eq!(speech_locale("Xx"), "xx");
}

/// Test that empty input degrades to English
#[test]
fn test_speechLocale_withEmptyInput_shouldDefaultToEnglish() {
    assert_eq!(speech_locale(""), "en");
    assert_eq!(speech_locale("   "), "en");
}
