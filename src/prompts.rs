/*!
 * Prompt templates for translation and document analysis.
 *
 * The analysis prompt pins the response to a fixed textual template with two
 * literal section markers; `crate::analysis::parse_analysis_response` splits
 * on those exact strings. Changing a marker here without updating the parser
 * breaks the contract.
 */

/// Header literal the model is asked to emit before the explanation
pub const EXPLANATION_HEADER: &str = "**Explanation (English):**";

/// Marker literal the model is asked to emit before the quoted source.
/// The language name and closing punctuation after this prefix vary, so the
/// parser matches on the prefix only.
pub const SOURCE_MARKER: &str = "**Source from original document";

/// Translation task variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranslationTask {
    /// Plain translation
    Translate,
    /// Translation combined with wording simplification, used when rendering
    /// the English explanation back into the user's language
    TranslateAndSimplify,
}

impl TranslationTask {
    fn action(self) -> &'static str {
        match self {
            Self::Translate => "Translate",
            Self::TranslateAndSimplify => "Translate and simplify",
        }
    }
}

/// Build a translation prompt that expects only the resulting text back
pub fn translation_prompt(text: &str, target_language: &str, task: TranslationTask) -> String {
    format!(
        "{} the following text to {}. Only provide the resulting text:\n\n{}",
        task.action(),
        target_language,
        text
    )
}

/// Build the two-document analysis prompt
///
/// The model answers from the English-normalized text only, then quotes the
/// supporting sentence(s) from the original text so the evidence is
/// verifiable against the document the user actually holds.
pub fn analysis_prompt(
    original_text: &str,
    english_text: &str,
    question: &str,
    source_language: &str,
) -> String {
    format!(
        "You are a precise legal assistant. Answer the user's question based ONLY on the \
         provided English document.\n\
         Then, extract the exact source sentence(s) from the ORIGINAL document text \
         ({source_language}).\n\n\
         --- ENGLISH DOCUMENT TEXT START ---\n\
         {english_text}\n\
         --- ENGLISH DOCUMENT TEXT END ---\n\n\
         --- ORIGINAL DOCUMENT TEXT START ---\n\
         {original_text}\n\
         --- ORIGINAL DOCUMENT TEXT END ---\n\n\
         User Question: \"{question}\"\n\n\
         Required format:\n\
         {EXPLANATION_HEADER}\n\
         [Your simplified English answer here]\n\n\
         {SOURCE_MARKER} ({source_language}):**\n\
         \"[Exact quoted sentence(s) from the original document]\"\n"
    )
}
