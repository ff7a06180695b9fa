/*!
 * Document loading for plain text and PDF files
 *
 * A document is loaded once at startup and never mutated. PDF text is
 * extracted page by page; a page that cannot be extracted contributes an
 * empty string instead of failing the whole load, matching how scanned or
 * partially corrupt filings behave in practice.
 */

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::errors::DocumentError;

/// An immutable legal document held for the duration of a session
#[derive(Debug, Clone)]
pub struct Document {
    /// Full extracted text
    text: String,
    /// Declared source language (user-supplied name, not validated)
    language: String,
    /// Where the document was loaded from
    path: PathBuf,
}

impl Document {
    /// Load a document from disk, detecting the format from the extension
    ///
    /// Files ending in `.pdf` (case-insensitive) go through PDF text
    /// extraction; everything else is read as UTF-8 plain text. An empty or
    /// whitespace-only result is an error, since a session over an empty
    /// document is useless.
    pub fn load(path: &Path, language: &str) -> Result<Self, DocumentError> {
        let text = if is_pdf(path) {
            extract_pdf_text(path)?
        } else {
            std::fs::read_to_string(path)
                .map_err(|e| DocumentError::Unreadable(format!("{}: {}", path.display(), e)))?
        };

        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }

        debug!("Loaded document {} ({} chars)", path.display(), text.len());

        Ok(Self {
            text,
            language: language.to_string(),
            path: path.to_path_buf(),
        })
    }

    /// Build a document directly from text, for tests and piped input
    pub fn from_text(text: impl Into<String>, language: impl Into<String>) -> Result<Self, DocumentError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(Self {
            text,
            language: language.into(),
            path: PathBuf::new(),
        })
    }

    /// Full document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Declared source language name
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Path the document was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.language)
    }
}

/// Check whether a path looks like a PDF file
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Extract text from a PDF, page by page
///
/// Pages that fail extraction are skipped with a warning. Only a document
/// that cannot be parsed at all is a hard error.
fn extract_pdf_text(path: &Path) -> Result<String, DocumentError> {
    let doc = lopdf::Document::load(path)
        .map_err(|e| DocumentError::Pdf(format!("{}: {}", path.display(), e)))?;

    let mut text = String::new();
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                warn!("Could not extract text from page {}: {}", page_number, e);
            }
        }
    }

    Ok(text)
}
