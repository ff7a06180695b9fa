/*!
 * Tests for document loading and text extraction
 */

use std::path::Path;
use anyhow::Result;
use legalens::document::{self, Document};
use legalens::errors::DocumentError;
use crate::common;

/// Test loading a plain text document
#[test]
fn test_load_withPlainTextFile_shouldReturnFullText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_agreement(&temp_dir.path().to_path_buf(), "agreement.txt")?;

    let document = Document::load(&path, "English")?;

    assert!(document.text().contains("The tenant shall pay rent by the 5th of each month."));
    assert_eq!(document.language(), "English");
    assert_eq!(document.path(), path.as_path());
    Ok(())
}

/// Test that an empty file is rejected
#[test]
fn test_load_withEmptyFile_shouldReturnEmptyError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "empty.txt", "  \n\t\n")?;

    let result = Document::load(&path, "English");

    assert!(matches!(result, Err(DocumentError::Empty)));
    Ok(())
}

/// Test that a missing file is reported as unreadable
#[test]
fn test_load_withMissingFile_shouldReturnUnreadableError() {
    let result = Document::load(Path::new("/nonexistent/contract.txt"), "English");

    assert!(matches!(result, Err(DocumentError::Unreadable(_))));
}

/// Test PDF detection by extension
#[test]
fn test_isPdf_withVariousExtensions_shouldDetectCaseInsensitively() {
    assert!(document::is_pdf(Path::new("lease.pdf")));
    assert!(document::is_pdf(Path::new("LEASE.PDF")));
    assert!(document::is_pdf(Path::new("dir/contract.Pdf")));
    assert!(!document::is_pdf(Path::new("lease.txt")));
    assert!(!document::is_pdf(Path::new("lease")));
    assert!(!document::is_pdf(Path::new("pdf")));
}

/// Test that a file with a .pdf extension but invalid content fails as PDF
#[test]
fn test_load_withBogusPdfContent_shouldReturnPdfError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "fake.pdf", "not a pdf")?;

    let result = Document::load(&path, "English");

    assert!(matches!(result, Err(DocumentError::Pdf(_))));
    Ok(())
}

/// Test building a document from in-memory text
#[test]
fn test_fromText_withContent_shouldKeepLanguage() -> Result<()> {
    let document = Document::from_text("Clause one.", "Tamil")?;

    assert_eq!(document.text(), "Clause one.");
    assert_eq!(document.language(), "Tamil");

    let empty = Document::from_text("   ", "Tamil");
    assert!(matches!(empty, Err(DocumentError::Empty)));
    Ok(())
}
