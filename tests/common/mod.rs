/*!
 * Common test utilities for the legalens test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small English rental agreement for testing
pub fn create_test_agreement(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "RENTAL AGREEMENT\n\n\
        1. The tenant shall pay rent by the 5th of each month.\n\
        2. The landlord shall provide 30 days notice before any inspection.\n\
        3. Either party may terminate this agreement with 60 days written notice.\n";
    create_test_file(dir, filename, content)
}
