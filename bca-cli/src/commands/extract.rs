//! Financial extraction command handler

use anyhow::{Context, Result};
use bca_core::domain::document::DocumentFile;
use bca_core::domain::image::screen_images;
use bca_core::domain::session::Session;
use bca_core::error::skipped_files_notice;
use colored::*;
use std::path::{Path, PathBuf};
use tracing::error;

use super::ensure_allowed;
use crate::config::Config;

const EXTRACTION_FAILED: &str = "Failed to generate Excel file. Please try again.";

/// Upload statement images and save the generated spreadsheet
pub async fn handle_extract(
    config: &Config,
    session: &Session,
    files: Vec<PathBuf>,
    output_dir: &Path,
) -> Result<()> {
    ensure_allowed(session, session.can_extract_financials(), "Financial extraction")?;

    let candidates = files.into_iter().map(DocumentFile::from_path).collect();
    let selection = match screen_images(candidates) {
        Ok(selection) => selection,
        Err(e) => {
            if let Some(notice) = skipped_files_notice(e.rejected_files()) {
                println!("{}", notice.yellow());
            }
            return Err(e.into());
        }
    };
    if let Some(notice) = skipped_files_notice(&selection.rejected) {
        println!("{}", notice.yellow());
    }

    println!(
        "{}",
        "Uploading images and generating Excel file...".dimmed()
    );
    let client = config.client()?;
    let spreadsheet = match client.extract_financials(&selection.images).await {
        Ok(spreadsheet) => spreadsheet,
        Err(e) => {
            error!("Failed to upload images: {}", e);
            anyhow::bail!(EXTRACTION_FAILED);
        }
    };

    let path = save_spreadsheet(output_dir, &spreadsheet.file_name, &spreadsheet.bytes)?;
    println!(
        "{} {}",
        "Your Excel file is ready:".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

/// Writes the file under `output_dir`, keeping only the final path component
/// of the suggested name
fn save_spreadsheet(output_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let name = Path::new(file_name)
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| bca_core::domain::image::DEFAULT_SPREADSHEET_NAME.into());

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let path = output_dir.join(name);
    std::fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_spreadsheet_strips_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_spreadsheet(dir.path(), "../../etc/q3.xlsx", b"PK").unwrap();
        assert_eq!(path, dir.path().join("q3.xlsx"));
        assert_eq!(std::fs::read(path).unwrap(), b"PK");
    }

    #[test]
    fn test_save_spreadsheet_falls_back_to_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_spreadsheet(dir.path(), "..", b"PK").unwrap();
        assert_eq!(path, dir.path().join("processed-images.xlsx"));
    }
}
