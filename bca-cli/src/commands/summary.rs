//! Summary command handler

use anyhow::{Context, Result};
use bca_core::domain::session::Session;
use bca_core::domain::summary::SummaryRequest;
use colored::*;
use std::path::{Path, PathBuf};
use tracing::error;

use super::ensure_allowed;
use crate::config::Config;

const SUMMARY_FAILED: &str = "Unable to generate the summary right now. Please try again later.";

/// Request a summary and write it to `output_dir`
pub async fn handle_summary(
    config: &Config,
    session: &Session,
    company: &str,
    year: &str,
    output_dir: &Path,
) -> Result<()> {
    ensure_allowed(session, session.can_generate_summary(), "Summary generation")?;
    let request = SummaryRequest::new(company, year)?;

    println!("{}", "Generating summary...".dimmed());
    let client = config.client()?;
    let text = match client.generate_summary(&request).await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to generate summary: {}", e);
            anyhow::bail!(SUMMARY_FAILED);
        }
    };

    let path = write_report(output_dir, &request, &text)?;
    println!(
        "{} {}",
        "Summary saved to".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

fn write_report(output_dir: &Path, request: &SummaryRequest, text: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let path = output_dir.join(request.file_name());
    std::fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
