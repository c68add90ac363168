//! Upload command handler
//!
//! Screens the given files, submits them and follows the resulting job until
//! it finishes or the user interrupts.

use anyhow::Result;
use bca_client::DocumentApi;
use bca_core::domain::document::DocumentFile;
use bca_core::domain::session::Session;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use super::ensure_allowed;
use crate::config::Config;
use crate::upload::{PollState, TerminalDisplay, UploadCoordinator};

pub async fn handle_upload(
    config: &Config,
    session: &Session,
    files: Vec<PathBuf>,
    no_wait: bool,
) -> Result<()> {
    ensure_allowed(session, session.can_upload_documents(), "Document upload")?;

    let api: Arc<dyn DocumentApi> = Arc::new(config.client()?);
    let mut coordinator = UploadCoordinator::new(api, Arc::new(TerminalDisplay::new()))
        .with_poll_interval(config.poll_interval);

    let candidates = files.into_iter().map(DocumentFile::from_path).collect();
    coordinator.select(candidates)?;
    info!("{} document(s) selected", coordinator.selected().len());

    let outcome = coordinator.submit_selected(&session.display_name()).await?;
    info!(
        "Sent {} document(s); job: {:?}",
        outcome.files.len(),
        outcome.job_id
    );

    if !outcome.started_polling() || no_wait {
        if let Some(job_id) = &outcome.job_id {
            println!("{} {}", "Job:".dimmed(), job_id.to_string().cyan());
        }
        return Ok(());
    }

    let finished = tokio::select! {
        state = coordinator.wait_until_finished() => Some(state),
        _ = tokio::signal::ctrl_c() => None,
    };
    let state = finished.unwrap_or_else(|| {
        info!("Interrupted; stopping status checks");
        coordinator.cancel();
        PollState::Cancelled
    });

    match state {
        PollState::Failed => anyhow::bail!("Job status could not be retrieved"),
        PollState::Cancelled => {
            println!("{}", "Stopped following the job.".yellow());
            Ok(())
        }
        _ => Ok(()),
    }
}
