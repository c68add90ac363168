//! Display surface
//!
//! The coordinator reports every transition here. The terminal
//! implementation prints each distinct job view once.

use colored::*;
use std::sync::{Mutex, PoisonError};

/// What the user should currently see about the tracked job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobView {
    pub status_label: Option<String>,
    pub result_message: Option<String>,
    /// Whether a status check is still expected
    pub busy: bool,
}

/// One-off notices about the upload itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// Some picked files were skipped
    Skipped(String),
    /// Documents are on their way
    Sending { count: usize },
    /// The backend accepted the documents
    Sent { actor: String, files: Vec<String> },
    /// Free-form message from the upload endpoint
    ServerMessage(String),
    Error(String),
}

/// Consumer of coordinator state
pub trait DisplaySurface: Send + Sync {
    /// Called after every job state transition
    fn job_state(&self, view: &JobView);

    fn banner(&self, banner: &Banner);
}

/// Prints to stdout with colors
#[derive(Default)]
pub struct TerminalDisplay {
    last_view: Mutex<Option<JobView>>,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySurface for TerminalDisplay {
    fn job_state(&self, view: &JobView) {
        let mut last = self.last_view.lock().unwrap_or_else(PoisonError::into_inner);
        if last.as_ref() == Some(view) {
            return;
        }
        *last = Some(view.clone());

        if let Some(message) = &view.result_message {
            if let Some(label) = &view.status_label {
                println!("{}", label.bold());
            }
            println!("{}", message);
        } else if let Some(label) = &view.status_label {
            println!("{} {}", "Status:".dimmed(), label.cyan());
        }

        if view.busy {
            println!("{}", "⏳ Checking job status...".dimmed());
        }
    }

    fn banner(&self, banner: &Banner) {
        match banner {
            Banner::Skipped(notice) => println!("{}", notice.yellow()),
            Banner::Sending { count } => {
                println!("{}", format!("Sending {} document(s)...", count).dimmed())
            }
            Banner::Sent { actor, files } => {
                println!(
                    "{}",
                    format!("The following documents have been sent by {}:", actor).green()
                );
                for file in files {
                    println!("  {} {}", "▸".cyan(), file);
                }
            }
            Banner::ServerMessage(message) => println!("{}", message.cyan()),
            Banner::Error(message) => eprintln!("{}", message.red()),
        }
    }
}
