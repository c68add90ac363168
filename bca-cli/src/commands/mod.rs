//! Commands module
//!
//! Defines all CLI commands and their handlers. Every handler that acts on
//! behalf of a user receives the signed-in [`Session`] explicitly.

mod auth;
mod chat;
mod extract;
mod summary;
mod upload;

use anyhow::{Result, bail};
use bca_core::domain::session::Session;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Config;
use crate::session_store::SessionStore;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        /// Account email
        #[arg(long, short)]
        email: String,

        /// Account password
        #[arg(long, short, env = "BCA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Ask the compliance assistant
    Chat {
        /// Ask a single question and exit; omit for an interactive prompt
        question: Option<String>,
    },
    /// Upload documents for extraction and follow the job (super admin)
    Upload {
        /// Word, Excel or PDF documents
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Return after submitting instead of following the job
        #[arg(long)]
        no_wait: bool,
    },
    /// Generate a company summary report
    Summary {
        /// Company name
        #[arg(long, short)]
        company: String,

        /// Annual information return year
        #[arg(long, short)]
        year: String,

        /// Directory to write the report into
        #[arg(long, short, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Extract financial figures from statement images into a spreadsheet (super admin)
    Extract {
        /// Image files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory to write the spreadsheet into
        #[arg(long, short, default_value = ".")]
        output_dir: PathBuf,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let store = SessionStore::new(&config.session_file);

    match command {
        Commands::Login { email, password } => auth::login(config, &store, &email, &password).await,
        Commands::Logout => auth::logout(&store),
        Commands::Whoami => auth::whoami(&store),
        Commands::Chat { question } => {
            let session = store.require()?;
            chat::handle_chat(config, &session, question).await
        }
        Commands::Upload { files, no_wait } => {
            let session = store.require()?;
            upload::handle_upload(config, &session, files, no_wait).await
        }
        Commands::Summary {
            company,
            year,
            output_dir,
        } => {
            let session = store.require()?;
            summary::handle_summary(config, &session, &company, &year, &output_dir).await
        }
        Commands::Extract { files, output_dir } => {
            let session = store.require()?;
            extract::handle_extract(config, &session, files, &output_dir).await
        }
    }
}

/// Fails unless `allowed`, naming the action that was refused
fn ensure_allowed(session: &Session, allowed: bool, action: &str) -> Result<()> {
    if !allowed {
        bail!(
            "{} is not available to {} accounts ({})",
            action,
            session.role,
            session.email
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bca_core::domain::session::Role;

    #[test]
    fn test_ensure_allowed() {
        let user = Session::new("user@bca.example", Role::Standard);
        let err = ensure_allowed(&user, user.can_upload_documents(), "Document upload").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Document upload is not available to standard accounts (user@bca.example)"
        );

        let admin = Session::new("root@bca.example", Role::SuperAdmin);
        assert!(ensure_allowed(&admin, admin.can_upload_documents(), "Document upload").is_ok());
    }
}
