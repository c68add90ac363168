//! Sign-in command handlers

use anyhow::{Context, Result};
use bca_core::domain::session::{View, validate_credentials};
use colored::*;

use crate::config::Config;
use crate::session_store::SessionStore;

/// Validate input, verify with the backend and store the session
pub async fn login(config: &Config, store: &SessionStore, email: &str, password: &str) -> Result<()> {
    validate_credentials(email, password)?;

    let client = config.client()?;
    let session = client
        .login(email, password)
        .await
        .context("Login request failed")?;

    let Some(session) = session else {
        anyhow::bail!("Invalid email or password.");
    };

    store.save(&session)?;

    println!("{}", "Login successful!".green());
    println!("  Signed in as: {}", session.display_name().cyan());
    println!("  Role:         {}", session.role);
    let start = match session.default_view() {
        View::Upload => "bca upload <FILES>...",
        View::Home => "bca chat",
    };
    println!("  Start with:   {}", start.dimmed());

    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    if store.clear()? {
        println!("{}", "Signed out.".green());
    } else {
        println!("{}", "Not signed in.".yellow());
    }
    Ok(())
}

pub fn whoami(store: &SessionStore) -> Result<()> {
    match store.load()? {
        Some(session) => {
            println!("{}", "Session:".bold());
            println!("  Email: {}", session.email);
            println!("  Name:  {}", session.display_name());
            println!("  Role:  {}", session.role);
            println!("  File:  {}", store.path().display().to_string().dimmed());
        }
        None => println!("{}", "Not signed in.".yellow()),
    }
    Ok(())
}
