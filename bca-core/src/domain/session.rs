//! Session domain types
//!
//! A [`Session`] is the signed-in user's context. It is passed explicitly to
//! everything that needs to know who is acting or what they may do.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::ValidationError;

/// Access level of a signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Standard,
    SuperAdmin,
}

impl Role {
    /// Maps the backend's role label; only `ADMIN` grants elevated access
    pub fn from_backend(label: Option<&str>) -> Self {
        match label {
            Some(l) if l.eq_ignore_ascii_case("admin") => Role::SuperAdmin,
            _ => Role::Standard,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Standard => f.write_str("standard"),
            Role::SuperAdmin => f.write_str("super admin"),
        }
    }
}

/// Landing area for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Chat and summary tools
    Home,
    /// Document upload
    Upload,
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    /// Preferred display name, if the user set one
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
}

impl Session {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            name: None,
            role,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name attached to uploads
    ///
    /// Falls back to the local part of the email, then to `"user"`.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        let local = self.email.split('@').next().unwrap_or_default().trim();
        if local.is_empty() {
            "user".to_string()
        } else {
            local.to_string()
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    pub fn default_view(&self) -> View {
        if self.is_super_admin() {
            View::Upload
        } else {
            View::Home
        }
    }

    pub fn can_upload_documents(&self) -> bool {
        self.is_super_admin()
    }

    pub fn can_extract_financials(&self) -> bool {
        self.is_super_admin()
    }

    pub fn can_generate_summary(&self) -> bool {
        true
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// Checks login form input, collecting every field error
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if email.is_empty() {
        errors.push("Email address is required.".to_string());
    } else if !email_pattern().is_match(email) {
        errors.push("Please enter a valid email address.".to_string());
    }

    if password.is_empty() {
        errors.push("Password is required.".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Credentials(errors))
    }
}
