//! Authentication endpoints

use crate::BcaClient;
use crate::error::Result;
use bca_core::domain::session::{Role, Session};
use bca_core::dto::auth::{LoginRequest, LoginResponse};
use tracing::{debug, info};

impl BcaClient {
    // =============================================================================
    // Authentication
    // =============================================================================

    /// Verify credentials with the backend
    ///
    /// # Arguments
    /// * `email` - Account email
    /// * `password` - Account password
    ///
    /// # Returns
    /// The session for the account, or `None` when the backend rejects the
    /// credentials
    ///
    /// # Example
    /// ```no_run
    /// # use bca_client::BcaClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = BcaClient::new("http://localhost:8000");
    /// if let Some(session) = client.login("analyst@bank.example", "secret").await? {
    ///     println!("signed in as {}", session.display_name());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<Session>> {
        let url = self.url("login");
        debug!("Signing in {}", email);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let body: LoginResponse = self.handle_response(response).await?;
        Ok(session_from_login(email, body))
    }
}

fn session_from_login(email: &str, body: LoginResponse) -> Option<Session> {
    if !body.success {
        return None;
    }

    let role = Role::from_backend(body.role.as_deref());
    info!("Signed in {} with role {}", email, role);
    Some(Session::new(email, role))
}
