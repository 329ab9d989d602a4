use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::auth::store::CredentialStore;
use crate::http::interceptor::{InterceptionOutcome, InterceptorPipeline};
use crate::http::transport::HttpRequest;

/// Failure of a session operation. `Rejected` carries the pipeline outcome;
/// a 401 here means the credentials were wrong, and the pipeline's auth-page
/// guard keeps it from looping back into another redirect as long as the
/// hosting surface is on the login page while it calls this.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("login rejected: {0:?}")]
    Rejected(InterceptionOutcome),

    #[error("malformed login response: {0}")]
    Malformed(String),

    #[error("failed to persist session: {0}")]
    Storage(String),
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    username: String,
}

/// Login/logout surface feeding the credential store. This is the only
/// writer of the session; everything else just reads.
pub struct SessionClient {
    pipeline: InterceptorPipeline,
    store: CredentialStore,
    base_url: String,
}

impl SessionClient {
    pub fn new(
        pipeline: InterceptorPipeline,
        store: CredentialStore,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            pipeline,
            store,
            base_url,
        }
    }

    /// Authenticate and store token, flag and identity as one unit. Returns
    /// the confirmed username.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, SessionError> {
        let body = serde_json::to_value(LoginBody { username, password })
            .expect("LoginBody should serialize");
        let request = HttpRequest::post(format!("{}/login", self.base_url), body);

        let response = match self.pipeline.send(request).await {
            InterceptionOutcome::Success(response) => response,
            outcome => return Err(SessionError::Rejected(outcome)),
        };

        let parsed: LoginResponse = response
            .json()
            .map_err(|e| SessionError::Malformed(e.to_string()))?;

        self.store
            .store_session(parsed.token, parsed.username.clone())
            .map_err(|error| SessionError::Storage(error.to_string()))?;

        info!(username = %parsed.username, "logged in");
        Ok(parsed.username)
    }

    /// Drop the stored session. Local only; no network call.
    pub fn logout(&self) -> anyhow::Result<()> {
        info!("logging out, clearing stored session");
        self.store.clear()
    }

    /// Cached identity from the last login, if any
    pub fn identity(&self) -> Option<String> {
        self.store.identity()
    }
}
