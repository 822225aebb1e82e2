//! Submission gateway: hands a confirmed order to the lead endpoint.

use std::time::Duration;

use async_trait::async_trait;
use kuzka_models::LeadSubmission;
use tracing::{debug, info};
use url::Url;

use crate::error::{BotError, Result};

/// Default timeout for one submission attempt.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Persists confirmed orders. Called once per confirmation, never retried.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, submission: &LeadSubmission) -> Result<()>;
}

/// Basic-auth credentials for the lead endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Posts submissions as JSON to the admin API intake endpoint.
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: Url,
    credentials: Option<Credentials>,
}

impl HttpGateway {
    /// Creates a gateway whose requests give up after `timeout`.
    pub fn new(endpoint: Url, timeout: Duration, credentials: Option<Credentials>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    /// The endpoint submissions are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionGateway for HttpGateway {
    async fn submit(&self, submission: &LeadSubmission) -> Result<()> {
        let mut request = self.client.post(self.endpoint.clone()).json(submission);
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        debug!(endpoint = %self.endpoint, "Submitting lead");
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::SubmissionFailed(format!(
                "{} returned {}: {}",
                self.endpoint,
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        info!(endpoint = %self.endpoint, status = %status, "Lead submitted");
        Ok(())
    }
}
