use std::time::Duration;

use log::info;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use crate::config::IdentityConfig;
use crate::error::IdentityError;
use crate::models::{Principal, Session};

/// Hosted sign-in/sign-out. The app only ever sees the resulting `Session`.
pub trait IdentityProvider: Send + Sync {
    fn sign_in(&self, identifier: &str, password: &str) -> Result<Session, IdentityError>;
    fn sign_out(&self, session: &Session) -> Result<(), IdentityError>;
}

#[derive(Clone)]
pub struct HostedIdentity {
    frontend_url: String,
    publishable_key: String,
    client: Client,
}

impl HostedIdentity {
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            frontend_url: config.frontend_url.clone(),
            publishable_key: config.publishable_key.clone(),
            client,
        })
    }

    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }
}

impl IdentityProvider for HostedIdentity {
    fn sign_in(&self, identifier: &str, password: &str) -> Result<Session, IdentityError> {
        let url = format!("{}/v1/client/sign_ins", self.frontend_url);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.publishable_key)
            .form(&[
                ("strategy", "password"),
                ("identifier", identifier),
                ("password", password),
            ])
            .send()?;
        let envelope: SignInEnvelope = check(response)?.json()?;
        let session = envelope.into_session()?;
        info!("signed in as {}", session.principal.id);
        Ok(session)
    }

    fn sign_out(&self, session: &Session) -> Result<(), IdentityError> {
        let url = format!("{}/v1/client/sessions/{}", self.frontend_url, session.id);
        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.publishable_key)
            .send()?;
        check(response)?;
        Ok(())
    }
}

fn check(response: Response) -> Result<Response, IdentityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .unwrap_or_else(|_| "Unable to read body".to_string());
    Err(IdentityError::Status { status, body })
}

#[derive(Debug, Deserialize)]
struct SignInEnvelope {
    response: SignInAttempt,
    client: ClientState,
}

#[derive(Debug, Deserialize)]
struct SignInAttempt {
    status: String,
    #[serde(default)]
    created_session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClientState {
    #[serde(default)]
    sessions: Vec<SessionEntry>,
}

#[derive(Debug, Deserialize)]
struct SessionEntry {
    id: String,
    user: Principal,
}

impl SignInEnvelope {
    fn into_session(self) -> Result<Session, IdentityError> {
        let session_id = match (self.response.status.as_str(), self.response.created_session_id) {
            ("complete", Some(id)) => id,
            (status, _) => return Err(IdentityError::Incomplete(status.to_string())),
        };
        self.client
            .sessions
            .into_iter()
            .find(|entry| entry.id == session_id)
            .map(|entry| Session {
                id: entry.id,
                principal: entry.user,
            })
            .ok_or(IdentityError::MissingSession(session_id))
    }
}
