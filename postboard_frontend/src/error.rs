use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("malformed publishable key: {0}")]
    MalformedPublishableKey(String),
}

/// Failure talking to the hosted row store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("row store is not configured ({0} is unset)")]
    NotConfigured(&'static str),
    #[error("invalid store URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("identity provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("sign-in incomplete (status {0})")]
    Incomplete(String),
    #[error("session {0} missing from sign-in response")]
    MissingSession(String),
}
