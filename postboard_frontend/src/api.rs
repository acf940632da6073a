use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;

use crate::config::{StoreConfig, STORE_KEY_VAR, STORE_URL_VAR};
use crate::error::StoreError;
use crate::models::{NewPost, Post, PostId, PostPatch};

pub const POSTS_TABLE: &str = "posts";

/// Row operations the feed needs from the hosted table store.
pub trait PostStore: Send + Sync {
    fn select_all(&self) -> Result<Vec<Post>, StoreError>;
    fn insert(&self, row: &NewPost) -> Result<(), StoreError>;
    fn update(&self, id: &PostId, patch: &PostPatch) -> Result<(), StoreError>;
    fn delete(&self, id: &PostId) -> Result<(), StoreError>;
}

#[derive(Clone)]
struct Endpoint {
    table_url: Url,
    key: String,
}

/// Blocking client for a REST row store (`/rest/v1/<table>` dialect).
#[derive(Clone)]
pub struct StoreClient {
    endpoint: Result<Endpoint, &'static str>,
    client: Client,
}

impl StoreClient {
    /// Missing settings do not fail construction; every request reports
    /// `StoreError::NotConfigured` instead.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        let endpoint = match (&config.url, &config.key) {
            (None, _) => Err(STORE_URL_VAR),
            (_, None) => Err(STORE_KEY_VAR),
            (Some(url), Some(key)) => Ok(Endpoint {
                table_url: table_url(url, POSTS_TABLE)?,
                key: key.clone(),
            }),
        };
        Ok(Self { endpoint, client })
    }

    fn endpoint(&self) -> Result<&Endpoint, StoreError> {
        self.endpoint
            .as_ref()
            .map_err(|missing| StoreError::NotConfigured(*missing))
    }

    fn authorized(&self, endpoint: &Endpoint, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &endpoint.key)
            .bearer_auth(&endpoint.key)
    }
}

impl PostStore for StoreClient {
    fn select_all(&self) -> Result<Vec<Post>, StoreError> {
        let endpoint = self.endpoint()?;
        let request = self
            .client
            .get(endpoint.table_url.clone())
            .query(&[("select", "*")]);
        let response = check(self.authorized(endpoint, request).send()?)?;
        let posts: Vec<Post> = response.json()?;
        debug!("fetched {} posts", posts.len());
        Ok(posts)
    }

    fn insert(&self, row: &NewPost) -> Result<(), StoreError> {
        let endpoint = self.endpoint()?;
        let request = self
            .client
            .post(endpoint.table_url.clone())
            .header("Prefer", "return=minimal")
            .json(&[row]);
        check(self.authorized(endpoint, request).send()?)?;
        Ok(())
    }

    fn update(&self, id: &PostId, patch: &PostPatch) -> Result<(), StoreError> {
        let endpoint = self.endpoint()?;
        let request = self
            .client
            .patch(endpoint.table_url.clone())
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(patch);
        check(self.authorized(endpoint, request).send()?)?;
        Ok(())
    }

    fn delete(&self, id: &PostId) -> Result<(), StoreError> {
        let endpoint = self.endpoint()?;
        let request = self
            .client
            .delete(endpoint.table_url.clone())
            .query(&[("id", format!("eq.{id}"))]);
        check(self.authorized(endpoint, request).send()?)?;
        Ok(())
    }
}

fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .unwrap_or_else(|_| "Unable to read body".to_string());
    Err(StoreError::Status { status, body })
}

fn table_url(base: &str, table: &str) -> Result<Url, StoreError> {
    let mut base = base.trim().to_string();
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("https://{base}");
    }
    while base.ends_with('/') {
        base.pop();
    }
    Url::parse(&format!("{base}/rest/v1/{table}")).map_err(|err| StoreError::InvalidUrl(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_is_normalised() {
        let url = table_url("project.example.co/", POSTS_TABLE).unwrap();
        assert_eq!(url.as_str(), "https://project.example.co/rest/v1/posts");
        let url = table_url("http://127.0.0.1:54321", POSTS_TABLE).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:54321/rest/v1/posts");
    }

    #[test]
    fn unconfigured_client_fails_on_first_request() {
        let client = StoreClient::new(&StoreConfig::default()).unwrap();
        let err = client.select_all().unwrap_err();
        assert!(matches!(err, StoreError::NotConfigured(STORE_URL_VAR)));

        let client = StoreClient::new(&StoreConfig {
            url: Some("http://127.0.0.1:1".into()),
            key: None,
        })
        .unwrap();
        let err = client.delete(&PostId::Number(1)).unwrap_err();
        assert!(matches!(err, StoreError::NotConfigured(STORE_KEY_VAR)));
    }
}
