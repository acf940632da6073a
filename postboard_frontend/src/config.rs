use std::env;

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;

use crate::error::ConfigError;

pub const STORE_URL_VAR: &str = "POSTBOARD_STORE_URL";
pub const STORE_KEY_VAR: &str = "POSTBOARD_STORE_KEY";
pub const PUBLISHABLE_KEY_VAR: &str = "POSTBOARD_IDENTITY_PUBLISHABLE_KEY";
pub const IDENTITY_URL_VAR: &str = "POSTBOARD_IDENTITY_URL";

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub store: StoreConfig,
    pub identity: IdentityConfig,
}

impl FrontendConfig {
    /// Reads every setting from the process environment. Only the identity
    /// publishable key is mandatory; store settings are checked lazily by the
    /// store client on first use.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|raw| !raw.trim().is_empty());
        let store = StoreConfig {
            url: read(STORE_URL_VAR),
            key: read(STORE_KEY_VAR),
        };
        let publishable_key =
            read(PUBLISHABLE_KEY_VAR).ok_or(ConfigError::Missing(PUBLISHABLE_KEY_VAR))?;
        let identity = IdentityConfig::new(publishable_key, read(IDENTITY_URL_VAR))?;
        Ok(Self { store, identity })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub publishable_key: String,
    pub frontend_url: String,
}

impl IdentityConfig {
    pub fn new(
        publishable_key: String,
        frontend_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let decoded = frontend_host_from_key(&publishable_key)?;
        let frontend_url = match frontend_override {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{decoded}"),
        };
        Ok(Self {
            publishable_key,
            frontend_url,
        })
    }
}

/// Publishable keys look like `pk_<env>_<base64("<host>$")>`.
pub fn frontend_host_from_key(key: &str) -> Result<String, ConfigError> {
    let malformed = || ConfigError::MalformedPublishableKey(key.to_string());
    let encoded = key
        .strip_prefix("pk_test_")
        .or_else(|| key.strip_prefix("pk_live_"))
        .ok_or_else(malformed)?;
    let bytes = STANDARD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded))
        .map_err(|_| malformed())?;
    let text = String::from_utf8(bytes).map_err(|_| malformed())?;
    let host = text.strip_suffix('$').ok_or_else(malformed)?;
    if host.is_empty() {
        return Err(malformed());
    }
    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn key_for(host: &str) -> String {
        format!("pk_test_{}", STANDARD.encode(format!("{host}$")))
    }

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn decodes_frontend_host() {
        let host = frontend_host_from_key(&key_for("clerk.postboard.dev")).unwrap();
        assert_eq!(host, "clerk.postboard.dev");
    }

    #[test]
    fn rejects_unknown_prefix() {
        let err = frontend_host_from_key("sk_test_abc").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedPublishableKey(_)));
    }

    #[test]
    fn missing_publishable_key_is_fatal() {
        let err = FrontendConfig::from_lookup(lookup(&[(STORE_URL_VAR, "http://x")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(PUBLISHABLE_KEY_VAR)));
    }

    #[test]
    fn blank_publishable_key_counts_as_missing() {
        let err = FrontendConfig::from_lookup(lookup(&[(PUBLISHABLE_KEY_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn store_settings_are_optional() {
        let key = key_for("auth.example.com");
        let config = FrontendConfig::from_lookup(lookup(&[(PUBLISHABLE_KEY_VAR, key.as_str())])).unwrap();
        assert!(config.store.url.is_none());
        assert!(config.store.key.is_none());
        assert_eq!(config.identity.frontend_url, "https://auth.example.com");
    }

    #[test]
    fn identity_url_override_wins() {
        let key = key_for("auth.example.com");
        let config = FrontendConfig::from_lookup(lookup(&[
            (PUBLISHABLE_KEY_VAR, key.as_str()),
            (IDENTITY_URL_VAR, "http://127.0.0.1:9000/"),
        ]))
        .unwrap();
        assert_eq!(config.identity.frontend_url, "http://127.0.0.1:9000");
    }
}
