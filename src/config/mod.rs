//! Application configuration
//!
//! Everything is read from the environment once at startup. Unset or empty
//! variables fall back to the defaults below, which are enough to run against
//! the Direqt playground account.

use std::env;

/// Page access token placeholder used when `PAGE_ACCESS_TOKEN` is not set.
pub const DEFAULT_PAGE_ACCESS_TOKEN: &str = "<invalid>";

/// Verify token placeholder. Change it for any real deployment.
pub const DEFAULT_VERIFY_TOKEN: &str = "<provide-your-own-secure-token>";

/// Direqt playground API key, acceptable for testing.
pub const DIREQT_PLAYGROUND_API_KEY: &str = "5rp26o1WB5IBQ6gVTg";

pub const DEFAULT_DIREQT_API_ROOT: &str = "https://api.direqt.io";

pub const DEFAULT_FACEBOOK_API_ROOT: &str = "https://graph.facebook.com/v2.6/me/messages";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Obtained from Messenger settings, "Token Generation".
    pub page_access_token: String,
    /// Shared secret Facebook echoes back when verifying the webhook.
    pub verify_token: String,
    pub direqt_api_key: String,
    /// Only needed for custom Direqt setups that require HTTP basic auth on
    /// `/fetch`.
    pub direqt_api_secret: Option<String>,
    pub direqt_api_root: String,
    pub facebook_api_root: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 1337,
            page_access_token: DEFAULT_PAGE_ACCESS_TOKEN.into(),
            verify_token: DEFAULT_VERIFY_TOKEN.into(),
            direqt_api_key: DIREQT_PLAYGROUND_API_KEY.into(),
            direqt_api_secret: None,
            direqt_api_root: DEFAULT_DIREQT_API_ROOT.into(),
            facebook_api_root: DEFAULT_FACEBOOK_API_ROOT.into(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let defaults = Self::default();

        Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            page_access_token: var("PAGE_ACCESS_TOKEN").unwrap_or(defaults.page_access_token),
            verify_token: var("VERIFY_TOKEN").unwrap_or(defaults.verify_token),
            direqt_api_key: var("DIREQT_API_KEY").unwrap_or(defaults.direqt_api_key),
            direqt_api_secret: var("DIREQT_API_SECRET"),
            direqt_api_root: var("DIREQT_API_ROOT").unwrap_or(defaults.direqt_api_root),
            facebook_api_root: var("FACEBOOK_API_ROOT").unwrap_or(defaults.facebook_api_root),
        }
    }
}
