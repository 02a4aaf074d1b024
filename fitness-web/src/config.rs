//! Frontend configuration module
//!
//! Everything is resolved at compile time through `option_env!`, so a build for
//! another environment only needs the `FITNESS_*` variables exported while
//! running `trunk build`.

use tracing::Level;

const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";

/// REST base URL behind an API gateway: `{gateway}/api`.
fn gateway_api_url(gateway: &str) -> String {
    format!("{}/api", gateway.trim_end_matches('/'))
}

/// OAuth 2.0 authorization-code + PKCE client registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthSettings {
    pub client_id: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            client_id: option_env!("FITNESS_OAUTH2_CLIENT_ID")
                .unwrap_or("oauth2-pkce-client")
                .to_string(),
            authorization_endpoint: option_env!("FITNESS_OAUTH2_AUTH_ENDPOINT")
                .unwrap_or(
                    "http://127.0.0.1:8181/realms/fitness-oauth2/protocol/openid-connect/auth",
                )
                .to_string(),
            token_endpoint: option_env!("FITNESS_OAUTH2_TOKEN_ENDPOINT")
                .unwrap_or(
                    "http://127.0.0.1:8181/realms/fitness-oauth2/protocol/openid-connect/token",
                )
                .to_string(),
            redirect_uri: option_env!("FITNESS_OAUTH2_REDIRECT_URI")
                .unwrap_or("http://localhost:5173")
                .to_string(),
            scopes: parse_scopes(
                option_env!("FITNESS_OAUTH2_SCOPE").unwrap_or("openid profile email offline_access"),
            ),
        }
    }
}

fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Frontend configuration for URLs and external links
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Base URL every REST call is resolved against.
    pub api_base_url: String,
    pub oauth: OAuthSettings,
    pub log_level: Level,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        let api_base_url = option_env!("FITNESS_API_URL").map_or_else(
            || gateway_api_url(option_env!("FITNESS_API_GATEWAY_URL").unwrap_or(DEFAULT_GATEWAY_URL)),
            str::to_string,
        );
        Self {
            api_base_url,
            oauth: OAuthSettings::default(),
            log_level: option_env!("FITNESS_LOG_LEVEL")
                .and_then(|level| level.parse().ok())
                .unwrap_or(Level::INFO),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}
