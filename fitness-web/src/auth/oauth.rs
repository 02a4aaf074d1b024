//! OAuth 2.0 authorization code flow with PKCE, run entirely in the browser.
//!
//! The dashboard is a public client: it holds no secret, so the code exchange
//! is protected by an S256 code challenge instead. The verifier and CSRF state
//! survive the round trip to the identity provider in durable storage and are
//! removed as soon as the redirect has been handled.

use oauth2::basic::{BasicClient, BasicErrorResponse};
use oauth2::url::Url;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, RefreshToken, RequestTokenError, Scope,
    TokenResponse, TokenUrl,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::OAuthSettings;
use crate::storage::{
    KeyValueStore, OAUTH_STATE_KEY, PKCE_VERIFIER_KEY, REFRESH_TOKEN_KEY, TOKEN_EXPIRES_AT_KEY,
};

/// Seconds before expiry at which the access token is renewed.
pub const REFRESH_LEEWAY_SECS: i64 = 30;

type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("invalid OAuth endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("state returned by the identity provider does not match this login")]
    StateMismatch,
    #[error("no PKCE verifier stored for this login")]
    MissingVerifier,
    #[error("no refresh token stored")]
    MissingRefreshToken,
    #[error("token request failed: {0}")]
    Exchange(String),
    #[error("{}", .description.as_deref().unwrap_or(.error.as_str()))]
    Provider {
        error: String,
        description: Option<String>,
    },
}

impl OAuthError {
    fn from_request<RE>(err: RequestTokenError<RE, BasicErrorResponse>) -> Self
    where
        RE: std::error::Error + 'static,
    {
        match err {
            RequestTokenError::ServerResponse(response) => Self::Provider {
                error: response.error().to_string(),
                description: response.error_description().cloned(),
            },
            other => Self::Exchange(other.to_string()),
        }
    }
}

/// Tokens issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix seconds.
    pub expires_at: Option<i64>,
}

impl TokenSet {
    fn from_response(response: &impl TokenResponse, now: i64) -> Self {
        Self {
            access_token: response.access_token().secret().clone(),
            refresh_token: response
                .refresh_token()
                .map(|token| token.secret().clone()),
            expires_at: response
                .expires_in()
                .and_then(|lifetime| i64::try_from(lifetime.as_secs()).ok())
                .map(|secs| now.saturating_add(secs)),
        }
    }

    fn persist(&self, storage: &dyn KeyValueStore) {
        if let Some(refresh_token) = &self.refresh_token {
            storage.set(REFRESH_TOKEN_KEY, refresh_token);
        }
        match self.expires_at {
            Some(expires_at) => storage.set(TOKEN_EXPIRES_AT_KEY, &expires_at.to_string()),
            None => storage.remove(TOKEN_EXPIRES_AT_KEY),
        }
    }
}

/// Query parameters the identity provider appends to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl RedirectParams {
    /// Parses `location.search`. Returns `None` when the URL is not an OAuth redirect.
    pub fn from_query(query: &str) -> Option<Self> {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        {
            let value = Some(value.into_owned());
            match key.as_ref() {
                "code" => params.code = value,
                "state" => params.state = value,
                "error" => params.error = value,
                "error_description" => params.error_description = value,
                _ => {}
            }
        }
        (params.code.is_some() || params.error.is_some()).then_some(params)
    }

    /// Error reported by the provider instead of a code.
    pub fn provider_error(&self) -> Option<OAuthError> {
        self.error.as_ref().map(|error| OAuthError::Provider {
            error: error.clone(),
            description: self.error_description.clone(),
        })
    }
}

/// Milliseconds to wait before renewing a token that expires at `expires_at`.
pub fn refresh_delay_ms(expires_at: i64, now: i64) -> u32 {
    let secs = expires_at
        .saturating_sub(now)
        .saturating_sub(REFRESH_LEEWAY_SECS)
        .max(0);
    u32::try_from(secs.saturating_mul(1000)).unwrap_or(u32::MAX)
}

/// Stored expiry of the current access token, in unix seconds.
pub fn stored_expiry(storage: &dyn KeyValueStore) -> Option<i64> {
    storage
        .get_non_empty(TOKEN_EXPIRES_AT_KEY)
        .and_then(|raw| raw.parse().ok())
}

fn http_client() -> reqwest::Client {
    #[cfg(not(target_arch = "wasm32"))]
    {
        // Following redirects opens the client up to SSRF vulnerabilities.
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default()
    }
    #[cfg(target_arch = "wasm32")]
    {
        reqwest::Client::new()
    }
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Authorization code + PKCE relying party.
#[derive(Debug, Clone)]
pub struct PkceFlow {
    client: ConfiguredClient,
    http: reqwest::Client,
    scopes: Vec<String>,
}

impl PkceFlow {
    pub fn new(settings: &OAuthSettings) -> Result<Self, OAuthError> {
        let client = BasicClient::new(ClientId::new(settings.client_id.clone()))
            .set_auth_uri(AuthUrl::new(settings.authorization_endpoint.clone())?)
            .set_token_uri(TokenUrl::new(settings.token_endpoint.clone())?)
            .set_redirect_uri(RedirectUrl::new(settings.redirect_uri.clone())?);
        Ok(Self {
            client,
            http: http_client(),
            scopes: settings.scopes.clone(),
        })
    }

    /// Starts a login: stores a fresh verifier and CSRF state and returns the
    /// URL to send the browser to.
    pub fn begin(&self, storage: &dyn KeyValueStore) -> Url {
        let (challenge, verifier) = PkceCodeChallenge::new_random_sha256();
        let (url, state) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(self.scopes.iter().cloned().map(Scope::new))
            .set_pkce_challenge(challenge)
            .url();
        storage.set(PKCE_VERIFIER_KEY, verifier.secret());
        storage.set(OAUTH_STATE_KEY, state.secret());
        info!("redirecting to identity provider");
        url
    }

    /// Exchanges the authorization code from the redirect for tokens.
    pub async fn complete(
        &self,
        storage: &dyn KeyValueStore,
        code: &str,
        state: &str,
    ) -> Result<TokenSet, OAuthError> {
        let expected = storage.get_non_empty(OAUTH_STATE_KEY);
        let verifier = storage.get_non_empty(PKCE_VERIFIER_KEY);
        storage.remove(OAUTH_STATE_KEY);
        storage.remove(PKCE_VERIFIER_KEY);

        if expected.as_deref() != Some(state) {
            warn!("discarding redirect with unexpected state");
            return Err(OAuthError::StateMismatch);
        }
        let verifier = verifier.ok_or(OAuthError::MissingVerifier)?;

        debug!("exchanging authorization code");
        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(verifier))
            .request_async(&self.http)
            .await
            .map_err(OAuthError::from_request)?;

        let tokens = TokenSet::from_response(&response, now_secs());
        tokens.persist(storage);
        info!(expires_at = ?tokens.expires_at, "authorization code exchanged");
        Ok(tokens)
    }

    /// Renews the access token with the stored refresh token.
    pub async fn refresh(&self, storage: &dyn KeyValueStore) -> Result<TokenSet, OAuthError> {
        let refresh_token = storage
            .get_non_empty(REFRESH_TOKEN_KEY)
            .ok_or(OAuthError::MissingRefreshToken)?;

        debug!("refreshing access token");
        let response = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.clone()))
            .request_async(&self.http)
            .await
            .map_err(OAuthError::from_request)?;

        let mut tokens = TokenSet::from_response(&response, now_secs());
        // Providers without refresh token rotation omit it from the response.
        tokens.refresh_token.get_or_insert(refresh_token);
        tokens.persist(storage);
        info!(expires_at = ?tokens.expires_at, "access token refreshed");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use test_case::test_case;

    fn settings(token_endpoint: &str) -> OAuthSettings {
        OAuthSettings {
            client_id: "oauth2-pkce-client".to_string(),
            authorization_endpoint: "http://idp.test/auth".to_string(),
            token_endpoint: token_endpoint.to_string(),
            redirect_uri: "http://localhost:5173".to_string(),
            scopes: vec!["openid".to_string(), "offline_access".to_string()],
        }
    }

    #[test]
    fn test_begin_builds_authorization_url_and_stores_secrets() {
        let storage = MemoryStorage::new();
        let flow = PkceFlow::new(&settings("http://idp.test/token")).unwrap();

        let url = flow.begin(&storage);

        let query: std::collections::HashMap<String, String> =
            url.query_pairs().into_owned().collect();
        assert_eq!(url.host_str(), Some("idp.test"));
        assert_eq!(query["response_type"], "code");
        assert_eq!(query["client_id"], "oauth2-pkce-client");
        assert_eq!(query["redirect_uri"], "http://localhost:5173");
        assert_eq!(query["scope"], "openid offline_access");
        assert_eq!(query["code_challenge_method"], "S256");
        assert!(!query["code_challenge"].is_empty());
        assert_eq!(storage.get(OAUTH_STATE_KEY).as_deref(), Some(query["state"].as_str()));
        assert!(storage.get_non_empty(PKCE_VERIFIER_KEY).is_some());
    }

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        assert!(matches!(
            PkceFlow::new(&settings("not a url")),
            Err(OAuthError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_complete_rejects_state_mismatch() {
        let storage = MemoryStorage::new();
        let flow = PkceFlow::new(&settings("http://idp.test/token")).unwrap();
        flow.begin(&storage);

        let result = futures::executor::block_on(flow.complete(&storage, "code", "forged"));

        assert!(matches!(result, Err(OAuthError::StateMismatch)));
        assert!(!storage.contains(OAUTH_STATE_KEY));
        assert!(!storage.contains(PKCE_VERIFIER_KEY));
    }

    #[test]
    fn test_refresh_requires_refresh_token() {
        let storage = MemoryStorage::new();
        let flow = PkceFlow::new(&settings("http://idp.test/token")).unwrap();
        let result = futures::executor::block_on(flow.refresh(&storage));
        assert!(matches!(result, Err(OAuthError::MissingRefreshToken)));
    }

    #[test]
    fn test_redirect_params_from_query() {
        let params = RedirectParams::from_query("?state=abc&session_state=x&code=c0de").unwrap();
        assert_eq!(params.code.as_deref(), Some("c0de"));
        assert_eq!(params.state.as_deref(), Some("abc"));
        assert!(params.provider_error().is_none());

        assert!(RedirectParams::from_query("").is_none());
        assert!(RedirectParams::from_query("?tab=overview").is_none());
    }

    #[test]
    fn test_redirect_params_provider_error() {
        let params =
            RedirectParams::from_query("error=access_denied&error_description=User%20cancelled")
                .unwrap();
        let err = params.provider_error().unwrap();
        assert_eq!(err.to_string(), "User cancelled");
    }

    #[test_case(1_000, 0, 970_000 ; "well before expiry")]
    #[test_case(1_000, 980, 0 ; "inside leeway")]
    #[test_case(1_000, 2_000, 0 ; "already expired")]
    fn test_refresh_delay(expires_at: i64, now: i64, expected: u32) {
        assert_eq!(refresh_delay_ms(expires_at, now), expected);
    }

    #[test]
    fn test_stored_expiry_ignores_garbage() {
        let storage = MemoryStorage::with_entries([(TOKEN_EXPIRES_AT_KEY, "soon")]);
        assert_eq!(stored_expiry(&storage), None);
        storage.set(TOKEN_EXPIRES_AT_KEY, "1900000000");
        assert_eq!(stored_expiry(&storage), Some(1_900_000_000));
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod exchange {
        use super::*;
        use crate::auth::mock_provider::{ACTIVE_REFRESH_TOKEN, renewed_access_token, spawn_provider};

        #[tokio::test]
        async fn test_complete_exchanges_code_with_verifier() {
            let (endpoint, forms) = spawn_provider().await;
            let storage = MemoryStorage::new();
            let flow = PkceFlow::new(&settings(&endpoint)).unwrap();
            flow.begin(&storage);
            let state = storage.get(OAUTH_STATE_KEY).unwrap();
            let verifier = storage.get(PKCE_VERIFIER_KEY).unwrap();

            let tokens = flow.complete(&storage, "c0de", &state).await.unwrap();

            assert_eq!(tokens.access_token, "access-1");
            assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-1"));
            assert!(tokens.expires_at.is_some());
            let form = forms.lock().unwrap()[0].clone();
            assert_eq!(form["code"], "c0de");
            assert_eq!(form["code_verifier"], verifier);
            assert_eq!(form["redirect_uri"], "http://localhost:5173");
            assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh-1"));
            assert!(stored_expiry(&storage).is_some());
            assert!(!storage.contains(PKCE_VERIFIER_KEY));
        }

        #[tokio::test]
        async fn test_refresh_keeps_refresh_token_when_not_rotated() {
            let (endpoint, _) = spawn_provider().await;
            let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, ACTIVE_REFRESH_TOKEN)]);
            let flow = PkceFlow::new(&settings(&endpoint)).unwrap();

            let tokens = flow.refresh(&storage).await.unwrap();

            assert_eq!(tokens.access_token, renewed_access_token());
            assert_eq!(tokens.refresh_token.as_deref(), Some(ACTIVE_REFRESH_TOKEN));
            assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some(ACTIVE_REFRESH_TOKEN));
        }

        #[tokio::test]
        async fn test_rejected_refresh_reports_provider_error() {
            let (endpoint, _) = spawn_provider().await;
            let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, "expired")]);
            let flow = PkceFlow::new(&settings(&endpoint)).unwrap();

            let err = flow.refresh(&storage).await.unwrap_err();

            assert!(matches!(
                err,
                OAuthError::Provider { ref error, .. } if error == "invalid_grant"
            ));
            assert_eq!(err.to_string(), "Token is not active");
        }
    }
}
