use shared::models::UserProfile;
use shared::token::{TokenError, decode_token};
use tracing::{debug, error, info, warn};

use super::oauth::{OAuthError, PkceFlow};
use crate::models::auth_state::{AuthAction, AuthState};
use crate::storage::KeyValueStore;

/// What the bridge did with a token handed over by the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeOutcome {
    /// Empty token, nothing changed.
    Ignored,
    Authenticated { user: UserProfile, token: String },
    /// The token could not be read; the session was cleared.
    LoggedOut(TokenError),
}

impl BridgeOutcome {
    /// Store action that realises this outcome.
    pub fn action(&self) -> Option<AuthAction> {
        match self {
            Self::Ignored => None,
            Self::Authenticated { user, token } => Some(AuthAction::SetCredentials {
                user: user.clone(),
                token: token.clone(),
            }),
            Self::LoggedOut(_) => Some(AuthAction::Logout),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Result of a scheduled access token renewal.
#[derive(Debug)]
pub enum RenewalOutcome {
    /// The provider issued a new token, which went through the bridge.
    Renewed(BridgeOutcome),
    /// The refresh grant failed; the session is over and login starts again.
    Restart(OAuthError),
}

impl RenewalOutcome {
    pub fn action(&self) -> Option<AuthAction> {
        match self {
            Self::Renewed(outcome) => outcome.action(),
            Self::Restart(_) => Some(AuthAction::Logout),
        }
    }

    pub fn needs_login(&self) -> bool {
        matches!(self, Self::Restart(_))
    }
}

/// Moves a freshly issued access token into the session store.
pub struct AuthBridge;

impl AuthBridge {
    /// Decodes `token` without touching any state.
    pub fn interpret(token: &str) -> BridgeOutcome {
        if token.trim().is_empty() {
            debug!("AuthHandler: No token available");
            return BridgeOutcome::Ignored;
        }
        match decode_token(token) {
            Ok(user) => {
                info!(sub = %user.sub, "AuthHandler: Setting credentials for user");
                BridgeOutcome::Authenticated {
                    user,
                    token: token.to_string(),
                }
            }
            Err(err) => {
                error!(%err, "Error parsing token");
                BridgeOutcome::LoggedOut(err)
            }
        }
    }

    /// Decodes `token` and applies the result to `state`, persisting through `storage`.
    pub fn accept_token(
        storage: &dyn KeyValueStore,
        state: &mut AuthState,
        token: &str,
    ) -> BridgeOutcome {
        let outcome = Self::interpret(token);
        if let Some(action) = outcome.action() {
            state.reduce(action, storage);
        }
        outcome
    }

    /// Exchanges the stored refresh token for a new access token and decides
    /// what the session store should do with the result.
    pub async fn renew(flow: &PkceFlow, storage: &dyn KeyValueStore) -> RenewalOutcome {
        match flow.refresh(storage).await {
            Ok(tokens) => RenewalOutcome::Renewed(Self::interpret(&tokens.access_token)),
            Err(err) => {
                warn!(%err, "token refresh failed, logging in again");
                RenewalOutcome::Restart(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, SESSION_KEYS, TOKEN_KEY, USER_ID_KEY, USER_KEY};
    use serde_json::json;
    use shared::token::encode_unsigned;
    use test_case::test_case;

    fn valid_token() -> String {
        encode_unsigned(&json!({
            "sub": "kc-123",
            "preferred_username": "jdoe",
            "email": "jdoe@example.com"
        }))
    }

    #[test]
    fn test_valid_token_authenticates() {
        let storage = MemoryStorage::new();
        let mut state = AuthState::default();
        let token = valid_token();

        let outcome = AuthBridge::accept_token(&storage, &mut state, &token);

        assert!(outcome.is_authenticated());
        assert!(state.is_authenticated);
        let user = state.user.clone().unwrap();
        assert_eq!(user.sub, "kc-123");
        assert_eq!(user.name, "jdoe");
        assert_eq!(user.email, "jdoe@example.com");
        assert_eq!(user.picture, "");
        assert_eq!(storage.get(TOKEN_KEY), Some(token));
        assert_eq!(storage.get(USER_ID_KEY).as_deref(), Some("kc-123"));
        assert!(storage.contains(USER_KEY));
    }

    #[test_case("not-a-token" ; "single segment")]
    #[test_case("a.b" ; "two segments")]
    #[test_case("a.%%%.c" ; "bad base64")]
    #[test_case("a.bm90IGpzb24.c" ; "payload not json")]
    #[test_case("a.eyJuYW1lIjoiQSJ9.c" ; "payload without subject")]
    fn test_malformed_token_clears_session(token: &str) {
        let storage = MemoryStorage::new();
        let mut state = AuthState::default();
        AuthBridge::accept_token(&storage, &mut state, &valid_token());
        assert!(state.is_authenticated);

        let outcome = AuthBridge::accept_token(&storage, &mut state, token);

        assert!(matches!(outcome, BridgeOutcome::LoggedOut(_)));
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        for key in SESSION_KEYS {
            assert!(!storage.contains(key), "{key} should be cleared");
        }
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let storage = MemoryStorage::new();
        let mut state = AuthState::default();
        AuthBridge::accept_token(&storage, &mut state, &valid_token());
        let before = state.clone();

        assert_eq!(
            AuthBridge::accept_token(&storage, &mut state, "  "),
            BridgeOutcome::Ignored
        );
        assert_eq!(state, before);
        assert!(storage.contains(TOKEN_KEY));
    }

    #[test]
    fn test_outcome_maps_to_store_action() {
        assert_eq!(BridgeOutcome::Ignored.action(), None);
        assert_eq!(
            BridgeOutcome::LoggedOut(TokenError::Empty).action(),
            Some(AuthAction::Logout)
        );
        let outcome = AuthBridge::interpret(&valid_token());
        assert!(matches!(
            outcome.action(),
            Some(AuthAction::SetCredentials { ref user, .. }) if user.sub == "kc-123"
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod renewal {
        use super::*;
        use crate::auth::mock_provider::{
            ACTIVE_REFRESH_TOKEN, renewed_access_token, settings, spawn_provider,
        };
        use crate::storage::REFRESH_TOKEN_KEY;

        fn signed_in(storage: &MemoryStorage) -> AuthState {
            let mut state = AuthState::default();
            AuthBridge::accept_token(storage, &mut state, &valid_token());
            state
        }

        #[tokio::test]
        async fn test_renewed_token_flows_through_bridge() {
            let (endpoint, _) = spawn_provider().await;
            let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, ACTIVE_REFRESH_TOKEN)]);
            let mut state = signed_in(&storage);
            let flow = PkceFlow::new(&settings(&endpoint)).unwrap();

            let outcome = AuthBridge::renew(&flow, &storage).await;
            assert!(!outcome.needs_login());
            state.reduce(outcome.action().unwrap(), &storage);

            let renewed = renewed_access_token();
            assert!(state.is_authenticated);
            assert_eq!(state.token.as_deref(), Some(renewed.as_str()));
            assert_eq!(state.user.as_ref().map(|user| user.name.as_str()), Some("Jane Doe"));
            assert_eq!(storage.get(TOKEN_KEY), Some(renewed));
            assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some(ACTIVE_REFRESH_TOKEN));
        }

        #[tokio::test]
        async fn test_rejected_refresh_logs_out_and_restarts_login() {
            let (endpoint, _) = spawn_provider().await;
            let storage = MemoryStorage::with_entries([(REFRESH_TOKEN_KEY, "expired")]);
            let mut state = signed_in(&storage);
            let flow = PkceFlow::new(&settings(&endpoint)).unwrap();

            let outcome = AuthBridge::renew(&flow, &storage).await;

            assert!(outcome.needs_login());
            assert!(matches!(
                outcome,
                RenewalOutcome::Restart(OAuthError::Provider { ref error, .. }) if error == "invalid_grant"
            ));
            state.reduce(outcome.action().unwrap(), &storage);
            assert!(!state.is_authenticated);
            for key in SESSION_KEYS {
                assert!(!storage.contains(key), "{key} should be cleared");
            }
            assert!(!storage.contains(REFRESH_TOKEN_KEY));
        }

        #[tokio::test]
        async fn test_missing_refresh_token_restarts_login() {
            let storage = MemoryStorage::new();
            let flow = PkceFlow::new(&settings("http://127.0.0.1:9/token")).unwrap();

            let outcome = AuthBridge::renew(&flow, &storage).await;

            assert!(matches!(outcome, RenewalOutcome::Restart(OAuthError::MissingRefreshToken)));
            assert_eq!(outcome.action(), Some(AuthAction::Logout));
        }
    }
}
