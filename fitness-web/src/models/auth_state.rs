use shared::models::UserProfile;
use std::rc::Rc;
use tracing::{debug, info, warn};
use yewdux::Context;
use yewdux::prelude::{Reducer, Store};

use crate::storage::{
    BrowserStorage, KeyValueStore, SESSION_KEYS, TOKEN_KEY, TOKEN_LIFECYCLE_KEYS, USER_ID_KEY,
    USER_KEY,
};

/// Session store, mirrored into durable storage on every transition.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_authenticated: bool,
}

/// Transitions of [`AuthState`].
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    SetCredentials { user: UserProfile, token: String },
    LoginStarted,
    LoginSucceeded { user: UserProfile, token: String },
    LoginFailed(String),
    Logout,
}

impl AuthState {
    /// Restores the session persisted by a previous page load.
    ///
    /// The stored token is trusted as-is; the backend is the one that rejects a
    /// stale token on the next request.
    pub fn hydrate(storage: &dyn KeyValueStore) -> Self {
        let token = storage.get_non_empty(TOKEN_KEY);
        let user = storage
            .get(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(%err, "ignoring unreadable stored user");
                    None
                }
            });
        let (Some(token), Some(user)) = (token, user) else {
            debug!("no complete session in storage");
            return Self::default();
        };
        let user_id = storage
            .get_non_empty(USER_ID_KEY)
            .unwrap_or_else(|| user.sub.clone());
        debug!(sub = %user.sub, "hydrated session from storage");
        Self {
            user: Some(user),
            token: Some(token),
            user_id: Some(user_id),
            loading: false,
            error: None,
            is_authenticated: true,
        }
    }

    pub fn reduce(&mut self, action: AuthAction, storage: &dyn KeyValueStore) {
        match action {
            AuthAction::SetCredentials { user, token }
            | AuthAction::LoginSucceeded { user, token } => {
                self.set_credentials(user, token, storage);
            }
            AuthAction::LoginStarted => {
                self.loading = true;
                self.error = None;
            }
            AuthAction::LoginFailed(message) => {
                warn!(%message, "login failed");
                self.loading = false;
                self.error = Some(message);
                self.is_authenticated = false;
            }
            AuthAction::Logout => self.logout(storage),
        }
    }

    fn set_credentials(&mut self, user: UserProfile, token: String, storage: &dyn KeyValueStore) {
        storage.set(TOKEN_KEY, &token);
        match serde_json::to_string(&user) {
            Ok(serialized) => storage.set(USER_KEY, &serialized),
            Err(err) => warn!(%err, "failed to serialise user for storage"),
        }
        storage.set(USER_ID_KEY, &user.sub);

        info!(sub = %user.sub, "session established");
        self.user_id = Some(user.sub.clone());
        self.user = Some(user);
        self.token = Some(token);
        self.is_authenticated = true;
        self.loading = false;
        self.error = None;
    }

    fn logout(&mut self, storage: &dyn KeyValueStore) {
        for key in SESSION_KEYS.iter().chain(TOKEN_LIFECYCLE_KEYS.iter()) {
            storage.remove(key);
        }
        info!("session cleared");
        *self = Self::default();
    }

    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or("User", |user| user.name.as_str())
    }
}

impl Store for AuthState {
    fn new(_cx: &Context) -> Self {
        Self::hydrate(&BrowserStorage)
    }

    fn should_notify(&self, old: &Self) -> bool {
        self != old
    }
}

impl Reducer<AuthState> for AuthAction {
    fn apply(self, state: Rc<AuthState>) -> Rc<AuthState> {
        let mut next = (*state).clone();
        next.reduce(self, &BrowserStorage);
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, REFRESH_TOKEN_KEY, TOKEN_EXPIRES_AT_KEY};

    fn profile() -> UserProfile {
        UserProfile {
            sub: "user-42".to_string(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            picture: String::new(),
        }
    }

    fn signed_in(storage: &MemoryStorage) -> AuthState {
        let mut state = AuthState::default();
        state.reduce(
            AuthAction::SetCredentials {
                user: profile(),
                token: "header.payload.sig".to_string(),
            },
            storage,
        );
        state
    }

    #[test]
    fn test_set_credentials_marks_authenticated_and_persists() {
        let storage = MemoryStorage::new();
        let state = signed_in(&storage);

        assert!(state.is_authenticated);
        assert_eq!(state.user_id.as_deref(), Some("user-42"));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("header.payload.sig"));
        assert_eq!(storage.get(USER_ID_KEY).as_deref(), Some("user-42"));
        let stored: UserProfile = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, profile());
    }

    #[test]
    fn test_set_credentials_overwrites_previous_session() {
        let storage = MemoryStorage::new();
        let mut state = signed_in(&storage);
        let other = UserProfile {
            sub: "user-7".to_string(),
            name: "Kim".to_string(),
            ..UserProfile::default()
        };
        state.reduce(
            AuthAction::SetCredentials {
                user: other,
                token: "t2".to_string(),
            },
            &storage,
        );
        assert_eq!(state.display_name(), "Kim");
        assert_eq!(storage.get(USER_ID_KEY).as_deref(), Some("user-7"));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t2"));
    }

    #[test]
    fn test_logout_clears_every_key() {
        let storage = MemoryStorage::new();
        let mut state = signed_in(&storage);
        storage.set(REFRESH_TOKEN_KEY, "refresh");
        storage.set(TOKEN_EXPIRES_AT_KEY, "1900000000");

        state.reduce(AuthAction::Logout, &storage);

        assert!(!state.is_authenticated);
        assert!(state.user.is_none() && state.token.is_none() && state.user_id.is_none());
        for key in SESSION_KEYS.iter().chain(TOKEN_LIFECYCLE_KEYS.iter()) {
            assert!(!storage.contains(key), "{key} should be removed");
        }
    }

    #[test]
    fn test_logout_without_session_is_harmless() {
        let storage = MemoryStorage::new();
        let mut state = AuthState::default();
        state.reduce(AuthAction::Logout, &storage);
        assert_eq!(state, AuthState::default());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_login_started_then_failed() {
        let storage = MemoryStorage::new();
        let mut state = AuthState::default();
        state.reduce(AuthAction::LoginStarted, &storage);
        assert!(state.loading);
        state.reduce(AuthAction::LoginFailed("denied".to_string()), &storage);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("denied"));
        assert!(!state.is_authenticated);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_login_succeeded_matches_set_credentials() {
        let storage = MemoryStorage::new();
        let mut state = AuthState::default();
        state.reduce(AuthAction::LoginStarted, &storage);
        state.reduce(
            AuthAction::LoginSucceeded {
                user: profile(),
                token: "header.payload.sig".to_string(),
            },
            &storage,
        );
        assert_eq!(state, signed_in(&MemoryStorage::new()));
    }

    #[test]
    fn test_hydrate_restores_persisted_session() {
        let storage = MemoryStorage::new();
        let original = signed_in(&storage);
        assert_eq!(AuthState::hydrate(&storage), original);
    }

    #[test]
    fn test_hydrate_requires_token_and_user() {
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "t")]);
        let state = AuthState::hydrate(&storage);
        assert!(!state.is_authenticated);
        assert!(state.token.is_none(), "partial sessions hydrate as empty");

        let storage = MemoryStorage::with_entries([(USER_KEY, r#"{"sub":"a","name":"A"}"#)]);
        assert!(!AuthState::hydrate(&storage).is_authenticated);
    }

    #[test]
    fn test_hydrate_ignores_corrupt_user() {
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "t"), (USER_KEY, "{not json")]);
        let state = AuthState::hydrate(&storage);
        assert!(state.user.is_none());
        assert!(!state.is_authenticated);
    }

    #[test]
    fn test_display_name_defaults() {
        assert_eq!(AuthState::default().display_name(), "User");
    }
}
