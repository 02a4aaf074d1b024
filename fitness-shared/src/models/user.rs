use serde::{Deserialize, Serialize};

/// Identity of the signed-in user as shown in the dashboard.
///
/// Derived from the access token payload and persisted under the `user`
/// storage key, so the field names match the JSON the browser stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Subject identifier issued by the identity provider; doubles as the user id.
    pub sub: String,

    /// Display name.
    pub name: String,

    /// Email address, empty when the provider did not release one.
    #[serde(default)]
    pub email: String,

    /// Avatar URL, empty when unavailable.
    #[serde(default)]
    pub picture: String,
}

impl UserProfile {
    /// First letter of the display name, used for avatar placeholders.
    #[must_use]
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map_or('U', |c| c.to_ascii_uppercase())
    }
}
