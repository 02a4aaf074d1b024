//! Authentication: the OAuth relying party, the token bridge into the session
//! store, and the component that ties both to the page lifecycle.

pub mod bridge;
pub mod handler;
#[cfg(all(test, not(target_arch = "wasm32")))]
mod mock_provider;
pub mod oauth;

pub use bridge::{AuthBridge, BridgeOutcome, RenewalOutcome};
pub use handler::AuthHandler;
pub use oauth::{OAuthError, PkceFlow};

use tracing::error;

use crate::config::FrontendConfig;
use crate::storage::BrowserStorage;

/// Sends the browser to the identity provider to sign in.
pub fn start_login() -> Result<(), OAuthError> {
    let url = PkceFlow::new(&FrontendConfig::new().oauth)?.begin(&BrowserStorage);
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(url.as_str()) {
            error!(?err, "failed to navigate to identity provider");
        }
    }
    Ok(())
}
