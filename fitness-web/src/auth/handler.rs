use chrono::Utc;
use gloo_timers::callback::Timeout;
use i18nrs::yew::use_translation;
use tracing::{debug, error, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_store};

use super::bridge::{AuthBridge, BridgeOutcome, RenewalOutcome};
use super::oauth::{OAuthError, PkceFlow, RedirectParams, refresh_delay_ms, stored_expiry};
use super::start_login;
use crate::config::FrontendConfig;
use crate::models::auth_state::AuthState;
use crate::storage::BrowserStorage;

#[derive(Debug, Clone, PartialEq)]
enum HandlerStatus {
    Idle,
    Authenticating,
    Failed(String),
}

#[derive(Properties, PartialEq)]
pub struct AuthHandlerProps {
    #[prop_or_default]
    pub children: Children,
}

fn redirect_params() -> Option<RedirectParams> {
    let search = web_sys::window()?.location().search().ok()?;
    RedirectParams::from_query(&search)
}

/// Drops `code` and `state` from the address bar so a reload does not replay them.
fn clear_redirect_params() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let path = window.location().pathname().unwrap_or_else(|_| "/".to_string());
    let replaced = window
        .history()
        .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&path)));
    if let Err(err) = replaced {
        warn!(?err, "failed to clear OAuth parameters from URL");
    }
}

fn dispatch_token(dispatch: &Dispatch<AuthState>, token: &str) -> BridgeOutcome {
    let outcome = AuthBridge::interpret(token);
    if let Some(action) = outcome.action() {
        dispatch.apply(action);
    }
    outcome
}

async fn exchange_code(code: String, state: String) -> Result<String, OAuthError> {
    let flow = PkceFlow::new(&FrontendConfig::new().oauth)?;
    let tokens = flow.complete(&BrowserStorage, &code, &state).await?;
    Ok(tokens.access_token)
}

async fn refresh_session(dispatch: Dispatch<AuthState>) {
    let outcome = match PkceFlow::new(&FrontendConfig::new().oauth) {
        Ok(flow) => AuthBridge::renew(&flow, &BrowserStorage).await,
        Err(err) => RenewalOutcome::Restart(err),
    };
    if let Some(action) = outcome.action() {
        dispatch.apply(action);
    }
    if outcome.needs_login()
        && let Err(err) = start_login()
    {
        error!(%err, "unable to restart login");
    }
}

/// Completes OAuth redirects, keeps the access token fresh, and feeds every
/// new token through the auth bridge before rendering its children.
#[function_component(AuthHandler)]
pub fn auth_handler(props: &AuthHandlerProps) -> Html {
    let (i18n, ..) = use_translation();
    let (auth, dispatch) = use_store::<AuthState>();
    let status = use_state(|| HandlerStatus::Idle);

    {
        let status = status.clone();
        let dispatch = dispatch.clone();
        use_effect_with((), move |_| {
            if let Some(params) = redirect_params() {
                clear_redirect_params();
                if let Some(err) = params.provider_error() {
                    error!(%err, "identity provider returned an error");
                    status.set(HandlerStatus::Failed(err.to_string()));
                } else if let (Some(code), Some(state)) = (params.code, params.state) {
                    status.set(HandlerStatus::Authenticating);
                    spawn_local(async move {
                        match exchange_code(code, state).await {
                            Ok(token) => {
                                debug!("AuthHandler: Token received");
                                dispatch_token(&dispatch, &token);
                                status.set(HandlerStatus::Idle);
                            }
                            Err(err) => {
                                error!(%err, "authorization code exchange failed");
                                status.set(HandlerStatus::Failed(err.to_string()));
                            }
                        }
                    });
                }
            }
            || ()
        });
    }

    {
        let dispatch = dispatch.clone();
        use_effect_with(auth.token.clone(), move |token| {
            let timer = token
                .as_ref()
                .and_then(|_| stored_expiry(&BrowserStorage))
                .map(|expires_at| {
                    let delay = refresh_delay_ms(expires_at, Utc::now().timestamp());
                    debug!(delay_ms = delay, "scheduling token refresh");
                    Timeout::new(delay, move || spawn_local(refresh_session(dispatch)))
                });
            move || drop(timer)
        });
    }

    let on_retry = Callback::from(|_: MouseEvent| {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().reload() {
                warn!(?err, "reload failed");
            }
        }
    });

    match &*status {
        HandlerStatus::Authenticating => html! {
            <div class="flex flex-col items-center justify-center min-h-screen bg-base-200">
                <span class="loading loading-spinner loading-lg text-primary mb-4"></span>
                <h2 class="text-lg text-base-content/70">{i18n.t("auth.authenticating")}</h2>
            </div>
        },
        HandlerStatus::Failed(message) => html! {
            <div class="flex flex-col items-center justify-center min-h-screen bg-base-200 p-6">
                <h2 class="text-2xl font-semibold text-error mb-4">{i18n.t("auth.error_title")}</h2>
                <p class="mb-6 text-center text-base-content/70">
                    {if message.is_empty() { i18n.t("auth.error_fallback") } else { message.clone() }}
                </p>
                <button class="btn btn-primary" onclick={on_retry}>{i18n.t("auth.retry")}</button>
            </div>
        },
        HandlerStatus::Idle => html! { <>{props.children.clone()}</> },
    }
}
