use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_store;

use crate::auth::start_login;
use crate::models::auth_state::{AuthAction, AuthState};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let (i18n, ..) = use_translation();
    let (auth, dispatch) = use_store::<AuthState>();

    let onclick = {
        let dispatch = dispatch.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            dispatch.apply(AuthAction::LoginStarted);
            if let Err(err) = start_login() {
                dispatch.apply(AuthAction::LoginFailed(err.to_string()));
            }
        })
    };

    let is_busy = auth.loading;

    html! {
        <div class="hero min-h-screen bg-gradient-to-br from-primary to-secondary">
            <div class="hero-content text-center">
                <div class="card w-full max-w-md shadow-2xl bg-base-100">
                    <div class="card-body items-center">
                        <Icon icon_id={IconId::HeroiconsSolidBolt} class="w-12 h-12 text-primary" />
                        <h1 class="card-title text-3xl">{ i18n.t("app.title") }</h1>
                        <p class="text-base-content/70 mb-4">{ i18n.t("app.tagline") }</p>
                        if let Some(message) = &auth.error {
                            <div class="alert alert-error">
                                <span>{ message.clone() }</span>
                            </div>
                        }
                        <button class="btn btn-primary btn-wide" {onclick} disabled={is_busy}>
                            { if is_busy { i18n.t("login.redirecting") } else { i18n.t("login.button") } }
                        </button>
                        <p class="text-xs text-base-content/50 mt-2">{ i18n.t("login.hint") }</p>
                    </div>
                </div>
            </div>
        </div>
    }
}
