use crate::auth::AuthHandler;
use crate::routes::{MainRoute, switch};
use yew::{Html, function_component, html};
use yew_router::prelude::*;

/// Router shell. Every route renders beneath the auth handler so an OAuth
/// redirect is completed before the guard inspects the session.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <AuthHandler>
                <Switch<MainRoute> render={switch} />
            </AuthHandler>
        </BrowserRouter>
    }
}
