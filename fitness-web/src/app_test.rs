use wasm_bindgen_test::*;
use yew::LocalServerRenderer;
use yew::prelude::*;
use yew_router::Router;
use yew_router::history::{AnyHistory, History, MemoryHistory};
use yewdux::YewduxRoot;

use crate::language::{Translated, TranslatedProps};
use crate::pages::LoginPage;
use crate::routes::MainRoute;

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Properties, PartialEq)]
struct AtRouteProps {
    route: MainRoute,
}

#[function_component(AtRoute)]
fn at_route(props: &AtRouteProps) -> Html {
    let history: AnyHistory = MemoryHistory::new().into();
    history.push(props.route.to_path());
    let content = html! {
        <Router history={history}>
            <yew_router::Switch<MainRoute> render={crate::routes::switch} />
        </Router>
    };
    html! {
        <YewduxRoot>
            <Translated {content} />
        </YewduxRoot>
    }
}

async fn render_login() -> String {
    let content = html! {
        <YewduxRoot>
            <LoginPage />
        </YewduxRoot>
    };
    LocalServerRenderer::<Translated>::with_props(TranslatedProps { content })
        .render()
        .await
}

#[wasm_bindgen_test]
async fn login_page_renders_sign_in_button() {
    let rendered = render_login().await;
    assert!(rendered.contains("Fitness Tracker"));
    assert!(rendered.contains("Sign in"));
}

#[wasm_bindgen_test]
async fn login_page_has_no_error_banner_initially() {
    let rendered = render_login().await;
    assert!(!rendered.contains("alert-error"));
}

#[wasm_bindgen_test]
async fn login_route_renders_login_page() {
    let rendered = LocalServerRenderer::<AtRoute>::with_props(AtRouteProps {
        route: MainRoute::Login,
    })
    .render()
    .await;
    assert!(rendered.contains("Sign in"));
}
