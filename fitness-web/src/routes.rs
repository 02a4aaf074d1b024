use crate::containers::layout::Layout;
use crate::models::auth_state::AuthState;
use crate::pages::{ActivityDetailsPage, DashboardPage, LoginPage};
use strum::EnumIter;
use tracing::debug;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// The main routes
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/activities/:id")]
    ActivityDetails { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl MainRoute {
    /// Routes that require a signed-in user.
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Dashboard | Self::ActivityDetails { .. })
    }
}

/// What the router should do with a requested route.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    Render(MainRoute),
    Redirect(MainRoute),
}

/// Decides between rendering `route` and redirecting, based on the session.
pub fn guard(route: &MainRoute, is_authenticated: bool) -> RouteDecision {
    let home = if is_authenticated {
        MainRoute::Dashboard
    } else {
        MainRoute::Login
    };
    match route {
        MainRoute::Root | MainRoute::NotFound => RouteDecision::Redirect(home),
        MainRoute::Login if is_authenticated => RouteDecision::Redirect(MainRoute::Dashboard),
        protected if protected.is_protected() && !is_authenticated => {
            RouteDecision::Redirect(MainRoute::Login)
        }
        allowed => RouteDecision::Render(allowed.clone()),
    }
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let is_authenticated = use_selector(|state: &AuthState| state.is_authenticated);

    match guard(&props.route, *is_authenticated) {
        RouteDecision::Redirect(to) => {
            debug!(from = ?props.route, ?to, "redirecting");
            html! { <Redirect<MainRoute> {to} /> }
        }
        RouteDecision::Render(MainRoute::Login) => html! { <LoginPage /> },
        RouteDecision::Render(MainRoute::Dashboard) => html! {
            <Layout current_route={MainRoute::Dashboard}>
                <DashboardPage />
            </Layout>
        },
        RouteDecision::Render(MainRoute::ActivityDetails { id }) => html! {
            <Layout current_route={MainRoute::ActivityDetails { id: id.clone() }}>
                <ActivityDetailsPage {id} />
            </Layout>
        },
        RouteDecision::Render(MainRoute::Root | MainRoute::NotFound) => html! {},
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    debug!(?route, "Switching to main route");
    html! { <MainRouteView {route} /> }
}
