use crate::{
    models::auth_state::{AuthAction, AuthState},
    routes::MainRoute,
};
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_store;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current_route: MainRoute,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let (i18n, ..) = use_translation();
    let (auth, dispatch) = use_store::<AuthState>();
    let navigator = use_navigator();

    let on_logout = Callback::from(move |_: MouseEvent| {
        dispatch.apply(AuthAction::Logout);
        if let Some(navigator) = &navigator {
            navigator.push(&MainRoute::Login);
        }
    });

    let on_dashboard = props.current_route == MainRoute::Dashboard;

    html! {
        <nav class="navbar justify-between bg-base-300 shadow">
            <Link<MainRoute> to={MainRoute::Dashboard} classes="btn btn-ghost text-lg gap-2">
                <Icon icon_id={IconId::HeroiconsSolidBolt} class="w-6 h-6 text-primary" />
                {i18n.t("app.title")}
            </Link<MainRoute>>
            <ul class="hidden menu sm:menu-horizontal">
                <li>
                    <Link<MainRoute>
                        to={MainRoute::Dashboard}
                        classes={classes!(on_dashboard.then_some("active"))}
                    >
                        {i18n.t("nav.overview")}
                    </Link<MainRoute>>
                </li>
            </ul>
            if auth.is_authenticated {
                <div class="flex items-center gap-2">
                    <span class="hidden sm:inline text-sm text-base-content/80">
                        { auth.display_name().to_string() }
                    </span>
                    <button class="btn btn-ghost btn-sm" onclick={on_logout} title={i18n.t("header.logout")}>
                        <Icon icon_id={IconId::HeroiconsOutlineArrowRightOnRectangle} class="w-5 h-5" />
                        <span class="hidden sm:inline">{i18n.t("header.logout")}</span>
                    </button>
                </div>
            }
        </nav>
    }
}
