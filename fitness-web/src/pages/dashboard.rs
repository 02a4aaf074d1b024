use chrono::Local;
use i18nrs::yew::use_translation;
use shared::models::{Activity, OverviewStats};
use strum::{EnumIter, IntoEnumIterator};
use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_store;

use crate::api::FitnessClient;
use crate::components::activity_form::ActivityForm;
use crate::components::activity_list::{ActivityGrid, ActivityList, fetch_activities};
use crate::components::loading::Loading;
use crate::components::stat_card::StatCard;
use crate::models::auth_state::{AuthAction, AuthState};
use crate::models::fetch_state::FetchState;

/// Number of activities shown under "Recent activities".
const RECENT_LIMIT: usize = 6;

/// Sections reachable from the dashboard navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter)]
pub enum DashboardView {
    #[default]
    Overview,
    Activities,
    Analytics,
    Profile,
}

impl DashboardView {
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Overview => "nav.overview",
            Self::Activities => "nav.activities",
            Self::Analytics => "nav.analytics",
            Self::Profile => "nav.profile",
        }
    }

    pub fn icon(self) -> IconId {
        match self {
            Self::Overview => IconId::HeroiconsOutlineHome,
            Self::Activities => IconId::HeroiconsOutlineListBullet,
            Self::Analytics => IconId::HeroiconsOutlineChartBar,
            Self::Profile => IconId::HeroiconsOutlineUserCircle,
        }
    }
}

#[derive(Properties, PartialEq)]
struct OverviewProps {
    refresh: u32,
}

#[function_component(Overview)]
fn overview(props: &OverviewProps) -> Html {
    let (i18n, ..) = use_translation();
    let activities = use_state(|| FetchState::<Vec<Activity>>::Loading);

    {
        let activities = activities.clone();
        use_effect_with(props.refresh, move |_| {
            spawn_local(async move {
                let loaded = fetch_activities(&FitnessClient::shared()).await;
                activities.set(FetchState::Loaded(loaded));
            });
            || ()
        });
    }

    let Some(loaded) = activities.loaded() else {
        return html! { <Loading label="activities.loading" /> };
    };
    let stats = OverviewStats::compute(loaded, Local::now().naive_local());

    html! {
        <div class="space-y-6">
            <div class="stats stats-vertical lg:stats-horizontal shadow w-full">
                <StatCard
                    title={i18n.t("dashboard.stats.total")}
                    value={stats.total_activities.to_string()}
                    icon={IconId::HeroiconsOutlineTrophy}
                />
                <StatCard
                    title={i18n.t("dashboard.stats.this_week")}
                    value={stats.this_week.to_string()}
                    icon={IconId::HeroiconsOutlineCalendarDays}
                    accent="text-secondary"
                />
                <StatCard
                    title={i18n.t("dashboard.stats.calories")}
                    value={stats.calories_burned.to_string()}
                    icon={IconId::HeroiconsOutlineFire}
                    accent="text-error"
                />
                <StatCard
                    title={i18n.t("dashboard.stats.active_days")}
                    value={stats.active_days.to_string()}
                    icon={IconId::HeroiconsOutlineBolt}
                    accent="text-success"
                    description={i18n.t("dashboard.stats.last_seven_days")}
                />
            </div>
            <h2 class="text-xl font-semibold">{ i18n.t("dashboard.recent") }</h2>
            <ActivityGrid activities={loaded.clone()} limit={Some(RECENT_LIMIT)} show_summary={false} />
        </div>
    }
}

#[function_component(Profile)]
fn profile() -> Html {
    let (i18n, ..) = use_translation();
    let (auth, dispatch) = use_store::<AuthState>();
    let Some(user) = auth.user.clone() else {
        return html! {};
    };
    let on_sign_out = dispatch.apply_callback(|_: MouseEvent| AuthAction::Logout);

    html! {
        <div class="card bg-base-200 shadow-xl max-w-lg">
            <div class="card-body items-center text-center">
                <div class="avatar placeholder">
                    <div class="bg-primary text-primary-content rounded-full w-20">
                        if user.picture.is_empty() {
                            <span class="text-3xl">{ user.initial().to_string() }</span>
                        } else {
                            <img src={user.picture.clone()} alt={user.name.clone()} />
                        }
                    </div>
                </div>
                <h2 class="card-title">{ user.name.clone() }</h2>
                <p class="text-base-content/70">{ user.email.clone() }</p>
                <div class="card-actions mt-4">
                    <button class="btn btn-outline btn-error" onclick={on_sign_out}>
                        <Icon icon_id={IconId::HeroiconsOutlineArrowRightOnRectangle} class="w-5 h-5" />
                        { i18n.t("header.logout") }
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Dashboard page component
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let (i18n, ..) = use_translation();
    let view = use_state(DashboardView::default);
    let refresh = use_state(|| 0_u32);
    let dialog_open = use_state(|| false);

    let tabs = DashboardView::iter().map(|item| {
        let onclick = {
            let view = view.clone();
            Callback::from(move |_: MouseEvent| view.set(item))
        };
        html! {
            <button
                role="tab"
                class={classes!("tab", "gap-2", (*view == item).then_some("tab-active"))}
                {onclick}
            >
                <Icon icon_id={item.icon()} class="w-5 h-5" />
                { i18n.t(item.label_key()) }
            </button>
        }
    });

    let open_dialog = {
        let dialog_open = dialog_open.clone();
        Callback::from(move |_: MouseEvent| dialog_open.set(true))
    };
    let close_dialog = {
        let dialog_open = dialog_open.clone();
        Callback::from(move |_: MouseEvent| dialog_open.set(false))
    };
    let on_activity_added = {
        let dialog_open = dialog_open.clone();
        let refresh = refresh.clone();
        Callback::from(move |activity: Activity| {
            debug!(id = %activity.id, "refreshing dashboard after new activity");
            dialog_open.set(false);
            refresh.set(refresh.wrapping_add(1));
        })
    };

    let content = match *view {
        DashboardView::Overview => html! { <Overview refresh={*refresh} /> },
        DashboardView::Activities => html! { <ActivityList refresh={*refresh} /> },
        DashboardView::Analytics => html! {
            <div class="hero bg-base-200 rounded-box py-16">
                <div class="hero-content text-center">
                    <div>
                        <Icon icon_id={IconId::HeroiconsOutlineChartPie} class="w-12 h-12 mx-auto text-primary" />
                        <h2 class="text-2xl font-bold mt-4">{ i18n.t("dashboard.analytics.title") }</h2>
                        <p class="text-base-content/70">{ i18n.t("dashboard.analytics.description") }</p>
                    </div>
                </div>
            </div>
        },
        DashboardView::Profile => html! { <Profile /> },
    };

    html! {
        <div class="p-4 space-y-6">
            <div>
                <h1 class="text-2xl font-bold">{ i18n.t("app.title") }</h1>
                <p class="text-base-content/70">{ i18n.t("app.tagline") }</p>
            </div>
            <div role="tablist" class="tabs tabs-boxed">{ for tabs }</div>
            { content }

            <button
                class="btn btn-primary btn-circle btn-lg fixed bottom-8 right-8 shadow-xl"
                aria-label={i18n.t("form.title")}
                onclick={open_dialog}
            >
                <Icon icon_id={IconId::HeroiconsSolidPlus} class="w-6 h-6" />
            </button>

            <div class={classes!("modal", (*dialog_open).then_some("modal-open"))}>
                <div class="modal-box max-w-2xl">
                    <div class="flex justify-between items-center mb-4">
                        <h3 class="font-bold text-lg">{ i18n.t("form.title") }</h3>
                        <button class="btn btn-sm btn-circle btn-ghost" onclick={close_dialog}>
                            <Icon icon_id={IconId::HeroiconsSolidXMark} class="w-4 h-4" />
                        </button>
                    </div>
                    if *dialog_open {
                        <ActivityForm on_activity_added={Some(on_activity_added)} />
                    }
                </div>
            </div>
        </div>
    }
}
