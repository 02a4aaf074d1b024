use i18nrs::yew::use_translation;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;

use crate::api::FitnessClient;
use crate::components::loading::Loading;
use crate::components::recommendation_panel::RecommendationPanel;
use crate::models::fetch_state::{ActivityDetailState, DetailAction, FetchState, load_detail};
use crate::routes::MainRoute;

#[derive(Properties, PartialEq)]
pub struct ActivityDetailsPageProps {
    pub id: String,
}

/// Single activity with its AI recommendation.
#[function_component(ActivityDetailsPage)]
pub fn activity_details_page(props: &ActivityDetailsPageProps) -> Html {
    let (i18n, ..) = use_translation();
    let detail = use_reducer(ActivityDetailState::default);

    {
        let dispatcher = detail.dispatcher();
        use_effect_with(props.id.clone(), move |id| {
            let id = id.clone();
            dispatcher.dispatch(DetailAction::Reset);
            spawn_local(async move {
                let client = FitnessClient::shared();
                load_detail(&client, &id, |action| dispatcher.dispatch(action)).await;
            });
            || ()
        });
    }

    let back = html! {
        <Link<MainRoute> to={MainRoute::Dashboard} classes="btn btn-ghost btn-sm gap-2 mb-4">
            <Icon icon_id={IconId::HeroiconsOutlineArrowLeft} class="w-4 h-4" />
            { i18n.t("details.back") }
        </Link<MainRoute>>
    };

    let activity = match &detail.activity {
        FetchState::Loading => return html! { <Loading label="details.loading" /> },
        FetchState::Failed(message) => {
            return html! {
                <div class="p-4">
                    { back }
                    <div role="alert" class="alert alert-error">
                        <Icon icon_id={IconId::HeroiconsSolidExclamationTriangle} class="h-5 w-5" />
                        <span>{ message.clone() }</span>
                    </div>
                </div>
            };
        }
        FetchState::Loaded(None) => {
            return html! {
                <div class="p-4">
                    { back }
                    <h2 class="text-xl text-base-content/70 text-center py-16">{ i18n.t("details.not_found") }</h2>
                </div>
            };
        }
        FetchState::Loaded(Some(activity)) => activity,
    };

    let kind = activity.activity_type;
    let level = activity.calorie_level();
    let fallback = detail.effective_recommendation();

    html! {
        <div class="p-4 space-y-6">
            { back }
            <div class="card shadow-xl text-white" style={format!("background: {}", kind.color())}>
                <div class="card-body">
                    <div class="flex items-center gap-4">
                        <span class="text-5xl">{ kind.icon() }</span>
                        <div>
                            <h1 class="text-3xl font-bold">{ kind.label() }</h1>
                            if let Some(created) = activity.created_at {
                                <p class="opacity-80">{ created.date_label() }{ " · " }{ created.time_label() }</p>
                            }
                        </div>
                    </div>
                </div>
            </div>

            <div class="stats stats-vertical md:stats-horizontal shadow w-full">
                <div class="stat">
                    <div class="stat-title">{ i18n.t("activities.duration") }</div>
                    <div class="stat-value text-primary">{ format!("{}m", activity.duration) }</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{ i18n.t("activities.calories") }</div>
                    <div class="stat-value text-error">{ activity.calories_burned.to_string() }</div>
                    <div class="stat-desc">
                        <progress class="progress progress-error w-32" value={level.progress().to_string()} max="100"></progress>
                        <span class="ml-2">{ level.label() }</span>
                    </div>
                </div>
                if let Some(created) = activity.created_at {
                    <div class="stat">
                        <div class="stat-title">{ i18n.t("details.date") }</div>
                        <div class="stat-value text-lg">{ created }</div>
                    </div>
                }
            </div>

            <RecommendationPanel state={detail.recommendation.clone()} {fallback} />
        </div>
    }
}
