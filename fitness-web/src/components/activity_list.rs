use i18nrs::yew::use_translation;
use shared::models::{Activity, ActivitySummary};
use tracing::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_icons::IconId;
use yew_router::prelude::Link;

use crate::api::{ActivityApi, FitnessClient};
use crate::components::loading::Loading;
use crate::components::stat_card::StatCard;
use crate::models::fetch_state::FetchState;
use crate::routes::MainRoute;

/// Loads the activity list. Failures are logged and shown as an empty list.
pub async fn fetch_activities(api: &dyn ActivityApi) -> Vec<Activity> {
    match api.list_activities().await {
        Ok(activities) => activities,
        Err(err) => {
            error!(%err, "failed to load activities");
            Vec::new()
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ActivityListProps {
    /// Changing this value refetches the list.
    #[prop_or_default]
    pub refresh: u32,
}

#[derive(Properties, PartialEq)]
pub struct ActivityGridProps {
    pub activities: Vec<Activity>,
    /// Show only the first `limit` activities.
    #[prop_or_default]
    pub limit: Option<usize>,
    #[prop_or(true)]
    pub show_summary: bool,
}

#[derive(Properties, PartialEq)]
struct ActivityCardProps {
    activity: Activity,
}

#[function_component(ActivityCard)]
fn activity_card(props: &ActivityCardProps) -> Html {
    let (i18n, ..) = use_translation();
    let activity = &props.activity;
    let kind = activity.activity_type;
    let level = activity.calorie_level();

    html! {
        <Link<MainRoute>
            to={MainRoute::ActivityDetails { id: activity.id.clone() }}
            classes="card bg-base-200 shadow-md hover:shadow-xl transition-all duration-300"
        >
            <div class="card-body gap-3">
                <div class="flex items-center gap-3">
                    <span class="text-3xl" style={format!("color: {}", kind.color())}>{ kind.icon() }</span>
                    <div>
                        <h3 class="card-title text-lg">{ kind.label() }</h3>
                        if let Some(created) = activity.created_at {
                            <p class="text-sm text-base-content/60">
                                { created.date_label() }{ " · " }{ created.time_label() }
                            </p>
                        }
                    </div>
                </div>
                <div class="grid grid-cols-2 gap-2 text-center">
                    <div>
                        <div class="font-semibold text-primary">{ format!("{}m", activity.duration) }</div>
                        <div class="text-xs text-base-content/60">{ i18n.t("activities.duration") }</div>
                    </div>
                    <div>
                        <div class="font-semibold text-error">{ activity.calories_burned.to_string() }</div>
                        <div class="text-xs text-base-content/60">{ i18n.t("activities.calories") }</div>
                    </div>
                </div>
                <div>
                    <div class="flex justify-between text-xs mb-1">
                        <span>{ i18n.t("activities.intensity") }</span>
                        <span style={format!("color: {}", level.color())}>{ level.label() }</span>
                    </div>
                    <progress class="progress w-full" value={level.progress().to_string()} max="100"></progress>
                </div>
            </div>
        </Link<MainRoute>>
    }
}

/// Activity list component
#[function_component(ActivityList)]
pub fn activity_list(props: &ActivityListProps) -> Html {
    let activities = use_state(|| FetchState::<Vec<Activity>>::Loading);

    {
        let activities = activities.clone();
        use_effect_with(props.refresh, move |_| {
            activities.set(FetchState::Loading);
            spawn_local(async move {
                let loaded = fetch_activities(&FitnessClient::shared()).await;
                activities.set(FetchState::Loaded(loaded));
            });
            || ()
        });
    }

    match activities.loaded() {
        Some(loaded) => html! { <ActivityGrid activities={loaded.clone()} /> },
        None => html! { <Loading label="activities.loading" /> },
    }
}

/// Cards for already loaded activities, with an optional summary.
#[function_component(ActivityGrid)]
pub fn activity_grid(props: &ActivityGridProps) -> Html {
    let (i18n, ..) = use_translation();
    let loaded = &props.activities;

    if loaded.is_empty() {
        return html! {
            <div class="text-center py-16">
                <div class="text-5xl mb-4">{ "🏃" }</div>
                <h3 class="text-lg font-semibold mb-2">{ i18n.t("activities.empty.title") }</h3>
                <p class="text-base-content/60 max-w-md mx-auto">{ i18n.t("activities.empty.description") }</p>
            </div>
        };
    }

    let summary = ActivitySummary::from_activities(loaded);
    let shown = props.limit.unwrap_or(loaded.len());

    html! {
        <div class="space-y-6">
            if props.show_summary {
                <div class="stats stats-vertical md:stats-horizontal shadow w-full">
                    <StatCard
                        title={i18n.t("activities.summary.count")}
                        value={summary.count.to_string()}
                        icon={IconId::HeroiconsOutlineListBullet}
                    />
                    <StatCard
                        title={i18n.t("activities.summary.calories")}
                        value={summary.total_calories.to_string()}
                        icon={IconId::HeroiconsOutlineFire}
                        accent="text-error"
                    />
                    <StatCard
                        title={i18n.t("activities.summary.minutes")}
                        value={format!("{}m", summary.total_minutes)}
                        icon={IconId::HeroiconsOutlineClock}
                        accent="text-secondary"
                    />
                </div>
            }
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                { for loaded.iter().take(shown).map(|activity| html! {
                    <ActivityCard key={activity.id.clone()} activity={activity.clone()} />
                }) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use shared::models::{NewActivity, Recommendation};

    struct FailingApi;

    #[async_trait(?Send)]
    impl ActivityApi for FailingApi {
        async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
            Err(ApiError::Decode(
                serde_json::from_str::<Vec<Activity>>("{").unwrap_err(),
            ))
        }

        async fn add_activity(&self, _activity: &NewActivity) -> Result<Activity, ApiError> {
            unreachable!()
        }

        async fn get_activity(&self, _id: &str) -> Result<Activity, ApiError> {
            unreachable!()
        }

        async fn get_recommendation(&self, _id: &str) -> Result<Option<Recommendation>, ApiError> {
            Ok(None)
        }
    }

    #[test]
    fn test_list_errors_are_swallowed() {
        assert!(block_on(fetch_activities(&FailingApi)).is_empty());
    }
}
