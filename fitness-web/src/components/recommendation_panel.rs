use i18nrs::yew::use_translation;
use shared::models::Recommendation;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

use crate::models::fetch_state::FetchState;

#[derive(Properties, PartialEq)]
pub struct RecommendationPanelProps {
    pub state: FetchState<Option<Recommendation>>,
    /// What to render once loading settles without a usable recommendation.
    #[prop_or_default]
    pub fallback: Option<Recommendation>,
}

fn section(title: String, icon: IconId, accent: &'static str, items: &[String]) -> Html {
    if items.is_empty() {
        return html! {};
    }
    html! {
        <div class="card bg-base-200 shadow-md">
            <div class="card-body">
                <h3 class={classes!("card-title", accent)}>
                    <Icon icon_id={icon} class="w-5 h-5" />
                    { title }
                </h3>
                <ul class="list-disc pl-6 space-y-1">
                    { for items.iter().map(|item| html! { <li>{ item.clone() }</li> }) }
                </ul>
            </div>
        </div>
    }
}

/// AI feedback for one activity. Renders nothing when there is none.
#[function_component(RecommendationPanel)]
pub fn recommendation_panel(props: &RecommendationPanelProps) -> Html {
    let (i18n, ..) = use_translation();

    let recommendation = match &props.state {
        FetchState::Loading => {
            return html! {
                <div class="flex items-center gap-3 p-4 text-base-content/70">
                    <span class="loading loading-dots loading-md text-primary"></span>
                    <span>{ i18n.t("details.recommendation.loading") }</span>
                </div>
            };
        }
        FetchState::Loaded(Some(recommendation)) if !recommendation.is_empty() => recommendation,
        _ => match &props.fallback {
            Some(fallback) => fallback,
            None => return html! {},
        },
    };

    html! {
        <div class="space-y-4">
            if let Some(analysis) = recommendation.analysis() {
                <div class="card bg-primary text-primary-content shadow-md">
                    <div class="card-body">
                        <h3 class="card-title">
                            <Icon icon_id={IconId::HeroiconsOutlineSparkles} class="w-5 h-5" />
                            { i18n.t("details.recommendation.analysis") }
                        </h3>
                        <p class="whitespace-pre-line">{ analysis.to_string() }</p>
                    </div>
                </div>
            }
            { section(
                i18n.t("details.recommendation.improvements"),
                IconId::HeroiconsOutlineArrowTrendingUp,
                "text-info",
                &recommendation.improvements,
            ) }
            { section(
                i18n.t("details.recommendation.suggestions"),
                IconId::HeroiconsOutlineLightBulb,
                "text-warning",
                &recommendation.suggestions,
            ) }
            { section(
                i18n.t("details.recommendation.safety"),
                IconId::HeroiconsOutlineShieldCheck,
                "text-success",
                &recommendation.safety,
            ) }
        </div>
    }
}
