use i18nrs::yew::use_translation;
use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    /// Translation key of the caption under the spinner.
    #[prop_or("common.loading".to_string())]
    pub label: String,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    let (i18n, ..) = use_translation();

    html! {
        <div class="flex flex-col items-center justify-center py-12 animate-fadeIn">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            <span class="mt-3 text-base-content/70">{ i18n.t(&props.label) }</span>
        </div>
    }
}
