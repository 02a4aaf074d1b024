use i18nrs::yew::use_translation;
use shared::models::{Activity, ActivityType};
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::FitnessClient;
use crate::components::notification::NotificationBanner;
use crate::models::activity_form::{ADDED_MESSAGE, ActivityDraft, Notification, submit_activity};

#[derive(Properties, PartialEq)]
pub struct ActivityFormProps {
    /// Called after a successful create. Without it the page reloads.
    #[prop_or_default]
    pub on_activity_added: Option<Callback<Activity>>,
}

fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().reload() {
            warn!(?err, "reload failed");
        }
    }
}

#[function_component(ActivityForm)]
pub fn activity_form(props: &ActivityFormProps) -> Html {
    let (i18n, ..) = use_translation();
    let draft = use_state(ActivityDraft::default);
    let submitting = use_state(|| false);
    let notification = use_state(|| None::<Notification>);

    let onsubmit = {
        let draft = draft.clone();
        let submitting = submitting.clone();
        let notification = notification.clone();
        let on_activity_added = props.on_activity_added.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if let Err(err) = draft.validate() {
                notification.set(Some(Notification::from(&err)));
                return;
            }
            submitting.set(true);
            let current = (*draft).clone();
            let draft = draft.clone();
            let submitting = submitting.clone();
            let notification = notification.clone();
            let on_activity_added = on_activity_added.clone();
            spawn_local(async move {
                match submit_activity(&FitnessClient::shared(), &current).await {
                    Ok(activity) => {
                        draft.set(ActivityDraft::default());
                        notification.set(Some(Notification::success(ADDED_MESSAGE)));
                        match on_activity_added {
                            Some(callback) => callback.emit(activity),
                            None => reload_page(),
                        }
                    }
                    Err(err) => notification.set(Some(Notification::from(&err))),
                }
                submitting.set(false);
            });
        })
    };

    let on_duration = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                draft.set(ActivityDraft {
                    duration: input.value(),
                    ..(*draft).clone()
                });
            }
        })
    };

    let on_calories = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                draft.set(ActivityDraft {
                    calories_burned: input.value(),
                    ..(*draft).clone()
                });
            }
        })
    };

    let on_dismiss = {
        let notification = notification.clone();
        Callback::from(move |()| notification.set(None))
    };

    let type_picker = ActivityType::all().into_iter().map(|kind| {
        let selected = draft.activity_type == kind;
        let onclick = {
            let draft = draft.clone();
            Callback::from(move |_: MouseEvent| {
                draft.set(ActivityDraft {
                    activity_type: kind,
                    ..(*draft).clone()
                });
            })
        };
        html! {
            <button
                type="button"
                class={classes!("btn", "btn-sm", "gap-1", if selected { "btn-primary" } else { "btn-outline" })}
                aria-pressed={selected.to_string()}
                {onclick}
            >
                <span>{ kind.icon() }</span>
                { kind.label() }
            </button>
        }
    });

    let is_busy = *submitting;

    html! {
        <form class="space-y-4" {onsubmit}>
            <div class="form-control">
                <span class="label-text mb-2">{ i18n.t("form.type") }</span>
                <div class="flex flex-wrap gap-2">{ for type_picker }</div>
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div class="form-control">
                    <label class="label" for="duration">
                        <span class="label-text">{ i18n.t("form.duration") }</span>
                    </label>
                    <input
                        id="duration"
                        class="input input-bordered"
                        type="number"
                        min="0"
                        value={draft.duration.clone()}
                        oninput={on_duration}
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="calories">
                        <span class="label-text">{ i18n.t("form.calories") }</span>
                    </label>
                    <input
                        id="calories"
                        class="input input-bordered"
                        type="number"
                        min="0"
                        value={draft.calories_burned.clone()}
                        oninput={on_calories}
                    />
                </div>
            </div>
            <button class="btn btn-primary w-full" type="submit" disabled={is_busy}>
                { if is_busy { i18n.t("form.submitting") } else { i18n.t("form.submit") } }
            </button>
            <NotificationBanner notification={(*notification).clone()} {on_dismiss} />
        </form>
    }
}
