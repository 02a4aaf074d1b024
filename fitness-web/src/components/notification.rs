use yew::prelude::*;
use yew_icons::{Icon, IconId};

use crate::models::activity_form::{Notification, Severity};

#[derive(Properties, PartialEq)]
pub struct NotificationBannerProps {
    pub notification: Option<Notification>,
    pub on_dismiss: Callback<()>,
}

#[function_component(NotificationBanner)]
pub fn notification_banner(props: &NotificationBannerProps) -> Html {
    let Some(notification) = props.notification.as_ref() else {
        return html! {};
    };
    let icon = match notification.severity {
        Severity::Success => IconId::HeroiconsSolidCheckCircle,
        Severity::Error => IconId::HeroiconsSolidExclamationTriangle,
    };
    let on_dismiss = props.on_dismiss.reform(|_: MouseEvent| ());

    html! {
        <div role="alert" class={classes!("alert", "mt-4", notification.severity.alert_class())}>
            <Icon icon_id={icon} class="h-5 w-5" />
            <span>{ notification.message.clone() }</span>
            <button class="btn btn-ghost btn-xs" aria-label="dismiss" onclick={on_dismiss}>
                <Icon icon_id={IconId::HeroiconsSolidXMark} class="h-4 w-4" />
            </button>
        </div>
    }
}
