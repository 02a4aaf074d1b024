mod api;
mod app;
mod auth;
mod components;
mod config;
mod containers;
mod language;
mod logging;
mod models;
mod pages;
mod routes;
mod storage;

#[cfg(all(test, target_arch = "wasm32"))]
mod app_test;

use app::App;
use config::FrontendConfig;
use i18nrs::yew::{I18nProvider, I18nProviderConfig};
use language::{DEFAULT_LANGUAGE, translations};
use tracing::{error, info};
use yew::Renderer;
use yew::{Html, function_component, html};
use yewdux::YewduxRoot;

#[function_component(FitnessApp)]
fn fitness_app() -> Html {
    let config = I18nProviderConfig {
        translations: translations(),
        default_language: DEFAULT_LANGUAGE.to_string(),
        ..Default::default()
    };

    html! {
        <YewduxRoot>
            <I18nProvider ..config>
                <App />
            </I18nProvider>
        </YewduxRoot>
    }
}

fn main() {
    logging::init(FrontendConfig::new().log_level);

    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic");
        match info.location() {
            Some(location) => error!(
                "Panic: {payload} at {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            ),
            None => error!("Panic: {payload}"),
        }
    }));

    info!("Starting Fitness Tracker");

    Renderer::<FitnessApp>::new().render();
}
