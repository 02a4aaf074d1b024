use std::collections::HashMap;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Information about a supported language
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub translation: &'static str,
    pub native_name: &'static str,
}

/// Get a map of supported languages
pub fn supported_languages() -> HashMap<&'static str, LanguageInfo> {
    HashMap::from([(
        "en",
        LanguageInfo {
            code: "en",
            translation: include_str!("../translations/en.json"),
            native_name: "English",
        },
    )])
}

/// Translation sources keyed by language code, as the i18n provider expects them.
pub fn translations() -> HashMap<&'static str, &'static str> {
    supported_languages()
        .into_values()
        .map(|info| (info.code, info.translation))
        .collect()
}


#[cfg(all(test, target_arch = "wasm32"))]
pub use harness::{Translated, TranslatedProps};
