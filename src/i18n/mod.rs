//! Internationalization module
//!
//! Provides translations for English (en) and Russian (ru) labels.
//! Supports automatic language detection based on system locale.

mod en;
mod ru;

use std::collections::HashMap;

/// Internationalization manager
pub struct I18n {
    current_lang: String,
    translations: HashMap<String, String>,
}

impl I18n {
    /// Create a new I18n instance with the specified language
    pub fn new(lang: &str) -> Self {
        let mut i18n = Self {
            current_lang: String::new(),
            translations: HashMap::new(),
        };
        i18n.set_language(lang);
        i18n
    }

    /// Set the current language
    pub fn set_language(&mut self, lang: &str) {
        let lang = if lang == "auto" {
            detect_system_language()
        } else {
            lang.to_string()
        };

        self.translations = match lang.as_str() {
            "ru" => ru::get_translations(),
            _ => en::get_translations(),
        };
        self.current_lang = if lang == "ru" { lang } else { "en".to_string() };

        log::info!("Language set to: {}", self.current_lang);
    }

    /// Get a translated string by key
    pub fn get(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Get all translations
    pub fn get_all(&self) -> HashMap<String, String> {
        self.translations.clone()
    }

    /// Get the current language code
    pub fn current_language(&self) -> &str {
        &self.current_lang
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("auto")
    }
}

/// Detect system language from the usual locale variables
fn detect_system_language() -> String {
    let lang_env = std::env::var("LANG")
        .or_else(|_| std::env::var("LC_ALL"))
        .or_else(|_| std::env::var("LC_MESSAGES"))
        .unwrap_or_else(|_| "en".to_string());

    language_from_locale(&lang_env).to_string()
}

/// Extract a supported language code (e.g., "ru_RU.UTF-8" -> "ru")
fn language_from_locale(locale: &str) -> &'static str {
    let lang_code = locale
        .split('_')
        .next()
        .unwrap_or("en")
        .split('.')
        .next()
        .unwrap_or("en");

    match lang_code {
        "ru" => "ru",
        _ => "en",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_russian_labels() {
        let i18n = I18n::new("ru");
        assert_eq!(i18n.current_language(), "ru");
        assert_eq!(i18n.get("processor.title"), "Процессор");
        assert_eq!(i18n.get("memory.free"), "Свободная память");
    }

    #[test]
    fn test_unsupported_language_falls_back_to_english() {
        let i18n = I18n::new("de");
        assert_eq!(i18n.current_language(), "en");
        assert_eq!(i18n.get("gpu.title"), "Graphics");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        let i18n = I18n::new("en");
        assert_eq!(i18n.get("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_language_from_locale() {
        assert_eq!(language_from_locale("ru_RU.UTF-8"), "ru");
        assert_eq!(language_from_locale("ru"), "ru");
        assert_eq!(language_from_locale("fr_FR.UTF-8"), "en");
        assert_eq!(language_from_locale("C.UTF-8"), "en");
    }

    #[test]
    fn test_both_languages_have_the_same_keys() {
        let mut en: Vec<_> = en::get_translations().into_keys().collect();
        let mut ru: Vec<_> = ru::get_translations().into_keys().collect();
        en.sort();
        ru.sort();
        assert_eq!(en, ru);
    }
}
