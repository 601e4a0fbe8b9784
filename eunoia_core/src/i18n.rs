//! Bilingual string tables.
//!
//! The application speaks English and Swahili. Lookup tries the requested
//! language first, then English, then the key itself, so a missing entry
//! degrades to something readable instead of failing.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported interface languages
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Sw,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Sw => "sw",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "en" => Ok(Language::En),
            "sw" => Ok(Language::Sw),
            other => Err(crate::Error::InvalidConfig(format!(
                "Unknown language '{}' (expected en or sw)",
                other
            ))),
        }
    }
}

type Table = HashMap<&'static str, &'static str>;

static STRINGS: Lazy<HashMap<Language, Table>> = Lazy::new(build_tables);

fn build_tables() -> HashMap<Language, Table> {
    let en: Table = HashMap::from([
        ("home", "Home"),
        ("chat", "Chat"),
        ("education", "Education"),
        ("trackCycle", "Track Cycle"),
        ("profile", "Profile"),
        ("messagePlaceholder", "Message Eunoia..."),
        ("typing", "Eunoia is typing..."),
        ("clearChatHistory", "Clear Chat History"),
        ("deleteAccount", "Delete Account"),
        ("language", "Language: English / Kiswahili"),
    ]);

    let sw: Table = HashMap::from([
        ("home", "Nyumbani"),
        ("chat", "Mazungumzo"),
        ("education", "Elimu"),
        ("trackCycle", "Fuatilia Mzunguko"),
        ("profile", "Wasifu"),
        ("messagePlaceholder", "Tuma ujumbe kwa Eunoia..."),
        ("typing", "Eunoia anaandika..."),
        ("clearChatHistory", "Futa Historia ya Mazungumzo"),
        ("deleteAccount", "Futa Akaunti"),
        ("language", "Lugha: Kiingereza / Kiswahili"),
    ]);

    HashMap::from([(Language::En, en), (Language::Sw, sw)])
}

/// Look up a UI string
///
/// Falls back to the English entry, then to the key itself.
pub fn translate<'a>(key: &'a str, language: Language) -> &'a str {
    if let Some(value) = STRINGS.get(&language).and_then(|t| t.get(key)) {
        return value;
    }
    if let Some(value) = STRINGS.get(&Language::En).and_then(|t| t.get(key)) {
        return value;
    }
    key
}

/// The companion's greeting for a freshly opened conversation
pub fn greeting(language: Language, name: &str) -> String {
    match language {
        Language::En => format!(
            "👋 Hello {}💕! I'm Eunoia — your menstrual wellness companion. \
             How are you feeling today?",
            name
        ),
        Language::Sw => format!(
            "👋 Hujambo {}💕! Mimi ni Eunoia — msaidizi wako wa afya ya hedhi. \
             Unajisikiaje leo?",
            name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_translate_both_languages() {
        assert_eq!(translate("trackCycle", Language::En), "Track Cycle");
        assert_eq!(translate("trackCycle", Language::Sw), "Fuatilia Mzunguko");
    }

    #[test]
    fn test_unknown_key_falls_back_to_itself() {
        assert_eq!(translate("nonexistentKey", Language::Sw), "nonexistentKey");
    }

    #[test]
    fn test_tables_cover_the_same_keys() {
        let tables = build_tables();
        let en = &tables[&Language::En];
        let sw = &tables[&Language::Sw];

        for key in en.keys() {
            assert!(sw.contains_key(key), "Swahili table missing '{}'", key);
        }
        assert_eq!(en.len(), sw.len());
    }

    #[test]
    fn test_greeting_addresses_the_user() {
        let en = greeting(Language::En, "Amina");
        let sw = greeting(Language::Sw, "Amina");

        assert!(en.contains("Amina"));
        assert!(en.contains("Eunoia"));
        assert!(sw.contains("Amina"));
        assert!(sw.contains("Hujambo"));
    }

    #[test]
    fn test_language_string_roundtrip() {
        assert_eq!(Language::from_str("en").unwrap(), Language::En);
        assert_eq!(Language::from_str("sw").unwrap(), Language::Sw);
        assert_eq!(Language::Sw.as_str(), "sw");
        assert!(Language::from_str("fr").is_err());
    }

    #[test]
    fn test_default_language_is_english() {
        assert_eq!(Language::default(), Language::En);
    }
}
