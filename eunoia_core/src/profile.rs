//! Local profile and preferences.
//!
//! The profile carries a generated user id and a display name; the id scopes
//! every per-user store entry. Account security lives with the external
//! identity provider and is out of scope here.

use crate::catalog::get_default_catalog;
use crate::i18n::Language;
use crate::store::{keys, Store};
use crate::{Error, Profile, Result};
use uuid::Uuid;

pub const DEFAULT_DISPLAY_NAME: &str = "friend";
pub const DEFAULT_AVATAR: &str = "🌸";

/// Read the stored profile, creating one on first run
pub fn load_or_create(store: &mut Store) -> Result<Profile> {
    if let Some(profile) = store.get_json::<Profile>(keys::PROFILE) {
        return Ok(profile);
    }

    let profile = Profile::new(DEFAULT_DISPLAY_NAME);
    store.set_json(keys::PROFILE, &profile)?;
    tracing::info!("Created profile {} on first run", profile.user_id);
    Ok(profile)
}

/// Update the display name
///
/// The name is trimmed; an empty name is rejected.
pub fn set_display_name(store: &mut Store, name: &str) -> Result<Profile> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidConfig("Display name cannot be empty".into()));
    }

    let mut profile = load_or_create(store)?;
    profile.display_name = trimmed.to_string();
    store.set_json(keys::PROFILE, &profile)?;
    Ok(profile)
}

/// The last quick check-in mood, if any
pub fn quick_mood(store: &Store, user_id: &Uuid) -> Option<String> {
    store.get(&keys::mood(user_id)).map(|s| s.to_string())
}

/// Record a quick check-in mood
///
/// Any string is accepted; the supportive message comes back only for the
/// catalog's known moods.
pub fn set_quick_mood(store: &mut Store, user_id: &Uuid, emoji: &str) -> Option<&'static str> {
    store.set(keys::mood(user_id), emoji);
    get_default_catalog().supportive_message(emoji)
}

/// The user's avatar
///
/// A stored value outside the catalog options degrades to the default.
pub fn avatar(store: &Store, user_id: &Uuid) -> String {
    let catalog = get_default_catalog();
    match store.get(&keys::avatar(user_id)) {
        Some(saved) if catalog.avatars.iter().any(|a| a == saved) => saved.to_string(),
        Some(saved) => {
            tracing::warn!("Stored avatar '{}' is not an option, using default", saved);
            DEFAULT_AVATAR.to_string()
        }
        None => DEFAULT_AVATAR.to_string(),
    }
}

/// Choose an avatar from the catalog options
pub fn set_avatar(store: &mut Store, user_id: &Uuid, emoji: &str) -> Result<()> {
    let catalog = get_default_catalog();
    if !catalog.avatars.iter().any(|a| a == emoji) {
        return Err(Error::InvalidConfig(format!(
            "'{}' is not an avatar option (choose one of {})",
            emoji,
            catalog.avatars.join(" ")
        )));
    }
    store.set(keys::avatar(user_id), emoji);
    Ok(())
}

/// Whether period reminders are on (default true)
pub fn reminders_enabled(store: &Store, user_id: &Uuid) -> bool {
    store
        .get_json::<bool>(&keys::reminders(user_id))
        .unwrap_or(true)
}

pub fn set_reminders(store: &mut Store, user_id: &Uuid, enabled: bool) -> Result<()> {
    store.set_json(keys::reminders(user_id), &enabled)
}

/// The app-wide interface language (default English)
///
/// An unrecognizable stored value degrades to English.
pub fn language(store: &Store) -> Language {
    match store.get(keys::APP_LANGUAGE) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Stored language '{}' not recognized, using English", raw);
            Language::En
        }),
        None => Language::En,
    }
}

pub fn set_language(store: &mut Store, language: Language) {
    store.set(keys::APP_LANGUAGE, language.as_str());
}

/// Remove a user's entries and the profile itself
///
/// This is the local half of account deletion; the identity provider's side
/// is out of scope. Returns the number of per-user entries removed.
pub fn delete_user_data(store: &mut Store, user_id: &Uuid) -> usize {
    let removed = store.remove_user_entries(user_id);
    store.remove(keys::PROFILE);
    tracing::info!("Deleted {} entries for user {}", removed, user_id);
    removed
}
