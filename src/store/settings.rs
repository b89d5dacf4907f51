use std::collections::HashMap;
use std::sync::RwLock;

use crate::bot::transport::ChatId;
use crate::models::settings::{ImageStyle, UserSettings};

/// Per-user generation settings, keyed by chat identity. Entries are created
/// with defaults on first reference and live for the process lifetime; the
/// lock is only ever held for a field read or write, never across await.
pub struct UserSettingsStore {
    entries: RwLock<HashMap<ChatId, UserSettings>>,
}

impl UserSettingsStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the user's settings, creating defaults on first reference.
    pub fn get_or_init(&self, chat: ChatId) -> UserSettings {
        let mut entries = self.entries.write().unwrap();
        *entries.entry(chat).or_default()
    }

    pub fn set_style(&self, chat: ChatId, style: ImageStyle) {
        let mut entries = self.entries.write().unwrap();
        entries.entry(chat).or_default().style = style;
    }

    pub fn set_size(&self, chat: ChatId, width: u32, height: u32) {
        let mut entries = self.entries.write().unwrap();
        let settings = entries.entry(chat).or_default();
        settings.width = width;
        settings.height = height;
    }
}

impl Default for UserSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reference_yields_defaults() {
        let store = UserSettingsStore::new();
        let settings = store.get_or_init(ChatId(42));
        assert_eq!(settings.style, ImageStyle::Anime);
        assert_eq!((settings.width, settings.height), (1024, 1024));

        // idempotent
        assert_eq!(store.get_or_init(ChatId(42)), settings);
    }

    #[test]
    fn test_set_size_persists() {
        let store = UserSettingsStore::new();
        store.set_size(ChatId(1), 800, 600);

        let settings = store.get_or_init(ChatId(1));
        assert_eq!((settings.width, settings.height), (800, 600));
        // style untouched by a size write
        assert_eq!(settings.style, ImageStyle::Anime);
    }

    #[test]
    fn test_set_style_without_prior_init() {
        let store = UserSettingsStore::new();
        store.set_style(ChatId(7), ImageStyle::Uhd);

        let settings = store.get_or_init(ChatId(7));
        assert_eq!(settings.style, ImageStyle::Uhd);
        assert_eq!((settings.width, settings.height), (1024, 1024));
    }

    #[test]
    fn test_users_are_independent() {
        let store = UserSettingsStore::new();
        store.set_size(ChatId(1), 512, 512);
        assert_eq!(store.get_or_init(ChatId(2)).width, 1024);
    }
}
