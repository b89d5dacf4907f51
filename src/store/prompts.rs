use std::collections::HashMap;
use std::sync::RwLock;

use sha2::{Digest, Sha256};

/// Length of the hex key attached to regenerate buttons. Collisions at this
/// length are last-write-wins.
const KEY_LEN: usize = 12;

/// Maps short prompt keys back to the original prompt text so a later
/// "regenerate" selection can recover it. Entries accumulate for the process
/// lifetime.
pub struct PromptRegistry {
    entries: RwLock<HashMap<String, String>>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Derives the stable short key for a prompt.
    pub fn key_for(prompt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prompt.as_bytes());
        let digest = hex::encode(hasher.finalize());
        digest[..KEY_LEN].to_string()
    }

    /// Stores the prompt under its derived key, overwriting any previous
    /// mapping for that key, and returns the key.
    pub fn register(&self, prompt: &str) -> String {
        let key = Self::key_for(prompt);
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.clone(), prompt.to_string());
        key
    }

    pub fn resolve(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap();
        entries.get(key).cloned()
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_resolve_round_trip() {
        let registry = PromptRegistry::new();
        let key = registry.register("a space cat in a suit");
        assert_eq!(key.len(), KEY_LEN);
        assert_eq!(registry.resolve(&key).as_deref(), Some("a space cat in a suit"));
    }

    #[test]
    fn test_key_is_stable() {
        assert_eq!(PromptRegistry::key_for("same"), PromptRegistry::key_for("same"));
        assert_ne!(PromptRegistry::key_for("one"), PromptRegistry::key_for("two"));
    }

    #[test]
    fn test_unknown_key_resolves_to_none() {
        let registry = PromptRegistry::new();
        assert!(registry.resolve("deadbeef0000").is_none());
    }

    #[test]
    fn test_reregister_overwrites() {
        let registry = PromptRegistry::new();
        let key = registry.register("prompt");
        registry.register("prompt");
        assert_eq!(registry.resolve(&key).as_deref(), Some("prompt"));
    }
}
