//! Localized message catalog for outgoing tweets.
//!
//! The pipeline replies to reporters in their own language when it can. Each
//! message key (invite, confirmation, thanks, ...) maps to a group of
//! candidate texts keyed by language code; resolution walks the caller's
//! language codes in preference order and falls back to the configured
//! default language.

use std::collections::HashMap;

use log::debug;

use crate::config::TwitterSection;

/// Immutable lookup table of message key → language code → localized string.
///
/// Built once from the `twitter` configuration section; only object-valued
/// entries become groups, and only string-valued leaves become messages.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    groups: HashMap<String, HashMap<String, String>>,
    default_language: Option<String>,
}

impl MessageCatalog {
    /// Builds the catalog from the configuration section.
    pub fn from_section(twitter: &TwitterSection) -> Self {
        let mut groups = HashMap::new();
        for (name, group) in twitter.message_groups() {
            let mut translations = HashMap::new();
            for (language, value) in group {
                if let Some(text) = value.as_str() {
                    translations.insert(language.clone(), text.to_string());
                }
            }
            groups.insert(name.to_string(), translations);
        }
        debug!("Message catalog built with {} group(s)", groups.len());
        Self {
            groups,
            default_language: twitter.default_language.clone(),
        }
    }

    /// Number of message groups in the catalog.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the catalog holds no message groups at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Resolves the localized text for `key` against an ordered sequence of
    /// language codes.
    ///
    /// The codes are tried in order; `None` entries are skipped. The first
    /// code present in the group wins. When no code matches, the group's
    /// default-language entry is returned instead.
    ///
    /// # Returns
    ///
    /// - `Some(text)`: The first matching translation, or the default-language one
    /// - `None`: If `key` is not in the catalog or nothing resolves; absence
    ///   is an expected outcome, not an error
    pub fn resolve(&self, key: &str, codes: &[Option<&str>]) -> Option<&str> {
        let group = self.groups.get(key)?;

        for code in codes.iter().flatten() {
            if let Some(text) = group.get(*code) {
                return Some(text.as_str());
            }
        }

        self.default_language
            .as_ref()
            .and_then(|language| group.get(language))
            .map(String::as_str)
    }
}
