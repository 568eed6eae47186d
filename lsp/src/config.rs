//! Typed configuration shapes for the bridge's backends.
//!
//! The embedding process loads and parses its config file; this crate only
//! defines the validated shapes it deserializes into. Deserialization IS
//! validation — there is no separate check step.

use std::collections::HashMap;

use serde::Deserialize;

use prism_types::LanguageKey;

/// Configuration for the whole backend fleet, keyed by language.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeConfig {
    /// Per-language backend configurations, keyed by language (e.g. "go").
    #[serde(default)]
    pub backends: HashMap<LanguageKey, BackendConfig>,
}

impl BridgeConfig {
    #[must_use]
    pub fn is_configured(&self, language: &LanguageKey) -> bool {
        self.backends.contains_key(language)
    }

    /// All configured languages in stable (sorted) order.
    #[must_use]
    pub fn active_languages(&self) -> Vec<LanguageKey> {
        let mut languages: Vec<LanguageKey> = self.backends.keys().cloned().collect();
        languages.sort();
        languages
    }
}

/// Configuration for a single language backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Executable command (e.g. "gopls").
    pub command: String,
    /// Arguments to pass to the command.
    #[serde(default)]
    pub args: Vec<String>,
    /// LSP language identifier (e.g. "go", "python").
    pub language_id: String,
    /// File extensions this backend handles (e.g. `["go"]`).
    #[serde(default)]
    pub file_extensions: Vec<String>,
    /// Files that indicate a workspace root (e.g. `["go.mod"]`).
    #[serde(default)]
    pub root_markers: Vec<String>,
}
