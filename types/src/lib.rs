//! Core domain types for Prism.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the bridge:
//! positions and ranges, symbol kinds and matches, semantic token
//! categories, and diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

mod diagnostic;
mod geometry;
mod symbol;
mod token;

pub use diagnostic::{Diagnostic, DocumentReport, Severity, WorkspaceDiagnosticReport};
pub use geometry::{Location, Position, Range};
pub use symbol::{DocumentSymbol, SymbolKind, SymbolMatch};
pub use token::{TokenCategory, TokenPosition};

/// Identifies a programming language served by one backend.
///
/// Opaque to the bridge — it is a map key, never inspected. Ordering is
/// lexicographic on the underlying string, which gives every keyed
/// collection in the system a stable iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageKey(String);

impl LanguageKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_key_ordering_is_lexicographic() {
        let mut keys = vec![
            LanguageKey::from("typescript"),
            LanguageKey::from("go"),
            LanguageKey::from("python"),
        ];
        keys.sort();
        assert_eq!(
            keys.iter().map(LanguageKey::as_str).collect::<Vec<_>>(),
            vec!["go", "python", "typescript"]
        );
    }

    #[test]
    fn test_language_key_serde_is_transparent() {
        let key = LanguageKey::from("rust");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"rust\"");
        let back: LanguageKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_language_key_display() {
        assert_eq!(LanguageKey::from("go").to_string(), "go");
    }
}
