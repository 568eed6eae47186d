//! Diagnostics and workspace diagnostic reports.

use crate::geometry::Range;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

impl Severity {
    /// Convert from LSP numeric severity (1=Error, 2=Warning, 3=Info, 4=Hint).
    ///
    /// Returns `None` for values outside the LSP-defined range.
    /// Callers (boundary code) decide the fallback policy.
    #[must_use]
    pub fn from_lsp(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Information),
            4 => Some(Self::Hint),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_error(self) -> bool {
        self == Self::Error
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Information => "info",
            Self::Hint => "hint",
        }
    }
}

/// A single diagnostic from a language server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub range: Range,
    pub message: String,
    /// Source of the diagnostic (e.g. "rustc", "gopls"). Resolved to a
    /// concrete string at the boundary.
    pub source: String,
}

impl Diagnostic {
    /// Format as `uri:line:col: severity: [source] message` (1-indexed).
    #[must_use]
    pub fn display_with_uri(&self, uri: &str) -> String {
        format!(
            "{uri}:{}: {}: [{}] {}",
            self.range.start,
            self.severity.label(),
            self.source,
            self.message,
        )
    }
}

/// Per-document slice of a workspace diagnostic report.
///
/// Backends answer either with a full set of diagnostics for a document or
/// with a marker that nothing changed since the result id the caller sent.
/// The wire tag decides the variant once, at the boundary; business logic
/// matches on this enum and never re-inspects payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentReport {
    Full {
        uri: String,
        result_id: Option<String>,
        diagnostics: Vec<Diagnostic>,
    },
    Unchanged {
        uri: String,
        result_id: String,
    },
}

impl DocumentReport {
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Full { uri, .. } | Self::Unchanged { uri, .. } => uri,
        }
    }

    /// Diagnostics carried by this report; empty for `Unchanged`.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Full { diagnostics, .. } => diagnostics,
            Self::Unchanged { .. } => &[],
        }
    }
}

/// Everything one backend reported for a workspace diagnostic pull.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceDiagnosticReport {
    pub documents: Vec<DocumentReport>,
}

impl WorkspaceDiagnosticReport {
    /// Number of error-level diagnostics across all full documents.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.documents
            .iter()
            .flat_map(|d| d.diagnostics())
            .filter(|d| d.severity.is_error())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
