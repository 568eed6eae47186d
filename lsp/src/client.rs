//! The per-language client trait and its error taxonomy.

use std::sync::Arc;

use async_trait::async_trait;

use prism_types::{
    DocumentSymbol, LanguageKey, Range, SymbolMatch, TokenCategory, TokenPosition,
    WorkspaceDiagnosticReport,
};

/// JSON-RPC code a server answers with when it does not implement a method.
const METHOD_NOT_FOUND: i64 = -32601;

/// An error from one backend client.
///
/// Every variant is scoped to a single language's backend; callers treat
/// these as per-operation failures and never let one abort a batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The transport failed (process died, pipe closed, timeout).
    #[error("backend transport failure: {message}")]
    Transport { message: String },

    /// The backend answered with an RPC-level error.
    #[error("backend RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The backend does not implement the requested method.
    ///
    /// Detected from the known method-not-found signatures and re-surfaced
    /// with an explanation instead of raw transport noise.
    #[error("backend does not support '{method}'; this language contributes no results")]
    UnsupportedMethod { method: String },

    /// No backend is configured for the language at all.
    #[error("no backend configured for language '{language}'")]
    Unconfigured { language: LanguageKey },
}

impl ClientError {
    /// Classify a raw RPC error for `method`.
    ///
    /// Servers signal a missing capability either with the standard
    /// method-not-found code or with an "unhandled method" message; both
    /// become [`ClientError::UnsupportedMethod`]. Everything else passes
    /// through as [`ClientError::Rpc`].
    #[must_use]
    pub fn from_rpc(method: &str, code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_ascii_lowercase();
        if code == METHOD_NOT_FOUND
            || lowered.contains("unhandled method")
            || lowered.contains("method not found")
        {
            Self::UnsupportedMethod {
                method: method.to_string(),
            }
        } else {
            Self::Rpc { code, message }
        }
    }

    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedMethod { .. })
    }
}

/// One language's backend, as the bridge core sees it.
///
/// Implementations own the transport and its request/response multiplexing;
/// every method here must tolerate concurrent calls from simultaneous
/// fan-out batches. All calls are fallible and none are retried at this
/// layer — retry and backoff are the collaborator's concern.
#[async_trait]
pub trait LanguageClient: Send + Sync {
    /// Project-wide fuzzy symbol search. Positions may be imprecise.
    async fn workspace_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, ClientError>;

    /// The full symbol tree of one document.
    async fn document_symbols(&self, uri: &str) -> Result<Vec<DocumentSymbol>, ClientError>;

    /// Classified tokens of `uri` within `range`, restricted to
    /// `categories`.
    async fn semantic_tokens(
        &self,
        uri: &str,
        categories: &[TokenCategory],
        range: Range,
    ) -> Result<Vec<TokenPosition>, ClientError>;

    /// Pull workspace-wide diagnostics, optionally resuming from a
    /// previous result id so unchanged documents come back as markers.
    async fn workspace_diagnostic(
        &self,
        previous_result_id: Option<&str>,
    ) -> Result<WorkspaceDiagnosticReport, ClientError>;

    /// Release the backend. Called once by the registry's close-all path.
    async fn shutdown(&self) -> Result<(), ClientError>;
}

/// Constructs and connects backend clients on first use.
///
/// The external collaborator behind the registry: it knows how to turn a
/// language key into a live transport (spawn a process, open a socket,
/// whatever the deployment needs). The registry guarantees `connect` is
/// called at most once per language per registry lifetime.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(
        &self,
        language: &LanguageKey,
    ) -> Result<Arc<dyn LanguageClient>, ClientError>;
}
