//! Query pipeline — the bridge's control flow, composed.
//!
//! A caller resolves its active languages, the registry hands back
//! clients, the fan-out executor runs one query per backend, and the
//! flattener merges whatever came back. Per-backend failure never aborts
//! a batch; the caller paginates the merged values for display and shows
//! the error summary alongside.

use std::collections::BTreeMap;

use tokio_util::sync::CancellationToken;

use prism_lsp::ClientRegistry;
use prism_types::{DocumentReport, LanguageKey, Range, SymbolMatch};

use crate::fanout::{self, Cancelled, OperationError};
use crate::flatten::{FlattenedResults, flatten};
use crate::resolve::resolve_symbol_range;

/// Search every requested language's backend for `query`, merging the
/// matches in stable language order.
pub async fn search_symbols(
    registry: &ClientRegistry,
    languages: &[LanguageKey],
    query: &str,
    cancel: &CancellationToken,
) -> Result<FlattenedResults<SymbolMatch>, Cancelled<Vec<SymbolMatch>>> {
    let clients = registry.clients_for(languages).await;
    let operations: BTreeMap<_, _> = clients
        .into_iter()
        .map(|(language, client)| {
            let query = query.to_string();
            (language, move || async move {
                client
                    .workspace_symbols(&query)
                    .await
                    .map_err(OperationError::from)
            })
        })
        .collect();

    let results = fanout::run(cancel, operations).await?;
    Ok(flatten(results))
}

/// Pull workspace diagnostics from every requested language's backend.
///
/// Each backend decides per document whether to send a full report or an
/// unchanged marker for `previous_result_id`; both variants pass through
/// so the caller can maintain its result-id bookkeeping.
pub async fn collect_diagnostics(
    registry: &ClientRegistry,
    languages: &[LanguageKey],
    previous_result_id: Option<&str>,
    cancel: &CancellationToken,
) -> Result<FlattenedResults<DocumentReport>, Cancelled<Vec<DocumentReport>>> {
    let clients = registry.clients_for(languages).await;
    let operations: BTreeMap<_, _> = clients
        .into_iter()
        .map(|(language, client)| {
            let previous = previous_result_id.map(ToString::to_string);
            (language, move || async move {
                client
                    .workspace_diagnostic(previous.as_deref())
                    .await
                    .map(|report| report.documents)
                    .map_err(OperationError::from)
            })
        })
        .collect();

    let results = fanout::run(cancel, operations).await?;
    Ok(flatten(results))
}

/// Upgrade one search result's range to its full extent.
///
/// A language whose client cannot be acquired keeps the range the search
/// already returned — refinement only ever improves precision.
pub async fn refine_match(
    registry: &ClientRegistry,
    language: &LanguageKey,
    symbol: &SymbolMatch,
) -> Range {
    match registry.client_for(language).await {
        Ok(client) => resolve_symbol_range(client.as_ref(), symbol).await,
        Err(e) => {
            tracing::debug!(
                language = %language,
                error = %e,
                "range refinement skipped: no client"
            );
            symbol.location.range
        }
    }
}
