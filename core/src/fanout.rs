//! Concurrent fan-out executor.
//!
//! Runs one operation per language on its own task and joins the results
//! into a keyed map. Per-key failure is isolated: a failing backend never
//! suppresses, delays, or cancels a sibling. The whole batch shares one
//! cancellation token; cancelling aborts the wait, not the in-flight
//! backend calls, which are drained on a detached task so nothing leaks.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use futures_util::FutureExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use prism_lsp::ClientError;
use prism_types::LanguageKey;

/// One language's outcome within a batch.
///
/// `Result` realizes the value/error mutual exclusivity the batch contract
/// requires — an entry is either a value or an error, by construction.
#[derive(Debug)]
pub struct KeyedResult<V> {
    pub key: LanguageKey,
    pub outcome: Result<V, OperationError>,
}

impl<V> KeyedResult<V> {
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.outcome.as_ref().ok()
    }

    #[must_use]
    pub fn error(&self) -> Option<&OperationError> {
        self.outcome.as_ref().err()
    }
}

/// Why one operation produced no value.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] ClientError),

    /// The operation itself panicked. Confined to its own task; siblings
    /// are unaffected.
    #[error("operation panicked: {message}")]
    Panicked { message: String },
}

/// The batch was cancelled before every operation reported.
///
/// Carries whatever results had already arrived. Keys whose tasks had not
/// reported are simply absent — never synthesized as partial errors.
pub struct Cancelled<V> {
    pub partial: BTreeMap<LanguageKey, KeyedResult<V>>,
    pub total: usize,
}

impl<V> fmt::Display for Cancelled<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "batch cancelled with {} of {} operations reported",
            self.partial.len(),
            self.total
        )
    }
}

impl<V> fmt::Debug for Cancelled<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cancelled")
            .field("reported", &self.partial.len())
            .field("total", &self.total)
            .finish()
    }
}

impl<V> std::error::Error for Cancelled<V> {}

/// Run every operation concurrently and join the outcomes by key.
///
/// Blocks until all operations report, unless `cancel` fires first — then
/// it returns immediately with the already-arrived subset inside
/// [`Cancelled`], and the abandoned tasks are awaited on a detached drain
/// task. Without cancellation the output has exactly one entry per input
/// key; scheduling itself cannot fail at this layer.
///
/// No ordering is guaranteed between keys' completion, and no operation is
/// ever cancelled because a sibling failed.
pub async fn run<V, F, Fut>(
    cancel: &CancellationToken,
    operations: BTreeMap<LanguageKey, F>,
) -> Result<BTreeMap<LanguageKey, KeyedResult<V>>, Cancelled<V>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, OperationError>> + Send + 'static,
    V: Send + 'static,
{
    let total = operations.len();
    let (tx, mut rx) = mpsc::channel::<KeyedResult<V>>(total.max(1));

    let mut drain = Vec::with_capacity(total);
    for (key, operation) in operations {
        let tx = tx.clone();
        let future = operation();
        drain.push(tokio::spawn(async move {
            let outcome = match std::panic::AssertUnwindSafe(future).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(panic) => Err(OperationError::Panicked {
                    message: panic_message(panic.as_ref()),
                }),
            };
            // Receiver is gone once the batch is cancelled; late results
            // are dropped.
            let _ = tx.send(KeyedResult { key, outcome }).await;
        }));
    }
    drop(tx);

    let mut results = BTreeMap::new();
    while results.len() < total {
        tokio::select! {
            () = cancel.cancelled() => {
                tokio::spawn(async move {
                    for handle in drain {
                        let _ = handle.await;
                    }
                });
                return Err(Cancelled {
                    partial: results,
                    total,
                });
            }
            received = rx.recv() => match received {
                Some(result) => {
                    results.insert(result.key.clone(), result);
                }
                None => break,
            },
        }
    }

    for handle in drain {
        let _ = handle.await;
    }
    Ok(results)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use futures_util::future::BoxFuture;

    /// Boxed operation type so one map can hold heterogeneous closures.
    type Op = Box<dyn FnOnce() -> BoxFuture<'static, Result<String, OperationError>>>;

    fn key(name: &str) -> LanguageKey {
        LanguageKey::from(name)
    }

    fn ok(value: &str) -> Op {
        let value = value.to_string();
        Box::new(move || async move { Ok(value) }.boxed())
    }

    fn err(message: &str) -> Op {
        let message = message.to_string();
        Box::new(move || {
            async move {
                Err(OperationError::Backend(ClientError::Transport { message }))
            }
            .boxed()
        })
    }

    fn stuck() -> Op {
        Box::new(|| {
            async {
                std::future::pending::<()>().await;
                unreachable!()
            }
            .boxed()
        })
    }

    #[tokio::test]
    async fn test_one_entry_per_key() {
        let cancel = CancellationToken::new();
        let mut operations: BTreeMap<LanguageKey, Op> = BTreeMap::new();
        for name in ["go", "python", "rust", "typescript"] {
            operations.insert(key(name), ok(name));
        }

        let results = run(&cancel, operations).await.unwrap();
        assert_eq!(results.len(), 4);
        for (k, result) in &results {
            assert_eq!(result.value(), Some(&k.as_str().to_string()));
            assert!(result.error().is_none());
        }
    }

    #[tokio::test]
    async fn test_failure_is_isolated_per_key() {
        let cancel = CancellationToken::new();
        let mut operations: BTreeMap<LanguageKey, Op> = BTreeMap::new();
        operations.insert(key("go"), ok("A"));
        operations.insert(key("ts"), err("boom"));

        let results = run(&cancel, operations).await.unwrap();
        assert_eq!(results.len(), 2);

        let go = &results[&key("go")];
        assert_eq!(go.value(), Some(&"A".to_string()));
        assert!(go.error().is_none());

        let ts = &results[&key("ts")];
        assert!(ts.value().is_none());
        assert!(ts.error().unwrap().to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_empty_batch_returns_empty_map() {
        let cancel = CancellationToken::new();
        let operations: BTreeMap<LanguageKey, Op> = BTreeMap::new();
        let results = run(&cancel, operations).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_panic_confined_to_its_key() {
        let cancel = CancellationToken::new();
        let mut operations: BTreeMap<LanguageKey, Op> = BTreeMap::new();
        operations.insert(key("go"), ok("fine"));
        operations.insert(
            key("ts"),
            Box::new(|| async { panic!("backend exploded") }.boxed()),
        );

        let results = run(&cancel, operations).await.unwrap();
        assert_eq!(results[&key("go")].value(), Some(&"fine".to_string()));
        match results[&key("ts")].error().unwrap() {
            OperationError::Panicked { message } => {
                assert!(message.contains("backend exploded"));
            }
            OperationError::Backend(other) => panic!("expected panic error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_cancellation_returns_partial_results() {
        let cancel = CancellationToken::new();
        let mut operations: BTreeMap<LanguageKey, Op> = BTreeMap::new();
        operations.insert(key("go"), ok("done"));
        operations.insert(key("ts"), stuck());

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let err = run(&cancel, operations).await.unwrap_err();
        assert_eq!(err.total, 2);
        assert_eq!(err.partial.len(), 1);
        assert!(err.partial.contains_key(&key("go")));
        assert!(!err.partial.contains_key(&key("ts")));
        assert!(err.to_string().contains("1 of 2"));
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_returns_immediately() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut operations: BTreeMap<LanguageKey, Op> = BTreeMap::new();
        operations.insert(key("go"), stuck());

        let err = run(&cancel, operations).await.unwrap_err();
        assert_eq!(err.total, 1);
        assert!(err.partial.is_empty());
    }
}
