//! Keyed result flattener.
//!
//! Collapses a fan-out batch into one ordered value list plus a tagged
//! error list. Keys are iterated in their sorted order, so the output is
//! reproducible no matter which backends finished first.

use std::collections::BTreeMap;

use prism_types::LanguageKey;

use crate::fanout::{KeyedResult, OperationError};

/// A batch's merged values and its per-language failures.
///
/// Partial success is the normal case: if two of five backends fail, the
/// values of the healthy three are all here and the two failures are
/// visible in `errors`.
#[derive(Debug, PartialEq)]
pub struct FlattenedResults<V> {
    /// All successful values, concatenated in sorted key order.
    pub values: Vec<V>,
    /// One entry per failed key, in the same sorted order.
    pub errors: Vec<(LanguageKey, OperationError)>,
}

impl<V> FlattenedResults<V> {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// One line per failed backend, for user-visible error summaries.
    #[must_use]
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|(language, error)| format!("{language}: {error}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<V> Default for FlattenedResults<V> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Merge a keyed batch into a [`FlattenedResults`].
///
/// Pure and total: empty value lists contribute nothing, an empty input
/// map yields an empty output, and iteration order is the map's sorted
/// key order.
#[must_use]
pub fn flatten<V>(results: BTreeMap<LanguageKey, KeyedResult<Vec<V>>>) -> FlattenedResults<V> {
    let mut flattened = FlattenedResults::default();
    for (key, result) in results {
        match result.outcome {
            Ok(values) => flattened.values.extend(values),
            Err(error) => flattened.errors.push((key, error)),
        }
    }
    flattened
}
