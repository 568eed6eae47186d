//! Pagination engine.
//!
//! Windows an ordered slice by offset/limit and computes the display
//! metadata the presentation layer renders. Deterministic for any input:
//! negative offsets clamp to zero, out-of-range offsets yield an empty
//! window, and the same inputs always produce the same window.

/// Display metadata for one window over a result list.
///
/// `offset`/`limit` echo the (clamped) inputs and are 0-based;
/// `start`/`end` are 1-based inclusive bounds over the windowed slice, or
/// zero when the window is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationResult {
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
    pub count: usize,
    pub start: usize,
    pub end: usize,
    pub has_more: bool,
    pub has_previous: bool,
}

impl PaginationResult {
    /// Render the window description shown above result lists.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.count == 0 && self.offset > 0 && self.offset >= self.total {
            format!(
                "No results (offset {} exceeds total {})",
                self.offset, self.total
            )
        } else if self.offset == 0 && self.count == self.total {
            format!("Found {} results", self.total)
        } else {
            format!(
                "Showing results {}-{} of {} total",
                self.start, self.end, self.total
            )
        }
    }
}

/// Window `items` by `offset`/`limit`.
///
/// Negative offsets clamp to 0; a non-positive limit yields an empty
/// window. An offset at or past the end yields an empty window that still
/// reports `has_previous` so callers can offer a way back.
#[must_use]
pub fn paginate<T>(items: &[T], offset: i64, limit: i64) -> (&[T], PaginationResult) {
    let total = items.len();
    let offset = usize::try_from(offset.max(0)).unwrap_or(0);

    if limit <= 0 || offset >= total {
        let result = PaginationResult {
            offset,
            limit: usize::try_from(limit.max(0)).unwrap_or(0),
            total,
            count: 0,
            start: 0,
            end: 0,
            has_more: false,
            has_previous: offset > 0,
        };
        return (&[], result);
    }

    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let end_index = offset.saturating_add(limit).min(total);
    let window = &items[offset..end_index];

    let result = PaginationResult {
        offset,
        limit,
        total,
        count: window.len(),
        start: offset + 1,
        end: offset + window.len(),
        has_more: end_index < total,
        has_previous: offset > 0,
    };
    (window, result)
}
