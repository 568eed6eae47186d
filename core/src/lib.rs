//! Core engine for Prism.
//!
//! The pieces that make the bridge a bridge: the concurrent fan-out
//! executor, the keyed result flattener, the pagination engine, the symbol
//! range resolver, and the query pipeline that strings them together over
//! the `prism-lsp` client boundary.

pub mod fanout;
pub mod flatten;
pub mod paginate;
pub mod pipeline;
pub mod resolve;

pub use fanout::{Cancelled, KeyedResult, OperationError};
pub use flatten::{FlattenedResults, flatten};
pub use paginate::{PaginationResult, paginate};
pub use pipeline::{collect_diagnostics, refine_match, search_symbols};
pub use resolve::resolve_symbol_range;
