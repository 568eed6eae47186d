//! Backend client boundary for Prism.
//!
//! The bridge core never speaks JSON-RPC itself. It talks to one
//! [`LanguageClient`] per language — an external collaborator that owns the
//! transport (process, framing, id matching) — and acquires those clients
//! through the [`ClientRegistry`] multiplexer. This crate defines that
//! boundary: the client and factory traits, the error taxonomy, the wire
//! union decoding used by collaborator implementations, and the registry.

pub mod wire;

mod client;
mod config;
mod registry;

pub use client::{ClientError, ClientFactory, LanguageClient};
pub use config::{BackendConfig, BridgeConfig};
pub use registry::ClientRegistry;
