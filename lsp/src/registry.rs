//! Client registry — the language/client multiplexer.
//!
//! One registry serves every concurrent caller in the bridge process. It
//! lazily connects a backend the first time its language is requested,
//! caches the client, and shares it across simultaneous fan-out batches.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use prism_types::LanguageKey;

use crate::client::{ClientError, ClientFactory, LanguageClient};
use crate::config::BridgeConfig;

/// Resolves languages to live backend clients.
///
/// The registry map is the only shared mutable state in the core. It is
/// guarded by one async mutex held across construction, so at most one
/// client per language is ever created — two fan-out batches racing to
/// first-use the same language serialize on the connect.
pub struct ClientRegistry {
    config: BridgeConfig,
    factory: Box<dyn ClientFactory>,
    clients: Mutex<HashMap<LanguageKey, Arc<dyn LanguageClient>>>,
}

impl ClientRegistry {
    #[must_use]
    pub fn new(config: BridgeConfig, factory: Box<dyn ClientFactory>) -> Self {
        Self {
            config,
            factory,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// All configured languages in stable (sorted) order.
    #[must_use]
    pub fn configured_languages(&self) -> Vec<LanguageKey> {
        self.config.active_languages()
    }

    /// The client for one language, connecting it on first use.
    pub async fn client_for(
        &self,
        language: &LanguageKey,
    ) -> Result<Arc<dyn LanguageClient>, ClientError> {
        if !self.config.is_configured(language) {
            return Err(ClientError::Unconfigured {
                language: language.clone(),
            });
        }

        let mut clients = self.clients.lock().await;
        if let Some(existing) = clients.get(language) {
            return Ok(existing.clone());
        }

        tracing::info!(language = %language, "connecting backend");
        let client = self.factory.connect(language).await?;
        clients.insert(language.clone(), client.clone());
        Ok(client)
    }

    /// Clients for every requested language that can be served.
    ///
    /// Partial success: a language whose backend cannot be constructed is
    /// logged and omitted rather than failing the whole call. The caller
    /// decides whether an empty map is fatal. Duplicate requests collapse
    /// to one entry.
    pub async fn clients_for(
        &self,
        languages: &[LanguageKey],
    ) -> HashMap<LanguageKey, Arc<dyn LanguageClient>> {
        let mut out: HashMap<LanguageKey, Arc<dyn LanguageClient>> = HashMap::new();
        for language in languages {
            if out.contains_key(language) {
                continue;
            }
            match self.client_for(language).await {
                Ok(client) => {
                    out.insert(language.clone(), client);
                }
                Err(e) => {
                    tracing::warn!(
                        language = %language,
                        error = %e,
                        "skipping language: backend unavailable"
                    );
                }
            }
        }
        out
    }

    /// Shut down every cached client and clear the registry.
    ///
    /// Idempotent: a second call (or a call with nothing registered) is a
    /// no-op. Languages may be lazily re-connected afterwards.
    pub async fn close_all(&self) {
        let clients = std::mem::take(&mut *self.clients.lock().await);
        for (language, client) in clients {
            match client.shutdown().await {
                Ok(()) => tracing::debug!(language = %language, "backend closed"),
                Err(e) => {
                    tracing::warn!(language = %language, error = %e, "backend shutdown failed");
                }
            }
        }
    }
}
