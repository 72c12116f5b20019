use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::{LlmMatchScorer, MatchScorer, MatchingProxy};
use crate::store::TalentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend. `PgStore` in production, `MemoryStore` for `memory://`.
    pub store: Arc<dyn TalentStore>,
    pub proxy: MatchingProxy,
    pub config: Config,
}

impl AppState {
    /// Wires the gateway-backed scorer to `store`.
    pub fn new(config: Config, store: Arc<dyn TalentStore>) -> Result<Self> {
        let llm = LlmClient::new(
            config.llm_api_url.clone(),
            config.llm_api_key.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        )?;
        let scorer: Arc<dyn MatchScorer> = Arc::new(LlmMatchScorer(llm));
        Ok(Self::with_scorer(config, store, scorer))
    }

    pub fn with_scorer(
        config: Config,
        store: Arc<dyn TalentStore>,
        scorer: Arc<dyn MatchScorer>,
    ) -> Self {
        let proxy = MatchingProxy::new(store.clone(), scorer, config.match_pool_size);
        Self {
            store,
            proxy,
            config,
        }
    }
}
