use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::realtime::EventHub;

/// Explicitly constructed service context handed to every handler.
/// Nothing here is global: tests build their own instance against a
/// throwaway database.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub hub: EventHub,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            hub: EventHub::new(),
        })
    }

    /// Drop realtime listeners so connected clients see their stream
    /// end during shutdown.
    pub fn teardown(&self) {
        self.hub.close_all();
    }
}
