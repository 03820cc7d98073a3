//! Connection details sinks.

use async_trait::async_trait;
use std::collections::HashMap;
use steward_core::ConnectionDetails;
use steward_error::StewardResult;
use steward_interface::ConnectionDetailsSink;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Keeps published connection details in memory, merged per resource.
#[derive(Debug, Default)]
pub struct InMemoryConnectionDetailsSink {
    published: RwLock<HashMap<String, ConnectionDetails>>,
}

impl InMemoryConnectionDetailsSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far for `resource`.
    pub async fn get(&self, resource: &str) -> Option<ConnectionDetails> {
        self.published.read().await.get(resource).cloned()
    }

    /// Names of resources with published details.
    pub async fn resources(&self) -> Vec<String> {
        let mut names: Vec<String> = self.published.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl ConnectionDetailsSink for InMemoryConnectionDetailsSink {
    #[instrument(skip(self, details), fields(keys = details.len()))]
    async fn publish(&self, resource: &str, details: ConnectionDetails) -> StewardResult<()> {
        self.published
            .write()
            .await
            .entry(resource.to_string())
            .or_default()
            .extend(details);
        debug!("Published connection details");
        Ok(())
    }
}
