//! Concurrent fan-out over every registered source.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, instrument};

use crate::model::CandidateProduct;
use crate::provider::SourceProvider;

/// Queries all providers at once and keeps whatever came back.
#[derive(Clone, Default)]
pub struct Aggregator {
    providers: Vec<Arc<dyn SourceProvider>>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("providers", &self.provider_ids())
            .finish()
    }
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn SourceProvider>>) -> Self {
        Self { providers }
    }

    pub fn with_provider(mut self, provider: Arc<dyn SourceProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Fetches from every provider concurrently and waits for all of them.
    ///
    /// No branch is cancelled early. Sources answering `None` are dropped; an empty
    /// result is valid and handled downstream.
    #[instrument(skip(self, query), fields(query_len = query.len(), providers = self.providers.len()))]
    pub async fn gather_candidates(&self, query: &str) -> Vec<CandidateProduct> {
        let fetches = self.providers.iter().map(|provider| async move {
            let candidate = provider.fetch(query).await;
            (provider.id(), candidate)
        });

        let results = join_all(fetches).await;

        let mut candidates = Vec::with_capacity(results.len());
        for (source, candidate) in results {
            match candidate {
                Some(candidate) => candidates.push(candidate),
                None => debug!(source, "Source returned no candidate"),
            }
        }

        debug!(
            gathered = candidates.len(),
            "Candidate gathering complete"
        );
        candidates
    }
}
