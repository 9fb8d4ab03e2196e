use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::SourceProvider;
use crate::model::CandidateProduct;

/// Provider returning a fixed answer, optionally after a delay.
#[derive(Debug)]
pub struct StaticProvider {
    id: String,
    candidate: Option<CandidateProduct>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl StaticProvider {
    /// Always answers with `candidate`.
    pub fn returning(candidate: CandidateProduct) -> Self {
        Self {
            id: candidate.source_id.clone(),
            candidate: Some(candidate),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always answers "no candidate", like an unreachable source.
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            candidate: None,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shared counter of `fetch` invocations.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn into_arc(self) -> Arc<dyn SourceProvider> {
        Arc::new(self)
    }
}

#[async_trait]
impl SourceProvider for StaticProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self, _query: &str) -> Option<CandidateProduct> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.candidate.clone()
    }
}

/// Provider whose `fetch` panics, standing in for a buggy parser.
#[derive(Debug)]
pub struct PanickingProvider {
    id: String,
}

impl PanickingProvider {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

#[async_trait]
impl SourceProvider for PanickingProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self, query: &str) -> Option<CandidateProduct> {
        panic!("listing parser crashed on query '{}'", query);
    }
}
