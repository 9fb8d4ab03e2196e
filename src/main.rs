//! `mrp-guard` CLI entrypoint.
//!
//! Reads a verification request as JSON from the file given as the first argument (or
//! stdin), verifies it against the sources configured in `MRP_PROVIDERS` and prints the
//! result as JSON.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use mimalloc::MiMalloc;

use mrp_guard::cache::{MemoryQuoteCache, QuoteCache};
use mrp_guard::config::Config;
use mrp_guard::provider::build_providers;
use mrp_guard::{Aggregator, MatchingCascade, PriceVerifier, VerificationRequest};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    if config.providers.is_empty() {
        tracing::warn!("No MRP_PROVIDERS configured, every verification will need review");
    }

    let cache: Arc<dyn QuoteCache> =
        Arc::new(MemoryQuoteCache::with_capacity(config.cache_capacity));
    let providers = build_providers(config.provider_configs(), cache)?;

    tracing::info!(
        providers = providers.len(),
        cache_capacity = config.cache_capacity,
        "MRP verifier ready"
    );

    let verifier = PriceVerifier::new(Aggregator::new(providers))
        .with_cascade(MatchingCascade::new(config.source_weights()));

    let request = read_request(std::env::args().nth(1).as_deref())?;
    let result = verifier.verify(&request).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn read_request(path: Option<&str>) -> anyhow::Result<VerificationRequest> {
    let raw = match path {
        Some(path) if path != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path))?,
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read request from stdin")?;
            raw
        }
    };
    serde_json::from_str(&raw).context("request is not a valid verification request")
}
