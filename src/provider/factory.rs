use std::sync::Arc;

use super::SourceProvider;
use super::config::{ProviderConfig, ResponseFormat};
use super::error::ProviderResult;
use super::http::HttpProvider;
use super::parse::MarkupSelectors;
use crate::cache::QuoteCache;

/// Builds the [`SourceProvider`] implementation for the configured response format.
pub fn build_provider(
    config: ProviderConfig,
    cache: Arc<dyn QuoteCache>,
) -> ProviderResult<Arc<dyn SourceProvider>> {
    let provider = match config.format {
        ResponseFormat::Json => HttpProvider::json(config, cache)?,
        ResponseFormat::Markup => HttpProvider::markup(config, cache, &MarkupSelectors::default())?,
    };
    Ok(Arc::new(provider))
}

/// Builds every configured provider over one shared cache.
pub fn build_providers(
    configs: impl IntoIterator<Item = ProviderConfig>,
    cache: Arc<dyn QuoteCache>,
) -> ProviderResult<Vec<Arc<dyn SourceProvider>>> {
    configs
        .into_iter()
        .map(|config| build_provider(config, Arc::clone(&cache)))
        .collect()
}
