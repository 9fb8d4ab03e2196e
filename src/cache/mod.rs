//! Provider-level lookup cache.
//!
//! [`QuoteCache`] is the seam: the pipeline only needs `get` and `set` with a TTL, so the
//! backing store (in-process, networked) is a deployment choice. [`MemoryQuoteCache`] is
//! the bundled implementation.

pub mod error;
pub mod memory;
pub mod quote;


pub use error::{CacheError, CacheResult};
pub use memory::MemoryQuoteCache;
pub use quote::QuoteCache;
