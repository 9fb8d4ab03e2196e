use crate::text::normalize_name;

/// Prefix shared by every provider cache key.
pub const CACHE_KEY_PREFIX: &str = "mrp";

/// BLAKE3 of the normalized query.
#[inline]
pub fn hash_query(normalized_query: &str) -> blake3::Hash {
    blake3::hash(normalized_query.as_bytes())
}

/// Cache key for a provider lookup: `mrp:{source}:{hex(blake3(normalized query))}`.
///
/// The query is normalized here so `"Dolo-650"` and `"dolo 650"` share an entry.
pub fn cache_key(source_id: &str, query: &str) -> String {
    let hash = hash_query(&normalize_name(query));
    format!("{}:{}:{}", CACHE_KEY_PREFIX, source_id, hash.to_hex())
}
