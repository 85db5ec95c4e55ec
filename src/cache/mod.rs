//! Cache module for the provider's one-call document
//!
//! This module keeps a single raw JSON document in a [`CacheStore`] and
//! refreshes it lazily: a render that finds the document older than the TTL,
//! or empty, fetches a new one before decoding. A failed refresh leaves the
//! empty sentinel behind so the next render tries again.

mod manager;
mod store;

pub use manager::{CacheError, WeatherCache, DEFAULT_TTL_SECONDS};
pub use store::{CacheStore, CachedDocument, FileStore, MemoryStore};
