//! Statistics API access and the raw payload cache

pub mod bls;
pub mod cache;
pub mod http;
pub mod provider;

pub use bls::{BlsProvider, DEFAULT_API_URL};
pub use cache::{CacheKey, LoadedPayload, PayloadCache, PayloadSource};
pub use provider::{DataError, SeriesProvider, SeriesRequest};
