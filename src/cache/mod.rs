//! Cache module - two-tier template caching.
//!
//! ## Architecture
//!
//! - `LocalCache` - per-context map, no locking, dropped with the context
//! - `SharedCache` - group-namespaced cache shared by all contexts
//! - `MokaSharedCache` - in-process shared cache, one Moka cache per group
//! - `CacheLayer` - read-through combination of both tiers
//!
//! ## Usage
//!
//! ```rust,ignore
//! let shared: Arc<dyn SharedCache> = Arc::new(MokaSharedCache::new(CacheConfig::default()));
//! let mut layer = CacheLayer::new(Some(shared), "GLOSSA_");
//!
//! if layer.get(language, &key).is_none() {
//!     layer.put(language, &key, &template);
//! }
//! ```

mod config;
mod group;
mod layer;
mod local;
mod shared;

pub use config::CacheConfig;
pub use group::GroupCache;
pub use layer::{CacheLayer, CacheStats, TRANSLATION_MARKER, cache_group};
pub use local::LocalCache;
pub use shared::{MokaSharedCache, SharedCache};
