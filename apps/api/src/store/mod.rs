//! The employee attribute store: where raw HR tables come from.
//!
//! The scoring pipeline only sees [`AttributeStore`]. `AppState` holds an
//! `Arc<dyn AttributeStore>`, built at startup as a [`PgAttributeStore`],
//! optionally wrapped in a [`CachedAttributeStore`].

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::employee::PopulationSnapshot;

pub mod cache;
#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use cache::CachedAttributeStore;
pub use postgres::PgAttributeStore;

#[async_trait]
pub trait AttributeStore: Send + Sync {
    /// Reads every raw table the pipeline needs as one consistent snapshot.
    async fn fetch_snapshot(&self) -> Result<PopulationSnapshot, AppError>;

    /// Cheap connectivity probe.
    async fn healthcheck(&self) -> Result<(), AppError>;
}
