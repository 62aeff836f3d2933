use std::sync::Arc;

use crate::store::AttributeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Source of raw employee attributes. Postgres in production, optionally
    /// wrapped by the Redis snapshot cache.
    pub store: Arc<dyn AttributeStore>,
}
