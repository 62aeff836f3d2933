use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::employee::PopulationSnapshot;
use crate::store::AttributeStore;

/// Fixed snapshot for tests. Can also stand in for an unreachable source.
pub struct InMemoryAttributeStore {
    snapshot: Option<PopulationSnapshot>,
    fetches: AtomicUsize,
}

impl InMemoryAttributeStore {
    pub fn new(snapshot: PopulationSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            snapshot: None,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttributeStore for InMemoryAttributeStore {
    async fn fetch_snapshot(&self) -> Result<PopulationSnapshot, AppError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.snapshot
            .clone()
            .ok_or_else(|| AppError::SourceUnavailable("in-memory store offline".to_string()))
    }

    async fn healthcheck(&self) -> Result<(), AppError> {
        match self.snapshot {
            Some(_) => Ok(()),
            None => Err(AppError::SourceUnavailable(
                "in-memory store offline".to_string(),
            )),
        }
    }
}
