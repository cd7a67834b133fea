//! Business logic services

pub mod catalog;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services over the given storage backend
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository),
        }
    }
}
