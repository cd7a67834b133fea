//! Library Catalog
//!
//! A REST JSON server that registers borrowers and physical book copies and
//! tracks which borrower, if any, currently holds each copy.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub repository: Arc<dyn repository::Repository>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: Arc<dyn repository::Repository>) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(Arc::clone(&repository))),
            repository,
        }
    }
}
