//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::collections::HashSet;
use std::sync::Arc;

use actix_web::web;

use crate::model::{Config, Document, SeedDocument};
use crate::service::{
    ContextSource, GeminiClient, SimulatedContextSource, TextGenerator, VerdictService,
    VerificationQueue,
};

/// Application state containing all services and shared resources
pub struct AppState {
    /// AI verdict service (shared with the queue)
    pub verdict_service: Arc<VerdictService>,
    /// Document verification queue
    pub queue: Arc<VerificationQueue>,
    /// Source of extracted document text for scans
    pub context_source: Arc<dyn ContextSource>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// The Gemini client is configured from the environment. A missing API key
    /// is not a startup error.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = GeminiClient::from_env(config.screening.request_timeout())
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;
        let generator = Arc::new(client);
        Self::with_generator(config, generator)
    }

    /// Build application state around a given text generator
    pub fn with_generator(
        config: &Config,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self, AppError> {
        let documents = Self::seed_documents(&config.queue.documents)?;

        let verdict_service = Arc::new(VerdictService::new(generator, &config.screening));
        let queue = Arc::new(VerificationQueue::new(
            Arc::clone(&verdict_service),
            documents,
        ));

        Ok(Self {
            verdict_service,
            queue,
            context_source: Arc::new(SimulatedContextSource),
        })
    }

    /// Validate seed entries and turn them into pending documents
    fn seed_documents(seeds: &[SeedDocument]) -> Result<Vec<Document>, AppError> {
        let mut seen = HashSet::new();

        for seed in seeds {
            let fields = [
                ("id", &seed.id),
                ("owner", &seed.owner),
                ("doc_type", &seed.doc_type),
                ("file_name", &seed.file_name),
            ];
            if let Some((field, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
                return Err(AppError::InvalidConfig(format!(
                    "queue document {:?} has an empty {}",
                    seed.id, field
                )));
            }
            if !seen.insert(seed.id.as_str()) {
                return Err(AppError::InvalidConfig(format!(
                    "duplicate queue document id {:?}",
                    seed.id
                )));
            }
        }

        Ok(seeds.iter().cloned().map(Document::from).collect())
    }

    /// Register shared state on an actix-web app
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(Arc::clone(&self.queue)))
            .app_data(web::Data::from(Arc::clone(&self.verdict_service)))
            .app_data(web::Data::from(Arc::clone(&self.context_source)));
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
