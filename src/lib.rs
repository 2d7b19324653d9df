pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::{
    completion_service::CompletionService,
    prompt_service::{AnalysisProfile, PromptService},
};
use reqwest::Client;

/// Read-only per-process state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub prompt_service: PromptService,
    pub completion_service: CompletionService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_profile(config, AnalysisProfile::default())
    }

    pub fn with_profile(config: &Config, profile: AnalysisProfile) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.completion.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            prompt_service: PromptService::new(profile),
            completion_service: CompletionService::new(config.completion.clone(), http_client),
        })
    }
}
