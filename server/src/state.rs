//! Shared handler state

use std::sync::Arc;

use component_generation::{ComponentGenerator, GenerationError};
use parking_lot::Mutex;
use preview_sandbox::{PreviewPanel, PreviewRenderer};

use crate::config::AppConfig;

/// Preview panel shared between requests; rendering holds the lock
pub type SharedPreview = Arc<Mutex<PreviewPanel>>;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ComponentGenerator>,
    pub preview: SharedPreview,
}

impl AppState {
    pub fn new(generator: ComponentGenerator, renderer: PreviewRenderer) -> Self {
        Self {
            generator: Arc::new(generator),
            preview: Arc::new(Mutex::new(PreviewPanel::new(renderer))),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        let generator = ComponentGenerator::from_config(config.generation.clone())?;
        Ok(Self::new(generator, PreviewRenderer::new(config.sandbox)))
    }
}
