pub mod models;

pub use models::{create_model, AnalysisModel};

/// Analysis configuration, read once at startup and injected.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            model_name: None,
            base_url: None,
        }
    }
}

pub mod prelude {
    pub use super::models::{create_model, AnalysisModel};
    pub use super::Config;
    pub use nb_core::{AnalysisResult, Error, Result};
}
