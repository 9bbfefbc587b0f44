use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use nb_core::{AnalysisResult, Error, Result};

use crate::Config;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

pub const SUMMARY_PLACEHOLDER: &str = "Summary not available";
pub const BIAS_PLACEHOLDER: &str = "Bias analysis not available";

#[async_trait]
pub trait AnalysisModel: Send + Sync + fmt::Debug {
    /// Name of the backing model, for logs.
    fn name(&self) -> &str;

    /// Summarizes `text` and assesses its political bias.
    async fn analyze(&self, text: &str) -> Result<AnalysisResult>;
}

pub async fn create_model(config: Config) -> Result<Arc<dyn AnalysisModel>> {
    match config.model_name.as_deref().unwrap_or("gemini") {
        "gemini" => Ok(Arc::new(GeminiModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Configuration(format!("Unknown model: {other}"))),
    }
}

/// Splits a labeled `SUMMARY:`/`BIAS:` reply into its two sections,
/// substituting a placeholder for any section the model failed to emit.
pub fn parse_analysis(text: &str) -> AnalysisResult {
    let summary = labeled_section(text, "SUMMARY:", Some("BIAS:"));
    let bias = labeled_section(text, "BIAS:", None);
    AnalysisResult {
        summary: summary.unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string()),
        bias: bias.unwrap_or_else(|| BIAS_PLACEHOLDER.to_string()),
    }
}

fn labeled_section(text: &str, label: &str, until: Option<&str>) -> Option<String> {
    let start = text.find(label)? + label.len();
    let rest = &text[start..];
    let end = until.and_then(|next| rest.find(next)).unwrap_or(rest.len());
    let section = rest[..end].trim();
    (!section.is_empty()).then(|| section.to_string())
}
