use async_trait::async_trait;
use nb_core::{AnalysisResult, Result};

use super::{parse_analysis, AnalysisModel};

/// Deterministic offline model for development and tests. Echoes the first
/// sentences of the input through the same labeled-reply parser the real
/// model uses.
#[derive(Debug, Clone)]
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let sentences: Vec<&str> = text
            .split(|c| c == '.' || c == '!' || c == '?')
            .filter(|s| !s.trim().is_empty())
            .take(2)
            .map(str::trim)
            .collect();

        let reply = format!(
            "SUMMARY: {}.\nBIAS: Neutral, no model was consulted.",
            sentences.join(". ")
        );
        Ok(parse_analysis(&reply))
    }
}
