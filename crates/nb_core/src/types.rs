use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze-news`.
///
/// `url` defaults to empty so a body without the field reaches validation
/// instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub url: String,
}

/// Article text pulled out of a fetched page, or the synthetic stand-in
/// when extraction failed or came back too short.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub text: String,
    pub length: usize,
    pub is_fallback: bool,
}

impl ExtractedArticle {
    pub fn new(text: String, is_fallback: bool) -> Self {
        let length = text.chars().count();
        Self {
            text,
            length,
            is_fallback,
        }
    }
}

/// Success payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub bias: String,
}
