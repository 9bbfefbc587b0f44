use std::sync::Arc;

use nb_extract::ArticleExtractor;
use nb_inference::AnalysisModel;

pub struct AppState {
    pub extractor: ArticleExtractor,
    pub model: Arc<dyn AnalysisModel>,
}
