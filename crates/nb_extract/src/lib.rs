pub mod extractor;

pub use extractor::ArticleExtractor;

pub mod prelude {
    pub use super::ArticleExtractor;
    pub use nb_core::{ExtractedArticle, Result};
}
