pub mod error;
pub mod types;

pub use error::Error;
pub use types::{AnalysisRequest, AnalysisResult, ExtractedArticle};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::{AnalysisRequest, AnalysisResult, Error, ExtractedArticle, Result};
}
