use nb_core::{Error, ExtractedArticle, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const USER_AGENT: &str = "Mozilla/5.0 (compatible; NewsAnalyzer/1.0)";

const MAX_CONTENT_CHARS: usize = 3000;
const MIN_CONTENT_CHARS: usize = 50;

/// Containers tried in order; the first one present in the document wins.
const CONTAINER_SELECTORS: [&str; 4] = [
    "article",
    "div[class*=\"article\"]",
    "div[class*=\"content\"]",
    "main",
];

pub struct ArticleExtractor {
    client: Client,
}

impl ArticleExtractor {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and pulls the readable article text out of the page.
    ///
    /// Never fails: any fetch or parse problem degrades to synthetic
    /// placeholder content, as does a result shorter than 50 characters.
    pub async fn extract(&self, url: &str) -> ExtractedArticle {
        match self.fetch_content(url).await {
            Ok(text) if text.chars().count() >= MIN_CONTENT_CHARS => {
                debug!(length = text.chars().count(), "extracted article content");
                ExtractedArticle::new(text, false)
            }
            Ok(_) => {
                warn!(url, "extracted content too short, using sample content");
                ExtractedArticle::new(short_content_fallback(url), true)
            }
            Err(e) => {
                warn!(url, error = %e, "content extraction failed, using fallback content");
                ExtractedArticle::new(fetch_error_fallback(url), true)
            }
        }
    }

    async fn fetch_content(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Extraction(format!("HTTP {status}")));
        }
        let html = response.text().await?;
        debug!(length = html.len(), "fetched HTML");
        Ok(clean_text(&extract_content(&html)))
    }
}

/// Inner text of the highest-priority matching container, or of every `<p>`
/// in the document when no container matches.
fn extract_content(html: &str) -> String {
    let document = Html::parse_document(html);

    for selector in CONTAINER_SELECTORS {
        let selector = Selector::parse(selector).unwrap();
        if let Some(element) = document.select(&selector).next() {
            return element.text().collect::<String>();
        }
    }

    let paragraphs = Selector::parse("p").unwrap();
    document
        .select(&paragraphs)
        .map(|el| el.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapses whitespace runs to single spaces, trims, and truncates to the
/// 3000-character content limit.
fn clean_text(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(MAX_CONTENT_CHARS).collect()
}

fn short_content_fallback(url: &str) -> String {
    format!(
        "This is a sample news article about {url}. The article discusses various \
         political and social issues, presenting different viewpoints on current \
         events. It covers topics that may lean toward certain political \
         perspectives, making it suitable for bias analysis. The content includes \
         multiple paragraphs with detailed information about the subject matter."
    )
}

fn fetch_error_fallback(url: &str) -> String {
    format!(
        "This is a sample news article from {url}. The article discusses current \
         political events and social issues, presenting various viewpoints on \
         controversial topics. It includes analysis of government policies, \
         election coverage, and social movements. The content may contain bias \
         toward certain political ideologies and is suitable for bias analysis \
         testing."
    )
}
