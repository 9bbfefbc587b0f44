//! Extraction against a local HTTP server, covering the success path and
//! both degradation paths without touching the network.

use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use nb_extract::ArticleExtractor;

const ARTICLE_PAGE: &str = r#"
<html>
  <head><title>Budget vote</title></head>
  <body>
    <div class="content">Subscribe banner that must not be picked up.</div>
    <article>
      <h1>Budget passes after marathon session</h1>
      <p>Lawmakers approved the national budget late on Thursday.</p>
      <p>The vote followed weeks of negotiation between the two chambers.</p>
    </article>
  </body>
</html>
"#;

async fn spawn_site() -> String {
    let app = Router::new()
        .route("/article", get(|| async { Html(ARTICLE_PAGE) }))
        .route("/stub", get(|| async { Html("<article>Too short.</article>") }))
        .route(
            "/blocked",
            get(|| async { (StatusCode::FORBIDDEN, "access denied") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn extracts_article_container_from_live_page() {
    let base = spawn_site().await;
    let extractor = ArticleExtractor::new().unwrap();

    let article = extractor.extract(&format!("{base}/article")).await;

    assert!(!article.is_fallback);
    assert!(article.text.contains("Lawmakers approved the national budget"));
    assert!(
        !article.text.contains("Subscribe banner"),
        "sibling content div must lose to the article tag"
    );
    assert_eq!(article.length, article.text.chars().count());
}

#[tokio::test]
async fn short_extraction_uses_sample_content() {
    let base = spawn_site().await;
    let extractor = ArticleExtractor::new().unwrap();
    let url = format!("{base}/stub");

    let article = extractor.extract(&url).await;

    assert!(article.is_fallback);
    assert!(article.text.contains(&url));
    assert!(article.text.starts_with("This is a sample news article about"));
}

#[tokio::test]
async fn non_success_status_uses_fallback_content() {
    let base = spawn_site().await;
    let extractor = ArticleExtractor::new().unwrap();
    let url = format!("{base}/blocked");

    let article = extractor.extract(&url).await;

    assert!(article.is_fallback);
    assert!(article.text.contains(&url));
    assert!(article.text.starts_with("This is a sample news article from"));
}
