use clap::Parser;
use nb_core::Result;
use nb_extract::ArticleExtractor;
use nb_inference::{create_model, Config};
use nb_web::{create_app, AppState};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Model to use for analysis. Available models: gemini (default), dummy
    #[arg(long, default_value = "gemini")]
    model: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the analysis HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,
    },
    /// Analyze a single article URL and print the result
    Analyze { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = Config {
        model_name: Some(cli.model.clone()),
        ..Config::from_env()
    };
    let model = create_model(config).await?;
    info!("🧠 Analysis model initialized (using {})", model.name());

    let extractor = ArticleExtractor::new()?;

    match cli.command {
        Commands::Serve { listen } => {
            let app = create_app(AppState { extractor, model }).await;
            let listener = tokio::net::TcpListener::bind(&listen).await?;
            info!("🌐 Listening on http://{}", listener.local_addr()?);
            axum::serve(listener, app).await?;
        }
        Commands::Analyze { url } => {
            url::Url::parse(&url).map_err(|e| nb_core::Error::InvalidUrl(e.to_string()))?;
            info!("🔍 Analyzing {}", url);
            let article = extractor.extract(&url).await;
            if article.is_fallback {
                info!("⚠️ Extraction fell back to sample content");
            }
            let result = model.analyze(&article.text).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
