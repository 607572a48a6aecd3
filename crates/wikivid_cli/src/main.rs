use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wikivid_core::{ArticleSource, Narrator, Pipeline, Summarizer};
use wikivid_fetch::WikipediaClient;
use wikivid_media::{create_narrator, FfmpegComposer, ToolPaths};
use wikivid_storage::StoreConfig;
use wikivid_web::AppState;

mod config;
mod duration;

use config::{server_config, Cli, Commands, PipelineArgs};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_pipeline(args: &PipelineArgs) -> anyhow::Result<Pipeline> {
    let media_config = args.media_config();
    let tools = ToolPaths::discover(&media_config);
    for tool in tools.report().iter().filter(|t| !t.available) {
        warn!("⚠️ {} not found on PATH", tool.name);
    }

    let source: Arc<dyn ArticleSource> = Arc::new(
        WikipediaClient::new(args.fetch_config()).context("failed to set up the Wikipedia client")?,
    );
    info!("📚 Fetching articles from {}", args.fetch_config().endpoint());

    let summarizer = wikivid_inference::create_summarizer(&args.inference_config())
        .context("failed to set up the summarizer")?;
    info!("🧠 Summarizer initialized (using {})", summarizer.name());

    let narrator =
        create_narrator(&media_config, &tools).context("failed to set up the narrator")?;
    info!("🗣️ Narrator initialized (using {})", narrator.name());

    let composer = Arc::new(
        FfmpegComposer::new(&media_config, &tools).context("failed to set up the composer")?,
    );

    let store_config = args.store_config();
    let store = wikivid_storage::create_store(&store_config)?;
    match &store_config {
        StoreConfig::Filesystem { root } => info!("💾 Storing videos in {}", root.display()),
        StoreConfig::Memory => info!("💾 Storing videos in memory"),
    }

    let mut pipeline = Pipeline::new(source, summarizer, narrator, composer, store);
    if let Some(root) = &args.scratch_dir {
        pipeline = pipeline.with_scratch_root(root);
    }
    Ok(pipeline)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Serve { ref host, port } => {
            let pipeline = build_pipeline(&cli.pipeline)?;
            wikivid_web::serve(&server_config(host, port), AppState::new(pipeline)).await?;
        }
        Commands::Render { ref url } => {
            let pipeline = build_pipeline(&cli.pipeline)?;
            let reference = pipeline.run(url).await?;
            match cli.pipeline.store_config() {
                StoreConfig::Filesystem { root } => {
                    println!("{}", root.join(&reference.filename).display())
                }
                StoreConfig::Memory => println!("{}", reference.url),
            }
        }
        Commands::Tools { json } => {
            let report = ToolPaths::discover(&cli.pipeline.media_config()).report();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for tool in report {
                    let location = tool
                        .path
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "missing".to_string());
                    println!("{:<10} {}", tool.name, location);
                }
            }
        }
    }
    Ok(())
}
