use clap::Parser;
use logoguide_api::RestApi;
use logoguide_guide::{AnimalCatalog, Datasets, GuideModel, ModelConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Brand-design guideline and animal-archetype recommender
#[derive(Parser, Debug)]
#[command(name = "logoguide")]
#[command(about = "Recommends brand-design guidelines from a company description", long_about = None)]
struct Args {
    /// Path to the reference dataset directory
    #[arg(short, long, default_value = "./local_static")]
    data_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting logoguide v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    // All reference data loads and all training happens here, before the
    // first request; any failure is fatal.
    let datasets = Datasets::load(&args.data_dir)?;
    let animals = AnimalCatalog::build(&datasets.animal_embeddings, &datasets.animal_photos)?;
    let model = Arc::new(GuideModel::train(
        ModelConfig::default(),
        datasets.corpus,
        animals,
        datasets.logo_catalog,
    )?);
    info!("Model trained, {} reference records", model.corpus().len());

    let model_http = model.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(model_http, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("logoguide started successfully");
    info!("HTTP API: http://localhost:{}/logoguide", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
