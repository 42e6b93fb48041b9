use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use symptomx_api::{AppState, RestApi};
use symptomx_ranking::{PredictionResponse, RankerConfig, DEFAULT_MAX_RESULTS};
use symptomx_storage::ArtifactStore;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Symptom checker: ranks candidate diseases for a set of symptoms
#[derive(Parser, Debug)]
#[command(name = "symptomx")]
#[command(about = "Symptom checker API backed by a nearest-neighbor model", long_about = None)]
struct Args {
    /// Path to the model artifact directory
    #[arg(short, long, default_value = "./model", env = "SYMPTOMX_MODEL_DIR")]
    model_dir: PathBuf,

    /// HTTP bind address
    #[arg(long, default_value = "0.0.0.0", env = "SYMPTOMX_HOST")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8000, env = "SYMPTOMX_HTTP_PORT")]
    http_port: u16,

    /// Neighbors requested per query
    #[arg(short = 'k', long, default_value_t = 15)]
    neighbors: usize,

    /// Run one prediction for these comma-separated symptoms, print JSON and exit
    #[arg(long, value_delimiter = ',')]
    symptoms: Option<Vec<String>>,

    /// Load and validate the model, then exit
    #[arg(long)]
    check: bool,

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
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting SymptomX v{}", env!("CARGO_PKG_VERSION"));
    info!("Model directory: {:?}", args.model_dir);

    let config = RankerConfig {
        neighbors: args.neighbors,
        max_results: DEFAULT_MAX_RESULTS,
    };

    // Any failure here is fatal: the server never binds without a model
    let checker = ArtifactStore::new(&args.model_dir)
        .load()
        .and_then(|artifacts| artifacts.into_checker(config))
        .with_context(|| format!("failed to load model from {:?}", args.model_dir))?;
    info!("Model ready: {:?}", checker);

    if args.check {
        info!("Model check passed");
        return Ok(());
    }

    if let Some(symptoms) = &args.symptoms {
        let analysis = checker.analyze(symptoms.as_slice())?;
        let response = PredictionResponse::from(analysis);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let state = Arc::new(AppState::ready(checker));

    let host = args.host.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || serve(state, host, http_port));

    info!("SymptomX started successfully");
    info!("HTTP API: http://{}:{}/", args.host, args.http_port);

    let server = tokio::task::spawn_blocking(move || http_handle.join());

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        joined = server => {
            joined
                .context("HTTP server task failed")?
                .map_err(|_| anyhow::anyhow!("HTTP server thread panicked"))??;
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Run the REST API on its own actix system until it stops.
///
/// Bind failures are returned to the caller.
fn serve(state: Arc<AppState>, host: String, port: u16) -> anyhow::Result<()> {
    info!("Starting HTTP server on {}:{}", host, port);
    let sys = actix_web::rt::System::new();
    sys.block_on(RestApi::start(state, host.clone(), port))
        .with_context(|| format!("HTTP server on {}:{} failed", host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_reports_bind_failure() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let result = serve(Arc::new(AppState::loading()), "127.0.0.1".to_string(), port);
        let err = result.unwrap_err();
        assert!(err.to_string().contains(&format!("127.0.0.1:{}", port)));
    }
}
