//! Rates Service entry point

use clap::Parser;
use ratesrv::config::Config;
use ratesrv::{create_app_state, create_routes};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the initial rates JSON file (overrides configuration)
    #[arg(long, value_name = "FILE")]
    rates_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(path) = args.rates_file {
        config.rates.file = path;
    }

    init_logging(&config.log.level);
    info!("Starting Rates Service");

    let state = create_app_state(config.clone());

    let app = create_routes(state);

    // Swagger UI documentation (development default)
    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;
        app.merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ratesrv::routes::ApiDoc::openapi()),
        )
    };

    let addr = config.listen_addr();
    info!("Rates service listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing with the configured level; RUST_LOG wins when set
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
