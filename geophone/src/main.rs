use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use geophone::config::AppConfig;
use geophone::directory::GeoDirectory;
use geophone::source::{SourceCache, SourceClient, TableLoader};
use geophone::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match SourceClient::new(config.source.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create source client: {e}");
            return ExitCode::FAILURE;
        }
    };
    let loader = TableLoader::new(client, SourceCache::new(config.cache.clone()))
        .with_write_cache(config.write_cache);
    let directory = GeoDirectory::new(loader);

    // Any arguments are phone numbers to look up once.
    let phones: Vec<String> = std::env::args().skip(1).collect();
    if !phones.is_empty() {
        return lookup_once(&directory, &phones).await;
    }

    serve(directory, config).await
}

/// Print `<phone>\t<location>` for each argument.
async fn lookup_once(directory: &GeoDirectory, phones: &[String]) -> ExitCode {
    for phone in phones {
        match directory.find(phone).await {
            Ok(location) => println!("{phone}\t{}", location.as_deref().unwrap_or("unknown")),
            Err(e) => {
                error!("failed to load prefix table: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

async fn serve(directory: GeoDirectory, config: AppConfig) -> ExitCode {
    // Load up front so a broken source fails at startup, not on first request
    match directory.table().await {
        Ok(table) => info!(prefixes = table.len(), "prefix table ready"),
        Err(e) => {
            error!("failed to load prefix table: {e}");
            return ExitCode::FAILURE;
        }
    }

    let refresher = directory.clone();
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            if let Err(e) = refresher.refresh().await {
                warn!("failed to refresh prefix table: {e}");
            }
        }
    });

    let app = create_router(AppState::new(directory));

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.bind);
            return ExitCode::FAILURE;
        }
    };
    info!("geophone listening on http://{}", config.bind);
    info!("  GET /health");
    info!("  GET /lookup?phone=<number>");
    info!("  GET /status");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
