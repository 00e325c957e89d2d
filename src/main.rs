use clap::{Arg, Command};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use issue_tracker_api::api::create_router;
use issue_tracker_api::config;
use issue_tracker_api::store::IssueStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,issue_tracker_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let matches = Command::new("issue-tracker")
        .about("Issue Tracker API - in-memory issue management over HTTP")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Bind address (overrides config file and environment)"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .value_name("PORT")
                .help("Bind port (overrides config file and environment)"),
        )
        .get_matches();

    let config = config::load_config();
    let (mut host, mut port) = config.bind_address();

    if let Some(flag) = matches.get_one::<String>("host") {
        host = flag.clone();
    }
    if let Some(flag) = matches.get_one::<String>("port").and_then(|p| p.parse().ok()) {
        port = flag;
    }

    let bind_address = format!("{}:{}", host, port);

    // The whole collection lives in this one store instance; it is empty
    // now and discarded at shutdown.
    let store = IssueStore::shared();
    let app = create_router(store).layer(TraceLayer::new_for_http());

    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", bind_address, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Issue Tracker API listening on http://{}", bind_address);
    tracing::info!("  GET  /            - Service info");
    tracing::info!("  GET  /health      - Health check");
    tracing::info!("  GET  /issues      - List issues (search/filter/sort/paginate)");
    tracing::info!("  GET  /issues/{{id}} - Get issue");
    tracing::info!("  POST /issues      - Create issue");
    tracing::info!("  PUT  /issues/{{id}} - Update issue");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Issue Tracker API stopped");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received");
}
