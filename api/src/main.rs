use api::middleware::log_request;
use api::routes::routes;
use api::state::AppState;
use axum::{
    Router,
    http::{
        HeaderValue,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    middleware::from_fn,
};
use marker::feedback::ai_feedback::AiGrader;
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_appender::rolling;
use util::config;

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let _log_guard = init_logging(&config::log_file(), &config::log_level());

    // Set up dependencies
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let grader = match AiGrader::from_config() {
        Ok(grader) => grader,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialise grading client");
            std::process::exit(1);
        }
    };
    if config::llm_api_key().trim().is_empty() {
        tracing::warn!("LLM_API_KEY is not set; evaluation requests will fail");
    }
    tracing::info!(model = grader.model(), "Grading backend ready");

    let app_state = AppState::new(db, Arc::new(grader));

    // Build app router
    let app = Router::new()
        .nest("/api", routes(app_state))
        .layer(from_fn(log_request))
        .layer(cors_layer());

    // Start server
    let addr: SocketAddr = match format!("{}:{}", config::host(), config::port()).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "Invalid HOST/PORT");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    println!(
        "Starting {} on http://{}:{}",
        config::project_name(),
        config::host(),
        config::port()
    );
    tracing::info!(%addr, env = %config::env(), "Server listening");

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!(error = %e, "Server crashed");
        std::process::exit(1);
    }
}

/// Permissive when `CORS_ORIGINS` is `*`, otherwise limited to the listed origins.
fn cors_layer() -> CorsLayer {
    let origins = config::cors_origins();
    if origins.is_empty() {
        return CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::very_permissive()
        .allow_origin(AllowOrigin::list(allowed))
        .expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE])
}

fn init_logging(log_file: &str, log_level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let log_to_stdout = config::log_to_stdout();

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("api=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
