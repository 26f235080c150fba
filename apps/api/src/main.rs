use city_info_api::{
    config::Config,
    domain::city::gateway::CityInfoGateway,
    infrastructure::{
        database::pool::connect_and_migrate,
        mail::local_mail_service::LocalMailService,
        repositories::{
            in_memory_city_info_gateway::InMemoryCityInfoGateway,
            sqlx_city_info_gateway::SqlxCityInfoGateway,
        },
        seed::SeedData,
    },
    presentation::http::{routes::create_router, state::AppState},
};
use anyhow::Context;
use http::{HeaderValue, Method, header};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,city_info_api=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let seed = SeedData::load(config.seed_path.as_deref())?;

    let gateway: Arc<dyn CityInfoGateway> = match &config.database_url {
        Some(database_url) => {
            let pool = connect_and_migrate(
                database_url,
                config.database_max_connections,
                config.ignore_missing_migrations,
            )
            .await
            .context("Failed to prepare the city info database")?;
            let gateway = SqlxCityInfoGateway::new(pool);
            gateway
                .seed_if_empty(seed)
                .await
                .context("Failed to seed the city info database")?;
            tracing::info!("Using PostgreSQL city info store");
            Arc::new(gateway)
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory city info store");
            Arc::new(InMemoryCityInfoGateway::from_seed(seed))
        }
    };

    let mail_service = Arc::new(LocalMailService::new(
        config.mail_to.clone(),
        config.mail_from.clone(),
    ));

    let state = AppState::new(gateway, mail_service);

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::LOCATION])
        .max_age(Duration::from_secs(3600));

    let app = create_router(state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("City info API listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
