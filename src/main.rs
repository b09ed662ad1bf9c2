use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use experience_recs::config::Settings;
use experience_recs::core::{Recommender, RecommenderOptions};
use experience_recs::routes::{self, suggestions::AppState};
use experience_recs::services::{ChatCompletionClient, SupabaseClient, SupabaseTables};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn config_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        config_error(e)
    })?;

    // Initialize logging; RUST_LOG wins over LOG_LEVEL, which wins over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting experience recommendations service...");

    let recommendations = &settings.recommendations;

    let tables = SupabaseTables {
        wishlists: settings.tables.wishlists.clone(),
        swipes: settings.tables.swipes.clone(),
        viewed: settings.tables.viewed.clone(),
        experiences: settings.tables.experiences.clone(),
    };

    let store = SupabaseClient::new(
        settings.supabase.url.clone(),
        settings.supabase.service_role_key.clone(),
        tables,
        recommendations.traits.clone(),
        settings.supabase.timeout_secs.map(Duration::from_secs),
    )
    .map_err(|e| {
        error!("Failed to create Supabase client: {}", e);
        config_error(e)
    })?;

    info!("Supabase client initialized for {}", settings.supabase.url);

    let oracle = ChatCompletionClient::new(
        settings.oracle.api_base.clone(),
        settings.oracle.api_key.clone(),
        settings.oracle.model.clone(),
        settings.oracle.temperature,
        settings.oracle.timeout_secs.map(Duration::from_secs),
    )
    .map_err(|e| {
        error!("Failed to create completion client: {}", e);
        config_error(e)
    })?;

    info!("Completion client initialized (model: {})", oracle.model());

    let options = RecommenderOptions::from_settings(recommendations, settings.engagement.include_viewed);

    info!(
        "Recommender initialized (traits: {:?}, vocabulary: {:?}, views counted: {})",
        options.traits, options.vocabulary, options.include_viewed
    );

    let app_state = AppState {
        recommender: Recommender::new(Arc::new(store), Arc::new(oracle), options),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
