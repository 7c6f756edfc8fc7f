use actix_web::{middleware, web, App, HttpServer};
use match_relay::config::{LoggingSettings, Settings};
use match_relay::core::mask_secret;
use match_relay::routes::{self, AppState};
use match_relay::services::HuggingFaceClient;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Logging is configured from settings, so configuration errors go to stderr
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    init_tracing(&settings.logging);

    info!("Starting match relay v{}...", env!("CARGO_PKG_VERSION"));

    let allowed_origins = settings.cors.allowed_origins();
    if allowed_origins.is_empty() {
        warn!("ALLOWED_ORIGINS is empty; every match request will be rejected");
    } else {
        info!("Allowed origins: {:?}", allowed_origins.iter().collect::<Vec<_>>());
    }

    let hugging_face = HuggingFaceClient::new(
        settings.hugging_face.api_url.clone(),
        settings.hugging_face.api_token.clone(),
        settings.hugging_face.timeout(),
    )
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    info!(
        url = %settings.hugging_face.api_url,
        token = %mask_secret(&settings.hugging_face.api_token),
        timeout_secs = settings.hugging_face.timeout_secs,
        "Inference API client initialized"
    );

    let app_state = AppState::new(hugging_face, allowed_origins);

    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting HTTP server on {}:{}", host, port);

    let mut server = HttpServer::new(move || {
        let cors = routes::cors(&app_state.allowed_origins);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server.bind((host, port))?.run().await
}
