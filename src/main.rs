use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trip_itinerary_api::config::AppConfig;
use trip_itinerary_api::routes;
use trip_itinerary_api::services::gemini_service::{GeminiClient, LanguageModel};
use trip_itinerary_api::state::AppData;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env();
    let client = GeminiClient::new(&config);
    if !client.is_configured() {
        log::warn!("GEMINI_API_KEY not set; chat, optimizer and rate refresh will fall back");
    }
    let model: Arc<dyn LanguageModel> = Arc::new(client);

    let host = config.host.clone();
    let port = config.port;
    let data = web::Data::new(AppData::new(config, model));

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
