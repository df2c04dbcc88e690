use actix_web::{error, web, HttpResponse};
use serde_json::json;

use crate::services::itinerary_store::StoreError;
use crate::state::ActionError;

pub mod chat;
pub mod currency;
pub mod health;
pub mod itinerary;
pub mod map;
pub mod optimizer;
pub mod state;

pub fn error_body(message: impl std::fmt::Display) -> serde_json::Value {
    json!({ "error": message.to_string() })
}

/// HTTP shape of a rejected action.
pub fn action_error_response(err: &ActionError) -> HttpResponse {
    let body = error_body(err);
    match err {
        ActionError::Store(StoreError::DuplicateId(_)) | ActionError::AlreadyInFlight(_) => {
            HttpResponse::Conflict().json(body)
        }
        ActionError::Store(_) | ActionError::NoPreview => HttpResponse::NotFound().json(body),
        ActionError::InvalidRate(_) => HttpResponse::BadRequest().json(body),
    }
}

/// Registers every endpoint. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected request body: {}", err);
        let response = HttpResponse::BadRequest().json(error_body(&err));
        error::InternalError::from_response(err, response).into()
    }))
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            .service(
                web::scope("/state")
                    .route("", web::get().to(state::get_state))
                    .route("/tab", web::put().to(state::switch_tab))
                    .route("/day", web::put().to(state::select_day)),
            )
            .service(
                web::scope("/days")
                    .route("", web::get().to(itinerary::get_days))
                    .route("/{day}", web::get().to(itinerary::get_day))
                    .route("/{day}/items", web::post().to(itinerary::add_item))
                    .route("/{day}/items/{id}", web::put().to(itinerary::update_item))
                    .route("/{day}/items/{id}", web::delete().to(itinerary::delete_item))
                    .route("/{day}/items/{id}/tip", web::get().to(itinerary::get_tip)),
            )
            .service(
                web::scope("/currency")
                    .route("", web::get().to(currency::get_currency))
                    .route("/jpy", web::put().to(currency::set_jpy))
                    .route("/twd", web::put().to(currency::set_twd))
                    .route("/rate", web::put().to(currency::set_rate))
                    .route("/refresh", web::post().to(currency::refresh)),
            )
            .service(
                web::scope("/map")
                    .route("", web::get().to(map::get_map))
                    .route("/click", web::post().to(map::click))
                    .route("/laid-out", web::post().to(map::laid_out)),
            )
            .service(
                web::scope("/chat")
                    .route("", web::get().to(chat::get_transcript))
                    .route("", web::post().to(chat::send)),
            )
            .service(
                web::scope("/optimizer")
                    .route("", web::post().to(optimizer::optimize))
                    .route("/preview", web::get().to(optimizer::get_preview))
                    .route("/preview", web::delete().to(optimizer::discard))
                    .route("/preview/commit", web::post().to(optimizer::commit)),
            ),
    );
}
