use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::config::AppConfig;
use crate::state::AppData;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(data: web::Data<AppData>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let store_result = check_itinerary(&data);
    health
        .services
        .insert("itinerary".to_string(), store_result.clone());

    let gemini_result = check_gemini(&data.config);
    health
        .services
        .insert("gemini".to_string(), gemini_result.clone());

    // Without a key the app still serves the itinerary; model features degrade.
    if store_result.status != "ok" || gemini_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_itinerary(data: &AppData) -> ServiceStatus {
    let (days, items) = data.read(|state| {
        let days = state.store.days();
        (days.len(), days.iter().map(|d| d.itinerary.len()).sum::<usize>())
    });

    if days == 0 {
        return ServiceStatus {
            status: "error".to_string(),
            details: Some("No days loaded".to_string()),
        };
    }

    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!("{} days, {} items", days, items)),
    }
}

fn check_gemini(config: &AppConfig) -> ServiceStatus {
    match &config.gemini_api_key {
        Some(key) => {
            let masked_key = if key.len() > 8 && key.is_ascii() {
                format!("{}***{}", &key[0..4], &key[key.len() - 4..])
            } else {
                "***".to_string()
            };

            ServiceStatus {
                status: "ok".to_string(),
                details: Some(format!(
                    "Gemini API key configured ({}), chat: {}, optimizer: {}",
                    masked_key, config.chat_model, config.optimizer_model
                )),
            }
        }
        None => ServiceStatus {
            status: "error".to_string(),
            details: Some("Missing configuration: GEMINI_API_KEY".to_string()),
        },
    }
}
