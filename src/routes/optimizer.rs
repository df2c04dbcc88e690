use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::models::optimization::OptimizationScope;
use crate::routes::{action_error_response, error_body};
use crate::services::optimization_service::{stage_preview, OptimizerError};
use crate::state::{Action, AppData};

const OPTIMIZE_FAILED: &str = "優化失敗";

#[derive(Deserialize)]
pub struct OptimizeRequest {
    scope: OptimizationScope,
}

/*
    POST /api/optimizer
*/
pub async fn optimize(data: web::Data<AppData>, body: web::Json<OptimizeRequest>) -> impl Responder {
    match stage_preview(&data, body.scope).await {
        Ok(preview) => HttpResponse::Ok().json(preview),
        Err(OptimizerError::Busy(e)) => action_error_response(&e),
        Err(e @ OptimizerError::DayNotFound(_)) => HttpResponse::NotFound().json(error_body(e)),
        Err(OptimizerError::Model(e)) => HttpResponse::BadGateway().json(json!({
            "error": OPTIMIZE_FAILED,
            "details": e.to_string(),
        })),
    }
}

/*
    GET /api/optimizer/preview
*/
pub async fn get_preview(data: web::Data<AppData>) -> impl Responder {
    match data.read(|state| state.optimization_preview.clone()) {
        Some(preview) => HttpResponse::Ok().json(preview),
        None => HttpResponse::NotFound().json(error_body("No optimization preview staged")),
    }
}

/*
    POST /api/optimizer/preview/commit
*/
pub async fn commit(data: web::Data<AppData>) -> impl Responder {
    match data.dispatch(Action::CommitPreview) {
        Ok(()) => {
            log::info!("Optimization preview committed");
            let days = data.read(|state| state.store.days().to_vec());
            HttpResponse::Ok().json(days)
        }
        Err(e) => action_error_response(&e),
    }
}

/*
    DELETE /api/optimizer/preview
*/
pub async fn discard(data: web::Data<AppData>) -> impl Responder {
    match data.dispatch(Action::DiscardPreview) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => action_error_response(&e),
    }
}
