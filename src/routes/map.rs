use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::routes::{action_error_response, error_body};
use crate::services::map_service::build_map_view;
use crate::state::{Action, AppData, MapClick};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClickRequest {
    #[serde(default)]
    item_id: Option<String>,
}

fn map_view(data: &AppData) -> HttpResponse {
    match data.read(build_map_view) {
        Some(view) => HttpResponse::Ok().json(view),
        None => HttpResponse::NotFound().json(error_body("Selected day not found")),
    }
}

/*
    GET /api/map
*/
pub async fn get_map(data: web::Data<AppData>) -> impl Responder {
    map_view(&data)
}

/*
    POST /api/map/click
*/
pub async fn click(data: web::Data<AppData>, body: web::Json<ClickRequest>) -> impl Responder {
    let click = match body.into_inner().item_id {
        Some(item_id) => MapClick::Marker(item_id),
        None => MapClick::Background,
    };

    match data.dispatch(Action::MapClick(click)) {
        Ok(()) => map_view(&data),
        Err(e) => action_error_response(&e),
    }
}

/*
    POST /api/map/laid-out
*/
pub async fn laid_out(data: web::Data<AppData>) -> impl Responder {
    match data.dispatch(Action::MapLaidOut) {
        Ok(()) => map_view(&data),
        Err(e) => action_error_response(&e),
    }
}
