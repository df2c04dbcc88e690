use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::itinerary::{ItemPatch, NewItem};
use crate::routes::{action_error_response, error_body};
use crate::services::day_view_service::build_day_view;
use crate::services::itinerary_store::{prepare_item, StoreError};
use crate::services::travel_tip_service::travel_tip;
use crate::state::{Action, AppData};

fn day_not_found(day: usize) -> HttpResponse {
    HttpResponse::NotFound().json(error_body(StoreError::DayNotFound(day)))
}

/*
    GET /api/days
*/
pub async fn get_days(data: web::Data<AppData>) -> impl Responder {
    let days = data.read(|state| state.store.days().to_vec());
    HttpResponse::Ok().json(days)
}

/*
    GET /api/days/{day}
*/
pub async fn get_day(path: web::Path<usize>, data: web::Data<AppData>) -> impl Responder {
    let day = path.into_inner();
    match data.read(|state| state.store.day(day).map(|plan| build_day_view(day, plan))) {
        Some(view) => HttpResponse::Ok().json(view),
        None => day_not_found(day),
    }
}

/*
    POST /api/days/{day}/items
*/
pub async fn add_item(
    path: web::Path<usize>,
    data: web::Data<AppData>,
    body: web::Json<NewItem>,
) -> impl Responder {
    let day_index = path.into_inner();
    let item = prepare_item(body.into_inner());

    match data.dispatch(Action::AddItem {
        day_index,
        item: item.clone(),
    }) {
        Ok(()) => {
            log::info!("Added item {} to day {}", item.id, day_index);
            HttpResponse::Created().json(item)
        }
        Err(e) => {
            log::warn!("Failed to add item to day {}: {}", day_index, e);
            action_error_response(&e)
        }
    }
}

/*
    PUT /api/days/{day}/items/{id}
*/
pub async fn update_item(
    path: web::Path<(usize, String)>,
    data: web::Data<AppData>,
    body: web::Json<ItemPatch>,
) -> impl Responder {
    let (day_index, item_id) = path.into_inner();

    let result = data.dispatch(Action::UpdateItem {
        day_index,
        item_id: item_id.clone(),
        patch: body.into_inner(),
    });

    match result {
        Ok(()) => match data.read(|state| state.store.day(day_index).and_then(|d| d.find(&item_id)).cloned()) {
            Some(item) => HttpResponse::Ok().json(item),
            None => HttpResponse::NotFound().json(error_body(StoreError::ItemNotFound(item_id))),
        },
        Err(e) => action_error_response(&e),
    }
}

/*
    DELETE /api/days/{day}/items/{id}
*/
pub async fn delete_item(path: web::Path<(usize, String)>, data: web::Data<AppData>) -> impl Responder {
    let (day_index, item_id) = path.into_inner();

    match data.dispatch(Action::DeleteItem {
        day_index,
        item_id: item_id.clone(),
    }) {
        Ok(()) => {
            log::info!("Deleted item {} from day {}", item_id, day_index);
            HttpResponse::NoContent().finish()
        }
        Err(e) => action_error_response(&e),
    }
}

/*
    GET /api/days/{day}/items/{id}/tip
*/
pub async fn get_tip(path: web::Path<(usize, String)>, data: web::Data<AppData>) -> impl Responder {
    let (day_index, item_id) = path.into_inner();

    let name = data.read(|state| {
        state
            .store
            .day(day_index)
            .map(|day| day.find(&item_id).map(|item| item.name.clone()))
    });
    let name = match name {
        None => return day_not_found(day_index),
        Some(None) => {
            return HttpResponse::NotFound().json(error_body(StoreError::ItemNotFound(item_id)))
        }
        Some(Some(name)) => name,
    };

    let tip = travel_tip(data.model.as_ref(), &data.config.chat_model, &name).await;
    HttpResponse::Ok().json(json!({ "itemId": item_id, "tip": tip }))
}
