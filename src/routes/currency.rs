use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::models::currency::{ConversionState, QUICK_AMOUNTS};
use crate::routes::action_error_response;
use crate::services::currency_service::refresh_rate;
use crate::state::{Action, ActionError, AppData};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyView {
    #[serde(flatten)]
    pub conversion: ConversionState,
    pub quick_amounts: [&'static str; 8],
    pub refreshing: bool,
}

#[derive(Deserialize)]
pub struct AmountRequest {
    amount: String,
}

#[derive(Deserialize)]
pub struct RateRequest {
    rate: f64,
}

fn currency_view(data: &AppData) -> HttpResponse {
    let view = data.read(|state| CurrencyView {
        conversion: state.conversion.clone(),
        quick_amounts: QUICK_AMOUNTS,
        refreshing: state.in_flight.rate,
    });
    HttpResponse::Ok().json(view)
}

fn respond(data: &AppData, result: Result<(), ActionError>) -> HttpResponse {
    match result {
        Ok(()) => currency_view(data),
        Err(e) => action_error_response(&e),
    }
}

/*
    GET /api/currency
*/
pub async fn get_currency(data: web::Data<AppData>) -> impl Responder {
    currency_view(&data)
}

/*
    PUT /api/currency/jpy
*/
pub async fn set_jpy(data: web::Data<AppData>, body: web::Json<AmountRequest>) -> impl Responder {
    let result = data.dispatch(Action::SetJpy(body.into_inner().amount));
    respond(&data, result)
}

/*
    PUT /api/currency/twd
*/
pub async fn set_twd(data: web::Data<AppData>, body: web::Json<AmountRequest>) -> impl Responder {
    let result = data.dispatch(Action::SetTwd(body.into_inner().amount));
    respond(&data, result)
}

/*
    PUT /api/currency/rate
*/
pub async fn set_rate(data: web::Data<AppData>, body: web::Json<RateRequest>) -> impl Responder {
    let result = data.dispatch(Action::SetRate(body.rate));
    respond(&data, result)
}

/*
    POST /api/currency/refresh
*/
pub async fn refresh(data: web::Data<AppData>) -> impl Responder {
    match refresh_rate(&data).await {
        Ok(_) => currency_view(&data),
        Err(e) => action_error_response(&e),
    }
}
