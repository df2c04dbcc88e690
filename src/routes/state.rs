use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::routes::action_error_response;
use crate::state::{Action, AppData, AppState, InFlight, Tab};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub active_tab: Tab,
    pub selected_day: usize,
    pub day_count: usize,
    pub selected_map_item: Option<String>,
    pub has_preview: bool,
    pub in_flight: InFlight,
}

impl From<&AppState> for StateSummary {
    fn from(state: &AppState) -> Self {
        Self {
            active_tab: state.active_tab,
            selected_day: state.selected_day,
            day_count: state.store.len(),
            selected_map_item: state.selected_map_item.clone(),
            has_preview: state.optimization_preview.is_some(),
            in_flight: state.in_flight,
        }
    }
}

#[derive(Deserialize)]
pub struct TabRequest {
    tab: Tab,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRequest {
    day_index: usize,
}

fn summary(data: &AppData) -> HttpResponse {
    HttpResponse::Ok().json(data.read(|state| StateSummary::from(state)))
}

/*
    GET /api/state
*/
pub async fn get_state(data: web::Data<AppData>) -> impl Responder {
    summary(&data)
}

/*
    PUT /api/state/tab
*/
pub async fn switch_tab(data: web::Data<AppData>, body: web::Json<TabRequest>) -> impl Responder {
    match data.dispatch(Action::SwitchTab(body.tab)) {
        Ok(()) => summary(&data),
        Err(e) => action_error_response(&e),
    }
}

/*
    PUT /api/state/day
*/
pub async fn select_day(data: web::Data<AppData>, body: web::Json<DayRequest>) -> impl Responder {
    match data.dispatch(Action::SelectDay(body.day_index)) {
        Ok(()) => summary(&data),
        Err(e) => action_error_response(&e),
    }
}
