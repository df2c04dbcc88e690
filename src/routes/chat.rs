use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::routes::{action_error_response, error_body};
use crate::services::chat_service::send_message;
use crate::state::AppData;

#[derive(Deserialize)]
pub struct MessageRequest {
    text: String,
}

/*
    GET /api/chat
*/
pub async fn get_transcript(data: web::Data<AppData>) -> impl Responder {
    let messages = data.read(|state| state.transcript.messages().to_vec());
    HttpResponse::Ok().json(messages)
}

/*
    POST /api/chat
*/
pub async fn send(data: web::Data<AppData>, body: web::Json<MessageRequest>) -> impl Responder {
    let text = body.into_inner().text;
    if text.trim().is_empty() {
        return HttpResponse::BadRequest().json(error_body("Message is empty"));
    }

    match send_message(&data, &text).await {
        Ok(messages) => HttpResponse::Ok().json(messages),
        Err(e) => action_error_response(&e),
    }
}
