#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use trip_itinerary_api::config::AppConfig;
use trip_itinerary_api::routes;
use trip_itinerary_api::services::gemini_service::{
    FunctionCall, GeminiError, GenerateContentRequest, GenerateContentResponse, LanguageModel,
};
use trip_itinerary_api::state::AppData;

pub enum Scripted {
    Reply(GenerateContentResponse),
    Fail(String),
}

/// Language model double that answers from a queue and records each request.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<(String, GenerateContentRequest)>>,
}

impl ScriptedModel {
    pub fn push_text(&self, text: &str) {
        self.push(Scripted::Reply(GenerateContentResponse::from_text(text)));
    }

    pub fn push_call(&self, name: &str, args: Value) {
        self.push(Scripted::Reply(GenerateContentResponse::from_calls(vec![FunctionCall {
            name: name.to_string(),
            args,
        }])));
    }

    pub fn push_empty(&self) {
        self.push(Scripted::Reply(GenerateContentResponse::default()));
    }

    pub fn push_failure(&self, message: &str) {
        self.push(Scripted::Fail(message.to_string()));
    }

    fn push(&self, reply: Scripted) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<(String, GenerateContentRequest)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));

        match self.replies.lock().unwrap().pop_front() {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(GeminiError::ResponseError(message)),
            None => Err(GeminiError::ResponseError("no scripted reply".to_string())),
        }
    }
}

pub struct TestApp {
    pub data: web::Data<AppData>,
    pub model: Arc<ScriptedModel>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = AppConfig {
            gemini_api_key: Some("test-key-123456789".to_string()),
            ..AppConfig::default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let model = Arc::new(ScriptedModel::default());
        let data = web::Data::new(AppData::new(config, model.clone()));
        Self { data, model }
    }

    pub fn create_app(&self) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.data.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    }
}
