//! Chat Service
//!
//! Sends the transcript and a snapshot of the whole trip to the hosted
//! model with three itinerary tools declared, then folds any returned tool
//! calls into the store. Every failure ends as a message in the transcript.

use std::fmt;

use serde_json::json;

use crate::models::chat::{ChatMessage, ChatRole};
use crate::models::itinerary::{Category, DayPlan, NewItem};
use crate::models::tool_call::{ToolCall, ADD_ITEM, DELETE_ITEM, UPDATE_ITEM};
use crate::services::gemini_service::{
    Content, FunctionDeclaration, GeminiError, GenerateContentRequest, LanguageModel, Tool,
};
use crate::services::itinerary_store::{prepare_item, ItineraryStore, StoreError};
use crate::state::{Action, ActionError, AppData, Flight};

pub const CONFIRMATION: &str = "好的，我已經幫您處理好行程了。";
pub const FALLBACK_REPLY: &str = "收到！還有什麼我能幫您的嗎？";
pub const APOLOGY: &str = "抱歉，剛才連線有點問題。";

#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// The model asked for itinerary changes.
    ToolCalls(Vec<ToolCall>),
    Reply(String),
}

#[derive(Debug, PartialEq)]
pub enum ToolApplyError {
    InvalidDay(i64),
    Store(StoreError),
}

impl fmt::Display for ToolApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolApplyError::InvalidDay(index) => write!(f, "Invalid day index {}", index),
            ToolApplyError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ToolApplyError {}

impl From<StoreError> for ToolApplyError {
    fn from(err: StoreError) -> Self {
        ToolApplyError::Store(err)
    }
}

fn category_names() -> Vec<&'static str> {
    Category::ALL.iter().map(|c| c.as_str()).collect()
}

pub fn itinerary_tools() -> Vec<FunctionDeclaration> {
    let categories = category_names();
    vec![
        FunctionDeclaration {
            name: ADD_ITEM.to_string(),
            description: "在特定日期的行程中新增一個項目。".to_string(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "dayIndex": { "type": "INTEGER", "description": "日期的索引（0 是第一天，1 是第二天...）" },
                    "name": { "type": "STRING", "description": "行程名稱" },
                    "category": { "type": "STRING", "enum": categories, "description": "分類" },
                    "startTime": { "type": "STRING", "description": "開始時間 (HH:mm)" },
                    "endTime": { "type": "STRING", "description": "結束時間 (HH:mm)" },
                    "notes": { "type": "STRING", "description": "備註內容" },
                    "openingHours": { "type": "STRING", "description": "營業時間資訊" },
                    "bookingLink": { "type": "STRING", "description": "預約官網連結" },
                    "lat": { "type": "NUMBER", "description": "緯度 (選填)" },
                    "lng": { "type": "NUMBER", "description": "經度 (選填)" }
                },
                "required": ["dayIndex", "name", "category", "startTime", "endTime"]
            }),
        },
        FunctionDeclaration {
            name: UPDATE_ITEM.to_string(),
            description: "修改現有的行程項目。".to_string(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "dayIndex": { "type": "INTEGER", "description": "日期的索引" },
                    "itemId": { "type": "STRING", "description": "行程項目的 ID" },
                    "updates": {
                        "type": "OBJECT",
                        "description": "要更新的欄位",
                        "properties": {
                            "name": { "type": "STRING" },
                            "startTime": { "type": "STRING" },
                            "endTime": { "type": "STRING" },
                            "category": { "type": "STRING", "enum": categories },
                            "notes": { "type": "STRING" },
                            "openingHours": { "type": "STRING" },
                            "bookingLink": { "type": "STRING" }
                        }
                    }
                },
                "required": ["dayIndex", "itemId", "updates"]
            }),
        },
        FunctionDeclaration {
            name: DELETE_ITEM.to_string(),
            description: "刪除特定行程項目。".to_string(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "dayIndex": { "type": "INTEGER", "description": "日期的索引" },
                    "itemId": { "type": "STRING", "description": "行程項目的 ID" }
                },
                "required": ["dayIndex", "itemId"]
            }),
        },
    ]
}

pub fn system_instruction(days: &[DayPlan]) -> Result<String, serde_json::Error> {
    let itinerary = serde_json::to_string(days)?;
    Ok(format!(
        "你是一位福岡旅遊專家，同時也是使用者的行程管理助理。\n\n\
         目前的完整行程如下：\n{itinerary}\n\n\
         你的權限：\n\
         1. 你可以回答關於福岡旅遊的問題。\n\
         2. 你可以呼叫 {add} 來增加行程。\n\
         3. 你可以呼叫 {update} 來修改行程（如調整時間、增加營業時間、更新筆記或連結）。\n\
         4. 你可以呼叫 {delete} 來刪除行程。\n\n\
         重要規則：\n\
         - 請用繁體中文回答。\n\
         - 如果使用者要求更改行程，請呼叫對應的工具，執行完畢後再給予友好的回覆。\n\
         - 行程分類必須是以下之一：{categories}。\n\
         - 時間格式一律為 HH:mm。",
        itinerary = itinerary,
        add = ADD_ITEM,
        update = UPDATE_ITEM,
        delete = DELETE_ITEM,
        categories = category_names().join("、"),
    ))
}

pub fn build_request(
    transcript: &[ChatMessage],
    days: &[DayPlan],
) -> Result<GenerateContentRequest, GeminiError> {
    let contents = transcript
        .iter()
        .map(|message| match message.role {
            ChatRole::User => Content::user(message.text.clone()),
            ChatRole::Assistant => Content::model(message.text.clone()),
        })
        .collect();

    Ok(GenerateContentRequest {
        contents,
        system_instruction: Some(Content::system(system_instruction(days)?)),
        tools: Some(vec![Tool {
            function_declarations: Some(itinerary_tools()),
            ..Default::default()
        }]),
        generation_config: None,
    })
}

/// One round trip to the model. Calls that cannot be parsed are dropped
/// here; the outcome still counts as a tool-call turn.
pub async fn request_reply(
    model: &dyn LanguageModel,
    model_name: &str,
    transcript: &[ChatMessage],
    days: &[DayPlan],
) -> Result<ChatOutcome, GeminiError> {
    let request = build_request(transcript, days)?;
    let response = model.generate_content(model_name, &request).await?;

    let raw_calls = response.function_calls();
    if raw_calls.is_empty() {
        return Ok(ChatOutcome::Reply(response.text().unwrap_or_default()));
    }

    let calls = raw_calls
        .iter()
        .filter_map(|call| match ToolCall::parse(&call.name, &call.args) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("Ignoring tool call: {}", e);
                None
            }
        })
        .map(assign_ids)
        .collect();

    Ok(ChatOutcome::ToolCalls(calls))
}

/// Gives new items their identifier before they reach the reducer, so
/// applying the calls stays deterministic.
fn assign_ids(call: ToolCall) -> ToolCall {
    match call {
        ToolCall::AddItem { day_index, item } => {
            let id = prepare_item(item.clone()).id;
            ToolCall::AddItem {
                day_index,
                item: NewItem { id: Some(id), ..item },
            }
        }
        other => other,
    }
}

/// Applies one tool call. A missing day index falls back to `default_day`.
pub fn apply_tool_call(
    store: &mut ItineraryStore,
    call: &ToolCall,
    default_day: usize,
) -> Result<(), ToolApplyError> {
    let day_index = match call.day_index() {
        None => default_day,
        Some(index) => usize::try_from(index).map_err(|_| ToolApplyError::InvalidDay(index))?,
    };

    match call {
        ToolCall::AddItem { item, .. } => {
            store.add_item(day_index, prepare_item(item.clone()))?;
        }
        ToolCall::UpdateItem { item_id, updates, .. } => {
            store.update_item(day_index, item_id, updates)?;
        }
        ToolCall::DeleteItem { item_id, .. } => {
            store.delete_item(day_index, item_id)?;
        }
    }
    Ok(())
}

/// Handles one user submission end to end and returns the new transcript.
pub async fn send_message(data: &AppData, text: &str) -> Result<Vec<ChatMessage>, ActionError> {
    let _flight = data.begin_flight(Flight::Chat)?;
    data.dispatch(Action::AppendMessage(ChatMessage::user(text)))?;

    let (transcript, days, default_day) = data.read(|state| {
        (
            state.transcript.messages().to_vec(),
            state.store.days().to_vec(),
            state.selected_day,
        )
    });

    let reply = match request_reply(data.model.as_ref(), &data.config.chat_model, &transcript, &days).await {
        Ok(ChatOutcome::ToolCalls(calls)) => {
            log::info!("Applying {} tool calls to day {} by default", calls.len(), default_day);
            data.dispatch(Action::ApplyToolCalls { calls, default_day })?;
            CONFIRMATION.to_string()
        }
        Ok(ChatOutcome::Reply(text)) if text.trim().is_empty() => FALLBACK_REPLY.to_string(),
        Ok(ChatOutcome::Reply(text)) => text,
        Err(e) => {
            log::error!("Chat exchange failed: {}", e);
            APOLOGY.to_string()
        }
    };

    data.dispatch(Action::AppendMessage(ChatMessage::assistant(reply)))?;
    Ok(data.read(|state| state.transcript.messages().to_vec()))
}
