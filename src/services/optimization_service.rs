//! Optimization Service
//!
//! Asks the hosted model to re-time a day (or the whole trip) with opening
//! hours and geographic adjacency in mind, merges the proposal onto the
//! current items and stages it as a preview. Nothing reaches the committed
//! itinerary until the preview is committed.
//!
//! ## Merge rules
//! - Proposal entries are matched to items by id; unknown ids are ignored
//! - Items the model left out keep their current times
//! - A proposed time that is not a valid `HH:mm` keeps the current time
//! - The merged list is re-sorted by start time

use std::fmt;

use serde_json::json;

use crate::models::itinerary::{ClockTime, ItineraryItem};
use crate::models::optimization::{OptimizationPreview, OptimizationResult, OptimizationScope};
use crate::services::gemini_service::{
    GeminiError, GenerateContentRequest, GenerationConfig, LanguageModel,
};
use crate::services::itinerary_store::ItineraryStore;
use crate::state::{Action, ActionError, AppData, Flight};

#[derive(Debug)]
pub enum OptimizerError {
    Busy(ActionError),
    DayNotFound(usize),
    Model(GeminiError),
}

impl fmt::Display for OptimizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizerError::Busy(err) => write!(f, "{}", err),
            OptimizerError::DayNotFound(index) => write!(f, "Day {} not found", index),
            OptimizerError::Model(err) => write!(f, "Optimization failed: {}", err),
        }
    }
}

impl std::error::Error for OptimizerError {}

impl From<GeminiError> for OptimizerError {
    fn from(err: GeminiError) -> Self {
        OptimizerError::Model(err)
    }
}

/// The items an optimization run works on.
pub fn items_for_scope(
    store: &ItineraryStore,
    scope: OptimizationScope,
    day_index: usize,
) -> Option<Vec<ItineraryItem>> {
    match scope {
        OptimizationScope::Today => store.day(day_index).map(|day| day.itinerary.clone()),
        OptimizationScope::All => Some(
            store
                .days()
                .iter()
                .flat_map(|day| day.itinerary.iter().cloned())
                .collect(),
        ),
    }
}

fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "reasoning": { "type": "STRING", "description": "優化的理由與邏輯描述 (繁體中文)" },
            "optimizedItems": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "startTime": { "type": "STRING" },
                        "endTime": { "type": "STRING" },
                        "transportDetail": { "type": "STRING", "description": "更新後的交通建議" }
                    },
                    "required": ["id", "startTime", "endTime"]
                }
            }
        },
        "required": ["reasoning", "optimizedItems"]
    })
}

pub fn build_request(items: &[ItineraryItem]) -> Result<GenerateContentRequest, GeminiError> {
    let payload = serde_json::to_string(items)?;
    let prompt = format!(
        "你是一位資深旅遊導遊。請根據以下行程資料，考慮地理位置（經緯度）、營業時間與合理的用餐/交通時間，提供一個更流暢的排序建議：\n\n\
         行程內容：{}\n\n\
         請確保：\n\
         1. 如果某地點有 openingHours，請確保建議時間在其範圍內。\n\
         2. 鄰近的地點應該盡量排在一起。\n\
         3. 回傳格式必須為 JSON，每個項目以 id 對應，時間格式為 HH:mm。\n\
         4. 即使不需要變動順序，也可以微調 startTime。",
        payload
    );

    Ok(GenerateContentRequest {
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(response_schema()),
            ..Default::default()
        }),
        ..GenerateContentRequest::prompt(prompt)
    })
}

/// Reads the model's JSON, tolerating a Markdown code fence around it.
pub fn parse_result(text: &str) -> Result<OptimizationResult, GeminiError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(body.trim())?)
}

fn proposed_time(item_id: &str, proposed: Option<&str>, current: ClockTime) -> ClockTime {
    match proposed {
        None => current,
        Some(text) => ClockTime::parse(text).unwrap_or_else(|| {
            log::warn!("Keeping {} for item {}: proposed time '{}' is invalid", current, item_id, text);
            current
        }),
    }
}

pub fn merge_preview(originals: &[ItineraryItem], result: &OptimizationResult) -> Vec<ItineraryItem> {
    let mut merged: Vec<ItineraryItem> = originals
        .iter()
        .map(|original| {
            let proposal = result
                .optimized_items
                .iter()
                .find(|o| o.id.as_deref() == Some(original.id.as_str()));
            let Some(proposal) = proposal else {
                return original.clone();
            };
            let mut item = original.clone();
            item.start_time = proposed_time(&item.id, proposal.start_time.as_deref(), item.start_time);
            item.end_time = proposed_time(&item.id, proposal.end_time.as_deref(), item.end_time);
            if let Some(detail) = &proposal.transport_detail {
                item.transport_detail = Some(detail.clone());
            }
            item
        })
        .collect();

    let unmatched = result
        .optimized_items
        .iter()
        .filter(|o| match o.id.as_deref() {
            Some(id) => !originals.iter().any(|item| item.id == id),
            None => true,
        })
        .count();
    if unmatched > 0 {
        log::warn!("Ignoring {} proposed items with missing or unknown ids", unmatched);
    }

    merged.sort_by_key(|item| item.start_time);
    merged
}

pub async fn request_optimization(
    model: &dyn LanguageModel,
    model_name: &str,
    items: &[ItineraryItem],
) -> Result<OptimizationResult, GeminiError> {
    let request = build_request(items)?;
    let response = model.generate_content(model_name, &request).await?;
    let text = response
        .text()
        .ok_or_else(|| GeminiError::ResponseError("Empty optimization reply".to_string()))?;
    parse_result(&text)
}

/// Runs the optimizer for `scope` and stages the merged preview.
pub async fn stage_preview(
    data: &AppData,
    scope: OptimizationScope,
) -> Result<OptimizationPreview, OptimizerError> {
    let _flight = data.begin_flight(Flight::Optimizer).map_err(OptimizerError::Busy)?;

    let (items, day_index) = data.read(|state| {
        (
            items_for_scope(&state.store, scope, state.selected_day),
            state.selected_day,
        )
    });
    let items = items.ok_or(OptimizerError::DayNotFound(day_index))?;

    log::info!("Optimizing {} items ({:?})", items.len(), scope);
    let result = request_optimization(data.model.as_ref(), &data.config.optimizer_model, &items)
        .await
        .map_err(|e| {
            log::error!("AI optimization error: {}", e);
            OptimizerError::Model(e)
        })?;

    let preview = OptimizationPreview {
        scope,
        day_index: match scope {
            OptimizationScope::Today => Some(day_index),
            OptimizationScope::All => None,
        },
        reasoning: result.reasoning.clone(),
        items: merge_preview(&items, &result),
    };

    if let Err(e) = data.dispatch(Action::StagePreview(preview.clone())) {
        log::error!("Failed to stage preview: {}", e);
    }
    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed::initial_days;
    use crate::models::optimization::OptimizedItem;
    use std::collections::HashSet;

    fn day0() -> Vec<ItineraryItem> {
        initial_days().remove(0).itinerary
    }

    fn proposal(id: &str, start: &str, end: &str) -> OptimizedItem {
        OptimizedItem {
            id: Some(id.to_string()),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            transport_detail: None,
        }
    }

    #[test]
    fn test_merge_keeps_every_original_id() {
        let originals = day0();
        let result = OptimizationResult {
            reasoning: "shrine before ramen".to_string(),
            optimized_items: vec![proposal("4", "11:40", "12:30"), proposal("ghost", "09:00", "10:00")],
        };

        let merged = merge_preview(&originals, &result);

        let original_ids: HashSet<&str> = originals.iter().map(|i| i.id.as_str()).collect();
        let merged_ids: HashSet<&str> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(original_ids, merged_ids);
        assert_eq!(merged.len(), originals.len());

        let shrine = merged.iter().find(|i| i.id == "4").unwrap();
        assert_eq!(shrine.start_time.to_string(), "11:40");
        let ramen = merged.iter().find(|i| i.id == "3").unwrap();
        assert_eq!(ramen.start_time.to_string(), "11:45");

        assert!(merged.windows(2).all(|w| w[0].start_time <= w[1].start_time));
    }

    #[test]
    fn test_merge_rejects_malformed_times() {
        let originals = day0();
        let result = OptimizationResult {
            reasoning: String::new(),
            optimized_items: vec![OptimizedItem {
                id: Some("6".to_string()),
                start_time: Some("around four".to_string()),
                end_time: Some("9:15".to_string()),
                transport_detail: Some("步行 3 分鐘".to_string()),
            }],
        };

        let merged = merge_preview(&originals, &result);
        let mall = merged.iter().find(|i| i.id == "6").unwrap();
        assert_eq!(mall.start_time.to_string(), "16:00");
        assert_eq!(mall.end_time.to_string(), "09:15");
        assert_eq!(mall.transport_detail.as_deref(), Some("步行 3 分鐘"));
    }

    #[test]
    fn test_entries_without_usable_id_are_skipped() {
        let raw = r#"{"reasoning":"ok","optimizedItems":[
            {"id":"4","startTime":"11:40","endTime":"12:30"},
            {"startTime":"09:00","endTime":"10:00"},
            {"id":17,"startTime":900,"endTime":"10:00"}
        ]}"#;
        let result = parse_result(raw).unwrap();
        assert_eq!(result.optimized_items.len(), 3);
        assert!(result.optimized_items[1].id.is_none());
        assert!(result.optimized_items[2].id.is_none());
        assert!(result.optimized_items[2].start_time.is_none());

        let originals = day0();
        let merged = merge_preview(&originals, &result);
        assert_eq!(merged.len(), originals.len());
        assert_eq!(merged.iter().find(|i| i.id == "4").unwrap().start_time.to_string(), "11:40");
        assert_eq!(merged.iter().find(|i| i.id == "1").unwrap().start_time.to_string(), "06:50");
    }

    #[test]
    fn test_parse_result_with_and_without_fence() {
        let raw = r#"{"reasoning":"ok","optimizedItems":[{"id":"1","startTime":"07:00","endTime":"10:00"}]}"#;
        let plain = parse_result(raw).unwrap();
        assert_eq!(plain.optimized_items.len(), 1);

        let fenced = parse_result(&format!("```json\n{}\n```", raw)).unwrap();
        assert_eq!(fenced, plain);

        assert!(parse_result("not json").is_err());
        assert!(parse_result(r#"{"reasoning":"no items"}"#).is_err());
    }

    #[test]
    fn test_scope_selection() {
        let store = ItineraryStore::new(initial_days());
        let today = items_for_scope(&store, OptimizationScope::Today, 1).unwrap();
        assert_eq!(today[0].id, "hotel-d2");

        let all = items_for_scope(&store, OptimizationScope::All, 1).unwrap();
        let total: usize = store.days().iter().map(|d| d.itinerary.len()).sum();
        assert_eq!(all.len(), total);

        assert!(items_for_scope(&store, OptimizationScope::Today, 9).is_none());
    }

    #[test]
    fn test_request_asks_for_json() {
        let request = build_request(&day0()).unwrap();
        let config = request.generation_config.unwrap();
        assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
        assert!(config.response_schema.unwrap()["properties"]["optimizedItems"].is_object());
        let prompt = request.contents[0].parts[0].text.clone().unwrap();
        assert!(prompt.contains("openingHours"));
        assert!(prompt.contains("CI110"));
    }
}
