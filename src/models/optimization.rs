use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::itinerary::ItineraryItem;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationScope {
    Today,
    All,
}

/// One entry of the model's proposal. Fields stay raw text here and are
/// validated when merged onto the original items; an entry without a usable
/// id matches nothing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub transport_detail: Option<String>,
}

// Anything other than a string reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Ok(Some(text)),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    #[serde(default)]
    pub reasoning: String,
    pub optimized_items: Vec<OptimizedItem>,
}

/// Proposed itinerary held apart from the committed days until the user
/// commits or discards it.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationPreview {
    pub scope: OptimizationScope,
    pub day_index: Option<usize>,
    pub reasoning: String,
    pub items: Vec<ItineraryItem>,
}
