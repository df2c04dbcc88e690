use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::itinerary::{ItemPatch, NewItem};

pub const ADD_ITEM: &str = "add_itinerary_item";
pub const UPDATE_ITEM: &str = "update_itinerary_item";
pub const DELETE_ITEM: &str = "delete_itinerary_item";

/// A structured itinerary operation requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    AddItem {
        day_index: Option<i64>,
        item: NewItem,
    },
    UpdateItem {
        day_index: Option<i64>,
        item_id: String,
        updates: ItemPatch,
    },
    DeleteItem {
        day_index: Option<i64>,
        item_id: String,
    },
}

#[derive(Debug)]
pub enum ToolCallError {
    UnknownFunction(String),
    InvalidArguments { function: String, message: String },
}

impl fmt::Display for ToolCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolCallError::UnknownFunction(name) => write!(f, "Unknown function: {}", name),
            ToolCallError::InvalidArguments { function, message } => {
                write!(f, "Invalid arguments for {}: {}", function, message)
            }
        }
    }
}

impl std::error::Error for ToolCallError {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddArgs {
    #[serde(default, deserialize_with = "deserialize_day_index")]
    day_index: Option<i64>,
    #[serde(flatten)]
    item: NewItem,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    #[serde(default, deserialize_with = "deserialize_day_index")]
    day_index: Option<i64>,
    item_id: String,
    #[serde(default)]
    updates: ItemPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteArgs {
    #[serde(default, deserialize_with = "deserialize_day_index")]
    day_index: Option<i64>,
    item_id: String,
}

// Models send integers as 1, 1.0 or occasionally "1".
fn deserialize_day_index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 {
                    Ok(Some(f as i64))
                } else {
                    Err(serde::de::Error::custom(format!("day index {} is not an integer", f)))
                }
            } else {
                Err(serde::de::Error::custom("day index out of range"))
            }
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("day index '{}' is not an integer", s))),
        Some(other) => Err(serde::de::Error::custom(format!("unexpected day index {}", other))),
    }
}

impl ToolCall {
    pub fn parse(name: &str, args: &Value) -> Result<ToolCall, ToolCallError> {
        let invalid = |e: serde_json::Error| ToolCallError::InvalidArguments {
            function: name.to_string(),
            message: e.to_string(),
        };

        match name {
            ADD_ITEM => {
                let args = AddArgs::deserialize(args).map_err(invalid)?;
                Ok(ToolCall::AddItem {
                    day_index: args.day_index,
                    item: args.item,
                })
            }
            UPDATE_ITEM => {
                let args = UpdateArgs::deserialize(args).map_err(invalid)?;
                Ok(ToolCall::UpdateItem {
                    day_index: args.day_index,
                    item_id: args.item_id,
                    updates: args.updates,
                })
            }
            DELETE_ITEM => {
                let args = DeleteArgs::deserialize(args).map_err(invalid)?;
                Ok(ToolCall::DeleteItem {
                    day_index: args.day_index,
                    item_id: args.item_id,
                })
            }
            other => Err(ToolCallError::UnknownFunction(other.to_string())),
        }
    }

    pub fn day_index(&self) -> Option<i64> {
        match self {
            ToolCall::AddItem { day_index, .. }
            | ToolCall::UpdateItem { day_index, .. }
            | ToolCall::DeleteItem { day_index, .. } => *day_index,
        }
    }
}
