use std::fmt;

use crate::models::chat::ChatMessage;
use crate::models::itinerary::{ItemPatch, ItineraryItem};
use crate::models::optimization::OptimizationPreview;
use crate::models::tool_call::ToolCall;
use crate::services::itinerary_store::StoreError;

use super::{Flight, Tab};

#[derive(Debug, Clone, PartialEq)]
pub enum MapClick {
    /// Empty map area; clears the selection.
    Background,
    /// A marker. The click stops here and never reaches the background.
    Marker(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddItem {
        day_index: usize,
        item: ItineraryItem,
    },
    UpdateItem {
        day_index: usize,
        item_id: String,
        patch: ItemPatch,
    },
    DeleteItem {
        day_index: usize,
        item_id: String,
    },
    SelectDay(usize),
    SwitchTab(Tab),
    MapClick(MapClick),
    MapLaidOut,
    SetJpy(String),
    SetTwd(String),
    SetRate(f64),
    RateRefreshed {
        rate: f64,
        at: String,
    },
    AppendMessage(ChatMessage),
    ApplyToolCalls {
        calls: Vec<ToolCall>,
        default_day: usize,
    },
    StagePreview(OptimizationPreview),
    CommitPreview,
    DiscardPreview,
    BeginFlight(Flight),
    EndFlight(Flight),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    Store(StoreError),
    InvalidRate(f64),
    NoPreview,
    AlreadyInFlight(Flight),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Store(err) => write!(f, "{}", err),
            ActionError::InvalidRate(rate) => write!(f, "Invalid exchange rate: {}", rate),
            ActionError::NoPreview => write!(f, "No optimization preview staged"),
            ActionError::AlreadyInFlight(kind) => write!(f, "{:?} request already in flight", kind),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<StoreError> for ActionError {
    fn from(err: StoreError) -> Self {
        ActionError::Store(err)
    }
}
