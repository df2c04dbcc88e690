//! Itinerary Store
//!
//! Ordered day plans, each holding items kept sorted by start time. Every
//! mutation re-sorts the touched day. Failed lookups leave the store as it
//! was; callers decide whether that is an error or a silent no-op.

use std::fmt;

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use crate::models::itinerary::{DayPlan, ItemPatch, ItineraryItem, NewItem};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    DayNotFound(usize),
    ItemNotFound(String),
    DuplicateId(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DayNotFound(index) => write!(f, "Day {} not found", index),
            StoreError::ItemNotFound(id) => write!(f, "Itinerary item {} not found", id),
            StoreError::DuplicateId(id) => write!(f, "Itinerary item {} already exists", id),
        }
    }
}

impl std::error::Error for StoreError {}

/// Time-based identifier with a short random suffix.
pub fn generate_item_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(|c| (c as char).to_ascii_lowercase())
        .collect();
    format!("{}{}", Utc::now().timestamp_millis(), suffix)
}

/// Turns a submitted item into a stored one, keeping a supplied id.
pub fn prepare_item(new_item: NewItem) -> ItineraryItem {
    let id = new_item
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(generate_item_id);
    new_item.into_item(id)
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct ItineraryStore {
    days: Vec<DayPlan>,
}

impl ItineraryStore {
    pub fn new(mut days: Vec<DayPlan>) -> Self {
        for day in days.iter_mut() {
            day.sort_by_start_time();
        }
        Self { days }
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn day(&self, day_index: usize) -> Option<&DayPlan> {
        self.days.get(day_index)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn contains_id(&self, item_id: &str) -> bool {
        self.days.iter().any(|day| day.find(item_id).is_some())
    }

    fn day_mut(&mut self, day_index: usize) -> Result<&mut DayPlan, StoreError> {
        self.days
            .get_mut(day_index)
            .ok_or(StoreError::DayNotFound(day_index))
    }

    pub fn add_item(&mut self, day_index: usize, item: ItineraryItem) -> Result<(), StoreError> {
        if self.contains_id(&item.id) {
            return Err(StoreError::DuplicateId(item.id));
        }
        let day = self.day_mut(day_index)?;
        day.itinerary.push(item);
        day.sort_by_start_time();
        Ok(())
    }

    pub fn update_item(
        &mut self,
        day_index: usize,
        item_id: &str,
        patch: &ItemPatch,
    ) -> Result<&ItineraryItem, StoreError> {
        let day = self.day_mut(day_index)?;
        let item = day
            .itinerary
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| StoreError::ItemNotFound(item_id.to_string()))?;
        item.apply(patch);
        day.sort_by_start_time();
        day.find(item_id)
            .ok_or_else(|| StoreError::ItemNotFound(item_id.to_string()))
    }

    pub fn delete_item(&mut self, day_index: usize, item_id: &str) -> Result<ItineraryItem, StoreError> {
        let day = self.day_mut(day_index)?;
        let position = day
            .itinerary
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| StoreError::ItemNotFound(item_id.to_string()))?;
        let removed = day.itinerary.remove(position);
        day.sort_by_start_time();
        Ok(removed)
    }

    /// Copies the optimizer's schedule fields (start, end, transport detail)
    /// from `items` onto stored items with the same id, in whichever day
    /// holds them, then re-sorts the touched days. Every other field keeps
    /// its current value. Returns how many items were updated.
    pub fn apply_schedule(&mut self, items: &[ItineraryItem]) -> usize {
        let mut updated = 0;
        for day in self.days.iter_mut() {
            let mut touched = false;
            for stored in day.itinerary.iter_mut() {
                if let Some(proposed) = items.iter().find(|item| item.id == stored.id) {
                    stored.start_time = proposed.start_time;
                    stored.end_time = proposed.end_time;
                    if let Some(detail) = &proposed.transport_detail {
                        stored.transport_detail = Some(detail.clone());
                    }
                    touched = true;
                    updated += 1;
                }
            }
            if touched {
                day.sort_by_start_time();
            }
        }
        updated
    }
}
