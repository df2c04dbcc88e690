use crate::services::chat_service::apply_tool_call;
use crate::services::itinerary_store::StoreError;

use super::{Action, ActionError, AppState, MapClick, Tab};

/// Next state for `action`. Pure apart from logging skipped tool calls.
pub fn reduce(mut state: AppState, action: Action) -> Result<AppState, ActionError> {
    match action {
        Action::AddItem { day_index, item } => {
            state.store.add_item(day_index, item)?;
        }
        Action::UpdateItem {
            day_index,
            item_id,
            patch,
        } => {
            state.store.update_item(day_index, &item_id, &patch)?;
        }
        Action::DeleteItem { day_index, item_id } => {
            state.store.delete_item(day_index, &item_id)?;
            if day_index == state.selected_day && state.selected_map_item.as_deref() == Some(item_id.as_str()) {
                state.selected_map_item = None;
            }
        }
        Action::SelectDay(day_index) => {
            if state.store.day(day_index).is_none() {
                return Err(StoreError::DayNotFound(day_index).into());
            }
            state.selected_day = day_index;
            state.selected_map_item = None;
        }
        Action::SwitchTab(tab) => {
            if tab == Tab::Map && state.active_tab != Tab::Map {
                state.map_layout_stale = true;
            }
            state.active_tab = tab;
        }
        Action::MapClick(MapClick::Background) => {
            state.selected_map_item = None;
        }
        Action::MapClick(MapClick::Marker(item_id)) => {
            let on_map = state
                .current_day()
                .and_then(|day| day.find(&item_id))
                .map(|item| item.coordinates().is_some())
                .unwrap_or(false);
            if !on_map {
                return Err(StoreError::ItemNotFound(item_id).into());
            }
            state.selected_map_item = Some(item_id);
        }
        Action::MapLaidOut => {
            state.map_layout_stale = false;
        }
        Action::SetJpy(text) => {
            state.conversion = state.conversion.set_from_jpy(&text);
        }
        Action::SetTwd(text) => {
            state.conversion = state.conversion.set_from_twd(&text);
        }
        Action::SetRate(rate) => {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ActionError::InvalidRate(rate));
            }
            state.conversion = state.conversion.with_rate(rate);
        }
        Action::RateRefreshed { rate, at } => {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ActionError::InvalidRate(rate));
            }
            state.conversion = state.conversion.with_rate(rate);
            state.conversion.last_updated = at;
        }
        Action::AppendMessage(message) => {
            state.transcript.push(message);
        }
        Action::ApplyToolCalls { calls, default_day } => {
            for call in &calls {
                if let Err(e) = apply_tool_call(&mut state.store, call, default_day) {
                    log::warn!("Skipping tool call {:?}: {}", call, e);
                }
            }
            if let Some(selected) = state.selected_map_item.clone() {
                let still_there = state
                    .current_day()
                    .map(|day| day.find(&selected).is_some())
                    .unwrap_or(false);
                if !still_there {
                    state.selected_map_item = None;
                }
            }
        }
        Action::StagePreview(preview) => {
            state.optimization_preview = Some(preview);
        }
        Action::CommitPreview => {
            let preview = state
                .optimization_preview
                .take()
                .ok_or(ActionError::NoPreview)?;
            let updated = state.store.apply_schedule(&preview.items);
            log::info!("Committed optimization preview, {} items updated", updated);
        }
        Action::DiscardPreview => {
            if state.optimization_preview.take().is_none() {
                return Err(ActionError::NoPreview);
            }
        }
        Action::BeginFlight(kind) => {
            if state.in_flight.get(kind) {
                return Err(ActionError::AlreadyInFlight(kind));
            }
            state.in_flight.set(kind, true);
        }
        Action::EndFlight(kind) => {
            state.in_flight.set(kind, false);
        }
    }
    Ok(state)
}
