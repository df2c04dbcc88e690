//! Application state
//!
//! One `AppState` value owns everything the UI shows. It only changes
//! through `reduce`, which maps the old state plus an `Action` to the next
//! state. `AppData` is the shared container handed to the HTTP handlers.

pub mod action;
pub mod flight;
pub mod reducer;

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::db::seed::initial_days;
use crate::models::chat::Transcript;
use crate::models::currency::ConversionState;
use crate::models::itinerary::DayPlan;
use crate::models::optimization::OptimizationPreview;
use crate::services::gemini_service::LanguageModel;
use crate::services::itinerary_store::ItineraryStore;

pub use action::{Action, ActionError, MapClick};
pub use flight::{Flight, FlightGuard, InFlight};
pub use reducer::reduce;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Itinerary,
    Info,
    Currency,
    Map,
    Chat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub store: ItineraryStore,
    pub selected_day: usize,
    pub active_tab: Tab,
    pub selected_map_item: Option<String>,
    pub map_layout_stale: bool,
    pub conversion: ConversionState,
    pub transcript: Transcript,
    pub optimization_preview: Option<OptimizationPreview>,
    pub in_flight: InFlight,
}

impl AppState {
    pub fn new(days: Vec<DayPlan>, exchange_rate: f64) -> Self {
        Self {
            store: ItineraryStore::new(days),
            selected_day: 0,
            active_tab: Tab::default(),
            selected_map_item: None,
            map_layout_stale: true,
            conversion: ConversionState::new(exchange_rate),
            transcript: Transcript::new(),
            optimization_preview: None,
            in_flight: InFlight::default(),
        }
    }

    pub fn current_day(&self) -> Option<&DayPlan> {
        self.store.day(self.selected_day)
    }
}

pub struct AppData {
    state: Mutex<AppState>,
    pub model: Arc<dyn LanguageModel>,
    pub config: AppConfig,
}

impl AppData {
    pub fn new(config: AppConfig, model: Arc<dyn LanguageModel>) -> Self {
        let state = AppState::new(initial_days(), config.default_exchange_rate);
        Self::with_state(config, model, state)
    }

    pub fn with_state(config: AppConfig, model: Arc<dyn LanguageModel>, state: AppState) -> Self {
        Self {
            state: Mutex::new(state),
            model,
            config,
        }
    }

    // A panic elsewhere never leaves the state half-written: the reducer
    // builds the next value before it is swapped in.
    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.lock())
    }

    /// Applies `action`. On error the state is left exactly as it was.
    pub fn dispatch(&self, action: Action) -> Result<(), ActionError> {
        let mut guard = self.lock();
        let next = reduce(guard.clone(), action)?;
        *guard = next;
        Ok(())
    }

    /// Marks `kind` in flight until the returned guard is dropped.
    pub fn begin_flight(&self, kind: Flight) -> Result<FlightGuard<'_>, ActionError> {
        self.dispatch(Action::BeginFlight(kind))?;
        Ok(FlightGuard::new(self, kind))
    }
}
