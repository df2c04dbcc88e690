use serde::Serialize;

use super::{Action, AppData};

/// The three outbound model calls; each kind runs at most once at a time.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Flight {
    Chat,
    Optimizer,
    Rate,
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlight {
    pub chat: bool,
    pub optimizer: bool,
    pub rate: bool,
}

impl InFlight {
    pub fn get(&self, kind: Flight) -> bool {
        match kind {
            Flight::Chat => self.chat,
            Flight::Optimizer => self.optimizer,
            Flight::Rate => self.rate,
        }
    }

    pub fn set(&mut self, kind: Flight, value: bool) {
        match kind {
            Flight::Chat => self.chat = value,
            Flight::Optimizer => self.optimizer = value,
            Flight::Rate => self.rate = value,
        }
    }
}

/// Clears the in-flight flag on drop, whichever way the call ended.
pub struct FlightGuard<'a> {
    data: &'a AppData,
    kind: Flight,
}

impl<'a> FlightGuard<'a> {
    pub(super) fn new(data: &'a AppData, kind: Flight) -> Self {
        Self { data, kind }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.data.dispatch(Action::EndFlight(self.kind)) {
            log::error!("Failed to clear {:?} flight: {}", self.kind, e);
        }
    }
}
