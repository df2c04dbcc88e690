use serde::Serialize;

pub const DEFAULT_RATE: f64 = 0.215;
pub const DEFAULT_JPY_AMOUNT: &str = "1000";
pub const INITIAL_LAST_UPDATED: &str = "2025-01-01";
pub const QUICK_AMOUNTS: [&str; 8] = ["100", "500", "1000", "3000", "5000", "10000", "30000", "50000"];

/// JPY/TWD converter fields. The two amounts are free text as typed; the
/// one not last edited is derived from the other through `rate`.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionState {
    pub jpy_amount: String,
    pub twd_amount: String,
    pub rate: f64,
    pub last_updated: String,
}
