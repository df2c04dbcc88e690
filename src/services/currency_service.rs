//! Currency Service
//!
//! JPY <-> TWD arithmetic for the converter tab, plus the live-rate query.
//! TWD is shown rounded to whole dollars, JPY to whole yen.

use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;

use crate::models::currency::{ConversionState, DEFAULT_JPY_AMOUNT, INITIAL_LAST_UPDATED};
use crate::services::gemini_service::{
    GeminiError, GenerateContentRequest, GoogleSearch, LanguageModel, Tool,
};
use crate::state::{Action, ActionError, AppData, Flight};

const RATE_PROMPT: &str = "目前的日幣(JPY)兌台幣(TWD)匯率是多少？請只回傳數字，例如 0.215";

static LEADING_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();
static FLOAT_TOKEN: OnceLock<Option<Regex>> = OnceLock::new();

fn leading_number() -> Option<&'static Regex> {
    LEADING_NUMBER
        .get_or_init(|| Regex::new(r"^\s*[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").ok())
        .as_ref()
}

fn float_token() -> Option<&'static Regex> {
    FLOAT_TOKEN
        .get_or_init(|| Regex::new(r"\d+(?:\.\d+)?|\.\d+").ok())
        .as_ref()
}

/// Numeric value of a typed amount. Leading digits count, trailing junk is
/// ignored, anything without a leading number is `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let matched = leading_number()?.find(text)?;
    matched
        .as_str()
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// First decimal number in a free-text model reply, if it is a usable rate.
pub fn parse_rate_reply(reply: &str) -> Option<f64> {
    let matched = float_token()?.find(reply)?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite() && *rate > 0.0)
}

fn format_whole(value: f64) -> String {
    let rounded = value.round();
    // Avoid rendering "-0".
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{:.0}", rounded)
    }
}

impl ConversionState {
    pub fn new(rate: f64) -> Self {
        let state = Self {
            jpy_amount: DEFAULT_JPY_AMOUNT.to_string(),
            twd_amount: String::new(),
            rate,
            last_updated: INITIAL_LAST_UPDATED.to_string(),
        };
        state.with_rate(rate)
    }

    /// JPY was edited; TWD follows.
    pub fn set_from_jpy(&self, text: &str) -> Self {
        let twd_amount = parse_amount(text)
            .map(|jpy| format_whole(jpy * self.rate))
            .unwrap_or_default();
        Self {
            jpy_amount: text.to_string(),
            twd_amount,
            ..self.clone()
        }
    }

    /// TWD was edited; JPY follows.
    pub fn set_from_twd(&self, text: &str) -> Self {
        let jpy_amount = parse_amount(text)
            .map(|twd| format_whole(twd / self.rate))
            .unwrap_or_default();
        Self {
            jpy_amount,
            twd_amount: text.to_string(),
            ..self.clone()
        }
    }

    /// New rate; the JPY field stays authoritative.
    pub fn with_rate(&self, rate: f64) -> Self {
        let jpy_amount = self.jpy_amount.clone();
        Self {
            rate,
            ..self.clone()
        }
        .set_from_jpy(&jpy_amount)
    }
}

/// Asks the hosted model for today's JPY->TWD rate.
pub async fn fetch_live_rate(model: &dyn LanguageModel, model_name: &str) -> Result<f64, GeminiError> {
    let request = GenerateContentRequest {
        tools: Some(vec![Tool {
            google_search: Some(GoogleSearch {}),
            ..Default::default()
        }]),
        ..GenerateContentRequest::prompt(RATE_PROMPT)
    };

    let response = model.generate_content(model_name, &request).await?;
    let reply = response
        .text()
        .ok_or_else(|| GeminiError::ResponseError("Empty rate reply".to_string()))?;

    parse_rate_reply(reply.trim())
        .ok_or_else(|| GeminiError::ParseError(format!("No rate in reply '{}'", reply.trim())))
}

/// Refreshes the shared rate. Model or parse failures keep the previous
/// rate; only a concurrent refresh is reported back.
pub async fn refresh_rate(data: &AppData) -> Result<ConversionState, ActionError> {
    let _flight = data.begin_flight(Flight::Rate)?;

    match fetch_live_rate(data.model.as_ref(), &data.config.chat_model).await {
        Ok(rate) => {
            let at = Local::now().format("%H:%M:%S").to_string();
            log::info!("Exchange rate refreshed to {}", rate);
            if let Err(e) = data.dispatch(Action::RateRefreshed { rate, at }) {
                log::error!("Rate update rejected: {}", e);
            }
        }
        Err(e) => log::error!("Rate update failed: {}", e),
    }

    Ok(data.read(|state| state.conversion.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_conversion() {
        let state = ConversionState::new(0.215);
        assert_eq!(state.jpy_amount, "1000");
        assert_eq!(state.twd_amount, "215");
        assert_eq!(state.last_updated, "2025-01-01");
    }

    #[test]
    fn test_jpy_to_twd_rounds_to_whole_dollars() {
        let state = ConversionState::new(0.215).set_from_jpy("1234");
        assert_eq!(state.jpy_amount, "1234");
        assert_eq!(state.twd_amount, "265");
    }

    #[test]
    fn test_twd_to_jpy_divides() {
        let state = ConversionState::new(0.215).set_from_twd("430");
        assert_eq!(state.twd_amount, "430");
        assert_eq!(state.jpy_amount, "2000");
    }

    #[test]
    fn test_invalid_input_clears_derived_field() {
        let state = ConversionState::new(0.215).set_from_jpy("abc");
        assert_eq!(state.jpy_amount, "abc");
        assert_eq!(state.twd_amount, "");

        let state = state.set_from_twd("");
        assert_eq!(state.jpy_amount, "");
    }

    #[test]
    fn test_leading_number_parse() {
        assert_eq!(parse_amount("  42.5yen"), Some(42.5));
        assert_eq!(parse_amount("-3"), Some(-3.0));
        assert_eq!(parse_amount(".5"), Some(0.5));
        assert_eq!(parse_amount("yen 42"), None);
    }

    #[test]
    fn test_round_trip_within_rounding() {
        let rate = 0.215;
        for jpy in [0.0, 1.0, 100.0, 999.0, 1000.0, 3333.0, 50000.0, 123456.0] {
            let forward = ConversionState::new(rate).set_from_jpy(&jpy.to_string());
            let back = forward.set_from_twd(&forward.twd_amount.clone());
            let back_jpy: f64 = back.jpy_amount.parse().unwrap();
            // One TWD of rounding is worth 1 / rate yen.
            assert!((back_jpy - jpy).abs() <= 0.5 / rate + 0.5, "{} -> {}", jpy, back_jpy);
        }
    }

    #[test]
    fn test_negative_zero_is_not_rendered() {
        let state = ConversionState::new(0.215).set_from_jpy("-1");
        assert_eq!(state.twd_amount, "0");
    }

    #[test]
    fn test_rate_reply_parsing() {
        assert_eq!(parse_rate_reply("0.2134"), Some(0.2134));
        assert_eq!(parse_rate_reply("匯率約為 0.209 左右"), Some(0.209));
        assert_eq!(parse_rate_reply("not available"), None);
        assert_eq!(parse_rate_reply("0"), None);
    }
}
