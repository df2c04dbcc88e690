use crate::services::gemini_service::{GenerateContentRequest, LanguageModel};

pub const FALLBACK_TIP: &str = "記得多喝水，享受福岡的美食！";

fn tip_prompt(place: &str) -> String {
    format!(
        "Provide a quick, fun travel tip (under 50 words) in Traditional Chinese for someone visiting \"{}\" in Fukuoka. Focus on hidden gems or local customs.",
        place
    )
}

/// A short tip about `place`; never fails, falls back to a stock tip.
pub async fn travel_tip(model: &dyn LanguageModel, model_name: &str, place: &str) -> String {
    let request = GenerateContentRequest::prompt(tip_prompt(place));
    match model.generate_content(model_name, &request).await {
        Ok(response) => match response.text() {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => FALLBACK_TIP.to_string(),
        },
        Err(e) => {
            log::warn!("Travel tip for {} failed: {}", place, e);
            FALLBACK_TIP.to_string()
        }
    }
}
