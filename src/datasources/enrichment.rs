use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::EnrichmentConfig;
use crate::error::{KisanError, Result};
use crate::models::{CropContext, DailyAction, FloodRiskResult, HarvestRecommendation, WeatherSnapshot};

/// Fallback line used when enrichment fails or times out. The rule outputs
/// are authoritative either way; this text is purely additive.
pub const FALLBACK_EXPLANATION: &str =
    "Detailed explanation is unavailable right now. Follow the advisory above.";

/// Optional natural-language elaboration of the rule outputs, via an
/// OpenAI-compatible chat completions endpoint.
///
/// Never consulted for any decision: failure or delay degrades to a fixed
/// fallback string and leaves every computed score, level and action
/// untouched.
pub struct AdvisoryTextGenerator {
    client: reqwest::Client,
    config: EnrichmentConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl AdvisoryTextGenerator {
    pub fn new(config: EnrichmentConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KisanError::Config(format!("enrichment client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Elaborate the computed advisory in the requested language.
    pub async fn explain(
        &self,
        weather: &WeatherSnapshot,
        crop: &CropContext,
        flood: &FloodRiskResult,
        harvest: &HarvestRecommendation,
        actions: &[DailyAction],
        language: &str,
    ) -> Result<String> {
        let prompt = Self::build_prompt(weather, crop, flood, harvest, actions, language);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are an agricultural extension officer. Explain the given \
                              advisory to a farmer in plain language. Do not change any \
                              recommendation."
                        .to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: 400,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| KisanError::DataSourceUnavailable(format!("enrichment: {}", e)))?;

        if !response.status().is_success() {
            return Err(KisanError::DataSourceUnavailable(format!(
                "enrichment endpoint returned {}",
                response.status()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| KisanError::DataSourceUnavailable(format!("enrichment: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                KisanError::InvalidData("enrichment response contained no text".into())
            })
    }

    fn build_prompt(
        weather: &WeatherSnapshot,
        crop: &CropContext,
        flood: &FloodRiskResult,
        harvest: &HarvestRecommendation,
        actions: &[DailyAction],
        language: &str,
    ) -> String {
        let crop_line = match (&crop.name, crop.stage) {
            (Some(name), Some(stage)) => format!("Crop: {} ({} stage)", name, stage),
            _ => "No crop declared".to_string(),
        };

        let action_lines: Vec<String> = actions
            .iter()
            .map(|a| format!("- [{}] {}: {}", a.priority, a.label, a.description))
            .collect();

        format!(
            "Respond in {}.\n\
             Location: {}\n\
             Weather: {}, {:.1}C, {}% humidity, {:.1}mm rain\n\
             {}\n\
             Flood risk: {} (score {}, trend {})\n\
             Harvest advice: {} - {}\n\
             Today's actions:\n{}",
            language,
            weather.location,
            weather.current.condition,
            weather.current.temperature_c,
            weather.current.humidity_pct,
            weather.current.rainfall_mm,
            crop_line,
            flood.level,
            flood.score,
            flood.trend,
            harvest.label,
            harvest.reason,
            action_lines.join("\n"),
        )
    }
}
