use std::fmt::Write;

use serde::Serialize;

use crate::models::{
    CropContext, DailyAction, FloodRiskResult, HarvestRecommendation, SmartAlert, WeatherSnapshot,
};

/// Full advisory output for one location, assembled from the engine outputs.
/// The optional explanation is additive text only and never alters the
/// computed fields.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryReport {
    pub weather: WeatherSnapshot,
    pub crop: CropContext,
    pub flood: FloodRiskResult,
    pub harvest: HarvestRecommendation,
    pub actions: Vec<DailyAction>,
    /// `None` means alerts could not be computed (no weather available)
    pub alerts: Option<Vec<SmartAlert>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl AdvisoryReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let current = &self.weather.current;

        let _ = writeln!(out, "Advisory for {}", self.weather.location);
        let _ = writeln!(
            out,
            "  {} | {:.1}C | {}% humidity | {:.1}mm rain | wind {:.0} km/h",
            current.condition,
            current.temperature_c,
            current.humidity_pct,
            current.rainfall_mm,
            current.wind_speed_kmh
        );
        match (&self.crop.name, self.crop.stage) {
            (Some(name), Some(stage)) => {
                let _ = writeln!(out, "  Crop: {} ({} stage)", name, stage);
                if let Some(info) = crate::models::lookup_crop(name) {
                    let _ = writeln!(
                        out,
                        "  Typically a {} season crop, ~{} days to maturity",
                        info.season, info.duration_days
                    );
                }
            }
            _ => {
                let _ = writeln!(out, "  No crop declared - showing general advisories");
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Flood risk: {} (score {}/100, trend {})",
            self.flood.level, self.flood.score, self.flood.trend
        );
        let _ = writeln!(out, "  {}", self.flood.advice);
        for tip in self.flood.tips {
            let _ = writeln!(out, "  - {}", tip);
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Harvest: {} [{}] ({} season)",
            self.harvest.label,
            self.harvest.status,
            self.harvest.details.season
        );
        let _ = writeln!(out, "  {}", self.harvest.reason);

        let _ = writeln!(out);
        let _ = writeln!(out, "Today's actions:");
        for action in &self.actions {
            let _ = writeln!(
                out,
                "  [{}] {} ({}): {}",
                action.priority, action.label, action.action_type, action.description
            );
        }

        let _ = writeln!(out);
        match &self.alerts {
            None => {
                let _ = writeln!(out, "Alerts unavailable - weather data could not be fetched.");
            }
            Some(alerts) if alerts.is_empty() => {
                let _ = writeln!(out, "No active alerts.");
            }
            Some(alerts) => {
                let _ = writeln!(out, "Alerts:");
                for alert in alerts {
                    let scope = if alert.is_general_advisory {
                        " (general advisory)"
                    } else {
                        ""
                    };
                    let _ = writeln!(
                        out,
                        "  [{} | {}] {}{}: {}",
                        alert.severity,
                        alert.alert_type.as_str(),
                        alert.title,
                        scope,
                        alert.message
                    );
                    if let Some(action) = alert.action {
                        let _ = writeln!(out, "      -> {}", action);
                    }
                }
            }
        }

        if let Some(explanation) = &self.explanation {
            let _ = writeln!(out);
            let _ = writeln!(out, "Explanation:");
            let _ = writeln!(out, "{}", explanation);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        AdvisoryEngine, FloodRiskAssessor, HarvestAdvisoryClassifier,
    };
    use crate::models::{CropStage, CurrentWeather, WeatherCondition};
    use chrono::Utc;

    fn sample_report(alerts: Option<Vec<SmartAlert>>) -> AdvisoryReport {
        let weather = WeatherSnapshot {
            location: "Varanasi".into(),
            current: CurrentWeather {
                temperature_c: 30.0,
                humidity_pct: 65,
                rainfall_mm: 0.0,
                wind_speed_kmh: 7.0,
                condition: WeatherCondition::Clear,
                description: "clear sky".into(),
            },
            forecast: vec![],
            consecutive_rainy_days: 0,
            fetched_at: Utc::now(),
        };
        let engine = AdvisoryEngine::new();
        let crop = CropContext::new("Rice", CropStage::Vegetative);
        let flood = FloodRiskAssessor::assess(0.0, 0, &[]);
        let harvest = HarvestAdvisoryClassifier::classify_at(&weather, 7);
        let actions = engine.generate_daily_actions(&weather, &crop);

        AdvisoryReport {
            weather,
            crop,
            flood,
            harvest,
            actions,
            alerts,
            explanation: None,
        }
    }

    #[test]
    fn text_report_carries_all_sections() {
        let text = sample_report(Some(vec![])).render_text();
        assert!(text.contains("Advisory for Varanasi"));
        assert!(text.contains("Flood risk: Low"));
        assert!(text.contains("Harvest:"));
        assert!(text.contains("Today's actions:"));
        assert!(text.contains("No active alerts."));
    }

    #[test]
    fn missing_alerts_render_explicit_notice() {
        let text = sample_report(None).render_text();
        assert!(text.contains("Alerts unavailable"));
        assert!(!text.contains("No active alerts."));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = sample_report(Some(vec![]));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["weather"]["location"], "Varanasi");
        assert_eq!(json["flood"]["level"], "Low");
        assert!(json.get("explanation").is_none());
    }
}
