use crate::models::{
    AlertSeverity, AlertType, CropContext, CropStage, FloodRiskLevel, SmartAlert,
    WeatherCondition, WeatherSnapshot,
};

/// Maximum number of alerts surfaced to the caller
const MAX_ALERTS: usize = 4;

/// Smart alert aggregator - composes weather, crop context and the computed
/// flood level into a deduplicated, capped alert list.
///
/// Five independent checks run in a fixed order, each contributing at most
/// one alert: weather/fertilizer, harvest window, irrigation, disease watch,
/// flood. Alert ids are stable per rule so callers can track dismissal
/// across recomputations.
pub struct SmartAlertAggregator;

impl SmartAlertAggregator {
    /// Returns `None` when no weather snapshot is available - the caller
    /// must render an explicit "alerts unavailable" notice rather than an
    /// empty list. With weather present, returns at most 4 alerts in check
    /// order; when no crop is declared, every non-flood alert is marked as
    /// a general advisory.
    pub fn generate(
        weather: Option<&WeatherSnapshot>,
        crop: &CropContext,
        flood_level: FloodRiskLevel,
    ) -> Option<Vec<SmartAlert>> {
        let weather = weather?;
        let current = &weather.current;
        let stage = crop.declared_stage();

        let mut alerts = Vec::new();

        // 1. Wet conditions make fertilizer ineffective
        if current.is_raining() || current.humidity_pct > 75 {
            alerts.push(
                SmartAlert::new(
                    "weather-fertilizer",
                    AlertType::Weather,
                    AlertSeverity::Medium,
                    "Hold Fertilizer Application",
                    format!(
                        "Rain or humid air ({}% humidity) at {} will wash away or dilute fertilizer.",
                        current.humidity_pct, weather.location
                    ),
                )
                .with_action("Wait for a dry spell before applying fertilizer"),
            );
        }

        // 2. Favourable harvest window for mature crops
        if matches!(stage, Some(CropStage::Maturity | CropStage::Harvest))
            && !current.is_raining()
            && current.humidity_pct < 65
            && current.condition != WeatherCondition::Thunderstorm
        {
            alerts.push(
                SmartAlert::new(
                    "harvest-window",
                    AlertType::Harvest,
                    AlertSeverity::Low,
                    "Good Harvest Window",
                    "Dry, stable conditions today suit harvesting your mature crop.",
                )
                .with_action("Plan harvesting while the dry spell lasts"),
            );
        }

        // 3. Warm dry day, crop likely needs water
        if !current.is_raining() && current.temperature_c >= 28.0 {
            alerts.push(
                SmartAlert::new(
                    "irrigation-needed",
                    AlertType::Irrigation,
                    AlertSeverity::Info,
                    "Irrigation Reminder",
                    format!(
                        "No rain and {:.0}C heat today. Check soil moisture and irrigate if dry.",
                        current.temperature_c
                    ),
                )
                .with_action("Irrigate in the early morning or evening"),
            );
        }

        // 4. Humid flowering crops are prone to fungal disease
        if stage == Some(CropStage::Flowering) && current.humidity_pct > 80 {
            alerts.push(
                SmartAlert::new(
                    "disease-watch",
                    AlertType::Disease,
                    AlertSeverity::High,
                    "Disease Watch",
                    format!(
                        "Sustained humidity ({}%) during flowering favours fungal infection.",
                        current.humidity_pct
                    ),
                )
                .with_action("Inspect flowers and leaves daily; keep fungicide ready"),
            );
        }

        // 5. Flood risk from the assessor; critical alerts cannot be dismissed
        match flood_level {
            FloodRiskLevel::High => alerts.push(
                SmartAlert::new(
                    "flood-critical",
                    AlertType::Flood,
                    AlertSeverity::High,
                    "Flood Warning",
                    "Flood risk is HIGH for your area. Act on the flood advisory immediately.",
                )
                .with_action("Move produce, equipment and livestock to higher ground")
                .non_dismissible(),
            ),
            FloodRiskLevel::Medium => alerts.push(
                SmartAlert::new(
                    "flood-caution",
                    AlertType::Flood,
                    AlertSeverity::Medium,
                    "Flood Caution",
                    "Flood risk is elevated. Prepare drainage and watch water levels.",
                )
                .with_action("Clear field drains and monitor the forecast"),
            ),
            FloodRiskLevel::Low => {}
        }

        // Without a declared crop, everything except flood alerts is
        // weather-only advice
        if !crop.is_declared() {
            for alert in &mut alerts {
                if alert.alert_type != AlertType::Flood {
                    alert.is_general_advisory = true;
                }
            }
        }

        alerts.truncate(MAX_ALERTS);
        Some(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentWeather, WeatherCondition};
    use chrono::Utc;

    fn weather(
        rainfall_mm: f64,
        humidity_pct: u8,
        temperature_c: f64,
        condition: WeatherCondition,
    ) -> WeatherSnapshot {
        WeatherSnapshot {
            location: "Patna".into(),
            current: CurrentWeather {
                temperature_c,
                humidity_pct,
                rainfall_mm,
                wind_speed_kmh: 6.0,
                condition,
                description: condition.as_str().to_lowercase(),
            },
            forecast: vec![],
            consecutive_rainy_days: 0,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn missing_weather_signals_unavailable() {
        let result =
            SmartAlertAggregator::generate(None, &CropContext::default(), FloodRiskLevel::High);
        assert!(result.is_none());
    }

    #[test]
    fn calm_day_without_crop_yields_no_alerts() {
        // Scenario: clear, 50% humidity, 25C, flood level low
        let snapshot = weather(0.0, 50, 25.0, WeatherCondition::Clear);
        let alerts = SmartAlertAggregator::generate(
            Some(&snapshot),
            &CropContext::default(),
            FloodRiskLevel::Low,
        )
        .unwrap();
        assert!(alerts.is_empty());
    }

    #[test]
    fn never_more_than_four_alerts() {
        // Humid flowering crop on a hot dry day with high flood risk fires
        // four checks at once
        let snapshot = weather(0.0, 85, 30.0, WeatherCondition::Clear);
        let crop = CropContext::new("Rice", CropStage::Flowering);
        let alerts =
            SmartAlertAggregator::generate(Some(&snapshot), &crop, FloodRiskLevel::High).unwrap();

        // weather-fertilizer, irrigation-needed, disease-watch, flood-critical
        assert_eq!(alerts.len(), 4);
        assert!(alerts.len() <= 4);
    }

    #[test]
    fn check_order_is_preserved() {
        let snapshot = weather(0.0, 85, 30.0, WeatherCondition::Clear);
        let crop = CropContext::new("Rice", CropStage::Flowering);
        let alerts =
            SmartAlertAggregator::generate(Some(&snapshot), &crop, FloodRiskLevel::High).unwrap();

        let ids: Vec<&str> = alerts.iter().map(|a| a.id).collect();
        assert_eq!(
            ids,
            vec![
                "weather-fertilizer",
                "irrigation-needed",
                "disease-watch",
                "flood-critical"
            ]
        );
    }

    #[test]
    fn flood_critical_is_never_dismissible() {
        let snapshot = weather(0.0, 50, 25.0, WeatherCondition::Clear);
        let alerts = SmartAlertAggregator::generate(
            Some(&snapshot),
            &CropContext::default(),
            FloodRiskLevel::High,
        )
        .unwrap();

        let flood = alerts.iter().find(|a| a.id == "flood-critical").unwrap();
        assert!(!flood.dismissible);
        assert_eq!(flood.severity, AlertSeverity::High);
    }

    #[test]
    fn medium_flood_level_gives_dismissible_caution() {
        let snapshot = weather(0.0, 50, 25.0, WeatherCondition::Clear);
        let alerts = SmartAlertAggregator::generate(
            Some(&snapshot),
            &CropContext::default(),
            FloodRiskLevel::Medium,
        )
        .unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "flood-caution");
        assert!(alerts[0].dismissible);
    }

    #[test]
    fn non_flood_alerts_marked_general_without_crop() {
        let snapshot = weather(2.0, 80, 30.0, WeatherCondition::Rain);
        let alerts = SmartAlertAggregator::generate(
            Some(&snapshot),
            &CropContext::default(),
            FloodRiskLevel::High,
        )
        .unwrap();

        for alert in &alerts {
            if alert.alert_type == AlertType::Flood {
                assert!(!alert.is_general_advisory, "flood alerts are never general");
            } else {
                assert!(
                    alert.is_general_advisory,
                    "{} should be a general advisory",
                    alert.id
                );
            }
        }
    }

    #[test]
    fn declared_crop_alerts_are_not_general() {
        let snapshot = weather(0.0, 85, 30.0, WeatherCondition::Clear);
        let crop = CropContext::new("Rice", CropStage::Flowering);
        let alerts =
            SmartAlertAggregator::generate(Some(&snapshot), &crop, FloodRiskLevel::Low).unwrap();

        assert!(!alerts.is_empty());
        assert!(alerts.iter().all(|a| !a.is_general_advisory));
    }

    #[test]
    fn stage_checks_skipped_without_declared_crop() {
        // Humid flowering conditions, but stage is present without a name,
        // so the crop is not declared and disease-watch must not fire
        let snapshot = weather(0.0, 85, 26.0, WeatherCondition::Clear);
        let crop = CropContext {
            name: None,
            stage: Some(CropStage::Flowering),
        };
        let alerts =
            SmartAlertAggregator::generate(Some(&snapshot), &crop, FloodRiskLevel::Low).unwrap();

        assert!(alerts.iter().all(|a| a.id != "disease-watch"));
    }

    #[test]
    fn harvest_window_requires_dry_stable_conditions() {
        let crop = CropContext::new("Wheat", CropStage::Maturity);

        let dry = weather(0.0, 55, 24.0, WeatherCondition::Clear);
        let alerts =
            SmartAlertAggregator::generate(Some(&dry), &crop, FloodRiskLevel::Low).unwrap();
        assert!(alerts.iter().any(|a| a.id == "harvest-window"));

        let humid = weather(0.0, 70, 24.0, WeatherCondition::Clear);
        let alerts =
            SmartAlertAggregator::generate(Some(&humid), &crop, FloodRiskLevel::Low).unwrap();
        assert!(alerts.iter().all(|a| a.id != "harvest-window"));

        let raining = weather(4.0, 55, 24.0, WeatherCondition::Rain);
        let alerts =
            SmartAlertAggregator::generate(Some(&raining), &crop, FloodRiskLevel::Low).unwrap();
        assert!(alerts.iter().all(|a| a.id != "harvest-window"));
    }

    #[test]
    fn irrigation_reminder_thresholds() {
        let hot = weather(0.0, 50, 28.0, WeatherCondition::Clear);
        let alerts = SmartAlertAggregator::generate(
            Some(&hot),
            &CropContext::default(),
            FloodRiskLevel::Low,
        )
        .unwrap();
        assert!(alerts.iter().any(|a| a.id == "irrigation-needed"));

        let mild = weather(0.0, 50, 27.9, WeatherCondition::Clear);
        let alerts = SmartAlertAggregator::generate(
            Some(&mild),
            &CropContext::default(),
            FloodRiskLevel::Low,
        )
        .unwrap();
        assert!(alerts.is_empty());
    }
}
