use chrono::{Datelike, Utc};

use crate::models::{
    HarvestConditions, HarvestRecommendation, HarvestStatus, HumidityBand, RainfallIntensity,
    Season, TemperatureBand, WeatherSnapshot,
};

/// Harvest advisory classifier - decides whether today's conditions suit
/// harvesting, independent of crop stage.
///
/// Priority-ordered rules, first match wins:
/// 1. Heavy rain (rain >10mm, or raining condition with >5mm) -> Delay
/// 2. Any rain (rain >0mm or raining condition) -> Delay
/// 3. Humidity >80% -> Caution
/// 4. Temperature >35C or <5C -> Caution
/// 5. Otherwise -> Harvest
///
/// The cropping season is derived from the calendar month and attached as
/// display metadata only.
pub struct HarvestAdvisoryClassifier;

impl HarvestAdvisoryClassifier {
    pub fn classify(snapshot: &WeatherSnapshot) -> HarvestRecommendation {
        Self::classify_at(snapshot, Utc::now().month())
    }

    /// Classification with an explicit calendar month, for season derivation
    pub fn classify_at(snapshot: &WeatherSnapshot, month: u32) -> HarvestRecommendation {
        let current = &snapshot.current;
        let raining = current.is_raining();

        let rainfall = if current.rainfall_mm > 10.0 || (raining && current.rainfall_mm > 5.0) {
            RainfallIntensity::Heavy
        } else if current.rainfall_mm > 0.0 || raining {
            RainfallIntensity::Moderate
        } else {
            RainfallIntensity::None
        };

        let humidity = if current.humidity_pct > 80 {
            HumidityBand::High
        } else if current.humidity_pct >= 60 {
            HumidityBand::Moderate
        } else {
            HumidityBand::Low
        };

        let temperature = if current.temperature_c > 35.0 || current.temperature_c < 5.0 {
            TemperatureBand::Extreme
        } else {
            TemperatureBand::Normal
        };

        let details = HarvestConditions {
            rainfall,
            humidity,
            temperature,
            season: Season::from_month(month),
        };

        let (status, label, reason) = match (rainfall, humidity, temperature) {
            (RainfallIntensity::Heavy, _, _) => (
                HarvestStatus::Delay,
                "Do Not Harvest",
                "Heavy rain will soak harvested grain and damage quality.",
            ),
            (RainfallIntensity::Moderate, _, _) => (
                HarvestStatus::Delay,
                "Delay Recommended",
                "Wet field conditions make harvesting risky today.",
            ),
            (_, HumidityBand::High, _) => (
                HarvestStatus::Caution,
                "Harvest with Caution",
                "High humidity slows drying; harvested crop may develop mould.",
            ),
            (_, _, TemperatureBand::Extreme) => (
                HarvestStatus::Caution,
                "Harvest Early Morning",
                "Extreme temperature stresses both crop and workers; harvest in cooler hours.",
            ),
            _ => (
                HarvestStatus::Harvest,
                "Good to Harvest",
                "Dry, mild conditions are favourable for harvesting today.",
            ),
        };

        HarvestRecommendation {
            status,
            label,
            reason,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentWeather, WeatherCondition};

    fn snapshot(
        rainfall_mm: f64,
        humidity_pct: u8,
        temperature_c: f64,
        condition: WeatherCondition,
    ) -> WeatherSnapshot {
        WeatherSnapshot {
            location: "Nagpur".into(),
            current: CurrentWeather {
                temperature_c,
                humidity_pct,
                rainfall_mm,
                wind_speed_kmh: 8.0,
                condition,
                description: condition.as_str().to_lowercase(),
            },
            forecast: vec![],
            consecutive_rainy_days: 0,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn heavy_rain_blocks_harvest() {
        let rec = HarvestAdvisoryClassifier::classify_at(
            &snapshot(12.0, 50, 28.0, WeatherCondition::Clouds),
            7,
        );
        assert_eq!(rec.status, HarvestStatus::Delay);
        assert_eq!(rec.label, "Do Not Harvest");
        assert_eq!(rec.details.rainfall, RainfallIntensity::Heavy);
    }

    #[test]
    fn raining_condition_over_5mm_is_heavy() {
        let rec = HarvestAdvisoryClassifier::classify_at(
            &snapshot(6.0, 50, 28.0, WeatherCondition::Thunderstorm),
            7,
        );
        assert_eq!(rec.status, HarvestStatus::Delay);
        assert_eq!(rec.label, "Do Not Harvest");
    }

    #[test]
    fn light_rain_delays_harvest() {
        let rec = HarvestAdvisoryClassifier::classify_at(
            &snapshot(1.0, 50, 28.0, WeatherCondition::Clouds),
            7,
        );
        assert_eq!(rec.status, HarvestStatus::Delay);
        assert_eq!(rec.label, "Delay Recommended");
        assert_eq!(rec.details.rainfall, RainfallIntensity::Moderate);
    }

    #[test]
    fn drizzle_without_measured_rain_delays_harvest() {
        let rec = HarvestAdvisoryClassifier::classify_at(
            &snapshot(0.0, 50, 28.0, WeatherCondition::Drizzle),
            7,
        );
        assert_eq!(rec.status, HarvestStatus::Delay);
        assert_eq!(rec.label, "Delay Recommended");
    }

    #[test]
    fn high_humidity_fires_before_temperature() {
        // dry and clear, 85% humidity, mild temperature
        let rec = HarvestAdvisoryClassifier::classify_at(
            &snapshot(0.0, 85, 30.0, WeatherCondition::Clear),
            7,
        );
        assert_eq!(rec.status, HarvestStatus::Caution);
        assert_eq!(rec.label, "Harvest with Caution");

        // 85% humidity AND extreme heat - humidity rule still wins
        let rec = HarvestAdvisoryClassifier::classify_at(
            &snapshot(0.0, 85, 41.0, WeatherCondition::Clear),
            7,
        );
        assert_eq!(rec.label, "Harvest with Caution");
    }

    #[test]
    fn extreme_temperature_suggests_early_morning() {
        let hot = HarvestAdvisoryClassifier::classify_at(
            &snapshot(0.0, 40, 38.0, WeatherCondition::Clear),
            5,
        );
        assert_eq!(hot.status, HarvestStatus::Caution);
        assert_eq!(hot.label, "Harvest Early Morning");

        let cold = HarvestAdvisoryClassifier::classify_at(
            &snapshot(0.0, 40, 2.0, WeatherCondition::Clear),
            1,
        );
        assert_eq!(cold.label, "Harvest Early Morning");
        assert_eq!(cold.details.temperature, TemperatureBand::Extreme);
    }

    #[test]
    fn dry_mild_conditions_are_good_to_harvest() {
        let rec = HarvestAdvisoryClassifier::classify_at(
            &snapshot(0.0, 55, 25.0, WeatherCondition::Clear),
            11,
        );
        assert_eq!(rec.status, HarvestStatus::Harvest);
        assert_eq!(rec.label, "Good to Harvest");
        assert_eq!(rec.details.rainfall, RainfallIntensity::None);
    }

    #[test]
    fn season_is_metadata_only() {
        // Same weather, different months: status unchanged, season differs
        let kharif = HarvestAdvisoryClassifier::classify_at(
            &snapshot(0.0, 55, 25.0, WeatherCondition::Clear),
            8,
        );
        let rabi = HarvestAdvisoryClassifier::classify_at(
            &snapshot(0.0, 55, 25.0, WeatherCondition::Clear),
            12,
        );
        assert_eq!(kharif.status, rabi.status);
        assert_eq!(kharif.details.season, Season::Kharif);
        assert_eq!(rabi.details.season, Season::Rabi);
    }
}
