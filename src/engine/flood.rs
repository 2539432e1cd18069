use crate::models::{FloodRiskLevel, FloodRiskResult, FloodTrend};

/// Flood risk assessor - scores flood risk from current rainfall and rain
/// persistence, plus a directional trend from forecast rainfall.
///
/// Scoring:
/// - Rainfall band (mm): <20 -> 0, <50 -> 15, <100 -> 35, <150 -> 50, else 60
/// - Consecutive rainy days: <2 -> 0, <3 -> 10, <5 -> 25, else 40
/// - Score = rainfall band + day band (max 100 by construction)
///
/// Levels: score <30 Low, <60 Medium, else High. Advice and tips are a fixed
/// lookup per level.
///
/// Inputs are treated as already validated; negative rainfall is a
/// precondition violation, not runtime-checked.
pub struct FloodRiskAssessor;

const LOW_ADVICE: &str = "Flood risk is low. Normal field operations can continue.";
const MEDIUM_ADVICE: &str =
    "Moderate flood risk. Prepare drainage and monitor water levels closely.";
const HIGH_ADVICE: &str =
    "High flood risk. Protect your crop and move equipment and stored produce to safety.";

const LOW_TIPS: &[&str] = &[
    "Keep field drains clear of debris",
    "Check the forecast before irrigating",
    "Inspect bunds and field borders weekly",
];

const MEDIUM_TIPS: &[&str] = &[
    "Clear drainage channels today",
    "Delay fertilizer application until rain passes",
    "Move harvested produce off the ground",
    "Strengthen bunds around low-lying plots",
    "Keep pumps fueled and ready",
];

const HIGH_TIPS: &[&str] = &[
    "Move livestock and equipment to higher ground",
    "Do not enter waterlogged fields",
    "Shift stored grain above expected water level",
    "Open all drainage outlets now",
    "Disconnect electric pump connections",
    "Keep emergency contacts for your block office at hand",
];

impl FloodRiskAssessor {
    /// Assess flood risk from the latest snapshot values.
    ///
    /// `forecast_rainfall` is the per-day forecast rainfall sequence in day
    /// order; fewer than 2 entries always yields a Stable trend.
    pub fn assess(
        rainfall_mm: f64,
        consecutive_rainy_days: u32,
        forecast_rainfall: &[f64],
    ) -> FloodRiskResult {
        let score = Self::rainfall_band(rainfall_mm) + Self::day_band(consecutive_rainy_days);
        let level = Self::level_for(score);
        let (advice, tips) = Self::advice_for(level);

        FloodRiskResult {
            level,
            score,
            trend: Self::trend(forecast_rainfall),
            advice,
            tips,
        }
    }

    fn rainfall_band(rainfall_mm: f64) -> u8 {
        if rainfall_mm < 20.0 {
            0
        } else if rainfall_mm < 50.0 {
            15
        } else if rainfall_mm < 100.0 {
            35
        } else if rainfall_mm < 150.0 {
            50
        } else {
            60
        }
    }

    fn day_band(consecutive_rainy_days: u32) -> u8 {
        match consecutive_rainy_days {
            0 | 1 => 0,
            2 => 10,
            3 | 4 => 25,
            _ => 40,
        }
    }

    fn level_for(score: u8) -> FloodRiskLevel {
        if score < 30 {
            FloodRiskLevel::Low
        } else if score < 60 {
            FloodRiskLevel::Medium
        } else {
            FloodRiskLevel::High
        }
    }

    fn advice_for(level: FloodRiskLevel) -> (&'static str, &'static [&'static str]) {
        match level {
            FloodRiskLevel::Low => (LOW_ADVICE, LOW_TIPS),
            FloodRiskLevel::Medium => (MEDIUM_ADVICE, MEDIUM_TIPS),
            FloodRiskLevel::High => (HIGH_ADVICE, HIGH_TIPS),
        }
    }

    /// Compare the unweighted means of the first and second halves of the
    /// forecast sequence (second half takes the extra entry on odd lengths).
    /// A difference of more than 10mm in either direction moves the trend
    /// off Stable. No extrapolation from a single point.
    fn trend(forecast_rainfall: &[f64]) -> FloodTrend {
        if forecast_rainfall.len() < 2 {
            return FloodTrend::Stable;
        }

        let mid = forecast_rainfall.len() / 2;
        let (first, second) = forecast_rainfall.split_at(mid);
        let first_mean = first.iter().sum::<f64>() / first.len() as f64;
        let second_mean = second.iter().sum::<f64>() / second.len() as f64;

        let diff = second_mean - first_mean;
        if diff > 10.0 {
            FloodTrend::Increasing
        } else if diff < -10.0 {
            FloodTrend::Decreasing
        } else {
            FloodTrend::Stable
        }
    }
}
