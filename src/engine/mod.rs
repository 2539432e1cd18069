pub mod alerts;
pub mod crop_stage;
pub mod flood;
pub mod harvest;

pub use alerts::SmartAlertAggregator;
pub use crop_stage::{CropStageRuleEngine, StageRule};
pub use flood::FloodRiskAssessor;
pub use harvest::HarvestAdvisoryClassifier;

use crate::models::{
    CropContext, DailyAction, FloodRiskLevel, FloodRiskResult, HarvestRecommendation, SmartAlert,
    WeatherSnapshot,
};

/// Facade over the four advisory components.
///
/// Every method is a pure function of its inputs: no I/O, no state kept
/// between calls. Callers own the current snapshot and re-invoke on every
/// weather or crop change; overlapping stale calls simply produce stale but
/// self-consistent results the caller discards.
pub struct AdvisoryEngine {
    stage_rules: CropStageRuleEngine,
}

impl AdvisoryEngine {
    pub fn new() -> Self {
        Self {
            stage_rules: CropStageRuleEngine::new(),
        }
    }

    pub fn assess_flood_risk(
        &self,
        rainfall_mm: f64,
        consecutive_rainy_days: u32,
        forecast_rainfall: &[f64],
    ) -> FloodRiskResult {
        FloodRiskAssessor::assess(rainfall_mm, consecutive_rainy_days, forecast_rainfall)
    }

    pub fn classify_harvest(&self, snapshot: &WeatherSnapshot) -> HarvestRecommendation {
        HarvestAdvisoryClassifier::classify(snapshot)
    }

    /// Daily actions key off the declared stage alone; the crop name is an
    /// optional display label
    pub fn generate_daily_actions(
        &self,
        snapshot: &WeatherSnapshot,
        crop: &CropContext,
    ) -> Vec<DailyAction> {
        self.stage_rules
            .generate(snapshot, crop.name.as_deref(), crop.stage)
    }

    /// `None` means weather is unavailable and the caller must show an
    /// explicit fallback notice
    pub fn generate_smart_alerts(
        &self,
        snapshot: Option<&WeatherSnapshot>,
        crop: &CropContext,
        flood_level: FloodRiskLevel,
    ) -> Option<Vec<SmartAlert>> {
        SmartAlertAggregator::generate(snapshot, crop, flood_level)
    }
}

impl Default for AdvisoryEngine {
    fn default() -> Self {
        Self::new()
    }
}
