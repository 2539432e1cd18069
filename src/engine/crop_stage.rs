use crate::models::{ActionType, CropStage, DailyAction, Priority, WeatherSnapshot};

/// Trait for stage-conditioned daily action rules
pub trait StageRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule against today's weather and the declared stage,
    /// returning an action if the conditions are met
    fn evaluate(&self, weather: &WeatherSnapshot, stage: CropStage) -> Option<DailyAction>;
}

/// Sowing window rule
///
/// Conditions (Sowing stage only):
/// - Rain >5mm or an active raining condition -> postpone sowing (alert)
/// - Rain <2mm and not raining -> good day to sow
pub struct SowingWindowRule;

impl StageRule for SowingWindowRule {
    fn id(&self) -> &'static str {
        "sowing_window"
    }

    fn name(&self) -> &'static str {
        "Sowing Window"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, stage: CropStage) -> Option<DailyAction> {
        if stage != CropStage::Sowing {
            return None;
        }

        let current = &weather.current;
        if current.rainfall_mm > 5.0 || current.is_raining() {
            return Some(DailyAction::new(
                ActionType::Alert,
                "Postpone Sowing",
                format!(
                    "Rain ({:.1}mm) will wash away seed. Wait for the field to dry.",
                    current.rainfall_mm
                ),
                Priority::High,
            ));
        }

        if current.rainfall_mm < 2.0 {
            return Some(DailyAction::new(
                ActionType::Sow,
                "Good for Sowing",
                "Dry conditions are suitable for sowing today.",
                Priority::High,
            ));
        }

        None
    }
}

/// Irrigation rule for actively growing crops
///
/// Conditions (Vegetative and Flowering stages):
/// - Not raining and humidity <60% -> irrigate
/// - Raining or rain >5mm -> skip irrigation
pub struct IrrigationRule;

impl StageRule for IrrigationRule {
    fn id(&self) -> &'static str {
        "irrigation"
    }

    fn name(&self) -> &'static str {
        "Irrigation"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, stage: CropStage) -> Option<DailyAction> {
        if !matches!(stage, CropStage::Vegetative | CropStage::Flowering) {
            return None;
        }

        let current = &weather.current;
        if !current.is_raining() && current.humidity_pct < 60 {
            return Some(DailyAction::new(
                ActionType::Irrigate,
                "Irrigate Today",
                format!(
                    "Dry air ({}% humidity) and no rain. The crop needs water during {}.",
                    current.humidity_pct,
                    stage.as_str().to_lowercase()
                ),
                Priority::Medium,
            ));
        }

        if current.is_raining() || current.rainfall_mm > 5.0 {
            return Some(DailyAction::new(
                ActionType::General,
                "Skip Irrigation",
                "Rain is supplying enough water. Irrigating now would waterlog the field.",
                Priority::Low,
            ));
        }

        None
    }
}

/// Spray and fertilizer window rule
///
/// Conditions (Vegetative and Flowering stages):
/// - Wind >20 km/h or raining -> do not spray or fertilize (alert)
/// - Otherwise, Vegetative stage only -> safe to fertilize
///
/// The fertilizer suggestion is deliberately restricted to the Vegetative
/// stage; Flowering crops only get the no-spray alert.
pub struct SprayWindowRule;

impl StageRule for SprayWindowRule {
    fn id(&self) -> &'static str {
        "spray_window"
    }

    fn name(&self) -> &'static str {
        "Spray Window"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, stage: CropStage) -> Option<DailyAction> {
        if !matches!(stage, CropStage::Vegetative | CropStage::Flowering) {
            return None;
        }

        let current = &weather.current;
        if current.wind_speed_kmh > 20.0 || current.is_raining() {
            return Some(DailyAction::new(
                ActionType::Alert,
                "Do Not Spray/Fertilize",
                "Wind or rain will carry spray off-target and wash fertilizer away.",
                Priority::High,
            ));
        }

        if stage == CropStage::Vegetative {
            return Some(DailyAction::new(
                ActionType::Fertilize,
                "Safe to Fertilize",
                "Calm, dry conditions. A nitrogen dose now supports vegetative growth.",
                Priority::Medium,
            ));
        }

        None
    }
}

/// Harvest preparation rule
///
/// Conditions (Maturity and Harvest stages):
/// - Raining -> protect the standing or cut crop (alert)
/// - Otherwise -> prepare for harvest
pub struct HarvestPrepRule;

impl StageRule for HarvestPrepRule {
    fn id(&self) -> &'static str {
        "harvest_prep"
    }

    fn name(&self) -> &'static str {
        "Harvest Preparation"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, stage: CropStage) -> Option<DailyAction> {
        if !matches!(stage, CropStage::Maturity | CropStage::Harvest) {
            return None;
        }

        if weather.current.is_raining() {
            return Some(DailyAction::new(
                ActionType::Alert,
                "Protect Crop",
                "Rain on a mature crop causes grain discolouration and sprouting. Cover cut produce.",
                Priority::High,
            ));
        }

        Some(DailyAction::new(
            ActionType::Harvest,
            "Harvest Preparation",
            "Dry weather. Arrange labour and equipment; harvest while conditions hold.",
            Priority::High,
        ))
    }
}

/// Heat stress rule, applied regardless of stage
///
/// Conditions: temperature >40C
pub struct HeatStressRule;

impl StageRule for HeatStressRule {
    fn id(&self) -> &'static str {
        "heat_stress"
    }

    fn name(&self) -> &'static str {
        "Heat Stress"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, _stage: CropStage) -> Option<DailyAction> {
        let temp = weather.current.temperature_c;
        if temp <= 40.0 {
            return None;
        }

        Some(DailyAction::new(
            ActionType::Alert,
            "Heat Stress Alert",
            format!(
                "{:.0}C exceeds safe limits for most crops. Irrigate in the evening and avoid midday field work.",
                temp
            ),
            Priority::High,
        ))
    }
}

/// Crop stage rule engine - emits recommended daily actions for a declared
/// crop stage under today's weather.
///
/// Rules are independent and non-exclusive; one invocation may produce
/// several actions. If no stage is declared, or no rule fires, a single
/// generic monitoring action is returned.
pub struct CropStageRuleEngine {
    rules: Vec<Box<dyn StageRule>>,
}

impl CropStageRuleEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn StageRule>> = vec![
            Box::new(SowingWindowRule),
            Box::new(IrrigationRule),
            Box::new(SprayWindowRule),
            Box::new(HarvestPrepRule),
            Box::new(HeatStressRule),
        ];

        Self { rules }
    }

    /// Generate today's actions. The crop name is an opaque label carried
    /// for display only; unknown crops use the same generic rules.
    pub fn generate(
        &self,
        weather: &WeatherSnapshot,
        _crop_name: Option<&str>,
        stage: Option<CropStage>,
    ) -> Vec<DailyAction> {
        let Some(stage) = stage else {
            return vec![Self::monitor_field()];
        };

        let actions: Vec<DailyAction> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(weather, stage))
            .collect();

        if actions.is_empty() {
            return vec![Self::monitor_field()];
        }

        actions
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }

    fn monitor_field() -> DailyAction {
        DailyAction::new(
            ActionType::General,
            "Monitor Field",
            "No specific action triggered today. Walk the field and watch for pests or water stress.",
            Priority::Low,
        )
    }
}

impl Default for CropStageRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
