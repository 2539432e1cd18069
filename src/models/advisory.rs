use serde::{Deserialize, Serialize};

use super::weather::Season;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FloodRiskLevel {
    Low,
    Medium,
    High,
}

impl FloodRiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FloodRiskLevel::Low => "Low",
            FloodRiskLevel::Medium => "Medium",
            FloodRiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for FloodRiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloodTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl FloodTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            FloodTrend::Increasing => "Increasing",
            FloodTrend::Stable => "Stable",
            FloodTrend::Decreasing => "Decreasing",
        }
    }
}

impl std::fmt::Display for FloodTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flood risk assessment for the latest snapshot.
///
/// The score is the sum of a rainfall band (0/15/35/50/60) and a
/// consecutive-rainy-day band (0/10/25/40), so it never exceeds 100.
#[derive(Debug, Clone, Serialize)]
pub struct FloodRiskResult {
    pub level: FloodRiskLevel,
    pub score: u8,
    pub trend: FloodTrend,
    pub advice: &'static str,
    pub tips: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarvestStatus {
    Harvest,
    Caution,
    Delay,
}

impl HarvestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HarvestStatus::Harvest => "Harvest",
            HarvestStatus::Caution => "Caution",
            HarvestStatus::Delay => "Delay",
        }
    }
}

impl std::fmt::Display for HarvestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainfallIntensity {
    None,
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumidityBand {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureBand {
    Normal,
    Extreme,
}

/// Condition breakdown attached to a harvest recommendation for display.
/// Season is descriptive metadata; it never changes the status decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConditions {
    pub rainfall: RainfallIntensity,
    pub humidity: HumidityBand,
    pub temperature: TemperatureBand,
    pub season: Season,
}

#[derive(Debug, Clone, Serialize)]
pub struct HarvestRecommendation {
    pub status: HarvestStatus,
    pub label: &'static str,
    pub reason: &'static str,
    pub details: HarvestConditions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    Sow,
    Irrigate,
    Fertilize,
    Spray,
    Harvest,
    General,
    Alert,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Sow => "Sow",
            ActionType::Irrigate => "Irrigate",
            ActionType::Fertilize => "Fertilize",
            ActionType::Spray => "Spray",
            ActionType::Harvest => "Harvest",
            ActionType::General => "General",
            ActionType::Alert => "Alert",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recommended farming action for today
#[derive(Debug, Clone, Serialize)]
pub struct DailyAction {
    pub action_type: ActionType,
    pub label: &'static str,
    pub description: String,
    pub priority: Priority,
}

impl DailyAction {
    pub fn new(
        action_type: ActionType,
        label: &'static str,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            action_type,
            label,
            description: description.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertType {
    Weather,
    Harvest,
    Irrigation,
    Disease,
    Flood,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Weather => "Weather",
            AlertType::Harvest => "Harvest",
            AlertType::Irrigation => "Irrigation",
            AlertType::Disease => "Disease",
            AlertType::Flood => "Flood",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Low,
    Medium,
    High,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-facing alert produced by the aggregator.
///
/// Alerts are recomputed fresh on every weather or crop-context change and
/// are not persisted here; the id is stable per rule so a caller can track
/// per-session dismissal on its own.
#[derive(Debug, Clone, Serialize)]
pub struct SmartAlert {
    pub id: &'static str,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: &'static str,
    pub message: String,
    pub action: Option<&'static str>,
    pub dismissible: bool,
    /// True when the alert is weather-only rather than specific to a
    /// declared crop and stage
    pub is_general_advisory: bool,
}

impl SmartAlert {
    pub fn new(
        id: &'static str,
        alert_type: AlertType,
        severity: AlertSeverity,
        title: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            alert_type,
            severity,
            title,
            message: message.into(),
            action: None,
            dismissible: true,
            is_general_advisory: false,
        }
    }

    pub fn with_action(mut self, action: &'static str) -> Self {
        self.action = Some(action);
        self
    }

    pub fn non_dismissible(mut self) -> Self {
        self.dismissible = false;
        self
    }
}
