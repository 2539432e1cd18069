use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weather condition categories from OpenWeatherMap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Mist,
    Fog,
    Haze,
    Other,
}

impl WeatherCondition {
    pub fn from_owm_id(id: u32) -> Self {
        match id {
            200..=232 => WeatherCondition::Thunderstorm,
            300..=321 => WeatherCondition::Drizzle,
            500..=531 => WeatherCondition::Rain,
            701 => WeatherCondition::Mist,
            721 => WeatherCondition::Haze,
            741 => WeatherCondition::Fog,
            800 => WeatherCondition::Clear,
            801..=804 => WeatherCondition::Clouds,
            _ => WeatherCondition::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Cloudy",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Mist => "Mist",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Haze => "Haze",
            WeatherCondition::Other => "Other",
        }
    }

    /// Whether this condition involves active precipitation
    pub fn is_raining(&self) -> bool {
        matches!(
            self,
            WeatherCondition::Rain | WeatherCondition::Drizzle | WeatherCondition::Thunderstorm
        )
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current observed conditions at a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    /// Relative humidity, 0-100
    pub humidity_pct: u8,
    /// Rainfall over the last observation window, millimeters.
    /// Precondition: non-negative. The engine does not clamp.
    pub rainfall_mm: f64,
    pub wind_speed_kmh: f64,
    pub condition: WeatherCondition,
    pub description: String,
}

impl CurrentWeather {
    pub fn is_raining(&self) -> bool {
        self.condition.is_raining()
    }
}

/// One aggregated forecast day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Days from today (1 = tomorrow)
    pub day_offset: u32,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub condition: WeatherCondition,
    pub rainfall_mm: f64,
}

/// A complete weather snapshot for one advisory computation.
///
/// Immutable once constructed; produced fresh on every fetch. The advisory
/// engine holds no state between calls, so the caller passes the latest
/// snapshot on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub current: CurrentWeather,
    /// Up to 5 aggregated forecast days, ordered by day_offset
    pub forecast: Vec<ForecastDay>,
    /// Count of sequential rainy days immediately preceding now,
    /// supplied precomputed by the weather collaborator
    pub consecutive_rainy_days: u32,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Forecast rainfall sequence in day order, for flood trend analysis
    pub fn forecast_rainfall(&self) -> Vec<f64> {
        self.forecast.iter().map(|d| d.rainfall_mm).collect()
    }
}

/// Indian cropping season, derived purely from the calendar month.
/// Descriptive metadata only; never a decision input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
}

impl Season {
    /// Month is 1-12 as from `chrono::Datelike::month`
    pub fn from_month(month: u32) -> Self {
        match month {
            6..=10 => Season::Kharif,
            11 | 12 | 1 | 2 => Season::Rabi,
            _ => Season::Zaid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
