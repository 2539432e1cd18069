use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::WeatherProvider;
use crate::config::OpenWeatherMapConfig;
use crate::error::{KisanError, Result};
use crate::models::{CurrentWeather, ForecastDay, WeatherCondition, WeatherSnapshot};

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Forecast days kept in a snapshot
const MAX_FORECAST_DAYS: usize = 5;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    name: String,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    #[serde(default)]
    rain: Option<OwmThreeHourPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: u32,
    #[allow(dead_code)]
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

#[derive(Debug, Deserialize)]
struct OwmThreeHourPrecipitation {
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Test connection to the OpenWeatherMap API
    pub async fn test_connection(&self, location: &str) -> Result<bool> {
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            API_BASE_URL, location, self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| KisanError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| KisanError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(KisanError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            KisanError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })
    }

    fn convert_current(&self, response: &OwmCurrentResponse) -> CurrentWeather {
        let (condition, description) = response
            .weather
            .first()
            .map(|w| (WeatherCondition::from_owm_id(w.id), w.description.clone()))
            .unwrap_or((WeatherCondition::Other, String::new()));

        CurrentWeather {
            temperature_c: response.main.temp,
            humidity_pct: response.main.humidity.round().clamp(0.0, 100.0) as u8,
            rainfall_mm: response.rain.as_ref().map(|r| r.one_hour).unwrap_or(0.0),
            // OWM metric wind speed is m/s
            wind_speed_kmh: response.wind.speed * 3.6,
            condition,
            description,
        }
    }

    fn aggregate_forecast(&self, response: &OwmForecastResponse, today: NaiveDate) -> Vec<ForecastDay> {
        // Group 3-hour points by date, keeping chronological order
        let mut by_date: BTreeMap<NaiveDate, Vec<&OwmForecastItem>> = BTreeMap::new();
        for item in &response.list {
            let date = DateTime::from_timestamp(item.dt, 0)
                .unwrap_or_else(Utc::now)
                .date_naive();
            by_date.entry(date).or_default().push(item);
        }

        by_date
            .into_iter()
            .filter(|(date, _)| *date > today)
            .take(MAX_FORECAST_DAYS)
            .map(|(date, items)| {
                let temp_max_c = items
                    .iter()
                    .map(|i| i.main.temp)
                    .fold(f64::NEG_INFINITY, f64::max);
                let temp_min_c = items
                    .iter()
                    .map(|i| i.main.temp)
                    .fold(f64::INFINITY, f64::min);
                let rainfall_mm = items
                    .iter()
                    .filter_map(|i| i.rain.as_ref())
                    .map(|r| r.three_hour)
                    .sum();

                // Dominant condition: most frequent OWM id across the day
                let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
                for item in &items {
                    if let Some(w) = item.weather.first() {
                        *counts.entry(w.id).or_insert(0) += 1;
                    }
                }
                let condition = counts
                    .into_iter()
                    .max_by_key(|(_, count)| *count)
                    .map(|(id, _)| WeatherCondition::from_owm_id(id))
                    .unwrap_or_default();

                ForecastDay {
                    day_offset: (date - today).num_days().max(0) as u32,
                    temp_max_c,
                    temp_min_c,
                    condition,
                    rainfall_mm,
                }
            })
            .collect()
    }

    /// Leading run of rainy days starting today. The free tier has no
    /// history endpoint, so this approximates the "consecutive rainy days"
    /// count from the current observation and the forecast.
    fn estimate_consecutive_rainy_days(
        current: &CurrentWeather,
        forecast: &[ForecastDay],
    ) -> u32 {
        if !current.is_raining() && current.rainfall_mm <= 0.0 {
            return 0;
        }

        let mut count = 1;
        for day in forecast {
            if day.rainfall_mm > 0.0 || day.condition.is_raining() {
                count += 1;
            } else {
                break;
            }
        }
        count
    }
}

impl WeatherProvider for OpenWeatherMapClient {
    async fn fetch(&self, location: &str) -> Result<WeatherSnapshot> {
        let current_url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            API_BASE_URL, location, self.config.api_key
        );
        let forecast_url = format!(
            "{}/forecast?q={}&appid={}&units=metric",
            API_BASE_URL, location, self.config.api_key
        );

        let current_response: OwmCurrentResponse = self.get_json(&current_url).await?;
        let forecast_response: OwmForecastResponse = self.get_json(&forecast_url).await?;

        let fetched_at = Utc::now();
        let current = self.convert_current(&current_response);
        let forecast = self.aggregate_forecast(&forecast_response, fetched_at.date_naive());
        let consecutive_rainy_days = Self::estimate_consecutive_rainy_days(&current, &forecast);

        tracing::debug!(
            location = %current_response.name,
            rainfall_mm = current.rainfall_mm,
            forecast_days = forecast.len(),
            "fetched weather snapshot"
        );

        Ok(WeatherSnapshot {
            location: current_response.name,
            current,
            forecast,
            consecutive_rainy_days,
            fetched_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(rainfall_mm: f64, condition: WeatherCondition) -> CurrentWeather {
        CurrentWeather {
            temperature_c: 27.0,
            humidity_pct: 70,
            rainfall_mm,
            wind_speed_kmh: 10.0,
            condition,
            description: String::new(),
        }
    }

    fn day(day_offset: u32, rainfall_mm: f64, condition: WeatherCondition) -> ForecastDay {
        ForecastDay {
            day_offset,
            temp_max_c: 30.0,
            temp_min_c: 22.0,
            condition,
            rainfall_mm,
        }
    }

    #[test]
    fn dry_today_means_zero_consecutive_days() {
        let forecast = vec![day(1, 20.0, WeatherCondition::Rain)];
        assert_eq!(
            OpenWeatherMapClient::estimate_consecutive_rainy_days(
                &current(0.0, WeatherCondition::Clear),
                &forecast
            ),
            0
        );
    }

    #[test]
    fn rainy_run_counts_from_today() {
        let forecast = vec![
            day(1, 8.0, WeatherCondition::Rain),
            day(2, 3.0, WeatherCondition::Rain),
            day(3, 0.0, WeatherCondition::Clear),
            day(4, 9.0, WeatherCondition::Rain),
        ];
        assert_eq!(
            OpenWeatherMapClient::estimate_consecutive_rainy_days(
                &current(5.0, WeatherCondition::Rain),
                &forecast
            ),
            3
        );
    }

    #[test]
    fn measured_rain_counts_even_without_raining_condition() {
        assert_eq!(
            OpenWeatherMapClient::estimate_consecutive_rainy_days(
                &current(1.2, WeatherCondition::Clouds),
                &[]
            ),
            1
        );
    }
}
