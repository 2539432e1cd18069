pub mod enrichment;
pub mod openweathermap;

pub use enrichment::AdvisoryTextGenerator;
pub use openweathermap::OpenWeatherMapClient;

use crate::error::Result;
use crate::models::WeatherSnapshot;

/// Contract for weather collaborators. Failure is surfaced as an error,
/// never conflated with a zero-rainfall snapshot.
pub trait WeatherProvider {
    fn fetch(
        &self,
        location: &str,
    ) -> impl std::future::Future<Output = Result<WeatherSnapshot>> + Send;
}
