// Repository trait for weather station data access
use crate::domain::station::{WeatherRecord, WeatherStation, WidgetData};
use crate::infrastructure::error::ApiError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait WeatherRepository: Send + Sync {
    /// List every station the API knows about
    async fn list_stations(&self) -> Result<Vec<WeatherStation>, ApiError>;

    /// Sensor records for a station between `from` and `to`
    async fn fetch_records(
        &self,
        station_name: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<WeatherRecord>, ApiError>;

    /// Current-conditions summary for a station
    async fn fetch_widget(&self, station_name: &str) -> Result<WidgetData, ApiError>;
}
