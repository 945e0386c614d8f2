// HTTP repository implementation against the weather station REST API
use crate::application::weather_repository::WeatherRepository;
use crate::domain::station::{ResponseWrapper, WeatherRecord, WeatherStation, WidgetData};
use crate::infrastructure::config::ApiSettings;
use crate::infrastructure::error::ApiError;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpWeatherRepository {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpWeatherRepository {
    pub fn new(client: reqwest::Client, base_url: String, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_settings(settings: &ApiSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;
        Ok(Self::new(client, settings.base_url.clone(), settings.token.clone()))
    }

    fn stations_url(&self) -> String {
        format!("{}/stations", self.base_url)
    }

    fn records_url(&self, station_name: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> String {
        format!(
            "{}/stations/{}/data?from={}&to={}",
            self.base_url,
            urlencoding::encode(station_name),
            urlencoding::encode(&from.to_rfc3339_opts(SecondsFormat::Millis, true)),
            urlencoding::encode(&to.to_rfc3339_opts(SecondsFormat::Millis, true)),
        )
    }

    fn widget_url(&self, station_name: &str) -> String {
        format!(
            "{}/stations/{}/widget",
            self.base_url,
            urlencoding::encode(station_name)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("GET {}", url);
        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => return Err(ApiError::Request { url, source }),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(source) => return Err(ApiError::Request { url, source }),
        };

        if !status.is_success() {
            return Err(ApiError::Status { url, status, body });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl WeatherRepository for HttpWeatherRepository {
    async fn list_stations(&self) -> Result<Vec<WeatherStation>, ApiError> {
        let wrapper: ResponseWrapper<WeatherStation> = self.get_json(self.stations_url()).await?;
        tracing::debug!("Found {} stations", wrapper.data.len());
        Ok(wrapper.data)
    }

    async fn fetch_records(
        &self,
        station_name: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<WeatherRecord>, ApiError> {
        let url = self.records_url(station_name, from, to);
        let wrapper: ResponseWrapper<WeatherRecord> = self.get_json(url).await?;
        tracing::debug!(
            "Received {} records for {} between {} and {}",
            wrapper.data.len(),
            station_name,
            from,
            to
        );
        Ok(wrapper.data)
    }

    async fn fetch_widget(&self, station_name: &str) -> Result<WidgetData, ApiError> {
        self.get_json(self.widget_url(station_name)).await
    }
}
