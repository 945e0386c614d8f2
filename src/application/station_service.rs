// Station service - Use case for listing weather stations
use crate::application::retry::RetryPolicy;
use crate::application::weather_repository::WeatherRepository;
use crate::domain::station::WeatherStation;
use crate::infrastructure::error::ApiError;
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct StationService {
    repository: Arc<dyn WeatherRepository>,
    retry: RetryPolicy,
}

impl StationService {
    pub fn new(repository: Arc<dyn WeatherRepository>, retry: RetryPolicy) -> Self {
        Self { repository, retry }
    }

    /// All stations, sorted by display name.
    pub async fn list_stations(&self) -> anyhow::Result<Vec<WeatherStation>> {
        let mut stations = self
            .retry
            .run_if(
                "Listing stations",
                || self.repository.list_stations(),
                ApiError::is_transient,
            )
            .await
            .context("could not list weather stations")?;
        stations.sort_by_cached_key(|s| s.display_name());
        Ok(stations)
    }

    pub async fn find_station(&self, name: &str) -> anyhow::Result<Option<WeatherStation>> {
        let stations = self.list_stations().await?;
        Ok(stations
            .into_iter()
            .find(|s| s.name.eq_ignore_ascii_case(name) || s.id == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_service::tests::FakeRepository;
    use std::time::Duration;

    fn station(id: &str, name: &str) -> WeatherStation {
        WeatherStation {
            id: id.to_string(),
            name: name.to_string(),
            position: None,
        }
    }

    fn service(repository: FakeRepository) -> StationService {
        StationService::new(
            Arc::new(repository),
            RetryPolicy::new(2, Duration::from_millis(1)),
        )
    }

    #[tokio::test]
    async fn test_list_stations_sorted() {
        let mut repository = FakeRepository::new(Vec::new());
        repository.stations = vec![
            station("2", "PIRANE"),
            station("1", "ESTACION_LAGUNA_BLANCA"),
            station("3", "CLORINDA"),
        ];
        *repository.failures_left.lock().unwrap() = 1;

        let stations = service(repository).list_stations().await.unwrap();

        let names: Vec<&str> = stations.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["CLORINDA", "ESTACION_LAGUNA_BLANCA", "PIRANE"]);
    }

    #[tokio::test]
    async fn test_find_station() {
        let mut repository = FakeRepository::new(Vec::new());
        repository.stations = vec![station("7", "PIRANE")];
        let service = service(repository);

        assert_eq!(service.find_station("pirane").await.unwrap().map(|s| s.id), Some("7".to_string()));
        assert_eq!(service.find_station("7").await.unwrap().map(|s| s.name), Some("PIRANE".to_string()));
        assert!(service.find_station("FORMOSA").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_stations_error() {
        let repository = FakeRepository::new(Vec::new());
        *repository.failures_left.lock().unwrap() = 2;

        let result = service(repository).list_stations().await;

        assert!(result.is_err());
    }
}
