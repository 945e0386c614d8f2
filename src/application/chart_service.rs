// Chart service - Use case for turning station records into chart data
use crate::application::chart_policy::{self, format_value};
use crate::application::retry::RetryPolicy;
use crate::application::weather_repository::WeatherRepository;
use crate::domain::chart::{ChartData, FormattedStats, RangePreset, SeriesStats};
use crate::domain::parameter::Parameter;
use crate::domain::sample::{self, RawReading};
use crate::domain::station::{WeatherRecord, WidgetData};
use crate::infrastructure::config::ChartSettings;
use crate::infrastructure::error::ApiError;
use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use std::sync::Arc;

/// Everything the station screen shows: the info panel summary and one chart per parameter.
#[derive(Debug, Clone)]
pub struct StationOverview {
    pub station: String,
    pub preset: RangePreset,
    pub widget: Option<WidgetData>,
    pub charts: Vec<ChartData>,
}

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn WeatherRepository>,
    settings: ChartSettings,
    retry: RetryPolicy,
    offset: FixedOffset,
}

impl ChartService {
    pub fn new(repository: Arc<dyn WeatherRepository>, settings: ChartSettings) -> Self {
        let retry = settings.retry.policy();
        let offset = settings.utc_offset();
        Self {
            repository,
            settings,
            retry,
            offset,
        }
    }

    /// Records for a station, retrying transient API failures.
    pub async fn fetch_records(
        &self,
        station: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<WeatherRecord>> {
        let what = format!("Fetching records for {}", station);
        self.retry
            .run_if(
                &what,
                || self.repository.fetch_records(station, from, to),
                ApiError::is_transient,
            )
            .await
            .with_context(|| format!("could not load records for station {}", station))
    }

    pub async fn get_chart(
        &self,
        station: &str,
        parameter: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<ChartData> {
        let records = self.fetch_records(station, from, to).await?;
        Ok(self.build_chart(&records, parameter))
    }

    /// One chart per configured parameter, all built from a single fetch.
    pub async fn get_charts(
        &self,
        station: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<ChartData>> {
        let records = self.fetch_records(station, from, to).await?;
        Ok(self
            .settings
            .parameters
            .iter()
            .map(|parameter| self.build_chart(&records, parameter))
            .collect())
    }

    /// Charts for `preset` ending at `now`, fetched alongside the widget summary.
    /// A failing widget call leaves the panel empty instead of failing the screen.
    pub async fn get_overview(
        &self,
        station: &str,
        preset: RangePreset,
        now: DateTime<Utc>,
    ) -> anyhow::Result<StationOverview> {
        let (from, to) = preset.window(now);
        let widget = self.fetch_widget(station);
        let charts = self.get_charts(station, from, to);

        let (widget, charts) = futures::future::join(widget, charts).await;

        Ok(StationOverview {
            station: station.to_string(),
            preset,
            widget,
            charts: charts?,
        })
    }

    /// Current-conditions summary, or `None` when the API cannot provide it.
    pub async fn fetch_widget(&self, station: &str) -> Option<WidgetData> {
        let what = format!("Fetching widget for {}", station);
        self.retry
            .run_if(
                &what,
                || self.repository.fetch_widget(station),
                ApiError::is_transient,
            )
            .await
            .ok()
    }

    /// Apply the formatting policy to the records of one parameter.
    pub fn build_chart(&self, records: &[WeatherRecord], parameter_id: &str) -> ChartData {
        let parameter = Parameter::new(parameter_id);
        if !parameter.is_known() {
            tracing::warn!("Unknown parameter '{}', using default styling", parameter_id);
        }

        let readings: Vec<RawReading> = records
            .iter()
            .map(|record| record.raw_reading(parameter_id))
            .collect();
        let parsed = sample::samples_from_readings(&readings);
        let mut samples = sample::filter_valid(parsed);
        if self.settings.discard_outliers {
            samples = sample::discard_outliers(samples, &parameter);
        }
        let dropped = readings.len() - samples.len();
        if dropped > 0 {
            tracing::debug!(
                "Dropped {} of {} readings for '{}'",
                dropped,
                readings.len(),
                parameter_id
            );
        }

        let stats = SeriesStats::from_samples(&samples);
        let formatted_stats = stats.as_ref().map(|s| FormattedStats {
            current: format_value(s.current, parameter_id),
            min: format_value(s.min, parameter_id),
            max: format_value(s.max, parameter_id),
            avg: format_value(s.avg, parameter_id),
        });

        let samples = sample::downsample(samples, self.settings.max_samples);
        let axis = chart_policy::time_axis(&samples);
        let ticks = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => {
                chart_policy::axis_ticks(&axis, first.time_ms, last.time_ms, &self.offset)
            }
            _ => Vec::new(),
        };

        tracing::debug!(
            "Chart '{}': {} samples, range {}ms, granularity {}ms, {} labels",
            parameter_id,
            samples.len(),
            axis.range_ms,
            axis.granularity_ms,
            axis.label_count
        );

        let (y_min, y_max) = match parameter.range() {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        };

        ChartData {
            parameter: parameter_id.to_string(),
            title: parameter.label_with_unit(),
            unit: parameter.unit().to_string(),
            color: parameter.color().to_hex(),
            highlight_color: parameter.highlight_color().to_hex(),
            y_min,
            y_max,
            axis,
            ticks,
            samples,
            stats,
            formatted_stats,
        }
    }
}
