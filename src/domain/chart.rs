// Chart domain models - what a line chart widget needs to draw one parameter
use chrono::{DateTime, Duration, TimeDelta, Utc};

use super::sample::Sample;

/// Time windows offered by the chart screen's range chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    LastHour,
    Last6Hours,
    LastDay,
    LastWeek,
    LastMonth,
}

impl RangePreset {
    pub fn duration(&self) -> Duration {
        match self {
            RangePreset::LastHour => Duration::hours(1),
            RangePreset::Last6Hours => Duration::hours(6),
            RangePreset::LastDay => Duration::days(1),
            RangePreset::LastWeek => Duration::days(7),
            RangePreset::LastMonth => Duration::days(30),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RangePreset::LastHour => "1h",
            RangePreset::Last6Hours => "6h",
            RangePreset::LastDay => "1d",
            RangePreset::LastWeek => "1w",
            RangePreset::LastMonth => "1m",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "1h" => Some(RangePreset::LastHour),
            "6h" => Some(RangePreset::Last6Hours),
            "1d" => Some(RangePreset::LastDay),
            "1w" => Some(RangePreset::LastWeek),
            "1m" => Some(RangePreset::LastMonth),
            _ => None,
        }
    }

    /// Window ending at `now`.
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - self.duration(), now)
    }
}

/// Window of `hours` ending at `now`, or `None` when it falls outside chrono's range.
pub fn hours_window(now: DateTime<Utc>, hours: i64) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let span = TimeDelta::try_hours(hours)?;
    Some((now.checked_sub_signed(span)?, now))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLabelFormat {
    /// `HH:mm`
    HourMinute,
    /// `dd/MM`
    DayMonth,
}

impl TimeLabelFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            TimeLabelFormat::HourMinute => "%H:%M",
            TimeLabelFormat::DayMonth => "%d/%m",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub range_ms: i64,
    pub granularity_ms: i64,
    pub label_count: usize,
    pub label_format: TimeLabelFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub time_ms: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl SeriesStats {
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        let last = samples.last()?;
        let (min, max, sum) = samples.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), s| (min.min(s.value), max.max(s.value), sum + s.value),
        );

        Some(Self {
            current: last.value,
            min,
            max,
            avg: sum / samples.len() as f64,
        })
    }
}

/// Stats already run through the value formatter, ready for the stat cards.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedStats {
    pub current: String,
    pub min: String,
    pub max: String,
    pub avg: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub parameter: String,
    pub title: String,
    pub unit: String,
    pub color: String,
    pub highlight_color: String,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub axis: TimeAxis,
    pub ticks: Vec<AxisTick>,
    pub samples: Vec<Sample>,
    pub stats: Option<SeriesStats>,
    pub formatted_stats: Option<FormattedStats>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
