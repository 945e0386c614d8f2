// Sample domain model - timestamped sensor readings and their cleanup
use super::parameter::Parameter;

/// Range used when a sample set has fewer than two points.
pub const DEFAULT_TIME_RANGE_MS: i64 = 3_600_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time_ms: i64,
    pub value: f64,
}

impl Sample {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

/// One reading as delivered by the API client: an ISO timestamp and a nullable value.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub date: String,
    pub value: Option<f64>,
}

impl RawReading {
    pub fn new(date: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// Parse raw readings into samples, dropping entries with an unparsable
/// timestamp or a null value. Order is preserved; call [`filter_valid`] to sort.
pub fn samples_from_readings<'a, I>(readings: I) -> Vec<Sample>
where
    I: IntoIterator<Item = &'a RawReading>,
{
    readings
        .into_iter()
        .filter_map(|reading| {
            let Ok(time) = chrono::DateTime::parse_from_rfc3339(&reading.date) else {
                tracing::debug!("Dropping reading with unparsable date: {}", reading.date);
                return None;
            };
            let value = reading.value?;
            Some(Sample::new(time.timestamp_millis(), value))
        })
        .collect()
}

/// Drop non-finite values, then stable-sort ascending by timestamp.
pub fn filter_valid(samples: impl IntoIterator<Item = Sample>) -> Vec<Sample> {
    let mut valid: Vec<Sample> = samples
        .into_iter()
        .filter(|s| s.value.is_finite())
        .collect();
    valid.sort_by_key(|s| s.time_ms);
    valid
}

/// Stride decimation: keeps every Nth sample with N = len / max_count.
pub fn downsample(samples: Vec<Sample>, max_count: usize) -> Vec<Sample> {
    if samples.len() <= max_count {
        return samples;
    }
    if max_count == 0 {
        return Vec::new();
    }

    let step = samples.len() / max_count;
    samples
        .into_iter()
        .enumerate()
        .filter(|(index, _)| index % step == 0)
        .map(|(_, sample)| sample)
        .collect()
}

/// Drop samples outside the parameter's physical range. Parameters without a
/// range keep everything.
pub fn discard_outliers(samples: Vec<Sample>, parameter: &Parameter<'_>) -> Vec<Sample> {
    match parameter.range() {
        Some((min, max)) => samples
            .into_iter()
            .filter(|s| s.value >= min && s.value <= max)
            .collect(),
        None => samples,
    }
}

/// Span between the first and last timestamp of a sorted sample set.
pub fn time_range(samples: &[Sample]) -> i64 {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) if samples.len() > 1 => {
            last.time_ms.saturating_sub(first.time_ms)
        }
        _ => DEFAULT_TIME_RANGE_MS,
    }
}
