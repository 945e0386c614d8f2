// Chart formatting policy - axis heuristics and value/time label formatting
use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::domain::chart::{AxisTick, TimeAxis, TimeLabelFormat};
use crate::domain::parameter::Parameter;
use crate::domain::sample::{self, Sample};

pub const MINUTE_MS: i64 = 60_000;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;
pub const WEEK_MS: i64 = 7 * DAY_MS;

/// Shown instead of a number when a value is missing or not finite.
pub const VALUE_PLACEHOLDER: &str = "---";

/// Ranges up to this length are labelled with the time of day.
const HOUR_LABEL_MAX_RANGE_MS: i64 = 3 * DAY_MS;

// (inclusive upper bound on the visible range, result)
const GRANULARITY_STEPS: &[(i64, i64)] = &[
    (HOUR_MS, 10 * MINUTE_MS),
    (6 * HOUR_MS, 30 * MINUTE_MS),
    (DAY_MS, 2 * HOUR_MS),
    (WEEK_MS, 12 * HOUR_MS),
];
const WIDEST_GRANULARITY_MS: i64 = 2 * DAY_MS;

const LABEL_COUNT_STEPS: &[(i64, usize)] = &[
    (HOUR_MS, 6),
    (6 * HOUR_MS, 12),
    (DAY_MS, 12),
    (WEEK_MS, 14),
];
const WIDEST_LABEL_COUNT: usize = 15;

fn step_lookup<T: Copy>(steps: &[(i64, T)], otherwise: T, range_ms: i64) -> T {
    steps
        .iter()
        .find(|(upper, _)| range_ms <= *upper)
        .map_or(otherwise, |(_, result)| *result)
}

/// Spacing between adjacent x-axis ticks for a visible time range.
pub fn select_granularity(time_range_ms: i64) -> i64 {
    step_lookup(GRANULARITY_STEPS, WIDEST_GRANULARITY_MS, time_range_ms)
}

pub fn select_label_count(time_range_ms: i64) -> usize {
    step_lookup(LABEL_COUNT_STEPS, WIDEST_LABEL_COUNT, time_range_ms)
}

pub fn select_label_format(time_range_ms: i64) -> TimeLabelFormat {
    if time_range_ms <= HOUR_LABEL_MAX_RANGE_MS {
        TimeLabelFormat::HourMinute
    } else {
        TimeLabelFormat::DayMonth
    }
}

/// Format a tick label in UTC.
pub fn format_time_label(timestamp_ms: i64, time_range_ms: i64) -> String {
    format_time_label_at(timestamp_ms, time_range_ms, &Utc.fix())
}

/// Format a tick label at a fixed UTC offset. Unrepresentable timestamps give an empty label.
pub fn format_time_label_at(timestamp_ms: i64, time_range_ms: i64, offset: &FixedOffset) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(time) => time
            .with_timezone(offset)
            .format(select_label_format(time_range_ms).pattern())
            .to_string(),
        None => String::new(),
    }
}

/// `"{value} {unit}"` with the parameter's precision, or a placeholder when
/// the value is absent or not finite.
pub fn format_value(value: impl Into<Option<f64>>, parameter_id: &str) -> String {
    let parameter = Parameter::new(parameter_id);
    let unit = parameter.unit();

    let number = match value.into() {
        Some(v) if v.is_finite() => format!("{:.*}", parameter.decimals(), v),
        _ => VALUE_PLACEHOLDER.to_string(),
    };

    if unit.is_empty() {
        number
    } else {
        format!("{} {}", number, unit)
    }
}

/// Axis settings for a sorted sample set.
pub fn time_axis(samples: &[Sample]) -> TimeAxis {
    let range_ms = sample::time_range(samples);
    TimeAxis {
        range_ms,
        granularity_ms: select_granularity(range_ms),
        label_count: select_label_count(range_ms),
        label_format: select_label_format(range_ms),
    }
}

/// Tick positions between `start_ms` and `end_ms`, aligned to the granularity in
/// local time. The step widens by whole granularities so no more than
/// `label_count` ticks are produced.
pub fn axis_ticks(axis: &TimeAxis, start_ms: i64, end_ms: i64, offset: &FixedOffset) -> Vec<AxisTick> {
    if end_ms < start_ms || axis.granularity_ms <= 0 || axis.label_count == 0 {
        return Vec::new();
    }

    let granularity = axis.granularity_ms;
    let offset_ms = i64::from(offset.local_minus_utc()) * 1000;
    let Some(local_start) = start_ms.checked_add(offset_ms) else {
        return Vec::new();
    };
    let first = local_start
        .div_euclid(granularity)
        .checked_mul(granularity)
        .and_then(|aligned| aligned.checked_sub(offset_ms))
        .and_then(|aligned| {
            if aligned < start_ms {
                aligned.checked_add(granularity)
            } else {
                Some(aligned)
            }
        });
    let Some(first) = first.filter(|first| *first <= end_ms) else {
        return Vec::new();
    };

    let available = (end_ms.saturating_sub(first) / granularity).saturating_add(1) as usize;
    let stride = available.div_ceil(axis.label_count) as i64;
    let step = granularity.saturating_mul(stride.max(1));

    let mut ticks = Vec::new();
    let mut next = Some(first);
    while let Some(time_ms) = next.filter(|t| *t <= end_ms) {
        if ticks.len() >= axis.label_count {
            break;
        }
        ticks.push(AxisTick {
            time_ms,
            label: format_time_label_at(time_ms, axis.range_ms, offset),
        });
        next = time_ms.checked_add(step);
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_breakpoints() {
        assert_eq!(select_granularity(0), 600_000);
        assert_eq!(select_granularity(3_600_000), 600_000);
        assert_eq!(select_granularity(3_600_001), 1_800_000);
        assert_eq!(select_granularity(21_600_000), 1_800_000);
        assert_eq!(select_granularity(21_600_001), 7_200_000);
        assert_eq!(select_granularity(86_400_000), 7_200_000);
        assert_eq!(select_granularity(86_400_001), 43_200_000);
        assert_eq!(select_granularity(604_800_000), 43_200_000);
        assert_eq!(select_granularity(604_800_001), 172_800_000);
        assert_eq!(select_granularity(i64::MAX), 172_800_000);
    }

    #[test]
    fn test_label_count_breakpoints() {
        assert_eq!(select_label_count(0), 6);
        assert_eq!(select_label_count(3_600_000), 6);
        assert_eq!(select_label_count(3_600_001), 12);
        assert_eq!(select_label_count(86_400_000), 12);
        assert_eq!(select_label_count(86_400_001), 14);
        assert_eq!(select_label_count(604_800_000), 14);
        assert_eq!(select_label_count(604_800_001), 15);
    }

    #[test]
    fn test_step_functions_are_monotonic() {
        let probes: Vec<i64> = (0..=40).map(|i| i * 6 * HOUR_MS).chain([1, 59 * MINUTE_MS]).collect();
        let mut sorted = probes.clone();
        sorted.sort();

        for pair in sorted.windows(2) {
            assert!(select_granularity(pair[0]) <= select_granularity(pair[1]));
            assert!(select_label_count(pair[0]) <= select_label_count(pair[1]));
        }
    }

    #[test]
    fn test_format_time_label() {
        // 2024-03-01T14:35:00Z
        let t = 1_709_303_700_000;
        assert_eq!(format_time_label(t, 7_200_000), "14:35");
        assert_eq!(format_time_label(t, 259_200_000), "14:35");
        assert_eq!(format_time_label(t, 259_200_001), "01/03");
        assert_eq!(format_time_label(t, 700_000_000), "01/03");
    }

    #[test]
    fn test_format_time_label_at_offset() {
        let t = 1_709_262_000_000; // 2024-03-01T03:00:00Z
        let argentina = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_time_label_at(t, HOUR_MS, &argentina), "00:00");
        assert_eq!(format_time_label_at(t - 1, 5 * DAY_MS, &argentina), "29/02");
    }

    #[test]
    fn test_format_time_label_out_of_range() {
        assert_eq!(format_time_label(i64::MAX, HOUR_MS), "");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(20.5, "temperatura"), "20.5 °C");
        assert_eq!(format_value(64.6, "humedad"), "65 %");
        assert_eq!(format_value(1.234, "precipitacion"), "1.23 mm");
        assert_eq!(format_value(1013.26, "airPressure"), "1013.3 hPa");
        assert_eq!(format_value(4.26, "uvIndex"), "4.3");
    }

    #[test]
    fn test_format_value_placeholder() {
        assert_eq!(format_value(f64::NAN, "temperatura"), "--- °C");
        assert_eq!(format_value(f64::INFINITY, "vientoVel"), "--- m/s");
        assert_eq!(format_value(None, "humedad"), "--- %");
        assert_eq!(format_value(None, "uvIndex"), "---");
    }

    #[test]
    fn test_time_axis_for_two_hours() {
        let samples = vec![Sample::new(0, 1.0), Sample::new(2 * HOUR_MS, 2.0)];
        let axis = time_axis(&samples);
        assert_eq!(axis.range_ms, 2 * HOUR_MS);
        assert_eq!(axis.granularity_ms, 30 * MINUTE_MS);
        assert_eq!(axis.label_count, 12);
        assert_eq!(axis.label_format, TimeLabelFormat::HourMinute);
    }

    #[test]
    fn test_time_axis_single_sample_uses_default_range() {
        let axis = time_axis(&[Sample::new(5, 1.0)]);
        assert_eq!(axis.range_ms, HOUR_MS);
        assert_eq!(axis.granularity_ms, 10 * MINUTE_MS);
        assert_eq!(axis.label_count, 6);
    }

    #[test]
    fn test_axis_ticks_aligned_and_capped() {
        // 2024-03-01T10:05:00Z .. 2024-03-01T12:05:00Z
        let start = 1_709_287_500_000;
        let end = start + 2 * HOUR_MS;
        let axis = time_axis(&[Sample::new(start, 0.0), Sample::new(end, 0.0)]);
        let ticks = axis_ticks(&axis, start, end, &Utc.fix());

        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["10:30", "11:00", "11:30", "12:00"]);

        let tight = TimeAxis { label_count: 2, ..axis };
        let ticks = axis_ticks(&tight, start, end, &Utc.fix());
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["10:30", "11:30"]);
    }

    #[test]
    fn test_axis_ticks_align_to_local_time() {
        // 2024-03-01T00:00:00Z .. +1 day, labelled at UTC-3
        let start = 1_709_251_200_000;
        let end = start + DAY_MS;
        let axis = time_axis(&[Sample::new(start, 0.0), Sample::new(end, 0.0)]);
        let argentina = FixedOffset::west_opt(3 * 3600).unwrap();

        let ticks = axis_ticks(&axis, start, end, &argentina);

        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("22:00"));
        assert!(ticks.len() <= axis.label_count);
        assert!(ticks.iter().all(|t| t.time_ms >= start && t.time_ms <= end));
    }

    #[test]
    fn test_axis_ticks_empty_window() {
        let axis = time_axis(&[]);
        assert!(axis_ticks(&axis, 10, 5, &Utc.fix()).is_empty());
        assert!(axis_ticks(&axis, 1, 2, &Utc.fix()).is_empty());
    }

    #[test]
    fn test_axis_ticks_at_timestamp_extremes() {
        let axis = time_axis(&[]);
        let argentina = FixedOffset::west_opt(3 * 3600).unwrap();
        let east = FixedOffset::east_opt(3 * 3600).unwrap();

        let ticks = axis_ticks(&axis, i64::MAX - HOUR_MS, i64::MAX, &Utc.fix());
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= axis.label_count);
        assert!(ticks.iter().all(|t| t.label.is_empty()));

        assert!(axis_ticks(&axis, i64::MAX - 1, i64::MAX, &east).is_empty());
        assert!(axis_ticks(&axis, i64::MIN, i64::MIN + 1, &argentina).is_empty());

        let wide = time_axis(&[Sample::new(i64::MIN, 0.0), Sample::new(i64::MAX, 0.0)]);
        assert_eq!(wide.range_ms, i64::MAX);
        assert!(axis_ticks(&wide, i64::MIN, i64::MAX, &Utc.fix()).len() <= wide.label_count);

        let ticks = axis_ticks(&wide, 0, i64::MAX, &Utc.fix());
        assert_eq!(ticks.first().map(|t| t.time_ms), Some(0));
        assert!(ticks.len() <= wide.label_count);
        assert!(ticks.windows(2).all(|w| w[0].time_ms < w[1].time_ms));
    }
}
