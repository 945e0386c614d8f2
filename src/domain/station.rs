// Weather station domain model - stations, sensor records and widget summaries
use serde::Deserialize;
use std::collections::HashMap;

use super::sample::RawReading;

/// Envelope the API wraps every list response in.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseWrapper<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub links: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherStation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: Option<Position>,
}

impl WeatherStation {
    /// Name shown on the map and in the info panel: "ESTACION_LAGUNA_BLANCA" -> "Estacion Laguna Blanca".
    pub fn display_name(&self) -> String {
        self.name
            .split(|c: char| c == '_' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                let lower = part.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

/// Aggregates the station reports per sensor and interval.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SensorAggregate {
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default)]
    pub sum: Option<f64>,
    #[serde(default)]
    pub last: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sensors {
    #[serde(default)]
    pub hc_air_temperature: Option<SensorAggregate>,
    #[serde(default)]
    pub hc_relative_humidity: Option<SensorAggregate>,
    #[serde(default)]
    pub solar_radiation: Option<SensorAggregate>,
    #[serde(default)]
    pub precipitation: Option<SensorAggregate>,
    #[serde(default)]
    pub usonic_wind_dir: Option<SensorAggregate>,
    #[serde(default)]
    pub usonic_wind_speed: Option<SensorAggregate>,
    #[serde(default)]
    pub dew_point: Option<SensorAggregate>,
    #[serde(default)]
    pub air_pressure: Option<SensorAggregate>,
    #[serde(default)]
    pub wind_gust: Option<SensorAggregate>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WeatherRecord {
    pub date: String,
    #[serde(default)]
    pub sensors: Sensors,
}

impl WeatherRecord {
    /// Value plotted for `parameter`, picking the aggregate that parameter is charted by.
    pub fn reading(&self, parameter: &str) -> Option<f64> {
        let s = &self.sensors;
        match parameter {
            "temperatura" => s.hc_air_temperature.as_ref()?.avg,
            "humedad" => s.hc_relative_humidity.as_ref()?.avg,
            "radiacion" => s.solar_radiation.as_ref()?.avg,
            "precipitacion" => s.precipitation.as_ref()?.sum,
            "direccionViento" => s.usonic_wind_dir.as_ref()?.last,
            "vientoVel" => s.usonic_wind_speed.as_ref()?.avg,
            "dewPoint" => s.dew_point.as_ref()?.avg,
            "airPressure" => s.air_pressure.as_ref()?.avg,
            "windGust" => s.wind_gust.as_ref()?.max,
            _ => None,
        }
    }

    pub fn raw_reading(&self, parameter: &str) -> RawReading {
        RawReading::new(self.date.clone(), self.reading(parameter))
    }
}

/// Current-conditions summary shown in the station info panel and on map markers.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetData {
    pub temperature: f64,
    pub relative_humidity: f64,
    pub dew_point: f64,
    pub air_pressure: f64,
    pub solar_radiation: f64,
    pub wind_speed: f64,
    pub wind_direction: String,
    pub rain_last_hour: f64,
    #[serde(rename = "rain24h")]
    pub rain_24h: f64,
    #[serde(rename = "rain48h")]
    pub rain_48h: f64,
    #[serde(rename = "rain7d")]
    pub rain_7d: f64,
}
