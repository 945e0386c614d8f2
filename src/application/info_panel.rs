// Station info panel and map marker formatting
use crate::application::chart_policy::VALUE_PLACEHOLDER;
use crate::domain::station::WidgetData;

const WIND_SECTORS: [&str; 8] = [
    "Norte, N",
    "Noreste, NE",
    "Este, E",
    "Sureste, SE",
    "Sur, S",
    "Suroeste, SO",
    "Oeste, O",
    "Noroeste, NO",
];

/// Cardinal name for a wind direction in degrees, in 45° sectors centred on north.
pub fn format_wind_direction(degrees: f64) -> String {
    if !degrees.is_finite() {
        return VALUE_PLACEHOLDER.to_string();
    }
    let normalized = degrees.rem_euclid(360.0);
    let sector = ((normalized + 22.5) / 45.0).floor() as usize % WIND_SECTORS.len();
    WIND_SECTORS[sector].to_string()
}

/// Normalize the API's free-text wind direction ("Noreste", "viento del sur") to the
/// panel form. Compound names are matched before the names they contain, and
/// "oeste" before "este". Unrecognized text is returned unchanged.
pub fn simplify_wind_direction(direction: &str) -> String {
    const NAMES: [(&str, &str); 8] = [
        ("noroeste", "Noroeste, NO"),
        ("noreste", "Noreste, NE"),
        ("suroeste", "Suroeste, SO"),
        ("sureste", "Sureste, SE"),
        ("norte", "Norte, N"),
        ("sur", "Sur, S"),
        ("oeste", "Oeste, O"),
        ("este", "Este, E"),
    ];
    let lower = direction.to_lowercase();
    NAMES
        .iter()
        .find(|(name, _)| lower.contains(name))
        .map_or_else(|| direction.to_string(), |(_, label)| label.to_string())
}

/// Rain accumulation label. Totals over 48h or 7d (`wide`) drop the decimal from 10 mm up.
pub fn format_rain_amount(mm: f64, wide: bool) -> String {
    if !mm.is_finite() || mm < 0.0 {
        return format!("{} mm", VALUE_PLACEHOLDER);
    }
    if mm == 0.0 {
        return "0.0 mm".to_string();
    }
    if wide && mm >= 10.0 {
        format!("{:.0} mm", mm)
    } else {
        format!("{:.1} mm", mm)
    }
}

/// Short value drawn inside a station's map marker for the selected map layer.
pub fn marker_label(widget: &WidgetData, layer: &str) -> String {
    let value = match layer {
        "temperatura" => widget.temperature,
        "humedad" => widget.relative_humidity,
        "viento" => widget.wind_speed,
        "precipitacion" => widget.rain_last_hour,
        "radiacion" => widget.solar_radiation,
        "presion" => return format!("{:.0}", widget.air_pressure),
        "punto_rocio" => widget.dew_point,
        _ => return "--".to_string(),
    };
    format!("{:.1}", value)
}

/// Marker snippet with units, shown when a marker is tapped.
pub fn marker_snippet(widget: &WidgetData, layer: &str) -> String {
    match layer {
        "temperatura" => format!("{:.1}°C", widget.temperature),
        "humedad" => format!("{:.1}%", widget.relative_humidity),
        "viento" => format!("{:.1} m/s", widget.wind_speed),
        "precipitacion" => format!("{:.1} mm", widget.rain_last_hour),
        "radiacion" => format!("{:.1} W/m²", widget.solar_radiation),
        "presion" => format!("{:.1} hPa", widget.air_pressure),
        "punto_rocio" => format!("{:.1}°C", widget.dew_point),
        _ => "Datos no disponibles".to_string(),
    }
}
