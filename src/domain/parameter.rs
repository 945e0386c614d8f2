// Parameter domain model - static display table for each physical quantity

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`, rounding and clamping to 0..=255.
    pub fn scaled(&self, factor: f64) -> Self {
        let channel = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Static record describing how one parameter is labelled and plotted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub color: Rgb,
    /// Axis clamp; values outside are treated as sensor outliers.
    pub range: Option<(f64, f64)>,
    pub decimals: usize,
}

pub const DEFAULT_COLOR: Rgb = Rgb::new(33, 150, 243);
pub const DEFAULT_DECIMALS: usize = 1;
const HIGHLIGHT_FACTOR: f64 = 0.8;

pub static PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "temperatura",
        label: "Temperatura del aire",
        unit: "°C",
        color: Rgb::new(255, 87, 34),
        range: Some((-30.0, 60.0)),
        decimals: 1,
    },
    ParameterSpec {
        id: "humedad",
        label: "Humedad relativa",
        unit: "%",
        color: Rgb::new(33, 150, 243),
        range: Some((0.0, 100.0)),
        decimals: 0,
    },
    ParameterSpec {
        id: "radiacion",
        label: "Radiación solar",
        unit: "W/m²",
        color: Rgb::new(255, 193, 7),
        range: Some((0.0, 1500.0)),
        decimals: 0,
    },
    ParameterSpec {
        id: "precipitacion",
        label: "Precipitación",
        unit: "mm",
        color: Rgb::new(76, 175, 80),
        range: Some((0.0, 200.0)),
        decimals: 2,
    },
    ParameterSpec {
        id: "direccionViento",
        label: "Dirección del viento",
        unit: "°",
        color: Rgb::new(156, 39, 176),
        range: Some((0.0, 360.0)),
        decimals: 0,
    },
    ParameterSpec {
        id: "vientoVel",
        label: "Velocidad del viento",
        unit: "m/s",
        color: Rgb::new(96, 125, 139),
        range: Some((0.0, 50.0)),
        decimals: 1,
    },
    ParameterSpec {
        id: "solarDuration",
        label: "Duración solar",
        unit: "h",
        color: Rgb::new(255, 152, 0),
        range: None,
        decimals: 1,
    },
    ParameterSpec {
        id: "dewPoint",
        label: "Punto de rocío",
        unit: "°C",
        color: Rgb::new(0, 150, 136),
        range: Some((-40.0, 40.0)),
        decimals: 1,
    },
    ParameterSpec {
        id: "airPressure",
        label: "Presión atmosférica",
        unit: "hPa",
        color: Rgb::new(121, 85, 72),
        range: Some((950.0, 1050.0)),
        decimals: 1,
    },
    ParameterSpec {
        id: "windGust",
        label: "Ráfagas de viento",
        unit: "m/s",
        color: Rgb::new(158, 158, 158),
        range: Some((0.0, 80.0)),
        decimals: 1,
    },
];

pub fn find(id: &str) -> Option<&'static ParameterSpec> {
    PARAMETERS.iter().find(|spec| spec.id == id)
}

/// A parameter id resolved against the table, with fallbacks for unknown ids.
#[derive(Debug, Clone, Copy)]
pub struct Parameter<'a> {
    id: &'a str,
    spec: Option<&'static ParameterSpec>,
}

impl<'a> Parameter<'a> {
    pub fn new(id: &'a str) -> Self {
        Self { id, spec: find(id) }
    }

    pub fn id(&self) -> &'a str {
        self.id
    }

    pub fn is_known(&self) -> bool {
        self.spec.is_some()
    }

    /// Display label; unknown ids are shown as-is.
    pub fn label(&self) -> &'a str {
        self.spec.map_or(self.id, |s| s.label)
    }

    pub fn unit(&self) -> &'static str {
        self.spec.map_or("", |s| s.unit)
    }

    pub fn color(&self) -> Rgb {
        self.spec.map_or(DEFAULT_COLOR, |s| s.color)
    }

    pub fn highlight_color(&self) -> Rgb {
        self.color().scaled(HIGHLIGHT_FACTOR)
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        self.spec.and_then(|s| s.range)
    }

    pub fn decimals(&self) -> usize {
        self.spec.map_or(DEFAULT_DECIMALS, |s| s.decimals)
    }

    pub fn label_with_unit(&self) -> String {
        let unit = self.unit();
        if unit.is_empty() {
            self.label().to_string()
        } else {
            format!("{} ({})", self.label(), unit)
        }
    }
}
