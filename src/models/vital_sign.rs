use serde::{Deserialize, Serialize};

use super::enums::TemperatureUnit;

/// Numeric vitals normalised at the boundary.
///
/// Absent values stay `None`; only `duration_days` has a default (0).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub age: Option<u32>,
    /// Always Celsius, see [`to_celsius`].
    pub temperature_celsius: Option<f64>,
    #[serde(default)]
    pub duration_days: u32,
}

impl Vitals {
    pub fn with_duration(duration_days: u32) -> Self {
        Self {
            duration_days,
            ..Self::default()
        }
    }

    pub fn with_temperature(temperature_celsius: f64) -> Self {
        Self {
            temperature_celsius: Some(temperature_celsius),
            ..Self::default()
        }
    }
}

/// Converts a reading to Celsius. `C = (F − 32) × 5/9`.
pub fn to_celsius(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
    }
}

/// Inverse of [`to_celsius`].
pub fn from_celsius(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    }
}
