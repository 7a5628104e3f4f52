// SPDX-License-Identifier: GPL-3.0-or-later
//! Temperatures as they are written in configuration and shown next to the grid.
use std::fmt;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        })
    }
}

/// A temperature, kept in the unit it was given in.
///
/// In configuration a bare number is in Celsius. Fahrenheit is written as a single entry table,
/// `{ fahrenheit = 120 }` (or `f`).
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(from = "ConfiguredTemperature")]
pub enum Temperature {
    Celsius(f32),
    Fahrenheit(f32),
}

impl Temperature {
    pub fn in_celsius(&self) -> f32 {
        match *self {
            Self::Celsius(c) => c,
            Self::Fahrenheit(f) => (f - 32.0) * 5.0 / 9.0,
        }
    }

    pub fn in_fahrenheit(&self) -> f32 {
        match *self {
            Self::Celsius(c) => c * 1.8 + 32.0,
            Self::Fahrenheit(f) => f,
        }
    }

    pub fn unit(&self) -> TemperatureUnit {
        match self {
            Self::Celsius(_) => TemperatureUnit::Celsius,
            Self::Fahrenheit(_) => TemperatureUnit::Fahrenheit,
        }
    }

    /// Convert to `unit` and round to a whole degree, the way the labels show it.
    pub fn display_in(&self, unit: &TemperatureUnit) -> Self {
        // Adding zero turns a rounded -0.0 into 0.0.
        let whole = |value: f32| value.round() + 0.0;
        match unit {
            TemperatureUnit::Celsius => Self::Celsius(whole(self.in_celsius())),
            TemperatureUnit::Fahrenheit => Self::Fahrenheit(whole(self.in_fahrenheit())),
        }
    }

    fn value(&self) -> f32 {
        match *self {
            Self::Celsius(value) | Self::Fahrenheit(value) => value,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{}", self.value(), self.unit())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfiguredTemperature {
    Celsius(f32),
    WithUnit(UnitTemperature),
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum UnitTemperature {
    #[serde(alias = "c")]
    Celsius(f32),

    #[serde(alias = "f")]
    Fahrenheit(f32),
}

impl From<ConfiguredTemperature> for Temperature {
    fn from(configured: ConfiguredTemperature) -> Self {
        match configured {
            ConfiguredTemperature::Celsius(c) => Self::Celsius(c),
            ConfiguredTemperature::WithUnit(UnitTemperature::Celsius(c)) => Self::Celsius(c),
            ConfiguredTemperature::WithUnit(UnitTemperature::Fahrenheit(f)) => Self::Fahrenheit(f),
        }
    }
}

#[cfg(test)]
mod test {
    use float_cmp::{approx_eq, F32Margin};
    use serde::Deserialize;

    use super::{Temperature, TemperatureUnit};

    #[test]
    fn conversions() {
        assert!(approx_eq!(
            f32,
            Temperature::Fahrenheit(-40.0).in_celsius(),
            -40.0,
            F32Margin::default()
        ));
        assert!(approx_eq!(
            f32,
            Temperature::Fahrenheit(212.0).in_celsius(),
            100.0,
            F32Margin::default()
        ));
        assert!(approx_eq!(
            f32,
            Temperature::Celsius(100.0).in_fahrenheit(),
            212.0,
            F32Margin::default()
        ));
    }

    #[test]
    fn display_rounding() {
        // 120°F is 48.9°C, shown as 49.
        let alarm = Temperature::Fahrenheit(120.0);
        assert_eq!(
            alarm.display_in(&TemperatureUnit::Celsius),
            Temperature::Celsius(49.0)
        );
        let max = Temperature::Celsius(25.4);
        assert_eq!(max.display_in(&TemperatureUnit::Fahrenheit).to_string(), "78°F");
        let chilly = Temperature::Celsius(-0.3);
        assert_eq!(chilly.display_in(&TemperatureUnit::Celsius).to_string(), "0°C");
    }

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        temp: Temperature,
    }

    fn parse(source: &str) -> Temperature {
        toml::from_str::<Wrapper>(source).unwrap().temp
    }

    #[test]
    fn bare_numbers_are_celsius() {
        assert_eq!(parse("temp = 1.5"), Temperature::Celsius(1.5));
        assert_eq!(parse("temp = 0"), Temperature::Celsius(0.0));
    }

    #[test]
    fn with_unit() {
        assert_eq!(parse("temp = { fahrenheit = 120.0 }"), Temperature::Fahrenheit(120.0));
        assert_eq!(parse("temp = { f = 32 }"), Temperature::Fahrenheit(32.0));
        assert_eq!(parse("temp = { celsius = 45 }"), Temperature::Celsius(45.0));
    }

    #[test]
    fn unknown_unit() {
        assert!(toml::from_str::<Wrapper>("temp = { kelvin = 300 }").is_err());
    }
}
