// src/converters/units.rs
//! Length, weight, volume and temperature conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::utils::round_nice;

#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown {category} unit: {unit}")]
    UnknownUnit { category: Category, unit: String },

    #[error("Value must be a finite number, got {0}")]
    NotFinite(f64),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Weight,
    Volume,
    Temperature,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Length,
        Category::Weight,
        Category::Volume,
        Category::Temperature,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Length => write!(f, "length"),
            Category::Weight => write!(f, "weight"),
            Category::Volume => write!(f, "volume"),
            Category::Temperature => write!(f, "temperature"),
        }
    }
}

impl FromStr for Category {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "length" => Ok(Category::Length),
            "weight" | "mass" => Ok(Category::Weight),
            "volume" => Ok(Category::Volume),
            "temperature" | "temp" => Ok(Category::Temperature),
            other => Err(ConvertError::UnknownCategory(other.to_string())),
        }
    }
}

// Factors relative to the first (base) unit of each category
const LENGTH: &[(&str, f64)] = &[
    ("meter", 1.0),
    ("kilometer", 1000.0),
    ("centimeter", 0.01),
    ("millimeter", 0.001),
    ("mile", 1609.344),
    ("yard", 0.9144),
    ("foot", 0.3048),
    ("inch", 0.0254),
];

const WEIGHT: &[(&str, f64)] = &[
    ("kilogram", 1.0),
    ("gram", 0.001),
    ("milligram", 0.000001),
    ("pound", 0.45359237),
    ("ounce", 0.0283495231),
];

const VOLUME: &[(&str, f64)] = &[
    ("liter", 1.0),
    ("milliliter", 0.001),
    ("gallon", 3.785411784),
    ("quart", 0.946352946),
    ("pint", 0.473176473),
    ("cup", 0.24),
];

const TEMPERATURE: &[&str] = &["celsius", "fahrenheit", "kelvin"];

/// Unit names of a category in display order.
pub fn units(category: Category) -> Vec<&'static str> {
    match factors(category) {
        Some(table) => table.iter().map(|(name, _)| *name).collect(),
        None => TEMPERATURE.to_vec(),
    }
}

fn factors(category: Category) -> Option<&'static [(&'static str, f64)]> {
    match category {
        Category::Length => Some(LENGTH),
        Category::Weight => Some(WEIGHT),
        Category::Volume => Some(VOLUME),
        Category::Temperature => None,
    }
}

fn unknown_unit(category: Category, unit: &str) -> ConvertError {
    ConvertError::UnknownUnit {
        category,
        unit: unit.to_string(),
    }
}

// Convert a value between two units of the same category
pub fn convert(category: Category, from: &str, to: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ConvertError::NotFinite(value));
    }

    let from = from.trim().to_lowercase();
    let to = to.trim().to_lowercase();

    let Some(table) = factors(category) else {
        return convert_temperature(value, &from, &to).map(round_nice);
    };

    let factor = |unit: &str| {
        table
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, f)| *f)
            .ok_or_else(|| unknown_unit(category, unit))
    };

    let in_base = value * factor(&from)?;
    Ok(round_nice(in_base / factor(&to)?))
}

fn convert_temperature(value: f64, from: &str, to: &str) -> Result<f64> {
    let celsius = match from {
        "celsius" => value,
        "fahrenheit" => (value - 32.0) * 5.0 / 9.0,
        "kelvin" => value - 273.15,
        other => return Err(unknown_unit(Category::Temperature, other)),
    };

    match to {
        "celsius" => Ok(celsius),
        "fahrenheit" => Ok(celsius * 9.0 / 5.0 + 32.0),
        "kelvin" => Ok(celsius + 273.15),
        other => Err(unknown_unit(Category::Temperature, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_goes_through_meters() {
        assert_eq!(convert(Category::Length, "kilometer", "meter", 1.5).unwrap(), 1500.0);
        assert_eq!(convert(Category::Length, "mile", "kilometer", 1.0).unwrap(), 1.609344);
        assert_eq!(convert(Category::Length, "foot", "inch", 1.0).unwrap(), 12.0);
    }

    #[test]
    fn weight_and_volume() {
        assert_eq!(convert(Category::Weight, "pound", "gram", 1.0).unwrap(), 453.59237);
        assert_eq!(convert(Category::Volume, "gallon", "quart", 1.0).unwrap(), 4.0);
    }

    #[test]
    fn temperature_goes_through_celsius() {
        assert_eq!(convert(Category::Temperature, "celsius", "fahrenheit", 100.0).unwrap(), 212.0);
        assert_eq!(convert(Category::Temperature, "fahrenheit", "celsius", 32.0).unwrap(), 0.0);
        assert_eq!(convert(Category::Temperature, "kelvin", "celsius", 0.0).unwrap(), -273.15);
        assert_eq!(convert(Category::Temperature, "Celsius", "KELVIN", 25.0).unwrap(), 298.15);
    }

    #[test]
    fn tiny_results_snap_to_zero() {
        assert_eq!(convert(Category::Weight, "milligram", "kilogram", 0.5).unwrap(), 0.0);
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            convert(Category::Length, "parsec", "meter", 1.0),
            Err(ConvertError::UnknownUnit {
                category: Category::Length,
                unit: "parsec".to_string()
            })
        );
        assert!(matches!(
            convert(Category::Length, "meter", "mile", f64::NAN),
            Err(ConvertError::NotFinite(_))
        ));
        assert!("speed".parse::<Category>().is_err());
    }

    #[test]
    fn units_are_listed_in_display_order() {
        assert_eq!(units(Category::Temperature), vec!["celsius", "fahrenheit", "kelvin"]);
        assert_eq!(units(Category::Volume).first(), Some(&"liter"));
        assert_eq!(units(Category::Length).len(), 8);
    }
}
