use std::fmt::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::messages::{Messages, RelativeTimeFormat};
use super::units::{Unit, UnitTable};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound on `Rounding::Fixed` decimal places.
pub const MAX_FIXED_DIGITS: u32 = 100;

/// How a fractional unit count is turned into the displayed magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RoundingRepr", into = "RoundingRepr")]
pub enum Rounding {
    #[default]
    Round,
    Ceil,
    Floor,
    /// Round to this many decimal places, at most [`MAX_FIXED_DIGITS`].
    Fixed(u32),
}

impl Rounding {
    pub fn apply(&self, n: f64) -> f64 {
        match self {
            Rounding::Round => n.round(),
            Rounding::Ceil => n.ceil(),
            Rounding::Floor => n.floor(),
            Rounding::Fixed(digits) => {
                let factor = 10f64.powi((*digits).min(MAX_FIXED_DIGITS) as i32);
                let scaled = n * factor;
                // Past 2^52 every f64 is already a whole number
                if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
                    return n;
                }
                scaled.round() / factor
            }
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rounding::Round => f.write_str("round"),
            Rounding::Ceil => f.write_str("ceil"),
            Rounding::Floor => f.write_str("floor"),
            Rounding::Fixed(digits) => write!(f, "{digits}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid rounding {0:?}: expected round, ceil, floor or a number of decimal places up to 100")]
pub struct ParseRoundingError(pub String);

impl FromStr for Rounding {
    type Err = ParseRoundingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round" => Ok(Rounding::Round),
            "ceil" => Ok(Rounding::Ceil),
            "floor" => Ok(Rounding::Floor),
            other => other
                .parse::<u32>()
                .ok()
                .and_then(fixed)
                .ok_or_else(|| ParseRoundingError(s.to_string())),
        }
    }
}

fn fixed(digits: u32) -> Option<Rounding> {
    (digits <= MAX_FIXED_DIGITS).then_some(Rounding::Fixed(digits))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RoundingRepr {
    Digits(u32),
    Named(String),
}

impl TryFrom<RoundingRepr> for Rounding {
    type Error = ParseRoundingError;

    fn try_from(repr: RoundingRepr) -> Result<Self, Self::Error> {
        match repr {
            RoundingRepr::Digits(digits) => {
                fixed(digits).ok_or_else(|| ParseRoundingError(digits.to_string()))
            }
            RoundingRepr::Named(name) => name.parse(),
        }
    }
}

impl From<Rounding> for RoundingRepr {
    fn from(rounding: Rounding) -> Self {
        match rounding {
            Rounding::Fixed(digits) => RoundingRepr::Digits(digits),
            other => RoundingRepr::Named(other.to_string()),
        }
    }
}

/// Beyond this distance the absolute date is shown instead of a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaxThreshold {
    Millis(f64),
    Unit(Unit),
}

impl FromStr for MaxThreshold {
    type Err = super::units::ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(ms) = s.trim().parse::<f64>() {
            return Ok(MaxThreshold::Millis(ms));
        }
        s.parse().map(MaxThreshold::Unit)
    }
}

pub type FullDateFormatter = Arc<dyn Fn(&DateTime<Utc>) -> String + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date format {0:?}")]
pub struct InvalidDateFormat(pub String);

pub fn validate_date_format(pattern: &str) -> Result<(), InvalidDateFormat> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(InvalidDateFormat(pattern.to_string()));
    }
    Ok(())
}

/// Formatter for the absolute fallback using a strftime pattern. A pattern
/// that fails to render falls back to the ISO date.
pub fn strftime_formatter(pattern: impl Into<String>) -> FullDateFormatter {
    let pattern = pattern.into();
    Arc::new(move |dt: &DateTime<Utc>| {
        let mut out = String::new();
        if write!(out, "{}", dt.format(&pattern)).is_err() {
            return dt.format(DEFAULT_DATE_FORMAT).to_string();
        }
        out
    })
}

#[derive(Clone)]
pub struct FormatOptions {
    pub max: Option<MaxThreshold>,
    pub show_second: bool,
    pub rounding: Rounding,
    pub units: UnitTable,
    pub messages: Arc<dyn RelativeTimeFormat>,
    pub full_date: FullDateFormatter,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max: None,
            show_second: false,
            rounding: Rounding::Round,
            units: UnitTable::default(),
            messages: Arc::new(Messages::default()),
            full_date: strftime_formatter(DEFAULT_DATE_FORMAT),
        }
    }
}

impl FormatOptions {
    pub fn with_max(mut self, max: MaxThreshold) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_show_second(mut self, show_second: bool) -> Self {
        self.show_second = show_second;
        self
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_units(mut self, units: UnitTable) -> Self {
        self.units = units;
        self
    }

    pub fn with_messages(mut self, messages: impl RelativeTimeFormat + 'static) -> Self {
        self.messages = Arc::new(messages);
        self
    }

    pub fn with_full_date<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&DateTime<Utc>) -> String + Send + Sync + 'static,
    {
        self.full_date = Arc::new(formatter);
        self
    }
}

impl fmt::Debug for FormatOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatOptions")
            .field("max", &self.max)
            .field("show_second", &self.show_second)
            .field("rounding", &self.rounding)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}
