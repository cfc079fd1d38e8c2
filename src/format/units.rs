use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SECOND_MS: f64 = 1_000.0;
pub const MINUTE_MS: f64 = 60.0 * SECOND_MS;
pub const HOUR_MS: f64 = 60.0 * MINUTE_MS;
pub const DAY_MS: f64 = 24.0 * HOUR_MS;
pub const WEEK_MS: f64 = 7.0 * DAY_MS;
pub const MONTH_MS: f64 = 30.0 * DAY_MS;
pub const YEAR_MS: f64 = 365.0 * DAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Year => "year",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time unit: {0:?}")]
pub struct ParseUnitError(pub String);

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" => Ok(Unit::Second),
            "minute" => Ok(Unit::Minute),
            "hour" => Ok(Unit::Hour),
            "day" => Ok(Unit::Day),
            "week" => Ok(Unit::Week),
            "month" => Ok(Unit::Month),
            "year" => Ok(Unit::Year),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}

/// One bucket of the unit table. `max` is the exclusive upper bound of the
/// bucket and `value` the size of one unit, both in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeUnit {
    pub max: f64,
    pub value: f64,
    pub name: Unit,
}

impl TimeUnit {
    pub const fn new(max: f64, value: f64, name: Unit) -> Self {
        Self { max, value, name }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitTableError {
    #[error("unit table is empty")]
    Empty,
    #[error("unit {name} has a non-positive or non-finite size: {value}")]
    InvalidValue { name: Unit, value: f64 },
    #[error("unit {name} has max {max}, which is not above the previous max {previous}")]
    NotIncreasing { name: Unit, max: f64, previous: f64 },
    #[error("unit {name} has a non-finite max before the end of the table")]
    EarlyInfinity { name: Unit },
    #[error("last unit {name} must have an infinite max, got {max}")]
    UnboundedTail { name: Unit, max: f64 },
}

/// Ordered unit buckets with strictly increasing `max` and an unbounded last entry.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTable {
    units: Vec<TimeUnit>,
}

impl UnitTable {
    pub fn new(units: Vec<TimeUnit>) -> Result<Self, UnitTableError> {
        let Some(last) = units.last() else {
            return Err(UnitTableError::Empty);
        };

        for unit in &units {
            if !unit.value.is_finite() || unit.value <= 0.0 {
                return Err(UnitTableError::InvalidValue {
                    name: unit.name,
                    value: unit.value,
                });
            }
        }

        for pair in units.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            if !prev.max.is_finite() {
                return Err(UnitTableError::EarlyInfinity { name: prev.name });
            }
            if cur.max.partial_cmp(&prev.max) != Some(Ordering::Greater) {
                return Err(UnitTableError::NotIncreasing {
                    name: cur.name,
                    max: cur.max,
                    previous: prev.max,
                });
            }
        }

        if last.max != f64::INFINITY {
            return Err(UnitTableError::UnboundedTail {
                name: last.name,
                max: last.max,
            });
        }

        Ok(Self { units })
    }

    pub fn find(&self, name: Unit) -> Option<&TimeUnit> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeUnit> {
        self.units.iter()
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            units: vec![
                TimeUnit::new(MINUTE_MS, SECOND_MS, Unit::Second),
                TimeUnit::new(46.0 * MINUTE_MS, MINUTE_MS, Unit::Minute),
                TimeUnit::new(20.0 * HOUR_MS, HOUR_MS, Unit::Hour),
                TimeUnit::new(6.0 * DAY_MS, DAY_MS, Unit::Day),
                TimeUnit::new(4.0 * WEEK_MS, WEEK_MS, Unit::Week),
                TimeUnit::new(11.0 * MONTH_MS, MONTH_MS, Unit::Month),
                TimeUnit::new(f64::INFINITY, YEAR_MS, Unit::Year),
            ],
        }
    }
}

impl<'a> IntoIterator for &'a UnitTable {
    type Item = &'a TimeUnit;
    type IntoIter = std::slice::Iter<'a, TimeUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
