use serde::{Deserialize, Serialize};

use super::units::Unit;

/// Renders a signed magnitude of a unit as a phrase.
///
/// Negative values are in the past, positive values in the future and zero
/// means "now".
pub trait RelativeTimeFormat: Send + Sync {
    fn format(&self, value: f64, unit: Unit) -> String;

    /// Phrase returned for input that cannot be placed on the timeline.
    fn invalid(&self) -> String {
        String::new()
    }
}

/// Templates for a single unit. `{0}` is replaced with the magnitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitMessages {
    pub one: String,
    pub other: String,
    /// Replaces the whole phrase for a magnitude of exactly one in the past.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// Replaces the whole phrase for a magnitude of exactly one in the future.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl UnitMessages {
    fn plain(name: &str) -> Self {
        Self {
            one: format!("{{0}} {name}"),
            other: format!("{{0}} {name}s"),
            last: None,
            next: None,
        }
    }

    fn with_neighbours(name: &str, last: &str, next: &str) -> Self {
        Self {
            last: Some(last.to_string()),
            next: Some(next.to_string()),
            ..Self::plain(name)
        }
    }
}

/// Template-driven English phrases.
///
/// Deserializing overlays the given fields on the defaults, down to single
/// templates inside a unit table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MessagesOverrides")]
pub struct Messages {
    pub just_now: String,
    pub past: String,
    pub future: String,
    pub invalid: String,
    pub second: UnitMessages,
    pub minute: UnitMessages,
    pub hour: UnitMessages,
    pub day: UnitMessages,
    pub week: UnitMessages,
    pub month: UnitMessages,
    pub year: UnitMessages,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            just_now: "just now".to_string(),
            past: "{0} ago".to_string(),
            future: "in {0}".to_string(),
            invalid: String::new(),
            second: UnitMessages::plain("second"),
            minute: UnitMessages::plain("minute"),
            hour: UnitMessages::plain("hour"),
            day: UnitMessages::with_neighbours("day", "yesterday", "tomorrow"),
            week: UnitMessages::with_neighbours("week", "last week", "next week"),
            month: UnitMessages::with_neighbours("month", "last month", "next month"),
            year: UnitMessages::with_neighbours("year", "last year", "next year"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct UnitOverrides {
    one: Option<String>,
    other: Option<String>,
    last: Option<String>,
    next: Option<String>,
}

impl UnitOverrides {
    fn apply(self, base: &mut UnitMessages) {
        if let Some(one) = self.one {
            base.one = one;
        }
        if let Some(other) = self.other {
            base.other = other;
        }
        if let Some(last) = self.last {
            base.last = Some(last);
        }
        if let Some(next) = self.next {
            base.next = Some(next);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MessagesOverrides {
    just_now: Option<String>,
    past: Option<String>,
    future: Option<String>,
    invalid: Option<String>,
    second: Option<UnitOverrides>,
    minute: Option<UnitOverrides>,
    hour: Option<UnitOverrides>,
    day: Option<UnitOverrides>,
    week: Option<UnitOverrides>,
    month: Option<UnitOverrides>,
    year: Option<UnitOverrides>,
}

impl From<MessagesOverrides> for Messages {
    fn from(overrides: MessagesOverrides) -> Self {
        let mut messages = Messages::default();
        if let Some(just_now) = overrides.just_now {
            messages.just_now = just_now;
        }
        if let Some(past) = overrides.past {
            messages.past = past;
        }
        if let Some(future) = overrides.future {
            messages.future = future;
        }
        if let Some(invalid) = overrides.invalid {
            messages.invalid = invalid;
        }

        let units = [
            (overrides.second, &mut messages.second),
            (overrides.minute, &mut messages.minute),
            (overrides.hour, &mut messages.hour),
            (overrides.day, &mut messages.day),
            (overrides.week, &mut messages.week),
            (overrides.month, &mut messages.month),
            (overrides.year, &mut messages.year),
        ];
        for (unit_overrides, base) in units {
            if let Some(unit_overrides) = unit_overrides {
                unit_overrides.apply(base);
            }
        }
        messages
    }
}

impl Messages {
    pub fn unit(&self, unit: Unit) -> &UnitMessages {
        match unit {
            Unit::Second => &self.second,
            Unit::Minute => &self.minute,
            Unit::Hour => &self.hour,
            Unit::Day => &self.day,
            Unit::Week => &self.week,
            Unit::Month => &self.month,
            Unit::Year => &self.year,
        }
    }
}

impl RelativeTimeFormat for Messages {
    fn format(&self, value: f64, unit: Unit) -> String {
        if value == 0.0 {
            return self.just_now.clone();
        }

        let past = value < 0.0;
        let magnitude = value.abs();
        let templates = self.unit(unit);

        let neighbour = if magnitude == 1.0 {
            if past {
                templates.last.as_ref()
            } else {
                templates.next.as_ref()
            }
        } else {
            None
        };

        let phrase = match neighbour {
            Some(text) => text.clone(),
            None => {
                let template = if magnitude > 1.0 {
                    &templates.other
                } else {
                    &templates.one
                };
                fill(template, &format_magnitude(magnitude))
            }
        };

        // Phrases without a number ("yesterday") already carry their direction
        if !phrase.chars().any(|c| c.is_ascii_digit()) {
            return phrase;
        }

        let wrapper = if past { &self.past } else { &self.future };
        fill(wrapper, &phrase)
    }

    fn invalid(&self) -> String {
        self.invalid.clone()
    }
}

fn fill(template: &str, value: &str) -> String {
    template.replace("{0}", value)
}

/// Render a magnitude without a trailing `.0` for whole numbers.
pub fn format_magnitude(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
