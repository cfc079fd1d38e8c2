pub mod messages;
pub mod options;
pub mod units;

use chrono::{DateTime, Utc};

pub use messages::{Messages, RelativeTimeFormat, UnitMessages};
pub use options::{FormatOptions, MaxThreshold, Rounding};
pub use units::{TimeUnit, Unit, UnitTable};

use units::MINUTE_MS;

/// Format `from` relative to `now`, e.g. "3 minutes ago" or "in 2 days".
///
/// Distances beyond `options.max` render the absolute date of `from` instead.
pub fn format_time_ago(
    from: &DateTime<Utc>,
    options: &FormatOptions,
    now: &DateTime<Utc>,
) -> String {
    let diff = now.signed_duration_since(from).num_milliseconds() as f64;
    format_diff(diff, from, options)
}

/// Same as [`format_time_ago`] against the current wall-clock time.
pub fn format_time_ago_now(from: &DateTime<Utc>, options: &FormatOptions) -> String {
    format_time_ago(from, options, &Utc::now())
}

/// Epoch-millisecond entry point. Input that is not a finite, representable
/// instant yields the invalid phrase.
pub fn format_time_ago_millis(from_ms: f64, options: &FormatOptions, now_ms: f64) -> String {
    let (Some(from), Some(_)) = (instant_from_millis(from_ms), instant_from_millis(now_ms)) else {
        return options.messages.invalid();
    };
    format_diff(now_ms - from_ms, &from, options)
}

fn instant_from_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() || ms < i64::MIN as f64 || ms > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

fn format_diff(diff: f64, from: &DateTime<Utc>, options: &FormatOptions) -> String {
    let abs_diff = diff.abs();

    if abs_diff < MINUTE_MS && !options.show_second {
        return options.messages.format(0.0, Unit::Second);
    }

    if exceeds_max(abs_diff, options) {
        return (options.full_date)(from);
    }

    let mut previous: Option<&TimeUnit> = None;
    for unit in &options.units {
        let value = options.rounding.apply(abs_diff / unit.value);
        if value <= 0.0
            && let Some(prev) = previous
        {
            return render(diff, prev, options);
        }
        if abs_diff < unit.max {
            return render(diff, unit, options);
        }
        previous = Some(unit);
    }

    options.messages.invalid()
}

fn exceeds_max(abs_diff: f64, options: &FormatOptions) -> bool {
    match options.max {
        None => false,
        Some(MaxThreshold::Millis(max)) => abs_diff > max,
        Some(MaxThreshold::Unit(name)) => options
            .units
            .find(name)
            .is_some_and(|unit| unit.max.is_finite() && abs_diff > unit.max),
    }
}

fn render(diff: f64, unit: &TimeUnit, options: &FormatOptions) -> String {
    let magnitude = options.rounding.apply(diff.abs() / unit.value);
    // The phrase renderer expects negative values for the past
    let value = if diff > 0.0 { -magnitude } else { magnitude };
    options.messages.format(value, unit.name)
}
