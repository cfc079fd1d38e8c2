use chrono::{DateTime, Duration, TimeZone, Utc};
use timeago::format::options::MAX_FIXED_DIGITS;
use timeago::format::units::{DAY_MS, MINUTE_MS};
use timeago::format::{
    FormatOptions, MaxThreshold, Messages, RelativeTimeFormat, Rounding, TimeUnit, Unit,
    UnitTable, format_time_ago, format_time_ago_millis,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn ago(d: Duration) -> String {
    format_time_ago(&(now() - d), &FormatOptions::default(), &now())
}

fn ago_with(d: Duration, options: &FormatOptions) -> String {
    format_time_ago(&(now() - d), options, &now())
}

// --- Default behaviour ---

#[test]
fn test_just_now() {
    assert_eq!(ago(Duration::zero()), "just now");
}

#[test]
fn test_seconds_hidden_by_default() {
    assert_eq!(ago(Duration::seconds(30)), "just now");
    assert_eq!(ago(Duration::seconds(-30)), "just now");
}

#[test]
fn test_boundary_59_seconds() {
    assert_eq!(ago(Duration::seconds(59)), "just now");
}

#[test]
fn test_one_minute_ago() {
    assert_eq!(ago(Duration::minutes(1)), "1 minute ago");
}

#[test]
fn test_minutes_ago() {
    assert_eq!(ago(Duration::minutes(45)), "45 minutes ago");
}

#[test]
fn test_boundary_46_minutes_rolls_into_hours() {
    assert_eq!(ago(Duration::minutes(46)), "1 hour ago");
}

#[test]
fn test_hours_ago() {
    assert_eq!(ago(Duration::hours(5)), "5 hours ago");
}

#[test]
fn test_boundary_20_hours_is_yesterday() {
    assert_eq!(ago(Duration::hours(20)), "yesterday");
}

#[test]
fn test_days_ago() {
    assert_eq!(ago(Duration::days(3)), "3 days ago");
}

#[test]
fn test_boundary_6_days_is_last_week() {
    assert_eq!(ago(Duration::days(6)), "last week");
}

#[test]
fn test_weeks_ago() {
    assert_eq!(ago(Duration::weeks(2)), "2 weeks ago");
}

#[test]
fn test_four_weeks_is_last_month() {
    assert_eq!(ago(Duration::weeks(4)), "last month");
}

#[test]
fn test_months_ago() {
    assert_eq!(ago(Duration::days(200)), "7 months ago");
}

#[test]
fn test_eleven_months_is_last_year() {
    assert_eq!(ago(Duration::days(330)), "last year");
}

#[test]
fn test_years_ago() {
    assert_eq!(ago(Duration::days(1000)), "3 years ago");
}

// --- Future ---

#[test]
fn test_in_minutes() {
    assert_eq!(ago(Duration::minutes(-10)), "in 10 minutes");
}

#[test]
fn test_tomorrow() {
    assert_eq!(ago(Duration::days(-1)), "tomorrow");
}

#[test]
fn test_in_days() {
    assert_eq!(ago(Duration::days(-2)), "in 2 days");
}

#[test]
fn test_next_year() {
    assert_eq!(ago(Duration::days(-365)), "next year");
}

// --- Seconds ---

#[test]
fn test_show_second_past() {
    let options = FormatOptions::default().with_show_second(true);
    assert_eq!(ago_with(Duration::seconds(30), &options), "30 seconds ago");
    assert_eq!(ago_with(Duration::seconds(1), &options), "1 second ago");
}

#[test]
fn test_show_second_future() {
    let options = FormatOptions::default().with_show_second(true);
    assert_eq!(ago_with(Duration::seconds(-30), &options), "in 30 seconds");
}

#[test]
fn test_show_second_zero_is_just_now() {
    let options = FormatOptions::default().with_show_second(true);
    assert_eq!(ago_with(Duration::zero(), &options), "just now");
    assert_eq!(ago_with(Duration::milliseconds(400), &options), "just now");
}

// --- Max threshold ---

#[test]
fn test_max_millis_shows_full_date() {
    let options = FormatOptions::default().with_max(MaxThreshold::Millis(DAY_MS));
    assert_eq!(ago_with(Duration::days(2), &options), "2024-06-13");
    assert_eq!(ago_with(Duration::hours(5), &options), "5 hours ago");
}

#[test]
fn test_max_millis_applies_to_future() {
    let options = FormatOptions::default().with_max(MaxThreshold::Millis(DAY_MS));
    assert_eq!(ago_with(Duration::days(-3), &options), "2024-06-18");
}

#[test]
fn test_max_unit_uses_unit_bound() {
    let options = FormatOptions::default().with_max(MaxThreshold::Unit(Unit::Day));
    assert_eq!(ago_with(Duration::days(7), &options), "2024-06-08");
    assert_eq!(ago_with(Duration::days(5), &options), "5 days ago");
}

#[test]
fn test_max_unbounded_unit_never_triggers() {
    let options = FormatOptions::default().with_max(MaxThreshold::Unit(Unit::Year));
    assert_eq!(ago_with(Duration::days(1000), &options), "3 years ago");
}

#[test]
fn test_max_unit_missing_from_table_is_ignored() {
    let units = UnitTable::new(vec![
        TimeUnit::new(MINUTE_MS, 1_000.0, Unit::Second),
        TimeUnit::new(f64::INFINITY, MINUTE_MS, Unit::Minute),
    ])
    .unwrap();
    let options = FormatOptions::default()
        .with_units(units)
        .with_max(MaxThreshold::Unit(Unit::Day));
    assert_eq!(ago_with(Duration::hours(3), &options), "180 minutes ago");
}

#[test]
fn test_custom_full_date_formatter() {
    let options = FormatOptions::default()
        .with_max(MaxThreshold::Millis(MINUTE_MS))
        .with_full_date(|dt| format!("on {}", dt.format("%d/%m/%Y")));
    assert_eq!(ago_with(Duration::days(2), &options), "on 13/06/2024");
}

// --- Rounding ---

#[test]
fn test_floor_falls_back_to_previous_unit() {
    let options = FormatOptions::default().with_rounding(Rounding::Floor);
    assert_eq!(ago_with(Duration::minutes(50), &options), "50 minutes ago");
}

#[test]
fn test_ceil_rounds_up() {
    let options = FormatOptions::default().with_rounding(Rounding::Ceil);
    assert_eq!(ago_with(Duration::minutes(61), &options), "2 hours ago");
}

#[test]
fn test_fixed_decimals() {
    let options = FormatOptions::default().with_rounding(Rounding::Fixed(1));
    assert_eq!(ago_with(Duration::minutes(90), &options), "1.5 hours ago");
}

#[test]
fn test_rounding_apply() {
    assert_eq!(Rounding::Round.apply(2.5), 3.0);
    assert_eq!(Rounding::Ceil.apply(2.1), 3.0);
    assert_eq!(Rounding::Floor.apply(2.9), 2.0);
    assert_eq!(Rounding::Fixed(2).apply(1.23456), 1.23);
    assert_eq!(Rounding::Fixed(0).apply(1.6), 2.0);
}

#[test]
fn test_fixed_digits_are_capped_when_applied() {
    let options = FormatOptions::default().with_rounding(Rounding::Fixed(400));
    assert_eq!(ago_with(Duration::minutes(90), &options), "1.5 hours ago");

    let options = FormatOptions::default().with_rounding(Rounding::Fixed(u32::MAX));
    assert_eq!(ago_with(Duration::minutes(90), &options), "1.5 hours ago");
    assert_eq!(Rounding::Fixed(u32::MAX).apply(1.5), 1.5);
}

#[test]
fn test_too_many_fixed_digits_rejected() {
    assert_eq!("100".parse::<Rounding>().unwrap(), Rounding::Fixed(MAX_FIXED_DIGITS));
    assert!("101".parse::<Rounding>().is_err());
    assert!("400".parse::<Rounding>().is_err());
    assert!(u32::MAX.to_string().parse::<Rounding>().is_err());
}

#[test]
fn test_rounding_from_str() {
    assert_eq!("round".parse::<Rounding>().unwrap(), Rounding::Round);
    assert_eq!("CEIL".parse::<Rounding>().unwrap(), Rounding::Ceil);
    assert_eq!("floor".parse::<Rounding>().unwrap(), Rounding::Floor);
    assert_eq!("3".parse::<Rounding>().unwrap(), Rounding::Fixed(3));
    assert!("sideways".parse::<Rounding>().is_err());
    assert!("-1".parse::<Rounding>().is_err());
}

#[test]
fn test_max_threshold_from_str() {
    assert_eq!(
        "3600000".parse::<MaxThreshold>().unwrap(),
        MaxThreshold::Millis(3_600_000.0)
    );
    assert_eq!(
        "week".parse::<MaxThreshold>().unwrap(),
        MaxThreshold::Unit(Unit::Week)
    );
    assert!("fortnight".parse::<MaxThreshold>().is_err());
}

// --- Custom units ---

#[test]
fn test_custom_unit_table() {
    let units = UnitTable::new(vec![
        TimeUnit::new(MINUTE_MS, 1_000.0, Unit::Second),
        TimeUnit::new(f64::INFINITY, MINUTE_MS, Unit::Minute),
    ])
    .unwrap();
    let options = FormatOptions::default().with_units(units);
    assert_eq!(ago_with(Duration::days(1), &options), "1440 minutes ago");
}

// --- Millisecond entry point ---

#[test]
fn test_millis_entry_point() {
    let options = FormatOptions::default();
    assert_eq!(
        format_time_ago_millis(0.0, &options, 3.0 * MINUTE_MS),
        "3 minutes ago"
    );
    assert_eq!(
        format_time_ago_millis(3.0 * MINUTE_MS, &options, 0.0),
        "in 3 minutes"
    );
}

#[test]
fn test_invalid_input_is_empty() {
    let options = FormatOptions::default();
    assert_eq!(format_time_ago_millis(f64::NAN, &options, 0.0), "");
    assert_eq!(format_time_ago_millis(0.0, &options, f64::INFINITY), "");
    assert_eq!(format_time_ago_millis(1e300, &options, 0.0), "");
}

#[test]
fn test_invalid_uses_custom_message() {
    let messages = Messages {
        invalid: "invalid date".into(),
        ..Messages::default()
    };
    let options = FormatOptions::default().with_messages(messages);
    assert_eq!(format_time_ago_millis(f64::NAN, &options, 0.0), "invalid date");
}

// --- Custom phrase renderer ---

struct Signed;

impl RelativeTimeFormat for Signed {
    fn format(&self, value: f64, unit: Unit) -> String {
        format!("{value} {unit}")
    }
}

#[test]
fn test_renderer_receives_negative_values_for_past() {
    let options = FormatOptions::default().with_messages(Signed);
    assert_eq!(ago_with(Duration::hours(3), &options), "-3 hour");
    assert_eq!(ago_with(Duration::hours(-3), &options), "3 hour");
}

#[test]
fn test_renderer_zero_second_phrase() {
    let options = FormatOptions::default().with_messages(Signed);
    assert_eq!(ago_with(Duration::seconds(10), &options), "0 second");
}
