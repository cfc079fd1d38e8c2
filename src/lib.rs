//! Human-readable relative time ("3 minutes ago", "in 2 days") with an
//! optional self-refreshing wrapper.

pub mod cli;
pub mod format;
pub mod live;
pub mod util;

pub use format::{
    FormatOptions, MaxThreshold, Messages, RelativeTimeFormat, Rounding, TimeUnit, Unit,
    UnitTable, format_time_ago, format_time_ago_millis, format_time_ago_now,
};
pub use live::{Controls, LiveOptions, TimeAgo};
