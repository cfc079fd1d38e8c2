use std::path::PathBuf;

use clap::Parser;

use crate::format::{MaxThreshold, Rounding};

#[derive(Parser, Debug)]
#[command(name = "timeago", version, about = "Describe a timestamp relative to now")]
pub struct Cli {
    /// RFC 3339 timestamp, YYYY-MM-DD, or unix time
    pub timestamp: String,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reference time instead of the current time
    #[arg(long, conflicts_with = "watch")]
    pub now: Option<String>,

    /// Treat integer timestamps as milliseconds
    #[arg(long)]
    pub millis: bool,

    /// Show the absolute date beyond this many milliseconds or this unit
    #[arg(long)]
    pub max: Option<MaxThreshold>,

    /// Show seconds instead of "just now" under a minute
    #[arg(long)]
    pub show_second: bool,

    /// round, ceil, floor, or a number of decimal places
    #[arg(long)]
    pub rounding: Option<Rounding>,

    /// Keep printing the phrase as it changes
    #[arg(short, long)]
    pub watch: bool,

    /// Refresh interval in milliseconds for --watch (0 disables refresh)
    #[arg(long, requires = "watch")]
    pub interval: Option<u64>,

    /// Print JSON lines instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging to file
    #[arg(short, long)]
    pub debug: bool,
}
