use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use timeago::cli::Cli;
use timeago::format::format_time_ago;
use timeago::live::TimeAgo;
use timeago::util::config::AppConfig;
use timeago::util::time::parse_timestamp;

#[derive(Debug, Serialize)]
struct Rendered<'a> {
    from: DateTime<Utc>,
    text: &'a str,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    // Setup logging
    let _guard = setup_logging(&config, cli.debug)?;

    info!("timeago starting");

    let from = parse_timestamp(&cli.timestamp, cli.millis)
        .with_context(|| format!("Invalid timestamp: {}", cli.timestamp))?;

    let mut options = config.format_options()?;
    if let Some(max) = cli.max {
        options = options.with_max(max);
    }
    if cli.show_second {
        options = options.with_show_second(true);
    }
    if let Some(rounding) = cli.rounding {
        options = options.with_rounding(rounding);
    }
    debug!(?options, from = %from, "Resolved format options");

    if !cli.watch {
        let now = match cli.now.as_deref() {
            Some(now) => parse_timestamp(now, cli.millis)
                .with_context(|| format!("Invalid --now timestamp: {now}"))?,
            None => Utc::now(),
        };
        print_text(from, &format_time_ago(&from, &options, &now), cli.json)?;
        return Ok(());
    }

    let mut live = config.live_options();
    if let Some(interval) = cli.interval {
        live = live.with_update_interval(Duration::from_millis(interval));
    }

    let time_ago = TimeAgo::spawn(from, options, live);
    let mut updates = time_ago.subscribe();
    print_text(from, &updates.borrow_and_update(), cli.json)?;

    if live.update_interval.is_zero() {
        return Ok(());
    }

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let text = updates.borrow_and_update().clone();
                print_text(from, &text, cli.json)?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, exiting");
                break;
            }
        }
    }

    Ok(())
}

fn print_text(from: DateTime<Utc>, text: &str, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(&Rendered { from, text })
            .context("Failed to serialize output")?;
        println!("{line}");
    } else {
        println!("{text}");
    }
    Ok(())
}

fn setup_logging(
    config: &AppConfig,
    debug: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if !debug {
        return Ok(None);
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "timeago.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter("timeago=debug")
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
