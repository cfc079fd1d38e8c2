//! A time-ago phrase that keeps itself up to date.
//!
//! [`TimeAgo::spawn`] renders the phrase once, then a background task
//! re-renders it on a fixed interval against a [`Clock`]. Subscribers are
//! notified through a `tokio::sync::watch` channel whenever the text changes.

pub mod actions;
pub mod clock;
mod event_loop;
pub mod state;
pub mod update;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::format::FormatOptions;
use actions::Action;
pub use clock::{Clock, ManualClock, SystemClock};
use event_loop::LoopChannels;
use state::LiveState;

pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveOptions {
    /// Refresh period. Zero disables auto-refresh.
    pub update_interval: Duration,
    /// Hand out pause/resume/stop [`Controls`].
    pub controls: bool,
}

impl Default for LiveOptions {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            controls: false,
        }
    }
}

impl LiveOptions {
    pub fn with_update_interval(mut self, update_interval: Duration) -> Self {
        self.update_interval = update_interval;
        self
    }

    pub fn with_controls(mut self) -> Self {
        self.controls = true;
        self
    }
}

/// Handle to a self-refreshing phrase. Dropping it stops the refresh task.
#[derive(Debug)]
pub struct TimeAgo {
    action_tx: mpsc::UnboundedSender<Action>,
    text_rx: watch::Receiver<String>,
    active_rx: watch::Receiver<bool>,
    controls: bool,
    task: JoinHandle<()>,
}

impl TimeAgo {
    /// Start refreshing against the system clock. Must be called from within
    /// a tokio runtime.
    pub fn spawn(from: DateTime<Utc>, options: FormatOptions, live: LiveOptions) -> Self {
        Self::spawn_with_clock(from, options, live, Arc::new(SystemClock))
    }

    pub fn spawn_with_clock(
        from: DateTime<Utc>,
        options: FormatOptions,
        live: LiveOptions,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let auto_refresh = !live.update_interval.is_zero();
        let state = LiveState::new(from, clock.now(), &options, auto_refresh);

        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (text_tx, text_rx) = watch::channel(state.text.clone());
        let (active_tx, active_rx) = watch::channel(state.active);

        debug!(
            from = %from,
            interval_ms = live.update_interval.as_millis() as u64,
            text = %state.text,
            "Starting live time-ago"
        );

        let task = tokio::spawn(event_loop::run(
            state,
            options,
            clock,
            live.update_interval,
            LoopChannels {
                action_rx,
                text_tx,
                active_tx,
            },
        ));

        Self {
            action_tx,
            text_rx,
            active_rx,
            controls: live.controls,
            task,
        }
    }

    /// The most recently rendered phrase.
    pub fn text(&self) -> String {
        self.text_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.text_rx.clone()
    }

    /// Replace the instant being described.
    pub fn set_time(&self, from: DateTime<Utc>) {
        let _ = self.action_tx.send(Action::SetTime(from));
    }

    /// Pause/resume/stop controls, if they were requested in [`LiveOptions`].
    pub fn controls(&self) -> Option<Controls> {
        self.controls.then(|| Controls {
            action_tx: self.action_tx.clone(),
            active_rx: self.active_rx.clone(),
        })
    }
}

impl Drop for TimeAgo {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Debug, Clone)]
pub struct Controls {
    action_tx: mpsc::UnboundedSender<Action>,
    active_rx: watch::Receiver<bool>,
}

impl Controls {
    pub fn pause(&self) {
        let _ = self.action_tx.send(Action::Pause);
    }

    /// Resume refreshing; the phrase is refreshed immediately.
    pub fn resume(&self) {
        let _ = self.action_tx.send(Action::Resume);
    }

    /// Stop refreshing for good.
    pub fn stop(&self) {
        let _ = self.action_tx.send(Action::Stop);
    }

    pub fn is_active(&self) -> bool {
        *self.active_rx.borrow()
    }

    pub fn subscribe_active(&self) -> watch::Receiver<bool> {
        self.active_rx.clone()
    }
}
