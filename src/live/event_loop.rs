use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::debug;

use crate::format::FormatOptions;
use crate::live::actions::{Action, SideEffect};
use crate::live::clock::Clock;
use crate::live::state::LiveState;
use crate::live::update::update;

pub(crate) struct LoopChannels {
    pub action_rx: mpsc::UnboundedReceiver<Action>,
    pub text_tx: watch::Sender<String>,
    pub active_tx: watch::Sender<bool>,
}

pub(crate) async fn run(
    mut state: LiveState,
    options: FormatOptions,
    clock: Arc<dyn Clock>,
    update_interval: Duration,
    channels: LoopChannels,
) {
    let LoopChannels {
        mut action_rx,
        text_tx,
        active_tx,
    } = channels;

    let mut refresh_timer = if update_interval.is_zero() {
        None
    } else {
        let mut timer = tokio::time::interval(update_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick fires immediately; the initial text is already computed
        timer.tick().await;
        Some(timer)
    };

    loop {
        let action = tokio::select! {
            maybe_action = action_rx.recv() => match maybe_action {
                Some(action) => action,
                // Every handle is gone
                None => break,
            },
            _ = next_tick(&mut refresh_timer) => Action::Tick,
        };

        let resumed = action == Action::Resume && !state.active;
        debug!(action = ?action, "Live time-ago action");

        for effect in update(&mut state, action, &options, clock.as_ref()) {
            match effect {
                SideEffect::Publish(text) => {
                    debug!(text = %text, "Publishing refreshed text");
                    text_tx.send_replace(text);
                }
            }
        }

        if resumed
            && state.active
            && let Some(timer) = refresh_timer.as_mut()
        {
            timer.reset();
        }

        active_tx.send_if_modified(|active| {
            let changed = *active != state.active;
            *active = state.active;
            changed
        });

        if state.stopped {
            debug!("Live time-ago stopped");
            break;
        }
    }
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
