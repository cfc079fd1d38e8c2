use crate::format::FormatOptions;
use crate::live::actions::{Action, SideEffect};
use crate::live::clock::Clock;
use crate::live::state::LiveState;

pub fn update(
    state: &mut LiveState,
    action: Action,
    options: &FormatOptions,
    clock: &dyn Clock,
) -> Vec<SideEffect> {
    if state.stopped {
        return vec![];
    }

    match action {
        Action::Tick => {
            if !state.active {
                return vec![];
            }
            state.now = clock.now();
            publish(state, options)
        }
        Action::SetTime(from) => {
            // Recomputed against the last known time, even while paused
            state.from = from;
            publish(state, options)
        }
        Action::Pause => {
            state.active = false;
            vec![]
        }
        Action::Resume => {
            if state.active || !state.auto_refresh {
                return vec![];
            }
            state.active = true;
            state.now = clock.now();
            publish(state, options)
        }
        Action::Stop => {
            state.active = false;
            state.stopped = true;
            vec![]
        }
    }
}

fn publish(state: &mut LiveState, options: &FormatOptions) -> Vec<SideEffect> {
    match state.recompute(options) {
        Some(text) => vec![SideEffect::Publish(text)],
        None => vec![],
    }
}
