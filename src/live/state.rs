use chrono::{DateTime, Utc};

use crate::format::{FormatOptions, format_time_ago};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveState {
    pub from: DateTime<Utc>,
    pub now: DateTime<Utc>,
    pub text: String,
    /// Whether a refresh timer exists at all.
    pub auto_refresh: bool,
    pub active: bool,
    pub stopped: bool,
}

impl LiveState {
    pub fn new(
        from: DateTime<Utc>,
        now: DateTime<Utc>,
        options: &FormatOptions,
        auto_refresh: bool,
    ) -> Self {
        Self {
            from,
            now,
            text: format_time_ago(&from, options, &now),
            auto_refresh,
            active: auto_refresh,
            stopped: false,
        }
    }

    /// Recompute the phrase, returning it only if it changed.
    pub fn recompute(&mut self, options: &FormatOptions) -> Option<String> {
        let text = format_time_ago(&self.from, options, &self.now);
        if text == self.text {
            return None;
        }
        self.text = text.clone();
        Some(text)
    }
}
