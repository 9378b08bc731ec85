//! Load counting and progress display
//!
//! [`LoadCounter`] tracks how many registered items have reported ready and
//! turns each readiness into a [`Progress`] update.

/// Result of marking one item ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Some items are still outstanding
    Loading {
        loaded: usize,
        total: usize,
        /// `round(100 * loaded / total)`, half rounds up
        percent: u8,
    },

    /// Every registered item is ready
    Complete { total: usize },
}

impl Progress {
    /// Text shown while loading; `None` once complete
    pub fn message(&self) -> Option<String> {
        match self {
            Progress::Loading { percent, .. } => Some(format!("{percent}% loaded...")),
            Progress::Complete { .. } => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Progress::Complete { .. })
    }
}

/// Integer percentage of `loaded` out of `total`, rounding half up
pub fn percent(loaded: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let loaded = loaded.min(total) as u128;
    let total = total as u128;
    ((200 * loaded + total) / (2 * total)) as u8
}

/// Counts registered vs. ready items. `loaded` never exceeds `total`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadCounter {
    total: usize,
    loaded: usize,
}

impl LoadCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more item to wait for
    pub fn register(&mut self) {
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn remaining(&self) -> usize {
        self.total - self.loaded
    }

    pub fn is_complete(&self) -> bool {
        self.loaded == self.total
    }

    /// Record one readiness event.
    ///
    /// Returns `None` without changing anything if every item is already
    /// ready.
    pub fn mark_ready(&mut self) -> Option<Progress> {
        if self.is_complete() {
            return None;
        }
        self.loaded += 1;
        if self.loaded == self.total {
            Some(Progress::Complete { total: self.total })
        } else {
            Some(Progress::Loading {
                loaded: self.loaded,
                total: self.total,
                percent: percent(self.loaded, self.total),
            })
        }
    }
}

/// Where loading text goes (a status line, a label, a log)
pub trait ProgressDisplay: Send + Sync {
    fn set_text(&self, text: &str);

    fn clear(&self) {
        self.set_text("");
    }

    /// Apply a progress update: show the message, or clear on completion
    fn show(&self, progress: &Progress) {
        match progress.message() {
            Some(text) => self.set_text(&text),
            None => self.clear(),
        }
    }
}

impl<F> ProgressDisplay for F
where
    F: Fn(&str) + Send + Sync,
{
    fn set_text(&self, text: &str) {
        self(text)
    }
}

/// Display that writes progress to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDisplay;

impl ProgressDisplay for LogDisplay {
    fn set_text(&self, text: &str) {
        log::info!("{text}");
    }

    fn clear(&self) {
        log::debug!("Loading display cleared");
    }
}

/// Display that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl ProgressDisplay for NullDisplay {
    fn set_text(&self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13); // 12.5 rounds up
        assert_eq!(percent(1, 200), 1); // 0.5 rounds up
        assert_eq!(percent(0, 4), 0);
        assert_eq!(percent(4, 4), 100);
    }

    #[test]
    fn test_counter_sequence() {
        let mut counter = LoadCounter::new();
        for _ in 0..3 {
            counter.register();
        }

        assert_eq!(
            counter.mark_ready(),
            Some(Progress::Loading { loaded: 1, total: 3, percent: 33 })
        );
        assert_eq!(
            counter.mark_ready(),
            Some(Progress::Loading { loaded: 2, total: 3, percent: 67 })
        );
        assert_eq!(counter.mark_ready(), Some(Progress::Complete { total: 3 }));
        assert!(counter.is_complete());
    }

    #[test]
    fn test_counter_never_exceeds_total() {
        let mut counter = LoadCounter::new();
        counter.register();
        assert!(counter.mark_ready().is_some());
        assert_eq!(counter.mark_ready(), None);
        assert_eq!(counter.loaded(), 1);
        assert_eq!(counter.remaining(), 0);
    }

    #[test]
    fn test_empty_counter_is_complete() {
        let mut counter = LoadCounter::new();
        assert!(counter.is_complete());
        assert_eq!(counter.mark_ready(), None);
    }

    #[test]
    fn test_message_format() {
        let progress = Progress::Loading { loaded: 1, total: 3, percent: 33 };
        assert_eq!(progress.message().as_deref(), Some("33% loaded..."));
        assert_eq!(Progress::Complete { total: 3 }.message(), None);
    }

    #[test]
    fn test_closure_display_clears_on_complete() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let display = move |text: &str| sink.lock().push(text.to_string());

        display.show(&Progress::Loading { loaded: 1, total: 2, percent: 50 });
        display.show(&Progress::Complete { total: 2 });

        assert_eq!(*lines.lock(), vec!["50% loaded...".to_string(), String::new()]);
    }
}
