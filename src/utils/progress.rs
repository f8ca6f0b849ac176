//! Spinner shown while a search builds its index
//!
//! Compiles to a no-op when the `progress` feature is disabled.

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "progress")]
use std::time::Duration;

/// A stderr spinner that draws nothing unless `visible` was set
pub struct Spinner {
    #[cfg(feature = "progress")]
    bar: ProgressBar,
}

impl Spinner {
    #[cfg(feature = "progress")]
    pub fn start(message: &str, visible: bool) -> Self {
        if !visible {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    #[cfg(not(feature = "progress"))]
    pub fn start(_message: &str, _visible: bool) -> Self {
        Self {}
    }

    /// Remove the spinner from the terminal
    pub fn finish(self) {
        #[cfg(feature = "progress")]
        self.bar.finish_and_clear();
    }
}
