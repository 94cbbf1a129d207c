//! Spinner shown while the CLI loads a corpus or runs a query batch.
//! Becomes a no-op when the `progress` feature is disabled.

use std::borrow::Cow;

#[cfg(feature = "progress")]
pub struct Spinner(indicatif::ProgressBar);

#[cfg(feature = "progress")]
impl Spinner {
    pub fn start(message: impl Into<Cow<'static, str>>) -> Self {
        use indicatif::{ProgressBar, ProgressStyle};

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message);
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        Spinner(bar)
    }

    pub fn finish(self, message: impl Into<Cow<'static, str>>) {
        self.0.finish_with_message(message);
    }

    pub fn clear(self) {
        self.0.finish_and_clear();
    }
}

#[cfg(not(feature = "progress"))]
pub struct Spinner;

#[cfg(not(feature = "progress"))]
impl Spinner {
    pub fn start(_message: impl Into<Cow<'static, str>>) -> Self {
        Spinner
    }

    pub fn finish(self, _message: impl Into<Cow<'static, str>>) {}

    pub fn clear(self) {}
}
