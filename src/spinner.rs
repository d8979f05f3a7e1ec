//! 送信中スピナー

use autoemail_common::BusyIndicator;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct SpinnerIndicator {
    bar: ProgressBar,
}

impl SpinnerIndicator {
    pub fn new(message: &'static str) -> Self {
        let bar = ProgressBar::hidden();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message);
        Self { bar }
    }
}

impl BusyIndicator for SpinnerIndicator {
    fn show(&self) {
        self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        self.bar.reset();
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn hide(&self) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
        self.bar.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
}
