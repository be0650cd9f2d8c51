use std::sync::Mutex;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use crate::presenter::{ResultSink, ViewState};
use crate::render::terminal::render_view;
use crate::utils::formatting::format_duration;

/// Terminal sink: a spinner while a request is pending, then the styled result.
pub struct ConsoleSink {
    spinner: Mutex<Option<(ProgressBar, Instant)>>,
    /// Skip the styled output, e.g. when the caller prints JSON instead.
    silent: bool,
}

impl ConsoleSink {
    pub fn new(silent: bool) -> Self {
        Self {
            spinner: Mutex::new(None),
            silent,
        }
    }

    fn start_spinner(&self, message: &str) {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));

        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((previous, _)) = slot.replace((bar, Instant::now())) {
            previous.finish_and_clear();
        }
    }

    /// Clear the spinner, returning how long it was shown.
    fn stop_spinner(&self) -> Option<Duration> {
        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        slot.take().map(|(bar, started)| {
            bar.finish_and_clear();
            started.elapsed()
        })
    }
}

impl ResultSink for ConsoleSink {
    fn show(&self, view: &ViewState) {
        if let ViewState::Loading { message } = view {
            self.start_spinner(message);
            return;
        }

        let elapsed = self.stop_spinner();
        if self.silent {
            return;
        }
        let Some(text) = render_view(view) else {
            return;
        };
        match view {
            ViewState::Result { .. } => {
                println!("{}", text);
                if let Some(elapsed) = elapsed {
                    println!(
                        "  {}",
                        console::style(format!("analyzed in {}", format_duration(elapsed.as_millis() as u64))).dim()
                    );
                }
            }
            _ => eprintln!("{}", text),
        }
    }
}

impl Drop for ConsoleSink {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}
