use indicatif::ProgressBar;
use std::time::Duration;

/// Spinner shown while a store call runs. Hidden when stdout is not a terminal.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if console::Term::stdout().is_term() {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message.to_string());
        Self { pb }
    }

    /// Run `f` under the spinner, clearing it afterwards
    pub fn run<T>(message: &str, f: impl FnOnce() -> T) -> T {
        let spinner = Self::new(message);
        let out = f();
        spinner.finish();
        out
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
