//! Inline progress indicator
//!
//! ```text
//! Indexing ....-\b        start, increments, spinner
//! Indexing ....… OK       finish
//! ```

use crate::color::{Color, ColorSpec};
use crate::core::console::{Console, TellOptions};

const SPINNER: [char; 4] = ['-', '\\', '|', '/'];

/// Progress of one labelled operation, told on a single line
pub struct Progress<'a> {
    label: String,
    console: &'a Console,
    started: bool,
    spin_pos: usize,
}

impl<'a> Progress<'a> {
    pub fn new(label: impl Into<String>, console: &'a Console) -> Self {
        Self {
            label: label.into(),
            console,
            started: false,
            spin_pos: 0,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Print the label; does nothing if already started
    pub fn start(&mut self) {
        if !self.started {
            self.tell_inline(&format!("{} ", self.label));
            self.started = true;
            self.spin_pos = 0;
        }
    }

    /// Print a dot.
    ///
    /// # Panics
    ///
    /// Panics if the progress is not started.
    pub fn increment(&mut self) {
        self.assert_started();
        self.tell_inline(".");
        self.spin_pos = 0;
    }

    /// Advance the spinner by one step, in place.
    ///
    /// # Panics
    ///
    /// Panics if the progress is not started.
    pub fn spin(&mut self) {
        self.assert_started();
        let frame = SPINNER[self.spin_pos % SPINNER.len()];
        self.tell_inline(&format!("{}\u{8}", frame));
        self.spin_pos += 1;
    }

    /// Print the closing OK; does nothing if not started
    pub fn finish(&mut self) {
        if self.started {
            self.tell_inline("… ");
            self.console.tell_with(
                ["OK"],
                &TellOptions::new().color(ColorSpec::new().color(Color::Green).bright(true)),
            );
            self.started = false;
        }
    }

    fn tell_inline(&self, text: &str) {
        self.console
            .tell_with([text], &TellOptions::new().newline(false));
    }

    fn assert_started(&self) {
        assert!(self.started, "progress not started yet");
    }
}

impl Console {
    pub fn new_progress(&self, label: impl Into<String>) -> Progress<'_> {
        Progress::new(label, self)
    }

    /// Create and start a progress
    pub fn start_progress(&self, label: impl Into<String>) -> Progress<'_> {
        let mut progress = self.new_progress(label);
        progress.start();
        progress
    }
}

#[cfg(test)]
mod tests {
    use crate::core::console::tests::console_with;

    #[test]
    fn test_start_once() {
        let (console, out) = console_with(None, true, "");
        let mut progress = console.new_progress("the label");
        progress.start();
        progress.start();
        assert!(progress.is_started());
        assert_eq!(out.writes(), vec!["the label "]);
    }

    #[test]
    fn test_increment() {
        let (console, out) = console_with(None, true, "");
        let mut progress = console.start_progress("the label");
        out.clear();
        progress.increment();
        assert_eq!(out.writes(), vec!["."]);
    }

    #[test]
    #[should_panic(expected = "not started")]
    fn test_increment_not_started() {
        let (console, _out) = console_with(None, true, "");
        console.new_progress("the label").increment();
    }

    #[test]
    #[should_panic(expected = "not started")]
    fn test_spin_after_finish() {
        let (console, _out) = console_with(None, true, "");
        let mut progress = console.start_progress("the label");
        progress.finish();
        progress.spin();
    }

    #[test]
    fn test_spin_cycles() {
        let (console, out) = console_with(None, true, "");
        let mut progress = console.start_progress("the label");
        out.clear();
        for _ in 0..8 {
            progress.spin();
        }
        assert_eq!(
            out.writes(),
            vec!["-\u{8}", "\\\u{8}", "|\u{8}", "/\u{8}", "-\u{8}", "\\\u{8}", "|\u{8}", "/\u{8}"]
        );
    }

    #[test]
    fn test_increment_restarts_spinner() {
        let (console, out) = console_with(None, true, "");
        let mut progress = console.start_progress("the label");
        out.clear();
        progress.spin();
        progress.spin();
        progress.increment();
        progress.spin();
        assert_eq!(out.writes(), vec!["-\u{8}", "\\\u{8}", ".", "-\u{8}"]);
    }

    #[test]
    fn test_finish() {
        let (console, out) = console_with(None, true, "");
        let mut progress = console.start_progress("the label");
        out.clear();
        progress.finish();
        progress.finish();
        assert_eq!(out.writes(), vec!["… ", "\x1b[1;32mOK\x1b[22;39m\n"]);
        assert!(!progress.is_started());
    }

    #[test]
    fn test_finish_not_started() {
        let (console, out) = console_with(None, true, "");
        console.new_progress("the label").finish();
        assert!(out.writes().is_empty());
    }

    #[test]
    fn test_prefix_only_before_label() {
        let (console, out) = console_with(Some("job"), false, "");
        let mut progress = console.start_progress("Copying");
        progress.increment();
        progress.finish();
        assert_eq!(out.output(), "[job] Copying .… OK\n");
    }
}
