//! Console: the output engine shared by all threads of a tool
//!
//! Lines are told through [`Console::tell`] and friends. Each line gets the
//! session prefix (unless the previous write left the line open) and its
//! color codes, and is routed through the [`Arbiter`].

use std::io::{self, BufRead, BufReader, Write};
use std::time::Duration;

use crossterm::tty::IsTty;
use parking_lot::Mutex;

use super::arbiter::{Arbiter, BackgroundScope};
use super::pending::ExecutionContext;
use super::prefix::OutputPrefix;
use crate::color::{ColorCodes, ColorSpec};
use crate::error::{Error, Result};

/// Pause between announcing the editor and starting it
pub const DEFAULT_EDITOR_DELAY: Duration = Duration::from_millis(1700);

/// Options for telling a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TellOptions {
    /// Terminate the (last) line
    pub newline: bool,
    /// Print the session prefix, unless the line is a continuation
    pub prefix: bool,
    pub color: ColorSpec,
}

impl Default for TellOptions {
    fn default() -> Self {
        Self {
            newline: true,
            prefix: true,
            color: ColorSpec::default(),
        }
    }
}

impl TellOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn newline(mut self, newline: bool) -> Self {
        self.newline = newline;
        self
    }

    pub fn prefix(mut self, prefix: bool) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = color.into();
        self
    }
}

/// Shared terminal output session
pub struct Console {
    arbiter: Arbiter,
    /// Whether the sink is an interactive terminal (enables colors)
    tty: bool,
    output_prefix: Option<OutputPrefix>,
    input: Mutex<Box<dyn BufRead + Send>>,
    editor_delay: Duration,
}

/// Builder for a [`Console`]; defaults to stdout and stdin
#[derive(Default)]
pub struct ConsoleBuilder {
    sink: Option<(Box<dyn Write + Send>, bool)>,
    input: Option<Box<dyn BufRead + Send>>,
    output_prefix: Option<OutputPrefix>,
    editor_delay: Option<Duration>,
}

impl ConsoleBuilder {
    /// Write to `sink`; `tty` decides whether colors are emitted
    pub fn sink(mut self, sink: Box<dyn Write + Send>, tty: bool) -> Self {
        self.sink = Some((sink, tty));
        self
    }

    /// Read answers from `input`
    pub fn input(mut self, input: Box<dyn BufRead + Send>) -> Self {
        self.input = Some(input);
        self
    }

    pub fn output_prefix(mut self, prefix: impl Into<Option<OutputPrefix>>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    pub fn editor_delay(mut self, delay: Duration) -> Self {
        self.editor_delay = Some(delay);
        self
    }

    pub fn build(self) -> Console {
        let (sink, tty) = self.sink.unwrap_or_else(|| {
            let stdout = io::stdout();
            let tty = stdout.is_tty();
            (Box::new(stdout), tty)
        });
        let input = self
            .input
            .unwrap_or_else(|| Box::new(BufReader::new(io::stdin())));

        Console {
            arbiter: Arbiter::new(sink),
            tty,
            output_prefix: self.output_prefix,
            input: Mutex::new(input),
            editor_delay: self.editor_delay.unwrap_or(DEFAULT_EDITOR_DELAY),
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Console {
    pub fn builder() -> ConsoleBuilder {
        ConsoleBuilder::default()
    }

    /// Console on stdout/stdin with the given prefix
    pub fn new(output_prefix: impl Into<Option<OutputPrefix>>) -> Self {
        Self::builder().output_prefix(output_prefix).build()
    }

    pub fn is_tty(&self) -> bool {
        self.tty
    }

    /// Tell a single text with default options
    pub fn tell(&self, text: impl AsRef<str>) {
        self.tell_with([text], &TellOptions::default());
    }

    /// Tell texts, each possibly spanning several lines.
    ///
    /// Every line but the last is terminated; the last one follows
    /// `options.newline`. Empty texts contribute no lines.
    pub fn tell_with<I, S>(&self, texts: I, options: &TellOptions)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines: Vec<String> = Vec::new();
        for text in texts {
            let text = text.as_ref();
            if text.is_empty() {
                continue;
            }
            lines.extend(text.split('\n').map(str::to_owned));
        }

        let last = lines.pop().unwrap_or_default();
        let line_options = options.newline(true);
        for line in &lines {
            self.tell_line(line, &line_options);
        }
        self.tell_line(&last, options);
    }

    /// Tell one line (which must not contain a newline itself)
    pub fn tell_line(&self, line: &str, options: &TellOptions) {
        let codes = self.color_codes(&options.color);

        let mut guard = self.arbiter.lock();
        // A computed label is only evaluated when it is printed
        let mut out = if options.prefix && !guard.line_pending() {
            self.output_prefix()
        } else {
            String::new()
        };
        out.reserve(codes.prefix.len() + line.len() + codes.postfix.len() + 1);
        out.push_str(&codes.prefix);
        out.push_str(line);
        out.push_str(&codes.postfix);
        if options.newline {
            out.push('\n');
        }
        guard.write(out.as_bytes());
        guard.set_line_pending(!options.newline);
    }

    /// Tell a message, keeping the line open unless it ends with a newline.
    ///
    /// One trailing line terminator (`\n`, `\r\n` or a lone `\r`) is
    /// stripped; only `\n` terminates the line.
    pub fn append(&self, msg: &str) {
        let (text, newline) = match msg.strip_suffix('\n') {
            Some(text) => (text.strip_suffix('\r').unwrap_or(text), true),
            None => (msg.strip_suffix('\r').unwrap_or(msg), false),
        };
        self.tell_with([text], &TellOptions::default().newline(newline));
    }

    /// Read one line of input, without its line terminator.
    ///
    /// Waits until no other thread holds the foreground.
    pub fn read_line(&self) -> Result<String> {
        self.arbiter.wait_for_foreground();
        self.arbiter.set_line_pending(false);

        let mut line = String::new();
        let read = self.input.lock().read_line(&mut line)?;
        if read == 0 {
            return Err(Error::InputClosed);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    /// Hold back other threads' output until [`Console::foreground`]
    pub fn background_other_threads(&self) -> bool {
        self.arbiter.begin_background_mode()
    }

    /// Release held back output; must be called by the thread that
    /// backgrounded the others
    pub fn foreground(&self) -> bool {
        self.arbiter.end_background_mode()
    }

    /// Background other threads for the lifetime of the returned guard
    pub fn background_scope(&self) -> BackgroundScope<'_> {
        self.arbiter.background_scope()
    }

    pub fn is_background(&self) -> bool {
        self.arbiter.is_background()
    }

    pub fn context(&self) -> ExecutionContext {
        self.arbiter.context()
    }

    pub(crate) fn wait_for_foreground(&self) {
        self.arbiter.wait_for_foreground();
    }

    /// Rendered session prefix, empty without one
    pub fn output_prefix(&self) -> String {
        self.output_prefix
            .as_ref()
            .map(OutputPrefix::render)
            .unwrap_or_default()
    }

    pub fn color_codes(&self, spec: &ColorSpec) -> ColorCodes {
        spec.render(self.tty)
    }

    pub(crate) fn editor_delay(&self) -> Duration {
        self.editor_delay
    }

    pub(crate) fn write_raw(&self, bytes: &[u8]) {
        self.arbiter.write(bytes);
    }

    /// Write `label` unless the current line is still open; returns whether
    /// it was written. Check and write happen under one lock.
    pub(crate) fn start_line(&self, label: &str) -> bool {
        let mut guard = self.arbiter.lock();
        if guard.line_pending() {
            return false;
        }
        guard.write(label.as_bytes());
        true
    }

    pub(crate) fn set_line_pending(&self, pending: bool) {
        self.arbiter.set_line_pending(pending);
    }
}
