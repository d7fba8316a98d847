//! Per-session output label, rendered as `"[label] "` at the start of lines

use std::fmt;

/// Source of the label text
pub enum OutputPrefix {
    /// Same label on every line
    Fixed(String),
    /// Evaluated for every line, e.g. a clock
    Computed(Box<dyn Fn() -> String + Send + Sync>),
}

impl OutputPrefix {
    pub fn fixed(label: impl Into<String>) -> Self {
        OutputPrefix::Fixed(label.into())
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        OutputPrefix::Computed(Box::new(f))
    }

    /// Local wall clock time with milliseconds, `HH:MM:SS.mmm`
    pub fn timestamp() -> Self {
        Self::computed(|| chrono::Local::now().format("%H:%M:%S%.3f").to_string())
    }

    /// Rendered prefix including brackets and trailing space
    pub fn render(&self) -> String {
        match self {
            OutputPrefix::Fixed(label) => format!("[{}] ", label),
            OutputPrefix::Computed(f) => format!("[{}] ", f()),
        }
    }
}

impl fmt::Debug for OutputPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputPrefix::Fixed(label) => f.debug_tuple("Fixed").field(label).finish(),
            OutputPrefix::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for OutputPrefix {
    fn from(label: &str) -> Self {
        OutputPrefix::fixed(label)
    }
}

impl From<String> for OutputPrefix {
    fn from(label: String) -> Self {
        OutputPrefix::Fixed(label)
    }
}
