//! termtell - prefixed, colorized terminal output shared between threads
//!
//! termtell renders lines to a shared terminal with an optional session label
//! (`"[build] "`) and SGR colors, relays a child's PTY output while injecting
//! that label at every line start, and keeps background threads from writing
//! into the middle of a foreground interaction.
//!
//! # Features
//!
//! - **Line emitter**: `tell` splits text into lines, prefixes and colors them
//! - **Stream relay**: `tell_pty_stream` prefixes arbitrary chunked output
//! - **Foreground arbitration**: other threads' output is held back while one
//!   thread talks to the user
//! - **Dialogs**: yes/no questions, free text input, numbered menus
//! - **Progress**: inline dots and spinner
//!
//! # Quick Start
//!
//! ```no_run
//! use termtell::{Color, Console, OutputPrefix, TellOptions};
//!
//! let console = Console::new(OutputPrefix::fixed("deploy"));
//! console.tell("Uploading assets");
//! console.tell_with(["done"], &TellOptions::new().color(Color::Green));
//! ```

pub mod color;
pub mod config;
pub mod core;
pub mod dialog;
pub mod editor;
pub mod error;
pub mod global;
pub mod progress;

#[cfg(test)]
mod test_support;

pub use crate::color::{Color, ColorCodes, ColorSpec};
pub use crate::config::Config;
pub use crate::core::arbiter::{Arbiter, BackgroundScope};
pub use crate::core::console::{Console, ConsoleBuilder, TellOptions};
pub use crate::core::pending::{ExecutionContext, LinePending};
pub use crate::core::prefix::OutputPrefix;
pub use crate::core::source::{ChunkSource, PipeSource, Source};
pub use crate::dialog::{Answer, AskOptions};
pub use crate::error::{Error, Result};
pub use crate::global::{global, set_global};
pub use crate::progress::Progress;
