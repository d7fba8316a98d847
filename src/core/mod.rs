//! Core output engine.
//!
//! This module contains the terminal output coordination logic:
//!
//! - **pending**: per-context "cursor is mid-line" tracking
//! - **arbiter**: single-writer foreground/background arbitration
//! - **prefix**: per-session output label
//! - **console**: line emitter and input gate
//! - **relay**: PTY stream relay with prefix injection
//! - **source**: non-blocking byte sources for the relay
//!
//! # Architecture
//!
//! ```text
//! Console
//! ├── OutputPrefix (label per line)
//! ├── ColorSpec → ColorCodes
//! └── Arbiter (one mutex)
//!     ├── foreground owner + background buffer
//!     ├── LinePending (foreground / background)
//!     └── sink (stdout)
//! ```

pub mod arbiter;
pub mod console;
pub mod pending;
pub mod prefix;
pub mod relay;
pub mod source;
