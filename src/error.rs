//! Error type for termtell

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The user declined a confirmation
    #[error("Aborted by user")]
    Aborted,

    /// A required environment variable is not set
    #[error("No {0} specified.")]
    MissingEnv(&'static str),

    /// Standard input was closed while waiting for an answer
    #[error("Input closed while waiting for an answer")]
    InputClosed,

    #[error("Editor {editor} failed: {status}")]
    Editor {
        editor: String,
        status: std::process::ExitStatus,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
