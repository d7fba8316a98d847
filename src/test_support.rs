//! Helpers shared by the unit tests

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Writer that keeps every `write` call as a separate chunk
#[derive(Clone, Default)]
pub struct Recorder {
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes so far, one string per call
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }

    /// Everything written so far, concatenated
    pub fn output(&self) -> String {
        self.writes().concat()
    }

    pub fn clear(&self) {
        self.writes.lock().clear();
    }
}

impl Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.lock().push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
