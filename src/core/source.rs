//! Byte sources for the stream relay
//!
//! A [`Source`] hands out whatever bytes are currently available without
//! blocking for long. An empty read does not mean end of input; only
//! [`Source::is_at_end`] does.

use std::collections::VecDeque;
use std::io::Read;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

/// Default wait for data in [`PipeSource::read_available`]
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Non-blocking readable stream
pub trait Source {
    /// True once no more data will ever arrive
    fn is_at_end(&mut self) -> bool;

    /// Read up to `max_bytes` of already available data; may be empty
    fn read_available(&mut self, max_bytes: usize) -> Vec<u8>;
}

/// Prepared sequence of chunks, handed out one by one
#[derive(Debug, Default, Clone)]
pub struct ChunkSource {
    chunks: VecDeque<Vec<u8>>,
}

impl ChunkSource {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Vec<u8>>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
        }
    }
}

impl Source for ChunkSource {
    fn is_at_end(&mut self) -> bool {
        self.chunks.is_empty()
    }

    fn read_available(&mut self, max_bytes: usize) -> Vec<u8> {
        let mut chunk = match self.chunks.pop_front() {
            Some(chunk) => chunk,
            None => return Vec::new(),
        };
        if chunk.len() > max_bytes {
            let rest = chunk.split_off(max_bytes);
            self.chunks.push_front(rest);
        }
        chunk
    }
}

/// Source fed by a reader thread, e.g. over a child's PTY or stdin
pub struct PipeSource {
    rx: Receiver<Vec<u8>>,
    /// Received but not yet handed out
    pending: Vec<u8>,
    disconnected: bool,
    poll_interval: Duration,
    reader_thread: Option<JoinHandle<()>>,
}

impl PipeSource {
    /// Spawn a reader thread draining `reader` until EOF or error
    pub fn spawn<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::spawn_with_interval(reader, DEFAULT_POLL_INTERVAL)
    }

    pub fn spawn_with_interval<R>(mut reader: R, poll_interval: Duration) -> Self
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Vec<u8>>();

        let reader_thread = thread::spawn(move || {
            let mut buffer = vec![0u8; 4096];

            loop {
                match reader.read(&mut buffer) {
                    Ok(0) => {
                        debug!("Pipe source reached end of input");
                        break;
                    }
                    Ok(n) => {
                        if tx.send(buffer[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        debug!("Pipe source read failed: {}", e);
                        break;
                    }
                }
            }
        });

        Self {
            rx,
            pending: Vec::new(),
            disconnected: false,
            poll_interval,
            reader_thread: Some(reader_thread),
        }
    }

    fn take_pending(&mut self, max_bytes: usize) -> Vec<u8> {
        if self.pending.len() <= max_bytes {
            std::mem::take(&mut self.pending)
        } else {
            let rest = self.pending.split_off(max_bytes);
            std::mem::replace(&mut self.pending, rest)
        }
    }
}

impl Source for PipeSource {
    fn is_at_end(&mut self) -> bool {
        if !self.pending.is_empty() {
            return false;
        }
        if self.disconnected {
            return true;
        }
        match self.rx.try_recv() {
            Ok(data) => {
                self.pending = data;
                false
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.disconnected = true;
                true
            }
        }
    }

    fn read_available(&mut self, max_bytes: usize) -> Vec<u8> {
        if self.pending.is_empty() && !self.disconnected {
            match self.rx.recv_timeout(self.poll_interval) {
                Ok(data) => self.pending = data,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => self.disconnected = true,
            }
        }
        self.take_pending(max_bytes)
    }
}

impl Drop for PipeSource {
    fn drop(&mut self) {
        // A blocked reader cannot be interrupted; only join a finished one
        if let Some(handle) = self.reader_thread.take() {
            if self.disconnected || handle.is_finished() {
                let _ = handle.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(source: &mut impl Source, max_bytes: usize) -> Vec<Vec<u8>> {
        let mut chunks = Vec::new();
        while !source.is_at_end() {
            let chunk = source.read_available(max_bytes);
            if !chunk.is_empty() {
                chunks.push(chunk);
            }
        }
        chunks
    }

    #[test]
    fn test_chunk_source_keeps_chunks() {
        let mut source = ChunkSource::new(["first\nchunk", "", "last"]);
        assert!(!source.is_at_end());
        assert_eq!(source.read_available(100), b"first\nchunk".to_vec());
        assert_eq!(source.read_available(100), Vec::<u8>::new());
        assert!(!source.is_at_end());
        assert_eq!(source.read_available(100), b"last".to_vec());
        assert!(source.is_at_end());
    }

    #[test]
    fn test_chunk_source_splits_long_chunks() {
        let mut source = ChunkSource::new(["abcdef"]);
        assert_eq!(drain(&mut source, 4), vec![b"abcd".to_vec(), b"ef".to_vec()]);
    }

    #[test]
    fn test_pipe_source_reads_everything() {
        let data = "line one\nline two\n".repeat(50);
        let mut source = PipeSource::spawn(Cursor::new(data.clone().into_bytes()));
        let chunks = drain(&mut source, 100);
        assert!(chunks.iter().all(|c| c.len() <= 100));
        assert_eq!(chunks.concat(), data.into_bytes());
        assert!(source.is_at_end());
        assert!(source.read_available(100).is_empty());
    }

    #[test]
    fn test_pipe_source_empty_input() {
        let mut source = PipeSource::spawn(Cursor::new(Vec::new()));
        assert!(drain(&mut source, 100).is_empty());
    }
}
