//! PTY stream relay
//!
//! Copies a child's output to the console chunk by chunk. The bytes are left
//! as they are, but after every CR or LF the color is reset, the session
//! prefix is printed and the color is applied again, so each visual line
//! starts with the prefix.
//!
//! A trailing LF at the end of a chunk is held back until the next non-empty
//! chunk arrives. Only then is it known that another line follows and the
//! prefix is due; at the end of the stream it is written bare.

use tracing::trace;

use super::console::Console;
use super::source::Source;
use crate::color::ColorSpec;

/// Maximum bytes taken from the source per iteration
pub const RELAY_CHUNK_SIZE: usize = 100;

/// Copy `chunk`, inserting `boundary` after every CR and LF
fn inject_boundaries(chunk: &[u8], boundary: &[u8]) -> Vec<u8> {
    if boundary.is_empty() {
        return chunk.to_vec();
    }
    let breaks = chunk.iter().filter(|&&b| b == b'\r' || b == b'\n').count();
    let mut out = Vec::with_capacity(chunk.len() + breaks * boundary.len());
    for &b in chunk {
        out.push(b);
        if b == b'\r' || b == b'\n' {
            out.extend_from_slice(boundary);
        }
    }
    out
}

impl Console {
    /// Relay `stream` until it ends, prefixing and coloring every line.
    pub fn tell_pty_stream<S>(&self, stream: &mut S, color: &ColorSpec)
    where
        S: Source + ?Sized,
    {
        let codes = self.color_codes(color);
        let label = self.output_prefix();
        self.start_line(&label);
        self.write_raw(codes.prefix.as_bytes());

        let boundary = format!("{}{}{}", codes.postfix, label, codes.prefix).into_bytes();
        let mut newline_pending = false;
        let mut relayed = 0usize;

        while !stream.is_at_end() {
            let mut chunk = stream.read_available(RELAY_CHUNK_SIZE);
            if chunk.is_empty() {
                continue;
            }
            relayed += chunk.len();

            if newline_pending {
                let mut line_start = Vec::with_capacity(1 + boundary.len());
                line_start.push(b'\n');
                line_start.extend_from_slice(&boundary);
                self.write_raw(&line_start);
            }
            newline_pending = chunk.last() == Some(&b'\n');
            if newline_pending {
                chunk.pop();
            }
            self.write_raw(&inject_boundaries(&chunk, &boundary));
        }

        if newline_pending {
            self.write_raw(b"\n");
        }
        self.write_raw(codes.postfix.as_bytes());
        self.set_line_pending(false);
        trace!("Relayed {} bytes", relayed);
    }
}
