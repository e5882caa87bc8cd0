//! Newline framing over a byte stream.

use bytes::{Buf, BytesMut};

const INITIAL_CAPACITY: usize = 256;

/// Accumulates raw socket bytes and yields complete lines.
///
/// A line ends at `\n`; a trailing `\r` is stripped so telnet clients work.
/// Invalid UTF-8 is replaced lossily. Bytes after the last newline stay
/// buffered until more data arrives.
#[derive(Debug)]
pub struct LineDecoder {
    buf: BytesMut,
    /// Prefix of `buf` already known to hold no `\n`.
    scanned: usize,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
            scanned: 0,
        }
    }

    /// Read target for `AsyncReadExt::read_buf`. Only append to it.
    pub fn buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    /// Pop the next complete line, without its terminator.
    ///
    /// Each buffered byte is inspected once, however many partial reads it
    /// takes for its line to complete.
    pub fn next_line(&mut self) -> Option<String> {
        let start = self.scanned.min(self.buf.len());
        let Some(offset) = self.buf[start..].iter().position(|b| *b == b'\n') else {
            self.scanned = self.buf.len();
            return None;
        };
        let pos = start + offset;
        self.scanned = 0;

        let mut line = self.buf.split_to(pos);
        self.buf.advance(1);
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Bytes buffered after the last complete line.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(d: &mut LineDecoder, data: &[u8]) {
        d.buffer_mut().extend_from_slice(data);
    }

    #[test]
    fn splits_on_newline_and_keeps_remainder() {
        let mut d = LineDecoder::new();
        feed(&mut d, b"help\ncounters\npart");
        assert_eq!(d.next_line().as_deref(), Some("help"));
        assert_eq!(d.next_line().as_deref(), Some("counters"));
        assert_eq!(d.next_line(), None);
        assert_eq!(d.pending(), 4);

        feed(&mut d, b"ial\n");
        assert_eq!(d.next_line().as_deref(), Some("partial"));
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn long_line_in_small_chunks_resumes_scan() {
        let mut d = LineDecoder::new();
        let name = "x".repeat(4096);
        for chunk in name.as_bytes().chunks(7) {
            feed(&mut d, chunk);
            assert_eq!(d.next_line(), None);
            assert_eq!(d.scanned, d.pending());
        }

        feed(&mut d, b"\nhelp\n");
        assert_eq!(d.next_line().as_deref(), Some(name.as_str()));
        assert_eq!(d.scanned, 0);
        assert_eq!(d.next_line().as_deref(), Some("help"));
        assert_eq!(d.next_line(), None);
    }

    #[test]
    fn carriage_return_split_across_reads() {
        let mut d = LineDecoder::new();
        feed(&mut d, b"stats\r");
        assert_eq!(d.next_line(), None);
        feed(&mut d, b"\n");
        assert_eq!(d.next_line().as_deref(), Some("stats"));
    }

    #[test]
    fn strips_carriage_return() {
        let mut d = LineDecoder::new();
        feed(&mut d, b"stats\r\n\r\n");
        assert_eq!(d.next_line().as_deref(), Some("stats"));
        assert_eq!(d.next_line().as_deref(), Some(""));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut d = LineDecoder::new();
        feed(&mut d, b"delcounters \xff\xfe\n");
        let line = d.next_line().unwrap_or_default();
        assert!(line.starts_with("delcounters "));
        assert!(line.contains('\u{FFFD}'));
    }
}
