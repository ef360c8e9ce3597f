//! Sequential line reader with byte offsets.
//!
//! [`LogScanner`] reads any `BufRead` source one line at a time and
//! reports where each line starts, so callers can later seek straight back
//! to it. Generic over `R: BufRead` so tests can use `&[u8]` and
//! production code can use `BufReader<File>`.

use std::io::{self, BufRead};

/// One line handed out by [`LogScanner::next_line`].
///
/// Borrows the scanner's line buffer; the text has its line terminator
/// removed and any invalid UTF-8 replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    /// 1-based line number.
    pub number: u64,
    /// Byte offset of the first byte of the line.
    pub offset: u64,
    /// Line text without `\n` or `\r\n`.
    pub text: &'a str,
}

/// Reads lines from a log while tracking offsets and line numbers.
pub struct LogScanner<R: BufRead> {
    reader: R,
    offset: u64,
    lines_read: u64,
    raw: Vec<u8>,
    text: String,
}

impl<R: BufRead> LogScanner<R> {
    /// Start scanning at the beginning of `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            lines_read: 0,
            raw: Vec::new(),
            text: String::new(),
        }
    }

    /// Read the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<ScannedLine<'_>>> {
        self.raw.clear();
        let start = self.offset;
        let n = self.reader.read_until(b'\n', &mut self.raw)?;
        if n == 0 {
            return Ok(None);
        }
        self.offset += n as u64;
        self.lines_read += 1;

        let mut end = self.raw.len();
        if self.raw[..end].ends_with(b"\n") {
            end -= 1;
        }
        if self.raw[..end].ends_with(b"\r") {
            end -= 1;
        }
        self.text.clear();
        self.text.push_str(&String::from_utf8_lossy(&self.raw[..end]));

        Ok(Some(ScannedLine {
            number: self.lines_read,
            offset: start,
            text: &self.text,
        }))
    }

    /// Byte offset where the next line will start.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of lines read so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Consume the scanner and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Read the single line starting at the reader's current position.
///
/// Used by index lookups after seeking. The terminator is removed.
pub(crate) fn read_one_line<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut raw = Vec::new();
    reader.read_until(b'\n', &mut raw)?;
    while matches!(raw.last(), Some(b'\n' | b'\r')) {
        raw.pop();
    }
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_and_numbers() {
        let data = b"0\nabc\r\n\nlast";
        let mut scanner = LogScanner::new(data.as_slice());

        let l = scanner.next_line().unwrap().unwrap();
        assert_eq!((l.number, l.offset, l.text), (1, 0, "0"));
        let l = scanner.next_line().unwrap().unwrap();
        assert_eq!((l.number, l.offset, l.text), (2, 2, "abc"));
        let l = scanner.next_line().unwrap().unwrap();
        assert_eq!((l.number, l.offset, l.text), (3, 7, ""));
        let l = scanner.next_line().unwrap().unwrap();
        assert_eq!((l.number, l.offset, l.text), (4, 8, "last"));
        assert!(scanner.next_line().unwrap().is_none());
        assert_eq!(scanner.offset(), data.len() as u64);
        assert_eq!(scanner.lines_read(), 4);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let data = b"ok\n\xff\xfe\n";
        let mut scanner = LogScanner::new(data.as_slice());
        scanner.next_line().unwrap();
        let l = scanner.next_line().unwrap().unwrap();
        assert_eq!(l.offset, 3);
        assert!(l.text.contains('\u{FFFD}'));
    }

    #[test]
    fn read_one_line_strips_terminator() {
        let mut data = b"first\r\nsecond\n".as_slice();
        assert_eq!(read_one_line(&mut data).unwrap(), "first");
        assert_eq!(read_one_line(&mut data).unwrap(), "second");
        assert_eq!(read_one_line(&mut data).unwrap(), "");
    }
}
