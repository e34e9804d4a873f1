//! Line cursor over a dump.
//!
//! Lines are returned with the line terminator (`\n` or `\r\n`) and
//! surrounding whitespace removed. Bytes that are not valid UTF-8 are
//! replaced rather than rejected.

use std::io::{self, BufRead};

/// Suffix of a line that opens a nested record.
pub const RECORD_OPEN: &str = "^{";

/// A line that closes the innermost open record.
pub const RECORD_CLOSE: &str = "}";

/// Label of a record opener (`"StarId12 ^{"` -> `"StarId12"`), or `None` if
/// the line does not open a record.
pub fn record_label(line: &str) -> Option<&str> {
    line.strip_suffix(RECORD_OPEN).map(str::trim_end)
}

pub fn is_record_close(line: &str) -> bool {
    line == RECORD_CLOSE
}

/// Splits a `Key=Value` field line. Only the first `=` separates.
pub fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
}

#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            line_number: 0,
        }
    }

    /// 1-based number of the line most recently returned, 0 before the
    /// first read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The next line, or `None` at end of stream.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let mut text = String::from_utf8_lossy(&self.buf).into_owned();
        if self.line_number == 1 {
            if let Some(rest) = text.strip_prefix('\u{feff}') {
                text = rest.to_string();
            }
        }
        Ok(Some(text.trim().to_string()))
    }

    /// Consumes the body of a record whose opener was just read, up to and
    /// including its matching close. Nested records are skipped whole.
    /// Returns the number of lines consumed; stops quietly at end of stream.
    pub fn skip_record(&mut self) -> io::Result<usize> {
        let mut depth = 1usize;
        let mut consumed = 0;
        while let Some(line) = self.next_line()? {
            consumed += 1;
            if record_label(&line).is_some() {
                depth += 1;
            } else if is_record_close(&line) {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
        }
        Ok(consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn strips_crlf_and_indent() {
        let mut r = reader("  IDay=5\r\n\tStarName=Solar\r\n");
        assert_eq!(r.next_line().unwrap().as_deref(), Some("IDay=5"));
        assert_eq!(r.next_line().unwrap().as_deref(), Some("StarName=Solar"));
        assert_eq!(r.next_line().unwrap(), None);
        assert_eq!(r.line_number(), 2);
    }

    #[test]
    fn strips_byte_order_mark() {
        let mut r = reader("\u{feff}Player ^{\n");
        assert_eq!(r.next_line().unwrap().as_deref(), Some("Player ^{"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut r = LineReader::new(Cursor::new(vec![b'A', 0xff, b'B', b'\n']));
        assert_eq!(r.next_line().unwrap().as_deref(), Some("A\u{fffd}B"));
    }

    #[test]
    fn record_label_and_fields() {
        assert_eq!(record_label("StarId12 ^{"), Some("StarId12"));
        assert_eq!(record_label("StarName=Solar"), None);
        assert_eq!(split_field("IBonus=a=b"), Some(("IBonus", "a=b")));
        assert_eq!(split_field("}"), None);
        assert!(is_record_close("}"));
    }

    #[test]
    fn skip_record_honors_nesting() {
        let mut r = reader("A=1\nInner ^{\nB=2\n}\n}\nAfter=1\n");
        assert_eq!(r.skip_record().unwrap(), 5);
        assert_eq!(r.next_line().unwrap().as_deref(), Some("After=1"));
    }

    #[test]
    fn skip_record_stops_at_end_of_stream() {
        let mut r = reader("A=1\nInner ^{\n");
        assert_eq!(r.skip_record().unwrap(), 2);
        assert_eq!(r.next_line().unwrap(), None);
    }
}
