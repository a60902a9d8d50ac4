//! Stream reassembly: turn a growing byte stream into complete IMAP response lines.
//!
//! Grounded in `imap4/parser/scanner.c` from the original source. The state machine, field names,
//! and the literal-splice algorithm are a direct port; the buffer itself, the aliasing rule, and
//! the error taxonomy are reworked to fit Rust's ownership model (see `SPEC_FULL.md` §3.1, §4.2).

use crate::error::ScanError;

/// Buffered byte accumulator that extracts complete, literal-aware response lines.
///
/// A single `Scanner` belongs to one IMAP connection. `feed` appends newly-read transport bytes;
/// `get` finds the next complete line (skipping over any `{N}CRLF` literal bodies so that CRLFs
/// inside them don't get mistaken for line terminators); `consume` discards bytes once the caller
/// is done with them.
///
/// The slice returned by `get` borrows the scanner's buffer. The borrow checker enforces the one
/// aliasing rule that matters here: you cannot call `consume` (or `feed`, or drop the scanner)
/// while still holding that slice.
#[derive(Debug, Default)]
pub struct Scanner {
    buf: Vec<u8>,
    /// Index from which the next CRLF search resumes.
    scan_cursor: usize,
    /// Bytes still opaque inside an active literal splice.
    literal_remaining: u64,
}

impl Scanner {
    pub fn new() -> Self {
        Scanner::default()
    }

    /// Append bytes from `buf` to the scan buffer.
    ///
    /// `n` behaves like the original: `None` appends all of `buf`; `Some(n)` with `n >= 0`
    /// appends at most `n` bytes; `Some(n)` with `n < 0` counts back from the end of `buf`,
    /// clamped to zero (e.g. `n == -2` appends all but the last two bytes).
    pub fn feed(&mut self, buf: &[u8], n: Option<i64>) {
        let take = match n {
            None => buf.len(),
            Some(n) if n >= 0 => (n as usize).min(buf.len()),
            Some(n) => {
                let from_end = buf.len() as i64 + n;
                if from_end < 0 {
                    0
                } else {
                    from_end as usize
                }
            }
        };
        self.buf.extend_from_slice(&buf[..take]);
    }

    /// Find the next complete response line, splicing over any `{N}CRLF` literal bodies.
    ///
    /// On success, returns a view spanning `[0, end-of-CRLF)` of the scan buffer. On
    /// `IncompleteLine`/`IncompleteLiteral`, more bytes are needed; call `feed` and retry. The
    /// buffer and the fields `scan_cursor`/`literal_remaining` are otherwise unchanged by a
    /// failing call other than recording scan progress, so repeated failing calls on a growing
    /// buffer do not redo work already done (`scan_cursor` only moves forward).
    pub fn get(&mut self) -> Result<&[u8], ScanError> {
        loop {
            if self.literal_remaining > 0 {
                let available = (self.buf.len() - self.scan_cursor) as u64;
                if available < self.literal_remaining {
                    self.scan_cursor = self.buf.len();
                    self.literal_remaining -= available;
                    return Err(ScanError::IncompleteLiteral {
                        needed: self.literal_remaining,
                    });
                }
                self.scan_cursor += self.literal_remaining as usize;
                self.literal_remaining = 0;
            }

            let crlf = find_crlf(&self.buf, self.scan_cursor);
            let cr_pos = match crlf {
                Some(pos) => pos,
                None => {
                    self.scan_cursor = self.buf.len().saturating_sub(1);
                    return Err(ScanError::IncompleteLine);
                }
            };

            match literal_length(&self.buf, cr_pos) {
                Some(Ok(length)) => {
                    self.literal_remaining = length;
                    self.scan_cursor = cr_pos + 2;
                    continue;
                }
                Some(Err(())) => return Err(ScanError::BadLiteralLength),
                None => {
                    // Line is complete. Position scan_cursor at the CR so a repeated call
                    // finds the same CRLF immediately.
                    self.scan_cursor = cr_pos;
                    return Ok(&self.buf[..cr_pos + 2]);
                }
            }
        }
    }

    /// Discard the leading `n` bytes of the buffer, invalidating any view previously returned by
    /// `get` (the borrow checker already prevents holding one across this call).
    pub fn consume(&mut self, n: usize) -> Result<(), ScanError> {
        if n > self.buf.len() {
            return Err(ScanError::TooManyConsumed {
                requested: n,
                available: self.buf.len(),
            });
        }
        self.buf.drain(0..n);
        self.scan_cursor = 0;
        self.literal_remaining = 0;
        Ok(())
    }

    /// Bytes currently buffered but not yet consumed.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Find the index of the `\r` of the first CRLF at or after `from`.
fn find_crlf(buf: &[u8], from: usize) -> Option<usize> {
    let mut start = from;
    loop {
        let nl = memchr::memchr(b'\n', &buf[start..])? + start;
        if nl > 0 && buf[nl - 1] == b'\r' {
            return Some(nl - 1);
        }
        // A lone '\n' with no preceding '\r' is not a line terminator; keep scanning past it.
        start = nl + 1;
        if start > buf.len() {
            return None;
        }
    }
}

/// If the line ending at `cr_pos` (index of the `\r`) is a `{DIGITS+}` literal sentinel, parse
/// and return the literal length. `None` means "not a literal, this is a complete line".
/// `Some(Err(()))` means the digit span overflowed.
fn literal_length(buf: &[u8], cr_pos: usize) -> Option<Result<u64, ()>> {
    if cr_pos == 0 || buf[cr_pos - 1] != b'}' {
        return None;
    }
    let brace_close = cr_pos - 1;
    let mut digit_start = brace_close;
    while digit_start > 0 && buf[digit_start - 1].is_ascii_digit() {
        digit_start -= 1;
    }
    if digit_start == brace_close {
        // No digits at all: `{}` is not a literal.
        return None;
    }
    if digit_start == 0 || buf[digit_start - 1] != b'{' {
        return None;
    }
    let digits = &buf[digit_start..brace_close];
    let mut value: u64 = 0;
    for &d in digits {
        let digit = u64::from(d - b'0');
        value = match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
        {
            Some(v) => v,
            None => return Some(Err(())),
        };
    }
    Some(Ok(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_line() {
        let mut s = Scanner::new();
        s.feed(b"a1 OK done\r\n", None);
        assert_eq!(s.get().unwrap(), b"a1 OK done\r\n");
    }

    #[test]
    fn incomplete_line_reports_and_resumes() {
        let mut s = Scanner::new();
        s.feed(b"a1 OK don", None);
        assert_eq!(s.get(), Err(ScanError::IncompleteLine));
        s.feed(b"e\r\n", None);
        assert_eq!(s.get().unwrap(), b"a1 OK done\r\n");
    }

    #[test]
    fn literal_splices_over_embedded_crlf() {
        let mut s = Scanner::new();
        s.feed(b"* 1 FETCH (RFC822 {7}\r\nab\r\ncd)\r\n", None);
        assert_eq!(s.get().unwrap(), b"* 1 FETCH (RFC822 {7}\r\nab\r\ncd)\r\n");
    }

    #[test]
    fn literal_of_length_zero() {
        let mut s = Scanner::new();
        s.feed(b"* 1 FETCH (RFC822 {0}\r\n)\r\n", None);
        assert_eq!(s.get().unwrap(), b"* 1 FETCH (RFC822 {0}\r\n)\r\n");
    }

    #[test]
    fn empty_braces_are_not_a_literal() {
        let mut s = Scanner::new();
        s.feed(b"a1 OK foo{}\r\n", None);
        assert_eq!(s.get().unwrap(), b"a1 OK foo{}\r\n");
    }

    #[test]
    fn trailing_brace_without_digits_is_not_a_literal() {
        let mut s = Scanner::new();
        s.feed(b"a1 OK weird}\r\n", None);
        assert_eq!(s.get().unwrap(), b"a1 OK weird}\r\n");
    }

    #[test]
    fn incomplete_literal_reports_needed_bytes() {
        let mut s = Scanner::new();
        s.feed(b"* 1 FETCH (RFC822 {10}\r\nabc", None);
        assert_eq!(s.get(), Err(ScanError::IncompleteLiteral { needed: 7 }));
        s.feed(b"defghij)\r\n", None);
        assert_eq!(
            s.get().unwrap(),
            b"* 1 FETCH (RFC822 {10}\r\nabcdefghij)\r\n"
        );
    }

    #[test]
    fn consume_resets_cursor_state() {
        let mut s = Scanner::new();
        s.feed(b"a1 OK done\r\nnext", None);
        let line_len = s.get().unwrap().len();
        s.consume(line_len).unwrap();
        assert_eq!(s.len(), 4);
        s.feed(b" line\r\n", None);
        assert_eq!(s.get().unwrap(), b"next line\r\n");
    }

    #[test]
    fn consume_too_many_is_an_error() {
        let mut s = Scanner::new();
        s.feed(b"abc", None);
        assert_eq!(
            s.consume(10),
            Err(ScanError::TooManyConsumed {
                requested: 10,
                available: 3
            })
        );
    }

    #[test]
    fn feed_with_negative_n_clamps_from_end() {
        let mut s = Scanner::new();
        s.feed(b"abcde", Some(-2));
        assert_eq!(s.len(), 3);
        s.feed(b"abcde", Some(-100));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn one_byte_at_a_time_round_trip() {
        let input: &[u8] = b"a1 OK one\r\n* 2 EXISTS\r\n+ go\r\n";
        let mut s = Scanner::new();
        let mut lines = Vec::new();
        let mut fed = 0;
        while fed < input.len() {
            s.feed(&input[fed..=fed], None);
            fed += 1;
            loop {
                match s.get() {
                    Ok(line) => {
                        let len = line.len();
                        lines.push(line.to_vec());
                        s.consume(len).unwrap();
                    }
                    Err(ScanError::IncompleteLine) | Err(ScanError::IncompleteLiteral { .. }) => {
                        break
                    }
                    Err(e) => panic!("unexpected error: {:?}", e),
                }
            }
        }
        assert_eq!(
            lines,
            vec![
                b"a1 OK one\r\n".to_vec(),
                b"* 2 EXISTS\r\n".to_vec(),
                b"+ go\r\n".to_vec(),
            ]
        );
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn literal_length_overflow_is_bad_literal_length() {
        let mut s = Scanner::new();
        s.feed(b"a1 OK {99999999999999999999}\r\n", None);
        assert_eq!(s.get(), Err(ScanError::BadLiteralLength));
    }
}
