//! Error taxonomies for the scanner and the parser.
//!
//! The two subsystems fail in unrelated ways (framing vs. grammar), so they get unrelated error
//! types rather than one catch-all enum.

use thiserror::Error;

/// Failure modes of [`crate::scanner::Scanner::feed`], [`crate::scanner::Scanner::get`], and
/// [`crate::scanner::Scanner::consume`].
///
/// `IncompleteLine` and `IncompleteLiteral` are not really errors so much as "come back with more
/// bytes": the scanner's state is unchanged other than `scan_cursor`/`literal_remaining`
/// bookkeeping, and a later `get` call after more `feed`s will pick up where this one left off.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ScanError {
    /// No CRLF was found in the buffered bytes yet.
    #[error("incomplete line")]
    IncompleteLine,

    /// A `{N}CRLF` literal is active and fewer than `needed` more bytes have been fed.
    #[error("incomplete literal, {needed} bytes still needed")]
    IncompleteLiteral { needed: u64 },

    /// The digit span of a `{DIGITS+}` literal sentinel overflowed the literal-length integer
    /// type.
    #[error("literal length overflowed")]
    BadLiteralLength,

    /// `consume` was asked to drop more bytes than are buffered.
    #[error("consuming too many bytes: requested {requested}, only {available} available")]
    TooManyConsumed { requested: usize, available: usize },
}

/// A fatal parse failure, carrying the byte offset into the line being parsed at which parsing
/// gave up.
///
/// There is exactly one kind: the grammar under recursive descent either matches or it doesn't,
/// and a mismatch is always fatal for the call (see `SPEC_FULL.md` §7). The message is
/// human-readable context, not a stable machine-matchable code.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{message} (at byte offset {offset})")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        ParseError {
            message: message.into(),
            offset,
        }
    }

    /// Build a `ParseError` from a failed nom parse, computing the offset as the number of bytes
    /// consumed from `original` before the failure point in `remaining`.
    pub(crate) fn from_nom(
        original: &[u8],
        err: nom::Err<(&[u8], nom::error::ErrorKind)>,
        message: &str,
    ) -> Self {
        let offset = match &err {
            nom::Err::Error((rest, _)) | nom::Err::Failure((rest, _)) => {
                original.len().saturating_sub(rest.len())
            }
            nom::Err::Incomplete(_) => original.len(),
        };
        ParseError::new(message.to_string(), offset)
    }
}
