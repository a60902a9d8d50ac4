//! Recursive-descent parser: turns one complete response line (as handed back by
//! [`crate::scanner::Scanner::get`]) into a [`crate::types::Response`].
//!
//! `core` holds primitives shared by every RFC-specific submodule; `rfc3501` is the base grammar
//! and owns the top-level dispatch; `rfc4551`/`rfc4731`/`rfc5161`/`x_gm_ext1` are the extension
//! grammars it folds in.

use nom::Err as NomErr;

use crate::error::ParseError;
use crate::parser::core::{astring, string};
use crate::types::Response;

pub mod core;

pub mod rfc3501;
pub mod rfc4551;
pub mod rfc4731;
pub mod rfc5161;
pub mod x_gm_ext1;


pub(crate) type ParseResult<'a> = nom::IResult<&'a [u8], Response>;

/// Parse one complete response line (including its trailing CRLF) into a [`Response`].
///
/// The entire input must be consumed: any unparsed trailing bytes are reported as an error rather
/// than silently ignored, per `SPEC_FULL.md` §6.2. The returned `Response` owns every byte/string
/// it retains, so it outlives `line` (which is typically a view borrowed from a
/// [`crate::scanner::Scanner`] that the caller is about to `consume`).
pub fn parse_response_line(line: &[u8]) -> Result<Response, ParseError> {
    match rfc3501::response(line) {
        Ok((rest, response)) if rest.is_empty() => Ok(response),
        Ok((rest, _)) => Err(ParseError::new(
            "trailing bytes after a complete response",
            line.len() - rest.len(),
        )),
        Err(NomErr::Incomplete(_)) => Err(ParseError::new("incomplete response line", line.len())),
        Err(e) => Err(ParseError::from_nom(line, e, "malformed response line")),
    }
}

/// Parse a single `string` (quoted or literal) that spans the entire input.
pub fn parse_imap_string(input: &[u8]) -> Result<Vec<u8>, ParseError> {
    match string(input) {
        Ok((rest, value)) if rest.is_empty() => Ok(value),
        Ok((rest, _)) => Err(ParseError::new(
            "trailing bytes after a complete string",
            input.len() - rest.len(),
        )),
        Err(NomErr::Incomplete(_)) => Err(ParseError::new("incomplete string", input.len())),
        Err(e) => Err(ParseError::from_nom(input, e, "malformed string")),
    }
}

/// Parse a single `astring` (atom or string) that spans the entire input.
pub fn parse_imap_astring(input: &[u8]) -> Result<Vec<u8>, ParseError> {
    match astring(input) {
        Ok((rest, value)) if rest.is_empty() => Ok(value),
        Ok((rest, _)) => Err(ParseError::new(
            "trailing bytes after a complete astring",
            input.len() - rest.len(),
        )),
        Err(NomErr::Incomplete(_)) => Err(ParseError::new("incomplete astring", input.len())),
        Err(e) => Err(ParseError::from_nom(input, e, "malformed astring")),
    }
}
