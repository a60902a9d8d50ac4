//! Line-oriented scanning and recursive-descent parsing of IMAP4rev1 server responses.
//!
//! [`scanner::Scanner`] reassembles a byte stream (as read off a socket, one chunk at a time)
//! into complete response lines, splicing over `{N}CRLF` literal bodies so embedded CRLFs don't
//! get mistaken for line terminators. [`parser::parse_response_line`] then parses one such line
//! into a [`types::Response`], covering RFC 3501 plus the CONDSTORE (RFC 4551), ESEARCH
//! (RFC 4731), ENABLE (RFC 5161), and X-GM-EXT1 (Gmail) extensions.
//!
//! This crate does not own a socket, an event loop, or a command encoder: it only turns bytes
//! already read from the wire into typed responses.

pub mod error;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod types;

pub use error::{ParseError, ScanError};
pub use parser::{parse_imap_astring, parse_imap_string, parse_response_line};
pub use scanner::Scanner;
pub use token::Token;
pub use types::Response;
