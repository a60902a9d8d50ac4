//! ENABLE (RFC 5161): records which capabilities the server just turned on.

use nom::{
    bytes::streaming::tag_no_case, character::streaming::char, combinator::map, multi::many0,
    sequence::preceded, IResult,
};

use crate::{parser::core::atom, types::Response};

/// `"ENABLED" *(SP capability)"`; the leading `"ENABLED"` tag has already been consumed by the
/// caller's `mailbox_data`/`response_data` dispatch, matching how every other untagged response
/// kind in this parser is recognized by its keyword before its own production runs.
pub(crate) fn resp_enabled(i: &[u8]) -> IResult<&[u8], Response> {
    map(many0(preceded(char(' '), atom)), |caps: Vec<&str>| {
        Response::Enabled(caps.into_iter().map(String::from).collect())
    })(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_capabilities_enabled() {
        assert_eq!(resp_enabled(b""), Ok((&b""[..], Response::Enabled(vec![]))));
    }

    #[test]
    fn some_capabilities_enabled() {
        assert_eq!(
            resp_enabled(b" CONDSTORE QRESYNC"),
            Ok((
                &b""[..],
                Response::Enabled(vec!["CONDSTORE".to_string(), "QRESYNC".to_string()])
            ))
        );
    }

    #[test]
    fn dispatched_after_tag() {
        let (rest, enabled) = tag_no_case::<_, _, (&[u8], nom::error::ErrorKind)>(b"ENABLED")(
            &b"ENABLED CONDSTORE\r\n"[..],
        )
        .unwrap();
        assert_eq!(
            resp_enabled(rest),
            Ok((&b"\r\n"[..], Response::Enabled(vec!["CONDSTORE".to_string()])))
        );
        let _ = enabled;
    }
}
