//! CONDSTORE (RFC 4551): per-message and per-mailbox modification sequences.

use nom::{
    bytes::streaming::tag_no_case,
    character::streaming::char,
    combinator::map,
    sequence::{delimited, preceded},
    IResult,
};

use crate::{
    parser::core::number64,
    token::Token,
    types::{AttributeValue, ResponseCode},
};

pub(crate) fn resp_text_code_highest_mod_seq(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    map(
        preceded(tag_no_case(b"HIGHESTMODSEQ "), number64),
        ResponseCode::HighestModSeq,
    )(i)
}

pub(crate) fn status_att_val_highest_mod_seq(i: &[u8]) -> IResult<&[u8], (Token, u64)> {
    map(preceded(tag_no_case(b"HIGHESTMODSEQ "), number64), |v| {
        (Token::HighestModSeq, v)
    })(i)
}

/// `"MODSEQ" SP "(" permsg-modsequence ")"`.
pub(crate) fn msg_att_mod_seq(i: &[u8]) -> IResult<&[u8], AttributeValue> {
    map(
        preceded(
            tag_no_case(b"MODSEQ "),
            delimited(char('('), number64, char(')')),
        ),
        AttributeValue::ModSeq,
    )(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_mod_seq_code() {
        assert_eq!(
            resp_text_code_highest_mod_seq(b"HIGHESTMODSEQ 12345"),
            Ok((&b""[..], ResponseCode::HighestModSeq(12345)))
        );
    }

    #[test]
    fn mod_seq_attribute() {
        assert_eq!(
            msg_att_mod_seq(b"MODSEQ (624140003)"),
            Ok((&b""[..], AttributeValue::ModSeq(624140003)))
        );
    }
}
