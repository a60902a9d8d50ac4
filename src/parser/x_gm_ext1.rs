//! Gmail's X-GM-EXT1 extension: the `X-GM-MSGID` FETCH attribute, a per-message id stable across
//! label moves (distinct from the mailbox-scoped UID). Values are the full unsigned 64-bit range
//! Gmail actually assigns, so this reuses [`crate::parser::core::number64`] rather than `number`.

use nom::{bytes::streaming::tag_no_case, combinator::map, sequence::preceded, IResult};

use crate::{parser::core::number64, types::AttributeValue};

/// `"X-GM-MSGID" SP number64`.
pub(crate) fn msg_att_x_gm_msgid(i: &[u8]) -> IResult<&[u8], AttributeValue> {
    map(
        preceded(tag_no_case(b"X-GM-MSGID "), number64),
        AttributeValue::XGmMsgid,
    )(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gmail_message_id() {
        assert_eq!(
            msg_att_x_gm_msgid(b"X-GM-MSGID 1278455344230334865"),
            Ok((&b""[..], AttributeValue::XGmMsgid(1278455344230334865)))
        );
    }
}
