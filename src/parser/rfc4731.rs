//! ESEARCH (RFC 4731, folded into RFC 4466's extensible SEARCH syntax): a single untagged
//! response reporting COUNT/MIN/MAX/ALL instead of (or alongside) a bare sequence-set, optionally
//! correlated back to the command that triggered it via a `(TAG "...")` prefix.
//!
//! Grounded in `parse_esearch_response`/`parse_sequence_set` in `imap4/parser/parser.c`. The
//! original's sequence-set grammar has no `*` wildcard support (that only appears in sequence-sets
//! a client sends, never one a server reports back), which this keeps.

use std::collections::HashMap;

use nom::{
    branch::alt,
    bytes::streaming::tag_no_case,
    character::streaming::char,
    combinator::{map, opt},
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair},
    IResult,
};

use crate::{
    parser::core::{number, quoted_utf8},
    token::Token,
    types::{Esearch, EsearchReturnValue, RequestId, SeqItem, SequenceSet},
};

fn seq_item(i: &[u8]) -> IResult<&[u8], SeqItem> {
    alt((
        map(
            separated_pair(number, char(':'), number),
            |(lo, hi)| SeqItem::Range(lo, hi),
        ),
        map(number, SeqItem::Single),
    ))(i)
}

/// `sequence-set = seq-item *("," seq-item)`.
fn sequence_set(i: &[u8]) -> IResult<&[u8], SequenceSet> {
    map(
        pair(seq_item, many0(preceded(char(','), seq_item))),
        |(first, mut rest)| {
            rest.insert(0, first);
            rest
        },
    )(i)
}

/// `"(TAG" SP tag-string ")"`.
fn search_correlator(i: &[u8]) -> IResult<&[u8], RequestId> {
    map(
        delimited(tag_no_case(b"(TAG "), quoted_utf8, char(')')),
        RequestId,
    )(i)
}

enum ReturnItem {
    Uid,
    Value(Token, EsearchReturnValue),
}

fn search_return_item(i: &[u8]) -> IResult<&[u8], ReturnItem> {
    alt((
        map(tag_no_case(b"UID"), |_| ReturnItem::Uid),
        map(
            preceded(tag_no_case(b"COUNT "), number),
            |n| ReturnItem::Value(Token::Count, EsearchReturnValue::Count(n)),
        ),
        map(
            preceded(tag_no_case(b"MAX "), number),
            |n| ReturnItem::Value(Token::Max, EsearchReturnValue::Number(n)),
        ),
        map(
            preceded(tag_no_case(b"MIN "), number),
            |n| ReturnItem::Value(Token::Min, EsearchReturnValue::Number(n)),
        ),
        map(
            preceded(tag_no_case(b"ALL "), sequence_set),
            |set| ReturnItem::Value(Token::All, EsearchReturnValue::All(set)),
        ),
    ))(i)
}

/// Parses everything after the `"ESEARCH"` keyword itself: an optional correlator, then any
/// number of SP-separated return items.
pub(crate) fn esearch_response(i: &[u8]) -> IResult<&[u8], Esearch> {
    let (i, tag) = opt(preceded(char(' '), search_correlator))(i)?;
    let (i, items) = many0(preceded(char(' '), search_return_item))(i)?;
    let mut uid = false;
    let mut returned = HashMap::new();
    for item in items {
        match item {
            ReturnItem::Uid => uid = true,
            ReturnItem::Value(token, value) => {
                returned.insert(token, value);
            }
        }
    }
    Ok((i, Esearch { tag, uid, returned }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_esearch_with_count() {
        assert_eq!(
            esearch_response(b" COUNT 5"),
            Ok((
                &b""[..],
                Esearch {
                    tag: None,
                    uid: false,
                    returned: [(Token::Count, EsearchReturnValue::Count(5))]
                        .into_iter()
                        .collect(),
                }
            ))
        );
    }

    #[test]
    fn correlated_esearch_with_uid_and_all() {
        let (rest, esearch) = esearch_response(b" (TAG \"a1\") UID ALL 2,4:6,10").unwrap();
        assert_eq!(rest, b"");
        assert_eq!(esearch.tag, Some(RequestId("a1".to_string())));
        assert!(esearch.uid);
        assert_eq!(
            esearch.returned.get(&Token::All),
            Some(&EsearchReturnValue::All(vec![
                SeqItem::Single(2),
                SeqItem::Range(4, 6),
                SeqItem::Single(10),
            ]))
        );
    }

    #[test]
    fn min_and_max() {
        let (rest, esearch) = esearch_response(b" MIN 1 MAX 50").unwrap();
        assert_eq!(rest, b"");
        assert_eq!(
            esearch.returned.get(&Token::Min),
            Some(&EsearchReturnValue::Number(1))
        );
        assert_eq!(
            esearch.returned.get(&Token::Max),
            Some(&EsearchReturnValue::Number(50))
        );
    }

    #[test]
    fn no_return_items_at_all() {
        assert_eq!(
            esearch_response(b""),
            Ok((
                &b""[..],
                Esearch {
                    tag: None,
                    uid: false,
                    returned: HashMap::new(),
                }
            ))
        );
    }
}
