//! RFC 3501 (IMAP4rev1) response grammar: the base response-cond-state/untagged/tagged dispatch,
//! mailbox data, message data, FETCH attributes, and the ENVELOPE/address productions that
//! BODYSTRUCTURE's `message/rfc822` branch recurses into.
//!
//! Grounded in `imap-proto`'s `parser/rfc3501/mod.rs` from the original source (the only file this
//! pack retrieved from the teacher crate). Extension grammars (CONDSTORE, ESEARCH, ENABLE,
//! X-GM-EXT1) live in sibling modules and are folded into this file's dispatch tables exactly as
//! the teacher folds its own single-RFC productions together, per `SPEC_FULL.md` §4.3.13-15.

use std::str;

use chrono::{DateTime, FixedOffset};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case, take_while, take_while1},
    character::streaming::char,
    combinator::{map, map_res, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::{
    parser::{
        core::{
            astring_utf8, atom, is_astring_char, is_atom_char, nil, nstring, nstring_utf8,
            number, parenthesized_list, parenthesized_nonempty_list, paren_delimited, quoted_utf8,
            text,
        },
        rfc4551, rfc4731, rfc5161, x_gm_ext1, ParseResult,
    },
    token::Token,
    types::*,
};

pub mod body_structure;

fn is_tag_char(c: u8) -> bool {
    c != b'+' && is_astring_char(c)
}

fn status(i: &[u8]) -> IResult<&[u8], Status> {
    alt((
        map(tag_no_case("OK"), |_| Status::Ok),
        map(tag_no_case("NO"), |_| Status::No),
        map(tag_no_case("BAD"), |_| Status::Bad),
        map(tag_no_case("PREAUTH"), |_| Status::PreAuth),
        map(tag_no_case("BYE"), |_| Status::Bye),
    ))(i)
}

/// Mailbox name, per `SPEC_FULL.md` §4.3.10: parsed as astring, then `INBOX` is normalized to its
/// canonical uppercase spelling regardless of how the server cased it. Any other name passes
/// through unchanged (raw bytes, no modified-UTF-7 decoding, per the crate-level Non-goal).
fn mailbox(i: &[u8]) -> IResult<&[u8], String> {
    map(astring_utf8, |s| {
        if s.eq_ignore_ascii_case("INBOX") {
            "INBOX".to_string()
        } else {
            s
        }
    })(i)
}

fn flag_extension(i: &[u8]) -> IResult<&[u8], String> {
    map_res(
        recognize(pair(tag(b"\\"), take_while(is_atom_char))),
        |b: &[u8]| str::from_utf8(b).map(str::to_string),
    )(i)
}

fn flag(i: &[u8]) -> IResult<&[u8], String> {
    alt((flag_extension, map(atom, str::to_string)))(i)
}

fn flag_list(i: &[u8]) -> IResult<&[u8], Vec<String>> {
    parenthesized_list(flag)(i)
}

fn resp_text_code_alert(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    map(tag_no_case(b"ALERT"), |_| ResponseCode::Alert)(i)
}

fn resp_text_code_parse(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    map(tag_no_case(b"PARSE"), |_| ResponseCode::Parse)(i)
}

fn resp_text_code_read_only(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    map(tag_no_case(b"READ-ONLY"), |_| ResponseCode::ReadOnly)(i)
}

fn resp_text_code_read_write(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    map(tag_no_case(b"READ-WRITE"), |_| ResponseCode::ReadWrite)(i)
}

fn resp_text_code_try_create(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    map(tag_no_case(b"TRYCREATE"), |_| ResponseCode::TryCreate)(i)
}

fn resp_text_code_uid_validity(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    map(
        preceded(tag_no_case(b"UIDVALIDITY "), number),
        ResponseCode::UidValidity,
    )(i)
}

fn resp_text_code_uid_next(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    map(
        preceded(tag_no_case(b"UIDNEXT "), number),
        ResponseCode::UidNext,
    )(i)
}

fn resp_text_code_unseen(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    map(
        preceded(tag_no_case(b"UNSEEN "), number),
        ResponseCode::Unseen,
    )(i)
}

/// Any bracketed code this parser doesn't special-case, e.g. `BADCHARSET` or `PERMANENTFLAGS`:
/// kept as a raw atom plus its optional raw argument text rather than dropped.
fn resp_text_code_other(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    map(
        pair(
            atom,
            opt(preceded(
                char(' '),
                map_res(
                    take_while(|c: u8| c != b']' && c != b'\r' && c != b'\n'),
                    |b: &[u8]| str::from_utf8(b).map(str::to_string),
                ),
            )),
        ),
        |(code, args)| ResponseCode::Other(code.to_string(), args),
    )(i)
}

/// `[` CODE-atom (SP code-args)? `]`. Known codes get typed payloads; anything else falls
/// through to [`ResponseCode::Other`] as a raw atom plus raw text, per `SPEC_FULL.md` §4.3.11.
fn resp_text_code(i: &[u8]) -> IResult<&[u8], ResponseCode> {
    delimited(
        tag(b"["),
        alt((
            resp_text_code_alert,
            resp_text_code_parse,
            resp_text_code_uid_validity,
            resp_text_code_uid_next,
            resp_text_code_unseen,
            resp_text_code_read_only,
            resp_text_code_read_write,
            resp_text_code_try_create,
            rfc4551::resp_text_code_highest_mod_seq,
            resp_text_code_other,
        )),
        tag(b"]"),
    )(i)
}

/// `["[" resp-text-code "]" SP] text`.
///
/// Gmail quirk (`SPEC_FULL.md` §4.3.11, §9 Open Question #3): some servers emit `[CODE]` with no
/// trailing space or text at all, rather than the RFC's mandatory `SP text`. This is tolerated
/// explicitly: the separating space is optional, not required, whenever a code was present.
fn resp_text(i: &[u8]) -> IResult<&[u8], (Option<ResponseCode>, Option<String>)> {
    let (i, code) = opt(resp_text_code)(i)?;
    let (i, _) = if code.is_some() {
        opt(char(' '))(i)?
    } else {
        (i, None)
    };
    let (i, information) = text(i)?;
    let information = if information.is_empty() {
        None
    } else {
        Some(information)
    };
    Ok((i, (code, information)))
}

fn capability(i: &[u8]) -> IResult<&[u8], Capability> {
    alt((
        map(tag_no_case("IMAP4rev1"), |_| Capability::Imap4rev1),
        map(preceded(tag_no_case("AUTH="), atom), |s: &str| {
            Capability::Auth(s.to_string())
        }),
        map(atom, |s: &str| Capability::Atom(s.to_string())),
    ))(i)
}

fn capability_data(i: &[u8]) -> IResult<&[u8], Vec<Capability>> {
    preceded(tag_no_case("CAPABILITY"), many0(preceded(char(' '), capability)))(i)
}

fn resp_capability(i: &[u8]) -> IResult<&[u8], Response> {
    map(capability_data, Response::Capabilities)(i)
}

fn resp_enabled_dispatch(i: &[u8]) -> IResult<&[u8], Response> {
    preceded(tag_no_case("ENABLED"), rfc5161::resp_enabled)(i)
}

fn mailbox_data_search(i: &[u8]) -> IResult<&[u8], Response> {
    map(
        preceded(tag_no_case("SEARCH"), many0(preceded(char(' '), number))),
        |ids| Response::MailboxData(MailboxDatum::Search(ids)),
    )(i)
}

fn mailbox_data_esearch(i: &[u8]) -> IResult<&[u8], Response> {
    map(
        preceded(tag_no_case("ESEARCH"), rfc4731::esearch_response),
        |es| Response::MailboxData(MailboxDatum::Esearch(es)),
    )(i)
}

fn mailbox_data_flags(i: &[u8]) -> IResult<&[u8], Response> {
    map(preceded(tag_no_case("FLAGS "), flag_list), |flags| {
        Response::MailboxData(MailboxDatum::Flags(flags))
    })(i)
}

fn mailbox_data_exists(i: &[u8]) -> IResult<&[u8], Response> {
    map(terminated(number, tag_no_case(" EXISTS")), |num| {
        Response::MailboxData(MailboxDatum::Exists(num))
    })(i)
}

fn mailbox_data_recent(i: &[u8]) -> IResult<&[u8], Response> {
    map(terminated(number, tag_no_case(" RECENT")), |num| {
        Response::MailboxData(MailboxDatum::Recent(num))
    })(i)
}

/// `mailbox-list = "(" [flag-list] ")" SP (DQUOTE delim DQUOTE / nil) SP mailbox`.
fn mailbox_list(i: &[u8]) -> IResult<&[u8], MailboxList> {
    map(
        tuple((
            flag_list,
            char(' '),
            alt((map(quoted_utf8, Some), map(nil, |_| None))),
            char(' '),
            mailbox,
        )),
        |(flags, _, delimiter, _, mailbox)| MailboxList {
            flags,
            delimiter,
            mailbox,
        },
    )(i)
}

fn mailbox_data_list(i: &[u8]) -> IResult<&[u8], Response> {
    map(preceded(tag_no_case("LIST "), mailbox_list), |list| {
        Response::MailboxData(MailboxDatum::List(list))
    })(i)
}

fn mailbox_data_lsub(i: &[u8]) -> IResult<&[u8], Response> {
    map(preceded(tag_no_case("LSUB "), mailbox_list), |list| {
        Response::MailboxData(MailboxDatum::List(list))
    })(i)
}

fn status_att(i: &[u8]) -> IResult<&[u8], (Token, u64)> {
    alt((
        rfc4551::status_att_val_highest_mod_seq,
        map(preceded(tag_no_case("MESSAGES "), number), |n| {
            (Token::Messages, n)
        }),
        map(preceded(tag_no_case("RECENT "), number), |n| {
            (Token::Recent, n)
        }),
        map(preceded(tag_no_case("UIDNEXT "), number), |n| {
            (Token::UidNext, n)
        }),
        map(preceded(tag_no_case("UIDVALIDITY "), number), |n| {
            (Token::UidValidity, n)
        }),
        map(preceded(tag_no_case("UNSEEN "), number), |n| {
            (Token::Unseen, n)
        }),
    ))(i)
}

fn status_att_list(i: &[u8]) -> IResult<&[u8], Vec<(Token, u64)>> {
    parenthesized_nonempty_list(status_att)(i)
}

fn mailbox_data_status(i: &[u8]) -> IResult<&[u8], Response> {
    map(
        tuple((tag_no_case("STATUS "), mailbox, char(' '), status_att_list)),
        |(_, mailbox, _, attrs)| {
            Response::MailboxData(MailboxDatum::Status(MailboxStatus {
                mailbox,
                attributes: attrs.into_iter().collect(),
            }))
        },
    )(i)
}

fn mailbox_data(i: &[u8]) -> IResult<&[u8], Response> {
    alt((
        mailbox_data_flags,
        mailbox_data_exists,
        mailbox_data_list,
        mailbox_data_lsub,
        mailbox_data_status,
        mailbox_data_recent,
        mailbox_data_esearch,
        mailbox_data_search,
    ))(i)
}

/// `address = "(" addr-name SP addr-adl SP addr-mailbox SP addr-host ")"`. Fields are raw bytes,
/// never UTF-8 validated: header field bodies may carry arbitrary charset-encoded octets.
fn address(i: &[u8]) -> IResult<&[u8], Address> {
    paren_delimited(map(
        tuple((
            nstring,
            char(' '),
            nstring,
            char(' '),
            nstring,
            char(' '),
            nstring,
        )),
        |(name, _, adl, _, mailbox, _, host)| Address {
            name,
            adl,
            mailbox,
            host,
        },
    ))(i)
}

fn opt_addresses(i: &[u8]) -> IResult<&[u8], Option<Vec<Address>>> {
    alt((
        map(nil, |_| None),
        map(
            paren_delimited(nom::multi::many1(terminated(address, opt(char(' '))))),
            Some,
        ),
    ))(i)
}

/// RFC 5322 date parsing for ENVELOPE's `date` field. Failure yields an absent date rather than a
/// parse error for the whole envelope: historic servers (and the legacy runtime-library bug the
/// original source worked around) emit dates this parser can't make sense of, and the crate must
/// tolerate that rather than abort the line (`SPEC_FULL.md` §9 Open Question #2).
fn envelope_date(i: &[u8]) -> IResult<&[u8], Option<DateTime<FixedOffset>>> {
    map(nstring_utf8, |s| {
        s.and_then(|s| DateTime::parse_from_rfc2822(&s).ok())
    })(i)
}

pub(crate) fn envelope(i: &[u8]) -> IResult<&[u8], Envelope> {
    paren_delimited(map(
        tuple((
            envelope_date,
            char(' '),
            nstring,
            char(' '),
            opt_addresses,
            char(' '),
            opt_addresses,
            char(' '),
            opt_addresses,
            char(' '),
            opt_addresses,
            char(' '),
            opt_addresses,
            char(' '),
            opt_addresses,
            char(' '),
            nstring,
            char(' '),
            nstring,
        )),
        |(
            date,
            _,
            subject,
            _,
            from,
            _,
            sender,
            _,
            reply_to,
            _,
            to,
            _,
            cc,
            _,
            bcc,
            _,
            in_reply_to,
            _,
            message_id,
        )| Envelope {
            date,
            subject,
            from,
            sender,
            reply_to,
            to,
            cc,
            bcc,
            in_reply_to,
            message_id,
        },
    ))(i)
}

/// `"d-mmm-yyyy HH:MM:SS +HHMM"`, the one and only format INTERNALDATE may take. Unlike
/// [`envelope_date`], a mismatch here is a fatal parse error: there is no historical leniency
/// requirement for this field (`SPEC_FULL.md` §4.3.7).
fn internal_date(i: &[u8]) -> IResult<&[u8], DateTime<FixedOffset>> {
    let (i, s) = quoted_utf8(i)?;
    let parsed = DateTime::parse_from_str(&s, "%d-%b-%Y %H:%M:%S %z")
        .or_else(|_| DateTime::parse_from_str(&s, "%e-%b-%Y %H:%M:%S %z"));
    match parsed {
        Ok(dt) => Ok((i, dt)),
        Err(_) => Err(nom::Err::Failure((i, nom::error::ErrorKind::Verify))),
    }
}

/// One `item SP value` pair from a FETCH `msg-att` list, or a `BODY[section]` sub-item. The
/// latter is kept out of the ordinary attribute map: see `Fetch::body_sections` in `types.rs` and
/// `SPEC_FULL.md` §9's resolution of the synthetic-token open question.
enum MsgAttItem {
    Attr(Token, AttributeValue),
    BodySection(String, BodySectionData),
}

fn msg_att_envelope(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    map(preceded(tag_no_case("ENVELOPE "), envelope), |envelope| {
        (Token::Envelope, AttributeValue::Envelope(Box::new(envelope)))
    })(i)
}

fn msg_att_internal_date(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    map(
        preceded(tag_no_case("INTERNALDATE "), internal_date),
        |date| (Token::InternalDate, AttributeValue::InternalDate(date)),
    )(i)
}

fn msg_att_flags(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    map(preceded(tag_no_case("FLAGS "), flag_list), |flags| {
        (Token::Flags, AttributeValue::Flags(flags))
    })(i)
}

fn msg_att_rfc822(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    map(preceded(tag_no_case("RFC822 "), nstring), |raw| {
        (Token::Rfc822, AttributeValue::Rfc822(raw))
    })(i)
}

fn msg_att_rfc822_header(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    map(preceded(tag_no_case("RFC822.HEADER "), nstring), |raw| {
        (Token::Rfc822Header, AttributeValue::Rfc822Header(raw))
    })(i)
}

fn msg_att_rfc822_size(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    map(preceded(tag_no_case("RFC822.SIZE "), number), |size| {
        (Token::Rfc822Size, AttributeValue::Rfc822Size(size))
    })(i)
}

fn msg_att_rfc822_text(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    map(preceded(tag_no_case("RFC822.TEXT "), nstring), |raw| {
        (Token::Rfc822Text, AttributeValue::Rfc822Text(raw))
    })(i)
}

fn msg_att_uid(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    map(preceded(tag_no_case("UID "), number), |uid| {
        (Token::Uid, AttributeValue::Uid(uid))
    })(i)
}

fn msg_att_mod_seq(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    map(rfc4551::msg_att_mod_seq, |v| (Token::ModSeq, v))(i)
}

fn msg_att_x_gm_msgid(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    map(x_gm_ext1::msg_att_x_gm_msgid, |v| (Token::XGmMsgid, v))(i)
}

/// `"BODYSTRUCTURE" SP body` or `"BODY" SP body` (no `[`, which [`msg_att_body_section`] handles
/// instead). Both keywords produce the same [`BodyStructure`] tree; the token recorded reflects
/// whichever keyword the server actually sent.
fn msg_att_body_structure(i: &[u8]) -> IResult<&[u8], (Token, AttributeValue)> {
    alt((
        map(
            preceded(tag_no_case("BODYSTRUCTURE "), body_structure::body),
            |b| (Token::BodyStructure, AttributeValue::BodyStructure(b)),
        ),
        map(preceded(tag_no_case("BODY "), body_structure::body), |b| {
            (Token::Body, AttributeValue::BodyStructure(b))
        }),
    ))(i)
}

/// `"BODY" section ["<" number ">"] SP nstring`, where `section = "[" *CHAR8-except-']' "]"`.
/// Unlike every other FETCH item, `BODY` is not followed by a space before its payload starts:
/// the section spec immediately follows the keyword. The section text is kept opaque (not parsed
/// further) per `SPEC_FULL.md` §4.3.5.
fn msg_att_body_section(i: &[u8]) -> IResult<&[u8], MsgAttItem> {
    let (i, _) = tag_no_case("BODY")(i)?;
    let (i, section) = delimited(
        char('['),
        map_res(take_while(|c| c != b']'), |b: &[u8]| {
            str::from_utf8(b).map(str::to_string)
        }),
        char(']'),
    )(i)?;
    let (i, origin) = opt(delimited(char('<'), number, char('>')))(i)?;
    let (i, _) = char(' ')(i)?;
    let (i, content) = nstring(i)?;
    Ok((
        i,
        MsgAttItem::BodySection(section, BodySectionData { content, origin }),
    ))
}

fn msg_att_item(i: &[u8]) -> IResult<&[u8], MsgAttItem> {
    alt((
        msg_att_body_section,
        map(msg_att_body_structure, |(t, v)| MsgAttItem::Attr(t, v)),
        map(msg_att_envelope, |(t, v)| MsgAttItem::Attr(t, v)),
        map(msg_att_internal_date, |(t, v)| MsgAttItem::Attr(t, v)),
        map(msg_att_flags, |(t, v)| MsgAttItem::Attr(t, v)),
        map(msg_att_mod_seq, |(t, v)| MsgAttItem::Attr(t, v)),
        map(msg_att_rfc822, |(t, v)| MsgAttItem::Attr(t, v)),
        map(msg_att_rfc822_header, |(t, v)| MsgAttItem::Attr(t, v)),
        map(msg_att_rfc822_size, |(t, v)| MsgAttItem::Attr(t, v)),
        map(msg_att_rfc822_text, |(t, v)| MsgAttItem::Attr(t, v)),
        map(msg_att_uid, |(t, v)| MsgAttItem::Attr(t, v)),
        map(msg_att_x_gm_msgid, |(t, v)| MsgAttItem::Attr(t, v)),
    ))(i)
}

fn msg_att_list(i: &[u8]) -> IResult<&[u8], Vec<MsgAttItem>> {
    parenthesized_nonempty_list(msg_att_item)(i)
}

fn message_data_fetch(i: &[u8]) -> IResult<&[u8], Response> {
    map(
        tuple((number, tag_no_case(" FETCH "), msg_att_list)),
        |(message, _, items)| {
            let mut fetch = Fetch {
                message,
                ..Fetch::default()
            };
            for item in items {
                match item {
                    MsgAttItem::Attr(token, value) => {
                        fetch.attributes.insert(token, value);
                    }
                    MsgAttItem::BodySection(section, data) => {
                        fetch.body_sections.insert(section, data);
                    }
                }
            }
            Response::Fetch(fetch)
        },
    )(i)
}

fn message_data_expunge(i: &[u8]) -> IResult<&[u8], Response> {
    map(terminated(number, tag_no_case(" EXPUNGE")), Response::Expunge)(i)
}

fn imap_tag(i: &[u8]) -> IResult<&[u8], RequestId> {
    map(map_res(take_while1(is_tag_char), str::from_utf8), |s| {
        RequestId(s.to_string())
    })(i)
}

fn continue_req(i: &[u8]) -> IResult<&[u8], Response> {
    // Some servers do not send the space :/
    map(
        tuple((tag("+"), opt(char(' ')), resp_text, tag("\r\n"))),
        |(_, _, (code, information), _)| Response::Continue { code, information },
    )(i)
}

fn response_tagged(i: &[u8]) -> IResult<&[u8], Response> {
    map(
        tuple((imap_tag, char(' '), status, char(' '), resp_text, tag("\r\n"))),
        |(tag, _, status, _, (code, information), _)| Response::Done {
            tag,
            status,
            code,
            information,
        },
    )(i)
}

fn resp_cond(i: &[u8]) -> IResult<&[u8], Response> {
    map(
        tuple((status, char(' '), resp_text)),
        |(status, _, (code, information))| Response::Data {
            status,
            code,
            information,
        },
    )(i)
}

fn response_data(i: &[u8]) -> IResult<&[u8], Response> {
    delimited(
        tag("* "),
        alt((
            resp_cond,
            mailbox_data,
            message_data_expunge,
            message_data_fetch,
            resp_capability,
            resp_enabled_dispatch,
        )),
        tag("\r\n"),
    )(i)
}

pub(crate) fn response(i: &[u8]) -> ParseResult {
    alt((continue_req, response_data, response_tagged))(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    #[test]
    fn test_inbox_case_normalization() {
        for candidate in ["inbox", "Inbox", "INBOX"] {
            let (_, mb) = mailbox(format!("{} ", candidate).as_bytes()).unwrap();
            assert_eq!(mb, "INBOX");
        }
    }

    #[test]
    fn test_list() {
        match response(b"* LIST (\\HasNoChildren) \".\" INBOX.Tests\r\n") {
            Ok((_, Response::MailboxData(MailboxDatum::List(list)))) => {
                assert_eq!(list.mailbox, "INBOX.Tests");
                assert_eq!(list.delimiter.as_deref(), Some("."));
                assert_eq!(list.flags, vec!["\\HasNoChildren"]);
            }
            rsp => panic!("unexpected response {:?}", rsp),
        }
    }

    #[test]
    fn test_envelope() {
        let env = br#"ENVELOPE ("Wed, 17 Jul 1996 02:23:25 -0700 (PDT)" "IMAP4rev1 WG mtg summary and minutes" (("Terry Gray" NIL "gray" "cac.washington.edu")) (("Terry Gray" NIL "gray" "cac.washington.edu")) (("Terry Gray" NIL "gray" "cac.washington.edu")) ((NIL NIL "imap" "cac.washington.edu")) ((NIL NIL "minutes" "CNRI.Reston.VA.US") ("John Klensin" NIL "KLENSIN" "MIT.EDU")) NIL NIL "<B27397-0100000@cac.washington.edu>") "#;
        match msg_att_envelope(env) {
            Ok((_, (Token::Envelope, AttributeValue::Envelope(_)))) => {}
            rsp => panic!("unexpected response {:?}", rsp),
        }
    }

    #[test]
    fn test_opt_addresses() {
        let addr = b"((NIL NIL \"minutes\" \"CNRI.Reston.VA.US\") (\"John Klensin\" NIL \"KLENSIN\" \"MIT.EDU\")) ";
        match opt_addresses(addr) {
            Ok((_, Some(addresses))) => assert_eq!(addresses.len(), 2),
            rsp => panic!("unexpected response {:?}", rsp),
        }
    }

    #[test]
    fn test_addresses() {
        match address(b"(\"John Klensin\" NIL \"KLENSIN\" \"MIT.EDU\") ") {
            Ok((_, _address)) => {}
            rsp => panic!("unexpected response {:?}", rsp),
        }

        // Literal non-UTF8 address: the `name` field may carry raw charset-encoded bytes.
        match address(b"({12}\r\nJoh\xff Klensin NIL \"KLENSIN\" \"MIT.EDU\") ") {
            Ok((_, _address)) => {}
            rsp => panic!("unexpected response {:?}", rsp),
        }
    }

    #[test]
    fn test_capability_data() {
        assert_eq!(
            capability_data(b"CAPABILITY IMAP4rev1\r\n").unwrap().1,
            vec![Capability::Imap4rev1]
        );
        assert_eq!(
            capability_data(b"CAPABILITY XPIG-LATIN IMAP4rev1 STARTTLS AUTH=GSSAPI\r\n")
                .unwrap()
                .1,
            vec![
                Capability::Atom("XPIG-LATIN".to_string()),
                Capability::Imap4rev1,
                Capability::Atom("STARTTLS".to_string()),
                Capability::Auth("GSSAPI".to_string()),
            ]
        );
    }

    #[test]
    fn test_fetch_uid_and_size() {
        match response(b"* 12 FETCH (UID 4827 RFC822.SIZE 44827)\r\n") {
            Ok((_, Response::Fetch(fetch))) => {
                assert_eq!(fetch.message, 12);
                assert_eq!(
                    fetch.attributes.get(&Token::Uid),
                    Some(&AttributeValue::Uid(4827))
                );
                assert_eq!(
                    fetch.attributes.get(&Token::Rfc822Size),
                    Some(&AttributeValue::Rfc822Size(44827))
                );
            }
            rsp => panic!("unexpected response {:?}", rsp),
        }
    }

    #[test]
    fn test_fetch_body_section() {
        match response(b"* 3 FETCH (BODY[TEXT]<0> {5}\r\nhello)\r\n") {
            Ok((_, Response::Fetch(fetch))) => {
                let data = fetch.body_sections.get("TEXT").unwrap();
                assert_eq!(data.content.as_deref(), Some(&b"hello"[..]));
                assert_eq!(data.origin, Some(0));
            }
            rsp => panic!("unexpected response {:?}", rsp),
        }
    }

    #[test]
    fn test_status() {
        match response(b"* STATUS blurdybloop (MESSAGES 231 UIDNEXT 44292)\r\n") {
            Ok((_, Response::MailboxData(MailboxDatum::Status(status)))) => {
                assert_eq!(status.mailbox, "blurdybloop");
                assert_eq!(status.attributes.get(&Token::Messages), Some(&231));
                assert_eq!(status.attributes.get(&Token::UidNext), Some(&44292));
            }
            rsp => panic!("unexpected response {:?}", rsp),
        }
    }

    #[test]
    fn test_internal_date_bad_format_is_fatal() {
        assert!(internal_date(br#""not a date""#).is_err());
    }

    #[test]
    fn test_resp_text_code_gmail_no_trailing_text() {
        match response(b"* OK [CAPABILITY IMAP4rev1]\r\n") {
            Ok((_, Response::Data { code, information, .. })) => {
                assert_eq!(
                    code,
                    Some(ResponseCode::Other("CAPABILITY".to_string(), Some("IMAP4rev1".to_string())))
                );
                assert_eq!(information, None);
            }
            rsp => panic!("unexpected response {:?}", rsp),
        }
    }
}
