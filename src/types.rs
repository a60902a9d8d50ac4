//! Structured IMAP4rev1 server response types.
//!
//! Shape and field names are grounded in `imap4/parser/types.c` from the original source, which
//! lays each response kind out as a flat named tuple. Where the original used "bytes or None"/
//! "str or None" duck typing and a free-form "mapping from type to type-specific data", this
//! rewrite uses real enums: `Option<Vec<u8>>` for an untyped nstring, `Option<String>` once UTF-8
//! has been validated, and `HashMap<Token, _>` keyed by the closed keyword set in [`crate::token`]
//! instead of a dynamically-typed dict.
//!
//! Every type here owns the bytes/text it retains rather than borrowing from the line it was
//! parsed out of (`SPEC_FULL.md` §5): a `Response` must be free to outlive the
//! [`crate::scanner::Scanner::get`] view it was built from, since a caller routinely wants to hold
//! on to (or hand off) a parsed response after the scanner's next `consume`/`feed` invalidates
//! that view.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::token::Token;

/// A request tag, e.g. the `a1` in `a1 LOGIN ...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

/// response-cond-state / response-cond-auth / response-cond-bye discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    No,
    Bad,
    PreAuth,
    Bye,
}

/// A capability string, as reported by `CAPABILITY` or a `[CAPABILITY ...]` resp-text-code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    Imap4rev1,
    Auth(String),
    Atom(String),
}

/// A single element of a sequence-set: either a lone message number/UID or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqItem {
    Single(u64),
    Range(u64, u64),
}

pub type SequenceSet = Vec<SeqItem>;

/// The bracketed code of a `resp-text`, if present.
///
/// Per the original source's `response_text_fields` comment, only these five carry no payload
/// and these four carry an integer; every other code (including ones this parser has never heard
/// of, such as `BADCHARSET` or `PERMANENTFLAGS`) is exposed generically via `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    Alert,
    Parse,
    ReadOnly,
    ReadWrite,
    TryCreate,
    HighestModSeq(u64),
    UidNext(u64),
    UidValidity(u64),
    Unseen(u64),
    /// An unrecognized or generic code, with its optional data as raw text.
    Other(String, Option<String>),
}

/// Address in ENVELOPE. Fields are `bytes or None` in the original: no UTF-8 validation is
/// performed since header field bodies may carry arbitrary charset-encoded octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub name: Option<Vec<u8>>,
    pub adl: Option<Vec<u8>>,
    pub mailbox: Option<Vec<u8>>,
    pub host: Option<Vec<u8>>,
}

/// ENVELOPE FETCH item.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// `None` both when the server sent NIL and when the date string failed to parse as
    /// RFC 2822 (a lenient client-side quirk; see `SPEC_FULL.md` §4.3.7).
    pub date: Option<DateTime<FixedOffset>>,
    pub subject: Option<Vec<u8>>,
    pub from: Option<Vec<Address>>,
    pub sender: Option<Vec<Address>>,
    pub reply_to: Option<Vec<Address>>,
    pub to: Option<Vec<Address>>,
    pub cc: Option<Vec<Address>>,
    pub bcc: Option<Vec<Address>>,
    pub in_reply_to: Option<Vec<u8>>,
    pub message_id: Option<Vec<u8>>,
}

/// `(type, params) or None` content-disposition, shared by every BODYSTRUCTURE variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disposition {
    pub kind: String,
    pub params: HashMap<String, String>,
}

/// One element of `body-extension`: a string, a number, or a nested parenthesized list of the
/// same. Extension data is forward-compatible filler that this parser doesn't interpret further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyExtensionValue {
    Str(Option<Vec<u8>>),
    Number(u64),
    List(Vec<BodyExtensionValue>),
}

/// BODYSTRUCTURE with a `text/*` media type.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBody {
    /// media type is always `"text"` and is not repeated here.
    pub subtype: String,
    pub params: HashMap<String, String>,
    pub id: Option<String>,
    pub description: Option<String>,
    pub encoding: String,
    pub size: u64,
    pub lines: u64,
    pub md5: Option<String>,
    pub disposition: Option<Disposition>,
    pub lang: Option<Vec<String>>,
    pub location: Option<String>,
    pub extension: Vec<BodyExtensionValue>,
}

/// BODYSTRUCTURE with a `message/rfc822` media type.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBody {
    /// media type/subtype are always `"message"`/`"rfc822"` and are not repeated here.
    pub params: HashMap<String, String>,
    pub id: Option<String>,
    pub description: Option<String>,
    pub encoding: String,
    pub size: u64,
    pub envelope: Box<Envelope>,
    pub body: Box<BodyStructure>,
    pub lines: u64,
    pub md5: Option<String>,
    pub disposition: Option<Disposition>,
    pub lang: Option<Vec<String>>,
    pub location: Option<String>,
    pub extension: Vec<BodyExtensionValue>,
}

/// Any other single-part BODYSTRUCTURE.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBody {
    pub media_type: String,
    pub subtype: String,
    pub params: HashMap<String, String>,
    pub id: Option<String>,
    pub description: Option<String>,
    pub encoding: String,
    pub size: u64,
    pub md5: Option<String>,
    pub disposition: Option<Disposition>,
    pub lang: Option<Vec<String>>,
    pub location: Option<String>,
    pub extension: Vec<BodyExtensionValue>,
}

/// BODYSTRUCTURE with a `multipart/*` media type.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    /// media type is always `"multipart"` and is not repeated here.
    pub subtype: String,
    pub parts: Vec<BodyStructure>,
    pub params: HashMap<String, String>,
    pub disposition: Option<Disposition>,
    pub lang: Option<Vec<String>>,
    pub location: Option<String>,
    pub extension: Vec<BodyExtensionValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyStructure {
    Text(TextBody),
    Message(MessageBody),
    Basic(BasicBody),
    Multipart(MultipartBody),
}

/// One `BODY[section]<origin>` FETCH result: the fetched bytes (`None` if the server sent NIL)
/// and the partial-fetch origin octet, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodySectionData {
    pub content: Option<Vec<u8>>,
    pub origin: Option<u64>,
}

/// A single FETCH attribute value, keyed by [`Token`] in [`Fetch::attributes`].
///
/// `BODY[section]` results are not part of this enum: they live in [`Fetch::body_sections`],
/// keyed by the literal section-specification text, since a message can carry any number of
/// differently-sectioned `BODY` results under one `FETCH` (see `SPEC_FULL.md` §3.7).
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    BodyStructure(BodyStructure),
    Envelope(Box<Envelope>),
    Flags(Vec<String>),
    /// A mismatch against the fixed IMAP date-time format is a fatal parse error rather than a
    /// lenient `None`, unlike ENVELOPE's `date` field; see `SPEC_FULL.md` §4.3.7.
    InternalDate(DateTime<FixedOffset>),
    Rfc822(Option<Vec<u8>>),
    Rfc822Header(Option<Vec<u8>>),
    Rfc822Text(Option<Vec<u8>>),
    Rfc822Size(u64),
    Uid(u64),
    /// CONDSTORE (RFC 4551).
    ModSeq(u64),
    /// X-GM-EXT1 (Gmail).
    XGmMsgid(u64),
}

/// FETCH response: one message's worth of attribute values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fetch {
    pub message: u64,
    pub attributes: HashMap<Token, AttributeValue>,
    pub body_sections: HashMap<String, BodySectionData>,
}

/// LIST or LSUB response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxList {
    pub flags: Vec<String>,
    pub delimiter: Option<String>,
    pub mailbox: String,
}

/// STATUS response: a mailbox name plus a map from STATUS item to its integer value. Every item
/// this parser knows (MESSAGES, RECENT, UIDNEXT, UIDVALIDITY, UNSEEN, and CONDSTORE's MODSEQ) is
/// non-negative and fits a `u64`, so one value type covers them all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxStatus {
    pub mailbox: String,
    pub attributes: HashMap<Token, u64>,
}

/// One ESEARCH `search-return-data` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EsearchReturnValue {
    Count(u64),
    Number(u64),
    All(SequenceSet),
}

/// ESEARCH response (RFC 4731 / RFC 4466).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Esearch {
    pub tag: Option<RequestId>,
    pub uid: bool,
    pub returned: HashMap<Token, EsearchReturnValue>,
}

/// mailbox-data: everything an untagged response can report about mailbox or search state.
#[derive(Debug, Clone, PartialEq)]
pub enum MailboxDatum {
    Flags(Vec<String>),
    List(MailboxList),
    Exists(u64),
    Recent(u64),
    Search(Vec<u64>),
    Esearch(Esearch),
    Status(MailboxStatus),
}

/// A parsed server response line: a continuation request, a tagged completion, or an untagged
/// status/data response.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// `+ ...`
    Continue {
        code: Option<ResponseCode>,
        information: Option<String>,
    },
    /// Tagged `status` response completing a command.
    Done {
        tag: RequestId,
        status: Status,
        code: Option<ResponseCode>,
        information: Option<String>,
    },
    /// Untagged `resp-cond-state`/`resp-cond-bye`.
    Data {
        status: Status,
        code: Option<ResponseCode>,
        information: Option<String>,
    },
    Capabilities(Vec<Capability>),
    /// ENABLE (RFC 5161): capabilities the server just turned on, in the order it sent them.
    Enabled(Vec<String>),
    MailboxData(MailboxDatum),
    Expunge(u64),
    Fetch(Fetch),
}
