//! The closed IMAP keyword vocabulary this parser understands, as a dispatchable enum.
//!
//! Grounded in `imap4/parser/parser.c`'s `imap4_token()` / `tokens.h` scheme in the original
//! source: a byte span is looked up against a fixed keyword set and turned into a small,
//! hashable identifier. The rewrite keeps the identifier contract (round-trips to its canonical
//! spelling, usable as a map key and a `match` discriminant) but drops the integer encoding in
//! favor of a real enum, per the redesign note in `SPEC_FULL.md` §9.

/// One recognised IMAP keyword.
///
/// Variants are grouped by the grammar position they appear in (response kind, FETCH item,
/// ESEARCH return, STATUS item, resp-text code) even though several keywords are reused across
/// more than one position (e.g. `UID` is both a FETCH item and an ESEARCH return flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    // response-cond-state / response-cond-auth / response-cond-bye
    Ok,
    No,
    Bad,
    PreAuth,
    Bye,

    // capability / enable
    Capability,
    Enabled,

    // mailbox-data
    Flags,
    List,
    Lsub,
    Search,
    Esearch,
    Status,

    // message-data
    Exists,
    Expunge,
    Recent,
    Fetch,

    // FETCH items
    Body,
    BodyStructure,
    Envelope,
    InternalDate,
    ModSeq,
    Rfc822,
    Rfc822Header,
    Rfc822Text,
    Rfc822Size,
    Uid,
    XGmMsgid,

    // ESEARCH return items (Min/Max/Count/Uid overlap with the above groups)
    Min,
    Max,
    All,
    Count,

    // STATUS items (Messages/Recent/UidNext/UidValidity/Unseen; Recent overlaps message-data)
    Messages,
    UidNext,
    UidValidity,
    Unseen,

    // resp-text codes (HighestModSeq/UidNext/UidValidity/Unseen overlap with STATUS items)
    Alert,
    Parse,
    ReadOnly,
    ReadWrite,
    TryCreate,
    HighestModSeq,
}

impl Token {
    /// The canonical wire spelling for this token, as IMAP servers send it.
    pub fn as_str(self) -> &'static str {
        match self {
            Token::Ok => "OK",
            Token::No => "NO",
            Token::Bad => "BAD",
            Token::PreAuth => "PREAUTH",
            Token::Bye => "BYE",
            Token::Capability => "CAPABILITY",
            Token::Enabled => "ENABLED",
            Token::Flags => "FLAGS",
            Token::List => "LIST",
            Token::Lsub => "LSUB",
            Token::Search => "SEARCH",
            Token::Esearch => "ESEARCH",
            Token::Status => "STATUS",
            Token::Exists => "EXISTS",
            Token::Expunge => "EXPUNGE",
            Token::Recent => "RECENT",
            Token::Fetch => "FETCH",
            Token::Body => "BODY",
            Token::BodyStructure => "BODYSTRUCTURE",
            Token::Envelope => "ENVELOPE",
            Token::InternalDate => "INTERNALDATE",
            Token::ModSeq => "MODSEQ",
            Token::Rfc822 => "RFC822",
            Token::Rfc822Header => "RFC822.HEADER",
            Token::Rfc822Text => "RFC822.TEXT",
            Token::Rfc822Size => "RFC822.SIZE",
            Token::Uid => "UID",
            Token::XGmMsgid => "X-GM-MSGID",
            Token::Min => "MIN",
            Token::Max => "MAX",
            Token::All => "ALL",
            Token::Count => "COUNT",
            Token::Messages => "MESSAGES",
            Token::UidNext => "UIDNEXT",
            Token::UidValidity => "UIDVALIDITY",
            Token::Unseen => "UNSEEN",
            Token::Alert => "ALERT",
            Token::Parse => "PARSE",
            Token::ReadOnly => "READ-ONLY",
            Token::ReadWrite => "READ-WRITE",
            Token::TryCreate => "TRYCREATE",
            Token::HighestModSeq => "HIGHESTMODSEQ",
        }
    }

    /// Look up a byte span (as produced by the `token` production in `core`) against the closed
    /// keyword set. Matching is ASCII case-insensitive, per IMAP convention.
    pub fn recognize(bytes: &[u8]) -> Option<Token> {
        const TABLE: &[(&str, Token)] = &[
            ("OK", Token::Ok),
            ("NO", Token::No),
            ("BAD", Token::Bad),
            ("PREAUTH", Token::PreAuth),
            ("BYE", Token::Bye),
            ("CAPABILITY", Token::Capability),
            ("ENABLED", Token::Enabled),
            ("FLAGS", Token::Flags),
            ("LIST", Token::List),
            ("LSUB", Token::Lsub),
            ("SEARCH", Token::Search),
            ("ESEARCH", Token::Esearch),
            ("STATUS", Token::Status),
            ("EXISTS", Token::Exists),
            ("EXPUNGE", Token::Expunge),
            ("RECENT", Token::Recent),
            ("FETCH", Token::Fetch),
            ("BODY", Token::Body),
            ("BODYSTRUCTURE", Token::BodyStructure),
            ("ENVELOPE", Token::Envelope),
            ("INTERNALDATE", Token::InternalDate),
            ("MODSEQ", Token::ModSeq),
            ("RFC822", Token::Rfc822),
            ("RFC822.HEADER", Token::Rfc822Header),
            ("RFC822.TEXT", Token::Rfc822Text),
            ("RFC822.SIZE", Token::Rfc822Size),
            ("UID", Token::Uid),
            ("X-GM-MSGID", Token::XGmMsgid),
            ("MIN", Token::Min),
            ("MAX", Token::Max),
            ("ALL", Token::All),
            ("COUNT", Token::Count),
            ("MESSAGES", Token::Messages),
            ("UIDNEXT", Token::UidNext),
            ("UIDVALIDITY", Token::UidValidity),
            ("UNSEEN", Token::Unseen),
            ("ALERT", Token::Alert),
            ("PARSE", Token::Parse),
            ("READ-ONLY", Token::ReadOnly),
            ("READ-WRITE", Token::ReadWrite),
            ("TRYCREATE", Token::TryCreate),
            ("HIGHESTMODSEQ", Token::HighestModSeq),
        ];
        TABLE
            .iter()
            .find(|(name, _)| name.as_bytes().eq_ignore_ascii_case(bytes))
            .map(|(_, token)| *token)
    }
}

#[cfg(test)]
mod tests {
    use super::Token;

    #[test]
    fn recognizes_case_insensitively() {
        assert_eq!(Token::recognize(b"fetch"), Some(Token::Fetch));
        assert_eq!(Token::recognize(b"FETCH"), Some(Token::Fetch));
        assert_eq!(Token::recognize(b"FeTcH"), Some(Token::Fetch));
    }

    #[test]
    fn rejects_unknown_keywords() {
        assert_eq!(Token::recognize(b"NOTAREALTOKEN"), None);
    }

    #[test]
    fn round_trips_through_as_str() {
        for (name, token) in [
            ("RFC822.SIZE", Token::Rfc822Size),
            ("X-GM-MSGID", Token::XGmMsgid),
            ("READ-ONLY", Token::ReadOnly),
        ] {
            assert_eq!(Token::recognize(name.as_bytes()), Some(token));
            assert_eq!(token.as_str(), name);
        }
    }
}
