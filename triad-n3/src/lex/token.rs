//! N3 token types.
//!
//! Tokens are the output of lexical analysis, ready for parsing. Numeric
//! tokens keep the exact lexical text (sign and exponent verbatim): the
//! literal a number desugars to must preserve the text as written.

use std::sync::Arc;

/// A token with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The token kind
    pub kind: TokenKind,
    /// Source location (start byte offset)
    pub start: usize,
    /// Source location (end byte offset)
    pub end: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Check if this is an EOF token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Token kinds for the N3 grammar.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// IRI reference: `<http://example.org/>` (possibly relative or empty)
    Iri(Arc<str>),

    /// Prefixed name `prefix:local`; either side may be empty
    PrefixedName {
        /// Namespace prefix (without colon)
        prefix: Arc<str>,
        /// Local name
        local: Arc<str>,
    },

    /// Labeled blank node: `_:name`
    BlankNodeLabel(Arc<str>),

    /// Bare word: `a`, `true`, `is`, `of`, `has`, or a free word whose
    /// meaning depends on the keyword mode
    Bareword(Arc<str>),

    /// `@word` that is not a directive: a language tag when adjacent to a
    /// string literal, an always-on keyword spelling (`@is`, `@of`, ...)
    /// otherwise
    AtWord(Arc<str>),

    /// Anonymous blank node: `[]`
    Anon,

    /// Empty collection: `()`
    Nil,

    /// String literal (unescaped content)
    String(Arc<str>),

    /// Integer literal, exact lexical text
    Integer(Arc<str>),

    /// Decimal literal, exact lexical text
    Decimal(Arc<str>),

    /// Double literal, exact lexical text
    Double(Arc<str>),

    /// `@prefix` directive
    KwPrefix,
    /// `@base` directive
    KwBase,
    /// `@keywords` directive
    KwKeywords,
    /// `@forAll` directive
    KwForAll,
    /// `@forSome` directive
    KwForSome,

    /// `.` terminating a statement
    Dot,
    /// `.` directly followed by a name: forward path operator
    PathDot,
    /// `!` forward path operator
    Bang,
    /// `^` reverse path operator
    Caret,
    /// `^^` datatype marker
    DoubleCaret,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{` (formula open)
    LBrace,
    /// `}` (formula close)
    RBrace,
    /// `=` (owl:sameAs shorthand)
    Equals,
    /// `=>` (log:implies shorthand)
    Implies,
    /// `<=` (inverse log:implies shorthand)
    ImpliedBy,

    /// End of input
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Iri(s) => write!(f, "<{}>", s),
            TokenKind::PrefixedName { prefix, local } => write!(f, "{}:{}", prefix, local),
            TokenKind::BlankNodeLabel(s) => write!(f, "_:{}", s),
            TokenKind::Bareword(s) => write!(f, "{}", s),
            TokenKind::AtWord(s) => write!(f, "@{}", s),
            TokenKind::Anon => write!(f, "[]"),
            TokenKind::Nil => write!(f, "()"),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Integer(s) => write!(f, "{}", s),
            TokenKind::Decimal(s) => write!(f, "{}", s),
            TokenKind::Double(s) => write!(f, "{}", s),
            TokenKind::KwPrefix => write!(f, "@prefix"),
            TokenKind::KwBase => write!(f, "@base"),
            TokenKind::KwKeywords => write!(f, "@keywords"),
            TokenKind::KwForAll => write!(f, "@forAll"),
            TokenKind::KwForSome => write!(f, "@forSome"),
            TokenKind::Dot | TokenKind::PathDot => write!(f, "."),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::DoubleCaret => write!(f, "^^"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::Equals => write!(f, "="),
            TokenKind::Implies => write!(f, "=>"),
            TokenKind::ImpliedBy => write!(f, "<="),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}
