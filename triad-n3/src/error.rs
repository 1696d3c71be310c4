//! Error types for N3 parsing
//!
//! Every error aborts the parse immediately: there is no statement-level
//! recovery, and no partial graph is handed back to the caller.

use triad_graph::TermError;

/// Error type for N3 parsing operations
#[derive(Debug, thiserror::Error)]
pub enum N3Error {
    /// Lexer error (invalid token)
    #[error("Lexer error at position {position}: {message}")]
    Lexer { position: usize, message: String },

    /// Parser error (unexpected token or invalid structure)
    #[error("Parse error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// Use of a prefix with no binding in scope
    #[error("Undefined prefix: {0}")]
    UnresolvedPrefix(String),

    /// A URI stayed relative after resolution, or contains control
    /// characters
    #[error("IRI resolution error: {0}")]
    RelativeUri(String),

    /// Typed literal whose lexical form fails its datatype's grammar
    #[error("Typed literal has an invalid lexical value: <{datatype}> {value:?}")]
    InvalidLiteral { value: String, datatype: String },

    /// Non-resource term in predicate position
    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    /// Bare keyword use forbidden by the current keyword mode, or an
    /// unrecognized name in a `@keywords` directive
    #[error("Keyword error: {0}")]
    Keyword(String),

    /// `{ ... }` encountered while the target graph is not formula-aware
    #[error("Parse error at position {position}: quoted graphs are not supported by this graph")]
    FormulaUnsupported { position: usize },
}

impl N3Error {
    /// Create a syntax error
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }
}

impl From<TermError> for N3Error {
    fn from(err: TermError) -> Self {
        match err {
            TermError::RelativeUri(_) | TermError::ControlCharacters(_) => {
                N3Error::RelativeUri(err.to_string())
            }
            TermError::InvalidLiteral { value, datatype } => {
                N3Error::InvalidLiteral { value, datatype }
            }
            TermError::InvalidPredicate(term) => N3Error::InvalidPredicate(term),
            other => N3Error::Syntax {
                position: 0,
                message: other.to_string(),
            },
        }
    }
}

/// Result type for N3 operations
pub type Result<T> = std::result::Result<T, N3Error>;
