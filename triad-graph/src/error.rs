//! Error types for term and graph construction

/// Error type for building terms, namespaces and triples
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    /// An absolute URI was required but the reference stayed relative
    #[error("<{0}> is a relative URI")]
    RelativeUri(String),

    /// URIs must not contain ASCII control characters
    #[error("URI '{0}' must not contain control characters")]
    ControlCharacters(String),

    /// Namespace prefix failed the NCName-like pattern
    #[error("invalid namespace prefix {0:?}")]
    InvalidPrefix(String),

    /// Typed literal whose lexical form does not satisfy its datatype
    #[error("Typed literal has an invalid lexical value: <{datatype}> {value:?}")]
    InvalidLiteral { value: String, datatype: String },

    /// Language tag failed the `[a-z]+(-[A-Za-z0-9]+)*` pattern
    #[error("invalid language tag {0:?}")]
    InvalidLanguageTag(String),

    /// Literal used in subject position
    #[error("literal {0} cannot be used as a triple subject")]
    InvalidSubject(String),

    /// Literal used in predicate position
    #[error("literal {0} cannot be used as a triple predicate")]
    InvalidPredicate(String),
}

/// Result type for term and graph operations
pub type Result<T> = std::result::Result<T, TermError>;
