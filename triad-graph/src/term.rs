//! RDF term types: IRI, blank node, and literal
//!
//! Terms are immutable once built: the parsers construct them during a
//! parse pass and never mutate them afterward.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermError};
use crate::iri::IriRef;
use triad_vocab::{rdfs, xsd};

/// Blank node identifier
///
/// Blank node labels have no meaning beyond the document that produced
/// them: two blank nodes are the same node only within one graph scope.
/// Machine-generated labels are `bnode0`, `bnode1`, ... in minting order;
/// user-supplied labels come from `_:name` syntax.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// Create a blank node ID from a label (without the `_:` prefix).
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Get the label (without `_:` prefix)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the full NTriples representation (`_:label`)
    pub fn to_ntriples(&self) -> String {
        format!("_:{}", self.0)
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// An RDF literal
///
/// Holds the lexical text exactly as written, plus at most one of a
/// language tag or a datatype IRI (the constructors make the combination
/// unrepresentable). Typed literals for the numeric XSD types and
/// `xsd:boolean` are validated against their lexical grammar at
/// construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    value: Arc<str>,
    language: Option<Arc<str>>,
    datatype: Option<IriRef>,
}

impl Literal {
    /// A plain literal with neither language tag nor datatype.
    pub fn plain(value: impl AsRef<str>) -> Self {
        Self {
            value: Arc::from(value.as_ref()),
            language: None,
            datatype: None,
        }
    }

    /// A language-tagged literal.
    pub fn with_language(value: impl AsRef<str>, language: &str) -> Result<Self> {
        if !valid_language_tag(language) {
            return Err(TermError::InvalidLanguageTag(language.to_string()));
        }
        Ok(Self {
            value: Arc::from(value.as_ref()),
            language: Some(Arc::from(language)),
            datatype: None,
        })
    }

    /// A typed literal.
    ///
    /// The lexical text must satisfy the datatype's lexical grammar for
    /// the validated datatypes (`xsd:integer`, `xsd:decimal`,
    /// `xsd:double`, `xsd:boolean`); other datatypes are accepted as-is.
    pub fn typed(value: impl AsRef<str>, datatype: IriRef) -> Result<Self> {
        let value = value.as_ref();
        if !valid_lexical(value, datatype.as_str()) {
            return Err(TermError::InvalidLiteral {
                value: value.to_string(),
                datatype: datatype.as_str().to_string(),
            });
        }
        Ok(Self {
            value: Arc::from(value),
            language: None,
            datatype: Some(datatype),
        })
    }

    /// An `rdfs:XMLLiteral`, keeping embedded markup verbatim.
    pub fn xml(value: impl AsRef<str>) -> Self {
        Self {
            value: Arc::from(value.as_ref()),
            language: None,
            // The XMLLiteral IRI is absolute and control-free by construction
            datatype: IriRef::new(rdfs::XML_LITERAL).ok(),
        }
    }

    /// The lexical text, exactly as written in the source document.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The language tag, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// The datatype IRI, if any.
    pub fn datatype(&self) -> Option<&IriRef> {
        self.datatype.as_ref()
    }

    /// Whether this literal carries the `rdfs:XMLLiteral` datatype.
    pub fn is_xml(&self) -> bool {
        self.datatype
            .as_ref()
            .is_some_and(|dt| dt.as_str() == rdfs::XML_LITERAL)
    }

    /// NTriples rendering, with the quoted value escaped.
    pub fn to_ntriples(&self) -> String {
        let mut out = format!("\"{}\"", escape_ntriples(&self.value));
        if let Some(lang) = &self.language {
            out.push('@');
            out.push_str(lang);
        } else if let Some(dt) = &self.datatype {
            out.push_str("^^");
            out.push_str(&dt.to_ntriples());
        }
        out
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_ntriples())
    }
}

/// An RDF term in any triple position
///
/// # Invariants
///
/// - `Term::Iri` always holds an absolute IRI.
/// - The subject and predicate of a triple may not be literals; this is
///   enforced by [`crate::Triple::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Absolute IRI reference
    Iri(IriRef),
    /// Blank node, scoped to its graph
    Blank(BlankId),
    /// Literal value
    Literal(Literal),
}

impl Term {
    /// Create an IRI term from an absolute IRI string.
    pub fn iri(iri: impl AsRef<str>) -> Result<Self> {
        Ok(Term::Iri(IriRef::new(iri)?))
    }

    /// Create a blank node term.
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::Blank(BlankId::new(label))
    }

    /// Create a plain literal term.
    pub fn literal(value: impl AsRef<str>) -> Self {
        Term::Literal(Literal::plain(value))
    }

    /// Check if this is an IRI term
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this is a blank node
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Try to get as IRI string
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri.as_str()),
            _ => None,
        }
    }

    /// Try to get as blank node ID
    pub fn as_blank(&self) -> Option<&BlankId> {
        match self {
            Term::Blank(id) => Some(id),
            _ => None,
        }
    }

    /// Try to get as literal
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// NTriples rendering of the term.
    pub fn to_ntriples(&self) -> String {
        match self {
            Term::Iri(iri) => iri.to_ntriples(),
            Term::Blank(id) => id.to_ntriples(),
            Term::Literal(lit) => lit.to_ntriples(),
        }
    }
}

impl From<IriRef> for Term {
    fn from(iri: IriRef) -> Self {
        Term::Iri(iri)
    }
}

impl From<BlankId> for Term {
    fn from(id: BlankId) -> Self {
        Term::Blank(id)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        // Type ordering: Blank < Iri < Literal
        let type_ord = |t: &Term| -> u8 {
            match t {
                Term::Blank(_) => 0,
                Term::Iri(_) => 1,
                Term::Literal(_) => 2,
            }
        };

        match type_ord(self).cmp(&type_ord(other)) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match (self, other) {
            (Term::Iri(a), Term::Iri(b)) => a.cmp(b),
            (Term::Blank(a), Term::Blank(b)) => a.cmp(b),
            (Term::Literal(a), Term::Literal(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_ntriples())
    }
}

/// Escape a literal value for NTriples output.
///
/// `\" \\ \n \r \t` get their short escapes; anything else outside the
/// printable ASCII range becomes `\uXXXX` (or `\UXXXXXXXX` beyond the
/// BMP).
pub fn escape_ntriples(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            c if (c as u32) <= 0xFFFF => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => {
                out.push_str(&format!("\\U{:08X}", c as u32));
            }
        }
    }
    out
}

/// Check a language tag against `[a-z]+(-[A-Za-z0-9]+)*`.
fn valid_language_tag(tag: &str) -> bool {
    let mut parts = tag.split('-');
    let Some(primary) = parts.next() else {
        return false;
    };
    if primary.is_empty() || !primary.chars().all(|c| c.is_ascii_lowercase()) {
        return false;
    }
    parts.all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Check a lexical form against the grammar of the validated datatypes.
fn valid_lexical(value: &str, datatype: &str) -> bool {
    match datatype {
        xsd::INTEGER => valid_integer(value),
        xsd::DECIMAL => valid_decimal(value),
        xsd::DOUBLE => valid_double(value),
        xsd::BOOLEAN => value == "true" || value == "false",
        _ => true,
    }
}

fn valid_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn valid_decimal(value: &str) -> bool {
    let rest = value.strip_prefix(['+', '-']).unwrap_or(value);
    let Some((whole, frac)) = rest.split_once('.') else {
        return false;
    };
    !whole.is_empty()
        && !frac.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

fn valid_double(value: &str) -> bool {
    let Some(pos) = value.find(['e', 'E']) else {
        return false;
    };
    let (mantissa, exponent) = (&value[..pos], &value[pos + 1..]);
    (valid_decimal(mantissa) || valid_integer(mantissa)) && valid_integer(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xsd_iri(local: &str) -> IriRef {
        IriRef::new(format!("{}{}", xsd::NAMESPACE, local)).unwrap()
    }

    #[test]
    fn test_blank_id() {
        let id = BlankId::new("b0");
        assert_eq!(id.as_str(), "b0");
        assert_eq!(id.to_ntriples(), "_:b0");
        assert_eq!(format!("{}", id), "_:b0");
    }

    #[test]
    fn test_plain_literal() {
        let lit = Literal::plain("hello");
        assert_eq!(lit.value(), "hello");
        assert!(lit.language().is_none());
        assert!(lit.datatype().is_none());
        assert_eq!(lit.to_ntriples(), "\"hello\"");
    }

    #[test]
    fn test_language_literal() {
        let lit = Literal::with_language("chat", "fr").unwrap();
        assert_eq!(lit.language(), Some("fr"));
        assert_eq!(lit.to_ntriples(), "\"chat\"@fr");

        assert!(Literal::with_language("chat", "en-US").is_ok());
        assert!(Literal::with_language("chat", "EN").is_err());
        assert!(Literal::with_language("chat", "en-").is_err());
    }

    #[test]
    fn test_typed_literal_validation() {
        assert!(Literal::typed("42", xsd_iri("integer")).is_ok());
        assert!(Literal::typed("+1", xsd_iri("integer")).is_ok());
        assert!(Literal::typed("-1", xsd_iri("integer")).is_ok());
        assert!(Literal::typed("1.0", xsd_iri("decimal")).is_ok());
        assert!(Literal::typed("1.0e1", xsd_iri("double")).is_ok());
        assert!(Literal::typed("1.0e-1", xsd_iri("double")).is_ok());
        assert!(Literal::typed("1E4", xsd_iri("double")).is_ok());
        assert!(Literal::typed("true", xsd_iri("boolean")).is_ok());

        // Unvalidated datatypes accept anything
        assert!(Literal::typed("whatever", xsd_iri("date")).is_ok());
    }

    #[test]
    fn test_typed_literal_rejections_name_value_and_datatype() {
        let err = Literal::typed("12xyz", xsd_iri("integer")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("12xyz"));
        assert!(msg.contains("http://www.w3.org/2001/XMLSchema#integer"));

        assert!(Literal::typed("xy.z", xsd_iri("double")).is_err());
        assert!(Literal::typed("+1.0z", xsd_iri("double")).is_err());
        assert!(Literal::typed("1.0", xsd_iri("double")).is_err());
        assert!(Literal::typed("1.", xsd_iri("decimal")).is_err());
        assert!(Literal::typed("maybe", xsd_iri("boolean")).is_err());
    }

    #[test]
    fn test_typed_literal_keeps_lexical_text() {
        let lit = Literal::typed("1.0e+1", xsd_iri("double")).unwrap();
        assert_eq!(lit.value(), "1.0e+1");
        assert_eq!(
            lit.to_ntriples(),
            "\"1.0e+1\"^^<http://www.w3.org/2001/XMLSchema#double>"
        );
    }

    #[test]
    fn test_xml_literal_keeps_markup() {
        let lit = Literal::xml("a <b></b> c");
        assert!(lit.is_xml());
        assert_eq!(lit.value(), "a <b></b> c");
    }

    #[test]
    fn test_term_ordering() {
        let blank = Term::blank("b0");
        let iri = Term::iri("http://example.org").unwrap();
        let lit = Term::literal("hello");

        assert!(blank < iri);
        assert!(iri < lit);
        assert!(blank < lit);
    }

    #[test]
    fn test_escape_ntriples() {
        assert_eq!(escape_ntriples("dquote:\""), "dquote:\\\"");
        assert_eq!(escape_ntriples("backslash:\\"), "backslash:\\\\");
        assert_eq!(escape_ntriples("newline:\n"), "newline:\\n");
        assert_eq!(escape_ntriples("tab:\t"), "tab:\\t");
        assert_eq!(escape_ntriples("é"), "\\u00E9");
        assert_eq!(escape_ntriples("€"), "\\u20AC");
        assert_eq!(escape_ntriples("\u{15678}"), "\\U00015678");
        assert_eq!(escape_ntriples("plain"), "plain");
    }

    #[test]
    fn test_term_display() {
        assert_eq!(
            format!("{}", Term::iri("http://example.org").unwrap()),
            "<http://example.org>"
        );
        assert_eq!(format!("{}", Term::blank("b0")), "_:b0");
        assert_eq!(format!("{}", Term::literal("hello")), "\"hello\"");
    }
}
