//! Triple: one subject-predicate-object statement

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermError};
use crate::term::Term;

/// A single RDF statement
///
/// The subject and predicate may be IRIs or blank nodes; the object may
/// additionally be a literal. [`Triple::new`] enforces this.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// Subject term (IRI or blank node)
    pub subject: Term,
    /// Predicate term (IRI or blank node)
    pub predicate: Term,
    /// Object term (any)
    pub object: Term,
}

impl Triple {
    /// Create a triple, checking position constraints.
    pub fn new(subject: Term, predicate: Term, object: Term) -> Result<Self> {
        if subject.is_literal() {
            return Err(TermError::InvalidSubject(subject.to_ntriples()));
        }
        if predicate.is_literal() {
            return Err(TermError::InvalidPredicate(predicate.to_ntriples()));
        }
        Ok(Self {
            subject,
            predicate,
            object,
        })
    }

    /// NTriples rendering: `<s> <p> o .`
    pub fn to_ntriples(&self) -> String {
        format!(
            "{} {} {} .",
            self.subject.to_ntriples(),
            self.predicate.to_ntriples(),
            self.object.to_ntriples()
        )
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_ntriples())
    }
}

/// A triple pattern with wildcard positions
///
/// `None` in a position matches any term; this is the query interface
/// consumed by the external parsers and storage backends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriplePattern {
    /// Subject to match, or wildcard
    pub subject: Option<Term>,
    /// Predicate to match, or wildcard
    pub predicate: Option<Term>,
    /// Object to match, or wildcard
    pub object: Option<Term>,
}

impl TriplePattern {
    /// The all-wildcard pattern.
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict the subject position.
    pub fn with_subject(mut self, subject: Term) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Restrict the predicate position.
    pub fn with_predicate(mut self, predicate: Term) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Restrict the object position.
    pub fn with_object(mut self, object: Term) -> Self {
        self.object = Some(object);
        self
    }

    /// Check a triple against this pattern.
    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.as_ref().map_or(true, |s| *s == triple.subject)
            && self
                .predicate
                .as_ref()
                .map_or(true, |p| *p == triple.predicate)
            && self.object.as_ref().map_or(true, |o| *o == triple.object)
    }
}
