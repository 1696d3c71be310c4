//! Namespace: a URI bound to a short prefix
//!
//! Namespaces abbreviate IRIs in the textual grammars: binding the local
//! name `N` under a namespace produces `IriRef(uri + N)`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermError};
use crate::iri::IriRef;

/// A namespace binding a prefix to a URI
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    uri: IriRef,
    prefix: Arc<str>,
}

impl Namespace {
    /// Create a namespace.
    ///
    /// The prefix must be empty (the default namespace) or match
    /// `[A-Za-z_][A-Za-z0-9_.\-]*`; anything else fails construction.
    /// The URI must be absolute.
    pub fn new(uri: impl AsRef<str>, prefix: &str) -> Result<Self> {
        Self::with_iri(IriRef::new(uri)?, prefix)
    }

    /// Create a namespace from an existing IRI term.
    pub fn with_iri(uri: IriRef, prefix: &str) -> Result<Self> {
        if !valid_prefix(prefix) {
            return Err(TermError::InvalidPrefix(prefix.to_string()));
        }
        Ok(Self {
            uri,
            prefix: Arc::from(prefix),
        })
    }

    /// The namespace URI.
    pub fn uri(&self) -> &IriRef {
        &self.uri
    }

    /// The bound prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Bind a local name, producing `IriRef(uri + local)`.
    ///
    /// An empty local name yields the namespace URI unchanged.
    pub fn lookup(&self, local: &str) -> IriRef {
        if local.is_empty() {
            self.uri.clone()
        } else {
            self.uri.join_local(local)
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: <{}>", self.prefix, self.uri.as_str())
    }
}

/// Case-sensitive NCName-like prefix check: `[A-Za-z_][A-Za-z0-9_.\-]*`,
/// or empty for the default namespace.
fn valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        }
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_appends_local_name() {
        let foaf = Namespace::new("http://xmlns.com/foaf/0.1/", "foaf").unwrap();
        assert_eq!(
            foaf.lookup("knows").as_str(),
            "http://xmlns.com/foaf/0.1/knows"
        );
    }

    #[test]
    fn test_empty_local_name_yields_namespace_uri() {
        let ns = Namespace::new("http://foo/bar#", "foo").unwrap();
        assert_eq!(ns.lookup("").as_str(), "http://foo/bar#");
    }

    #[test]
    fn test_rejects_relative_uri() {
        assert!(Namespace::new("foaf", "foaf").is_err());
    }

    #[test]
    fn test_prefix_validation() {
        assert!(Namespace::new("http://xmlns.com/foaf/0.1/", "*~{").is_err());
        assert!(Namespace::new("http://xmlns.com/foaf/0.1/", "9a").is_err());
        assert!(Namespace::new("http://xmlns.com/foaf/0.1/", "").is_ok());
        assert!(Namespace::new("http://xmlns.com/foaf/0.1/", "_").is_ok());
        assert!(Namespace::new("http://xmlns.com/foaf/0.1/", "dc.terms").is_ok());
        assert!(Namespace::new("http://xmlns.com/foaf/0.1/", "foaf-x").is_ok());
    }
}
