//! IRI reference term and RFC 3986 reference resolution
//!
//! `IriRef` only ever holds an absolute IRI: relative references must be
//! resolved against a base before a term can be built. Construction also
//! rejects ASCII control characters.
//!
//! Two `IriRef`s built from the same normalized string (with the same
//! normalization setting) share storage when built through an
//! [`IriInterner`]; equality, ordering and hashing are defined over the
//! string form either way.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermError};
use crate::namespace::Namespace;

/// An absolute IRI reference
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IriRef {
    value: Arc<str>,
    normalize: bool,
}

impl IriRef {
    /// Create a normalized IRI term.
    ///
    /// Fails if the string is relative (no scheme) or contains ASCII
    /// control characters.
    pub fn new(iri: impl AsRef<str>) -> Result<Self> {
        Self::with_options(iri, true)
    }

    /// Create an IRI term, choosing whether scheme/host are normalized.
    pub fn with_options(iri: impl AsRef<str>, normalize: bool) -> Result<Self> {
        let iri = iri.as_ref();
        validate(iri)?;
        if !has_scheme(iri) {
            return Err(TermError::RelativeUri(iri.to_string()));
        }
        let value = if normalize {
            Arc::from(normalize_iri(iri))
        } else {
            Arc::from(iri)
        };
        Ok(Self { value, normalize })
    }

    pub(crate) fn from_interned(value: Arc<str>, normalize: bool) -> Self {
        Self { value, normalize }
    }

    /// Build an IRI by appending a local name to this one.
    ///
    /// Used by [`Namespace`] lookup; the result inherits this IRI's
    /// normalization setting but is not re-normalized (the local name is
    /// appended verbatim).
    pub(crate) fn join_local(&self, local: &str) -> Self {
        Self {
            value: Arc::from(format!("{}{}", self.value, local)),
            normalize: self.normalize,
        }
    }

    /// The IRI string.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether this term was built with normalization enabled.
    pub fn is_normalized(&self) -> bool {
        self.normalize
    }

    /// Fragment if present, else the last non-empty path segment.
    ///
    /// This is the local part used for qualified-name rendering;
    /// `base() + short_name()` reassembles the full IRI.
    pub fn short_name(&self) -> Option<&str> {
        let parts = split_iri(&self.value);
        if let Some(frag) = parts.fragment {
            if !frag.is_empty() {
                return Some(frag);
            }
            return None;
        }
        match parts.path.rsplit('/').next() {
            Some(seg) if !seg.is_empty() => Some(seg),
            _ => None,
        }
    }

    /// Everything up to (and excluding) the short name.
    pub fn base(&self) -> &str {
        match self.short_name() {
            Some(sn) => &self.value[..self.value.len() - sn.len()],
            None => &self.value,
        }
    }

    /// Render as `prefix:local` against the first namespace whose URI is a
    /// prefix of this IRI, trying longer namespace URIs first.
    pub fn to_qname(&self, namespaces: &[Namespace]) -> Option<String> {
        let mut candidates: Vec<&Namespace> = namespaces.iter().collect();
        candidates.sort_by_key(|ns| std::cmp::Reverse(ns.uri().as_str().len()));
        let ns = candidates
            .into_iter()
            .find(|ns| self.value.starts_with(ns.uri().as_str()))?;
        let local = &self.value[ns.uri().as_str().len()..];
        Some(format!("{}:{}", ns.prefix(), local))
    }

    /// NTriples rendering: `<iri>`.
    pub fn to_ntriples(&self) -> String {
        format!("<{}>", self.value)
    }

    /// Resolve a reference against a base IRI (RFC 3986 section 5).
    ///
    /// The empty reference resolves to exactly the base string. A bare `#`
    /// resolves to the base (minus any fragment) with `#` appended, and
    /// that trailing `#` is kept rather than normalized away.
    pub fn resolve(reference: &str, base: &str) -> Result<String> {
        validate(reference)?;

        if reference.is_empty() {
            return Ok(base.to_string());
        }

        if has_scheme(reference) {
            return Ok(reference.to_string());
        }

        if !has_scheme(base) {
            return Err(TermError::RelativeUri(reference.to_string()));
        }

        let b = split_iri(base);
        let r = split_relative(reference);

        let (authority, path, query) = if let Some(ref_auth) = r.authority {
            (Some(ref_auth), remove_dot_segments(r.path), r.query)
        } else if r.path.is_empty() {
            // Query- or fragment-only reference keeps the base path
            let query = if r.query.is_some() { r.query } else { b.query };
            (b.authority, b.path.to_string(), query)
        } else if r.path.starts_with('/') {
            (b.authority, remove_dot_segments(r.path), r.query)
        } else {
            // Merge relative path with the base path directory
            let merged = if b.authority.is_some() && b.path.is_empty() {
                format!("/{}", r.path)
            } else {
                match b.path.rfind('/') {
                    Some(pos) => format!("{}{}", &b.path[..=pos], r.path),
                    None => r.path.to_string(),
                }
            };
            (b.authority, remove_dot_segments(&merged), r.query)
        };

        let mut result = String::new();
        result.push_str(b.scheme.unwrap_or(""));
        result.push(':');
        if let Some(auth) = authority {
            result.push_str("//");
            result.push_str(auth);
        }
        result.push_str(&path);
        if let Some(q) = query {
            result.push('?');
            result.push_str(q);
        }
        if let Some(f) = r.fragment {
            result.push('#');
            result.push_str(f);
        }
        Ok(result)
    }
}

impl PartialEq for IriRef {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for IriRef {}

impl Hash for IriRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for IriRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IriRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl std::fmt::Display for IriRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.value)
    }
}

impl AsRef<str> for IriRef {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// Interner for IRI terms, keyed by `(normalized_string, normalize_flag)`.
///
/// Owned by the graph (or another parse-scoped context), never
/// process-global: interned storage is released together with the parse
/// that created it, so independent documents cannot leak identifiers into
/// each other.
#[derive(Debug, Default)]
pub struct IriInterner {
    cache: HashMap<(String, bool), Arc<str>>,
}

impl IriInterner {
    /// Create an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a normalized IRI.
    pub fn intern(&mut self, iri: &str) -> Result<IriRef> {
        self.intern_with_options(iri, true)
    }

    /// Intern an IRI with an explicit normalization setting.
    pub fn intern_with_options(&mut self, iri: &str, normalize: bool) -> Result<IriRef> {
        validate(iri)?;
        if !has_scheme(iri) {
            return Err(TermError::RelativeUri(iri.to_string()));
        }
        let normalized = if normalize {
            normalize_iri(iri)
        } else {
            iri.to_string()
        };
        let key = (normalized, normalize);
        if let Some(value) = self.cache.get(&key) {
            return Ok(IriRef::from_interned(Arc::clone(value), normalize));
        }
        let value: Arc<str> = Arc::from(key.0.as_str());
        self.cache.insert(key, Arc::clone(&value));
        Ok(IriRef::from_interned(value, normalize))
    }

    /// Number of distinct interned IRIs.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the interner is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Reject control characters; absoluteness is checked separately because
/// relative references are legal inputs to `resolve`.
fn validate(iri: &str) -> Result<()> {
    if iri.bytes().any(|b| b <= 0x1F) {
        return Err(TermError::ControlCharacters(iri.to_string()));
    }
    Ok(())
}

/// Check for a leading URI scheme (`alpha (alphanum | + | - | .)* :`).
fn has_scheme(iri: &str) -> bool {
    match iri.find(':') {
        Some(pos) if pos > 0 => {
            let scheme = &iri[..pos];
            scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

struct IriParts<'a> {
    scheme: Option<&'a str>,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

/// Split an absolute IRI into its components.
fn split_iri(iri: &str) -> IriParts<'_> {
    let (scheme, rest) = match iri.find(':') {
        Some(pos) if has_scheme(iri) => (Some(&iri[..pos]), &iri[pos + 1..]),
        _ => (None, iri),
    };
    let mut parts = split_relative(rest);
    parts.scheme = scheme;
    parts
}

/// Split a scheme-less reference into authority/path/query/fragment.
fn split_relative(reference: &str) -> IriParts<'_> {
    let (rest, fragment) = match reference.find('#') {
        Some(pos) => (&reference[..pos], Some(&reference[pos + 1..])),
        None => (reference, None),
    };
    let (rest, query) = match rest.find('?') {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };
    let (authority, path) = if let Some(after) = rest.strip_prefix("//") {
        let end = after.find('/').unwrap_or(after.len());
        (Some(&after[..end]), &after[end..])
    } else {
        (None, rest)
    };
    IriParts {
        scheme: None,
        authority,
        path,
        query,
        fragment,
    }
}

/// Remove `.` and `..` segments from a path (RFC 3986 section 5.2.4).
fn remove_dot_segments(path: &str) -> String {
    let trailing = path.ends_with("/.") || path.ends_with("/..");
    let mut output: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "." => {}
            ".." => {
                // Never pop the root marker of an absolute path
                if output.last().is_some_and(|s| !s.is_empty()) {
                    output.pop();
                }
            }
            s => output.push(s),
        }
    }
    let mut result = output.join("/");
    if trailing && !result.ends_with('/') {
        result.push('/');
    }
    if path.starts_with('/') && !result.starts_with('/') {
        result.insert(0, '/');
    }
    result
}

/// Lowercase the scheme and the host portion of the authority.
fn normalize_iri(iri: &str) -> String {
    let parts = split_iri(iri);
    let Some(scheme) = parts.scheme else {
        return iri.to_string();
    };

    let mut result = scheme.to_ascii_lowercase();
    result.push(':');
    if let Some(auth) = parts.authority {
        result.push_str("//");
        let (userinfo, host_port) = match auth.rfind('@') {
            Some(pos) => (Some(&auth[..=pos]), &auth[pos + 1..]),
            None => (None, auth),
        };
        if let Some(u) = userinfo {
            result.push_str(u);
        }
        let (host, port) = match host_port.rfind(':') {
            Some(pos) if host_port[pos + 1..].chars().all(|c| c.is_ascii_digit()) => {
                (&host_port[..pos], Some(&host_port[pos..]))
            }
            _ => (host_port, None),
        };
        result.push_str(&host.to_ascii_lowercase());
        if let Some(p) = port {
            result.push_str(p);
        }
    }
    result.push_str(parts.path);
    if let Some(q) = parts.query {
        result.push('?');
        result.push_str(q);
    }
    if let Some(f) = parts.fragment {
        result.push('#');
        result.push_str(f);
    }
    result
}
