//! RDF term, triple and graph model for the Triad crates
//!
//! This crate provides the types shared by every parser: IRI references,
//! blank nodes, literals, namespaces, triples and the in-memory graph
//! they accumulate into, plus the blank-node-tolerant equivalence check
//! used to validate parser output.
//!
//! # Key design decisions
//!
//! 1. **Absolute IRIs only** - relative references are resolved before a
//!    term exists; `IriRef` construction rejects relative strings.
//!
//! 2. **Explicit interning** - IRI terms are interned through an
//!    [`IriInterner`] owned by each [`Graph`], keyed by
//!    `(normalized_string, normalize_flag)`. Nothing is process-global,
//!    so interned storage lives and dies with one parse.
//!
//! 3. **Bag semantics, insertion order** - the graph keeps triples in a
//!    `Vec` exactly as emitted; [`Graph::distinct`] is the set view.
//!    Positional tests rely on the preserved order.
//!
//! 4. **Immutable terms** - terms never change after construction; the
//!    graph is the only mutable object and carries no internal locking.
//!
//! # Example
//!
//! ```
//! use triad_graph::{Graph, Namespace, Term, Triple};
//!
//! let mut graph = Graph::new();
//! let foaf = Namespace::new("http://xmlns.com/foaf/0.1/", "foaf").unwrap();
//!
//! graph.add(Triple::new(
//!     Term::iri("http://example.org/alice").unwrap(),
//!     Term::Iri(foaf.lookup("name")),
//!     Term::literal("Alice"),
//! ).unwrap());
//!
//! assert_eq!(graph.len(), 1);
//! ```

mod error;
mod graph;
pub mod iri;
pub mod iso;
mod namespace;
mod term;
mod triple;

pub use error::{Result, TermError};
pub use graph::Graph;
pub use iri::{IriInterner, IriRef};
pub use namespace::Namespace;
pub use term::{escape_ntriples, BlankId, Literal, Term};
pub use triple::{Triple, TriplePattern};
