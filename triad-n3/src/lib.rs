//! Notation3/Turtle-family parser for the Triad graph model
//!
//! This crate parses the N3 textual grammar (with NTriples as its ground
//! subset) into a [`triad_graph::Graph`]: a winnow lexer produces
//! spanned tokens, and a recursive-descent parser applies the grammar's
//! semantic actions - keyword shorthands (`a`, `is`/`of`, `has`, `=`,
//! `=>`, `<=`), path expressions, collections, bracketed property lists,
//! `@prefix`/`@base`/`@keywords` directives and blank-node generation.
//!
//! Parsing is synchronous and single-pass; a parse either produces the
//! whole graph or fails with an [`N3Error`], never a partial result.
//! Quoted formulae (`{ ... }`) are detected and rejected, since the
//! in-memory graph is not formula-aware.
//!
//! # Example
//!
//! ```
//! use triad_n3::N3Parser;
//!
//! let graph = N3Parser::strict()
//!     .parse(
//!         "@prefix foaf: <http://xmlns.com/foaf/0.1/> .
//!          <http://example.org/alice> foaf:name \"Alice\" .",
//!         "http://example.org/doc",
//!     )
//!     .unwrap();
//!
//! assert_eq!(graph.len(), 1);
//! ```

mod error;
pub mod lex;
pub mod ntriples;
mod parser;

pub use error::{N3Error, Result};
pub use parser::{parse, N3Parser};
