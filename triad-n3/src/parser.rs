//! N3 parser that accumulates into a [`Graph`].
//!
//! Recursive descent over the token stream. All mutable state lives on
//! the parse run itself (current base, prefix table, keyword mode, blank
//! label table), threaded explicitly through the productions; nothing
//! survives between statements except that state and the graph's
//! blank-node counter. One run owns one document: a parser value can be
//! reused, but never concurrently.
//!
//! Errors abort the run immediately. Nothing is committed to the target
//! graph until the whole document has parsed, so a failed parse leaves
//! the graph untouched.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use triad_graph::{BlankId, Graph, IriRef, Literal, Namespace, Term, TermError, Triple};
use triad_vocab::{log, owl, rdf, rdfs, xsd};

use crate::error::{N3Error, Result};
use crate::lex::{tokenize, Token, TokenKind};

/// Words that carry keyword meaning before any `@keywords` directive.
const DEFAULT_KEYWORDS: &[&str] = &["a", "is", "of", "has", "true", "false"];

/// Every word a `@keywords` directive may declare.
const RECOGNIZED_KEYWORDS: &[&str] = &[
    "a", "is", "of", "has", "true", "false", "prefix", "base", "keywords",
];

/// N3 parser front end.
///
/// In strict mode, malformed statements (a predicate with no object, a
/// bare node standing alone) are hard errors; otherwise they are skipped.
#[derive(Clone, Debug, Default)]
pub struct N3Parser {
    strict: bool,
}

impl N3Parser {
    /// Create a tolerant parser.
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Create a strict parser: malformed statements become errors.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Whether this parser is strict.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parse a document into a fresh graph identified by the document
    /// URI. Relative references resolve against `base_uri`, which must be
    /// absolute.
    pub fn parse(&self, input: &str, base_uri: &str) -> Result<Graph> {
        let identifier = Term::Iri(IriRef::new(base_uri)?);
        let mut graph = Graph::with_identifier(identifier);
        self.parse_into(input, base_uri, &mut graph)?;
        Ok(graph)
    }

    /// Parse a document, appending into an existing graph.
    ///
    /// On error the graph is left exactly as it was: triples and
    /// namespace bindings are committed only after the whole document
    /// has parsed.
    pub fn parse_into(&self, input: &str, base_uri: &str, graph: &mut Graph) -> Result<()> {
        IriRef::new(base_uri)?;
        let run = ParseRun {
            tokens: tokenize(input)?,
            pos: 0,
            graph,
            pending: Vec::new(),
            base: base_uri.to_string(),
            default_ns: format!("{}#", base_uri),
            prefixes: HashMap::new(),
            keywords: None,
            labels: HashMap::new(),
            strict: self.strict,
        };
        run.run()
    }
}

/// Parse a document with a tolerant parser.
pub fn parse(input: &str, base_uri: &str) -> Result<Graph> {
    N3Parser::new().parse(input, base_uri)
}

/// One document's worth of parser state.
struct ParseRun<'g> {
    tokens: Vec<Token>,
    pos: usize,
    graph: &'g mut Graph,
    /// Triples parsed so far; committed to the graph only on success
    pending: Vec<Triple>,
    /// Current base for relative reference resolution. Each `@base`
    /// replaces it (resolving against the previous value first); a bare
    /// trailing `#` is dropped here but kept in `default_ns`.
    base: String,
    /// URI the implicit empty prefix expands against
    default_ns: String,
    /// prefix -> namespace URI; later bindings shadow earlier ones for
    /// statements still to come
    prefixes: HashMap<String, String>,
    /// `None` until a `@keywords` directive; then the declared set
    keywords: Option<HashSet<String>>,
    /// User-supplied blank node labels seen so far
    labels: HashMap<String, BlankId>,
    strict: bool,
}

impl<'g> ParseRun<'g> {
    fn run(mut self) -> Result<()> {
        while !self.at_end() {
            self.parse_statement()?;
        }

        tracing::debug!(triples = self.pending.len(), "parse complete");
        for triple in std::mem::take(&mut self.pending) {
            self.graph.add(triple);
        }
        for (prefix, uri) in std::mem::take(&mut self.prefixes) {
            self.graph.bind(Namespace::new(&uri, &prefix)?);
        }
        Ok(())
    }

    // =========================================================================
    // Token plumbing
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    fn unexpected(&self, expected: &str, found: &TokenKind) -> N3Error {
        N3Error::syntax(
            self.current().start,
            format!("expected {}, found '{}'", expected, found),
        )
    }

    /// Directives tolerate a missing terminating dot (documents in the
    /// wild omit it); statements do not.
    fn consume_optional_dot(&mut self) {
        if matches!(self.current().kind, TokenKind::Dot) {
            self.advance();
        }
    }

    fn expect_statement_end(&mut self) -> Result<()> {
        if matches!(self.current().kind, TokenKind::Dot) {
            self.advance();
            Ok(())
        } else if matches!(self.current().kind, TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.unexpected("'.'", &self.current().kind.clone()))
        }
    }

    // =========================================================================
    // Statements and directives
    // =========================================================================

    fn parse_statement(&mut self) -> Result<()> {
        match self.current().kind.clone() {
            TokenKind::KwPrefix => self.parse_prefix_directive(),
            TokenKind::KwBase => self.parse_base_directive(),
            TokenKind::KwKeywords => self.parse_keywords_directive(),
            TokenKind::KwForAll | TokenKind::KwForSome => self.parse_quantifier_directive(),
            // Directive words spelled bare are directives once declared
            TokenKind::Bareword(w) if self.declared_keyword(&w) => match w.as_ref() {
                "prefix" => self.parse_prefix_directive(),
                "base" => self.parse_base_directive(),
                "keywords" => self.parse_keywords_directive(),
                _ => self.parse_triples(),
            },
            _ => self.parse_triples(),
        }
    }

    /// `@prefix pre: <uri> .`
    fn parse_prefix_directive(&mut self) -> Result<()> {
        self.advance();

        let prefix = match self.current().kind.clone() {
            TokenKind::PrefixedName { prefix, local } if local.is_empty() => prefix,
            other => return Err(self.unexpected("prefix name ending in ':'", &other)),
        };
        self.advance();

        let mut uri = match self.current().kind.clone() {
            TokenKind::Iri(iri) => self.resolve(&iri)?,
            other => return Err(self.unexpected("namespace IRI", &other)),
        };
        self.advance();

        // Names bound under a namespace with no natural joint attach
        // after a fragment separator
        if !uri.ends_with('#') && !uri.ends_with('/') {
            uri.push('#');
        }

        tracing::debug!(prefix = %prefix, uri = %uri, "prefix bound");
        self.prefixes.insert(prefix.to_string(), uri);
        self.consume_optional_dot();
        Ok(())
    }

    /// `@base <uri> .`
    fn parse_base_directive(&mut self) -> Result<()> {
        self.advance();

        let uri = match self.current().kind.clone() {
            TokenKind::Iri(iri) => self.resolve(&iri)?,
            other => return Err(self.unexpected("base IRI", &other)),
        };
        self.advance();

        // The empty prefix follows the base exactly as written; relative
        // references resolve against it minus a bare trailing '#'
        self.default_ns = uri.clone();
        self.base = match uri.strip_suffix('#') {
            Some(stripped) => stripped.to_string(),
            None => uri,
        };

        tracing::debug!(base = %self.base, "base set");
        self.consume_optional_dot();
        Ok(())
    }

    /// `@keywords word, word .` — replaces the bare keyword set and
    /// switches on bareword-as-name mode.
    fn parse_keywords_directive(&mut self) -> Result<()> {
        self.advance();

        let mut declared = HashSet::new();
        while let TokenKind::Bareword(word) = self.current().kind.clone() {
            if !RECOGNIZED_KEYWORDS.contains(&word.as_ref()) {
                return Err(N3Error::Keyword(format!(
                    "undefined keywords used: {}",
                    word
                )));
            }
            declared.insert(word.to_string());
            self.advance();
            if matches!(self.current().kind, TokenKind::Comma) {
                self.advance();
            }
        }

        tracing::debug!(keywords = ?declared, "keyword mode set");
        self.keywords = Some(declared);
        self.consume_optional_dot();
        Ok(())
    }

    /// `@forAll`/`@forSome` declarations are recognized and their
    /// variable lists parsed, but carry no semantics here.
    fn parse_quantifier_directive(&mut self) -> Result<()> {
        self.advance();

        loop {
            match self.current().kind.clone() {
                TokenKind::Iri(iri) => {
                    self.resolve(&iri)?;
                    self.advance();
                }
                TokenKind::PrefixedName { prefix, local } => {
                    self.expand_qname(&prefix, &local)?;
                    self.advance();
                }
                other => return Err(self.unexpected("quantified variable", &other)),
            }
            if matches!(self.current().kind, TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }

        self.consume_optional_dot();
        Ok(())
    }

    fn parse_triples(&mut self) -> Result<()> {
        let (subject, compound) = self.parse_subject()?;

        if matches!(self.current().kind, TokenKind::Dot | TokenKind::Eof) {
            // Paths, brackets and collections stand alone as statements;
            // a bare node does not
            if !compound && self.strict {
                return Err(N3Error::syntax(
                    self.current().start,
                    format!(
                        "Illegal statement: subject {} has no predicate",
                        subject.to_ntriples()
                    ),
                ));
            }
            self.consume_optional_dot();
            return Ok(());
        }

        self.parse_predicate_object_list(Some(&subject))?;
        self.expect_statement_end()
    }

    // =========================================================================
    // Predicate-object lists
    // =========================================================================

    /// Parse `verb object, object ; verb object ...`.
    ///
    /// With a subject, triples are emitted as each object resolves. With
    /// `None` (inside a bracket, whose blank node does not exist yet) the
    /// pairs are returned for deferred emission.
    fn parse_predicate_object_list(
        &mut self,
        subject: Option<&Term>,
    ) -> Result<Vec<(Term, Term, bool)>> {
        let mut deferred = Vec::new();

        loop {
            let (predicate, inverted) = self.parse_verb()?;

            loop {
                if matches!(
                    self.current().kind,
                    TokenKind::Dot | TokenKind::Semicolon | TokenKind::RBracket | TokenKind::Eof
                ) {
                    if self.strict {
                        return Err(N3Error::syntax(
                            self.current().start,
                            format!(
                                "Illegal statement: predicate {} is missing its object",
                                predicate.to_ntriples()
                            ),
                        ));
                    }
                    break;
                }

                let (object, _) = self.parse_path_expression()?;
                match subject {
                    Some(s) => {
                        if inverted {
                            self.emit(object, predicate.clone(), s.clone())?;
                        } else {
                            self.emit(s.clone(), predicate.clone(), object)?;
                        }
                    }
                    None => deferred.push((predicate.clone(), object, inverted)),
                }

                if matches!(self.current().kind, TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }

            if matches!(self.current().kind, TokenKind::Semicolon) {
                self.advance();
                while matches!(self.current().kind, TokenKind::Semicolon) {
                    self.advance();
                }
                if matches!(
                    self.current().kind,
                    TokenKind::Dot | TokenKind::RBracket | TokenKind::Eof
                ) {
                    break;
                }
            } else {
                break;
            }
        }

        Ok(deferred)
    }

    /// Parse a predicate, returning it with its inversion flag.
    fn parse_verb(&mut self) -> Result<(Term, bool)> {
        match self.current().kind.clone() {
            TokenKind::Bareword(word) => self.parse_bareword_verb(&word),
            TokenKind::AtWord(word) => match word.as_ref() {
                // The @-spellings are accepted in any keyword mode
                "a" => {
                    self.advance();
                    Ok((self.iri_const(rdf::TYPE)?, false))
                }
                "has" => {
                    self.advance();
                    let predicate = self.parse_node()?;
                    Ok((predicate, false))
                }
                "is" => {
                    self.advance();
                    let predicate = self.parse_node()?;
                    self.expect_of()?;
                    Ok((predicate, true))
                }
                _ => Err(self.unexpected("predicate", &TokenKind::AtWord(word.clone()))),
            },
            TokenKind::Equals => {
                self.advance();
                Ok((self.iri_const(owl::SAME_AS)?, false))
            }
            TokenKind::Implies => {
                self.advance();
                Ok((self.iri_const(log::IMPLIES)?, false))
            }
            TokenKind::ImpliedBy => {
                self.advance();
                Ok((self.iri_const(log::IMPLIES)?, true))
            }
            _ => {
                let predicate = self.parse_node()?;
                Ok((predicate, false))
            }
        }
    }

    fn parse_bareword_verb(&mut self, word: &str) -> Result<(Term, bool)> {
        if self.keyword_active(word) {
            return match word {
                "a" => {
                    self.advance();
                    Ok((self.iri_const(rdf::TYPE)?, false))
                }
                "has" => {
                    self.advance();
                    let predicate = self.parse_node()?;
                    Ok((predicate, false))
                }
                "is" => {
                    self.advance();
                    let predicate = self.parse_node()?;
                    self.expect_of()?;
                    Ok((predicate, true))
                }
                other => Err(N3Error::Keyword(format!(
                    "keyword \"{}\" used as expression",
                    other
                ))),
            };
        }

        match &self.keywords {
            None => Err(self.unexpected("predicate", &self.current().kind.clone())),
            Some(_) if RECOGNIZED_KEYWORDS.contains(&word) => Err(N3Error::Keyword(format!(
                "unqualified keyword '{}' used without @keyword directive",
                word
            ))),
            Some(_) => {
                self.advance();
                Ok((self.qname_term("", word)?, false))
            }
        }
    }

    /// Consume the `of` in `is P of`, honoring the keyword mode.
    fn expect_of(&mut self) -> Result<()> {
        match self.current().kind.clone() {
            TokenKind::Bareword(w) if w.as_ref() == "of" => {
                if self.keyword_active("of") {
                    self.advance();
                    Ok(())
                } else {
                    Err(N3Error::Keyword(
                        "unqualified keyword 'of' used without @keyword directive".to_string(),
                    ))
                }
            }
            TokenKind::AtWord(w) if w.as_ref() == "of" => {
                self.advance();
                Ok(())
            }
            other => Err(self.unexpected("'of'", &other)),
        }
    }

    // =========================================================================
    // Terms, paths and literals
    // =========================================================================

    fn parse_subject(&mut self) -> Result<(Term, bool)> {
        self.parse_path_expression()
    }

    /// Parse a node followed by any chain of path segments.
    ///
    /// Each forward segment `A.P` / `A!P` mints a fresh blank node `B`
    /// and emits `(A, P, B)`; a reverse segment `A^P` emits `(B, P, A)`.
    /// `B` becomes the left operand of the next segment, or the term the
    /// caller attaches a property list to. The `bool` reports whether
    /// the expression already emitted statements of its own.
    fn parse_path_expression(&mut self) -> Result<(Term, bool)> {
        let mut compound = matches!(
            self.current().kind,
            TokenKind::LBracket | TokenKind::LParen | TokenKind::Nil | TokenKind::Anon
        );
        let mut node = self.parse_node()?;

        loop {
            if matches!(self.current().kind, TokenKind::PathDot | TokenKind::Bang) {
                self.advance();
                let predicate = self.parse_node()?;
                let fresh = Term::Blank(self.graph.next_bnode());
                self.emit(node, predicate, fresh.clone())?;
                node = fresh;
                compound = true;
            } else if matches!(self.current().kind, TokenKind::Caret) {
                self.advance();
                let predicate = self.parse_node()?;
                let fresh = Term::Blank(self.graph.next_bnode());
                self.emit(fresh.clone(), predicate, node)?;
                node = fresh;
                compound = true;
            } else {
                break;
            }
        }

        Ok((node, compound))
    }

    /// Parse a primary node (no path tail).
    fn parse_node(&mut self) -> Result<Term> {
        match self.current().kind.clone() {
            TokenKind::Iri(iri) => {
                let resolved = self.resolve(&iri)?;
                self.advance();
                Ok(Term::Iri(self.intern(&resolved)?))
            }
            TokenKind::PrefixedName { prefix, local } => {
                let term = self.qname_term(&prefix, &local)?;
                self.advance();
                Ok(term)
            }
            TokenKind::BlankNodeLabel(label) => {
                let term = self.blank_label_term(&label)?;
                self.advance();
                Ok(term)
            }
            TokenKind::Anon => {
                self.advance();
                Ok(Term::Blank(self.graph.next_bnode()))
            }
            TokenKind::Nil => {
                self.advance();
                self.iri_const(rdf::NIL)
            }
            TokenKind::LBracket => self.parse_bracket(),
            TokenKind::LParen => self.parse_collection(),
            TokenKind::LBrace => Err(N3Error::FormulaUnsupported {
                position: self.current().start,
            }),
            TokenKind::String(value) => self.parse_literal_term(value),
            TokenKind::Integer(text) => {
                self.advance();
                self.typed_literal(&text, xsd::INTEGER)
            }
            TokenKind::Decimal(text) => {
                self.advance();
                self.typed_literal(&text, xsd::DECIMAL)
            }
            TokenKind::Double(text) => {
                self.advance();
                self.typed_literal(&text, xsd::DOUBLE)
            }
            TokenKind::Bareword(word) => self.parse_bareword_node(&word),
            TokenKind::AtWord(word) => match word.as_ref() {
                "true" | "false" => {
                    self.advance();
                    self.typed_literal(&word, xsd::BOOLEAN)
                }
                _ => Err(self.unexpected("subject or object", &TokenKind::AtWord(word.clone()))),
            },
            other => Err(self.unexpected("subject or object", &other)),
        }
    }

    fn parse_bareword_node(&mut self, word: &str) -> Result<Term> {
        if self.keyword_active(word) {
            return match word {
                "true" | "false" => {
                    self.advance();
                    self.typed_literal(word, xsd::BOOLEAN)
                }
                other => Err(N3Error::Keyword(format!(
                    "keyword \"{}\" used as expression",
                    other
                ))),
            };
        }

        match &self.keywords {
            None => Err(self.unexpected("subject or object", &self.current().kind.clone())),
            Some(_) if RECOGNIZED_KEYWORDS.contains(&word) => Err(N3Error::Keyword(format!(
                "unqualified keyword '{}' used without @keyword directive",
                word
            ))),
            Some(_) => {
                // Declared keyword mode reads free barewords as names in
                // the default namespace
                self.advance();
                self.qname_term("", word)
            }
        }
    }

    /// `[ pred obj ; ... ]`: the blank node is minted only after the body
    /// has parsed, so nested constructs get lower numbers than the node
    /// that holds them.
    fn parse_bracket(&mut self) -> Result<Term> {
        self.advance();

        let properties = if matches!(self.current().kind, TokenKind::RBracket) {
            Vec::new()
        } else {
            self.parse_predicate_object_list(None)?
        };

        if matches!(self.current().kind, TokenKind::RBracket) {
            self.advance();
        } else {
            return Err(self.unexpected("']'", &self.current().kind.clone()));
        }

        let node = Term::Blank(self.graph.next_bnode());
        for (predicate, object, inverted) in properties {
            if inverted {
                self.emit(object, predicate, node.clone())?;
            } else {
                self.emit(node.clone(), predicate, object)?;
            }
        }
        Ok(node)
    }

    /// `( e1 e2 ... )` desugars to an rdf:first/rdf:rest chain ending in
    /// rdf:nil. Each cell is minted after its element fully resolves, so
    /// elements containing brackets or nested lists number before the
    /// cell that references them.
    fn parse_collection(&mut self) -> Result<Term> {
        self.advance();

        let first = self.iri_const(rdf::FIRST)?;
        let rest = self.iri_const(rdf::REST)?;
        let nil = self.iri_const(rdf::NIL)?;

        let mut head: Option<Term> = None;
        let mut prev: Option<Term> = None;

        loop {
            if matches!(self.current().kind, TokenKind::RParen) {
                self.advance();
                return Ok(match (head, prev) {
                    (Some(h), Some(p)) => {
                        self.emit(p, rest, nil)?;
                        h
                    }
                    _ => nil,
                });
            }
            if self.at_end() {
                return Err(self.unexpected("')'", &TokenKind::Eof));
            }

            let (element, _) = self.parse_path_expression()?;
            let cell = Term::Blank(self.graph.next_bnode());
            match &prev {
                None => head = Some(cell.clone()),
                Some(p) => self.emit(p.clone(), rest.clone(), cell.clone())?,
            }
            self.emit(cell.clone(), first.clone(), element)?;
            prev = Some(cell);
        }
    }

    /// Literal suffixes: an adjacent `@lang`, or `^^datatype`.
    fn parse_literal_term(&mut self, value: Arc<str>) -> Result<Term> {
        let end = self.current().end;
        self.advance();

        match self.current().kind.clone() {
            // Only a tag glued to the closing quote is a language tag;
            // with space between, `@is` and friends stay keywords
            TokenKind::AtWord(lang) if self.current().start == end => {
                self.advance();
                let literal = Literal::with_language(&value, &lang)
                    .map_err(|e| N3Error::syntax(end, e.to_string()))?;
                Ok(Term::Literal(literal))
            }
            TokenKind::DoubleCaret => {
                self.advance();
                let datatype = self.parse_datatype_iri()?;
                if datatype.as_str() == rdfs::XML_LITERAL {
                    Ok(Term::Literal(Literal::xml(&value)))
                } else {
                    Ok(Term::Literal(Literal::typed(&value, datatype)?))
                }
            }
            _ => Ok(Term::Literal(Literal::plain(&value)))
        }
    }

    fn parse_datatype_iri(&mut self) -> Result<IriRef> {
        match self.current().kind.clone() {
            TokenKind::Iri(iri) => {
                let resolved = self.resolve(&iri)?;
                self.advance();
                self.intern(&resolved)
            }
            TokenKind::PrefixedName { prefix, local } => {
                let uri = self.expand_qname(&prefix, &local)?;
                self.advance();
                self.intern(&uri)
            }
            other => Err(self.unexpected("datatype IRI", &other)),
        }
    }

    // =========================================================================
    // Term construction
    // =========================================================================

    fn keyword_active(&self, word: &str) -> bool {
        match &self.keywords {
            None => DEFAULT_KEYWORDS.contains(&word),
            Some(declared) => declared.contains(word),
        }
    }

    fn declared_keyword(&self, word: &str) -> bool {
        self.keywords
            .as_ref()
            .is_some_and(|declared| declared.contains(word))
    }

    fn resolve(&self, reference: &str) -> Result<String> {
        IriRef::resolve(reference, &self.base).map_err(N3Error::from)
    }

    fn intern(&mut self, iri: &str) -> Result<IriRef> {
        self.graph.intern_iri(iri).map_err(N3Error::from)
    }

    fn iri_const(&mut self, iri: &str) -> Result<Term> {
        Ok(Term::Iri(self.intern(iri)?))
    }

    fn typed_literal(&mut self, text: &str, datatype: &str) -> Result<Term> {
        let datatype = self.intern(datatype)?;
        Ok(Term::Literal(Literal::typed(text, datatype)?))
    }

    /// Expand `prefix:local` to a full URI string.
    fn expand_qname(&self, prefix: &str, local: &str) -> Result<String> {
        let namespace = if prefix.is_empty() {
            match self.prefixes.get("") {
                Some(uri) => uri.as_str(),
                None => self.default_ns.as_str(),
            }
        } else {
            self.prefixes
                .get(prefix)
                .ok_or_else(|| N3Error::UnresolvedPrefix(prefix.to_string()))?
                .as_str()
        };
        Ok(format!("{}{}", namespace, local))
    }

    fn qname_term(&mut self, prefix: &str, local: &str) -> Result<Term> {
        let uri = self.expand_qname(prefix, local)?;
        Ok(Term::Iri(self.intern(&uri)?))
    }

    /// Resolve a `_:label`.
    ///
    /// A label already seen stays the same blank node for the rest of the
    /// document, even across a later `@prefix _:` rebinding; an unseen
    /// label under such a binding becomes a name in that namespace.
    fn blank_label_term(&mut self, label: &str) -> Result<Term> {
        if let Some(id) = self.labels.get(label) {
            return Ok(Term::Blank(id.clone()));
        }
        if let Some(namespace) = self.prefixes.get("_").cloned() {
            let uri = format!("{}{}", namespace, label);
            return Ok(Term::Iri(self.intern(&uri)?));
        }
        let id = self.graph.labeled_bnode(label);
        self.labels.insert(label.to_string(), id.clone());
        Ok(Term::Blank(id))
    }

    fn emit(&mut self, subject: Term, predicate: Term, object: Term) -> Result<()> {
        let position = self.current().start;
        let triple = Triple::new(subject, predicate, object).map_err(|e| match e {
            TermError::InvalidPredicate(term) => N3Error::InvalidPredicate(term),
            TermError::InvalidSubject(term) => N3Error::syntax(
                position,
                format!("{} cannot be used as a statement subject", term),
            ),
            other => N3Error::from(other),
        })?;
        tracing::trace!(statement = %triple, "emit");
        self.pending.push(triple);
        Ok(())
    }
}
