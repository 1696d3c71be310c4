//! N3 lexer implementation using winnow.
//!
//! Tokenizes N3 input into a stream of tokens with source spans.
//! Fails fast on the first lexical error with a clear, actionable message.

use std::sync::Arc;

use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, opt, preceded};
use winnow::error::ContextError;
use winnow::stream::{AsChar, Location};
use winnow::token::{any, one_of, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::chars::*;
use super::token::{Token, TokenKind};
use crate::error::{N3Error, Result};

/// Input type for the lexer - tracks position for spans.
pub type Input<'a> = LocatingSlice<&'a str>;

/// Lexer for N3 documents.
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Tokenize the entire input.
    ///
    /// Returns an error immediately on the first invalid token, providing
    /// a clear error message with line/column and source context.
    pub fn tokenize(self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut input = LocatingSlice::new(self.input);

        loop {
            skip_ws_and_comments(&mut input);

            if input.is_empty() {
                let pos = input.current_token_start();
                tokens.push(Token::new(TokenKind::Eof, pos, pos));
                break;
            }

            let start = input.current_token_start();

            match next_token(&mut input) {
                Ok(kind) => {
                    let end = input.current_token_start();
                    tokens.push(Token::new(kind, start, end));
                }
                Err(_) => {
                    return Err(self.make_error(start, &input));
                }
            }
        }

        Ok(tokens)
    }

    /// Create a descriptive error message for an invalid token.
    fn make_error(&self, position: usize, input: &Input<'_>) -> N3Error {
        let remaining = input.as_ref();
        let bad_char = remaining.chars().next().unwrap_or('?');

        let (line, col) = self.line_col(position);
        let line_content = self.get_line(line);
        let pointer = " ".repeat(col.saturating_sub(1));

        let message = if bad_char == '"' {
            format!(
                "unterminated string literal at line {}, column {}\n  |\n{} | {}\n  | {}^",
                line, col, line, line_content, pointer
            )
        } else if bad_char == '\'' {
            format!(
                "single-quoted strings are not N3 at line {}, column {}\n  |\n{} | {}\n  | {}^",
                line, col, line, line_content, pointer
            )
        } else if bad_char == '<' {
            format!(
                "invalid or unterminated IRI at line {}, column {}\n  |\n{} | {}\n  | {}^",
                line, col, line, line_content, pointer
            )
        } else if !bad_char.is_ascii() && !is_pn_chars_base(bad_char) {
            format!(
                "unexpected character '{}' (U+{:04X}) at line {}, column {}\n  |\n{} | {}\n  | {}^",
                bad_char.escape_unicode(),
                bad_char as u32,
                line,
                col,
                line,
                line_content,
                pointer
            )
        } else {
            format!(
                "unexpected character '{}' at line {}, column {}\n  |\n{} | {}\n  | {}^",
                bad_char, line, col, line, line_content, pointer
            )
        };

        N3Error::Lexer { position, message }
    }

    /// Convert a byte position to (line, column), 1-indexed.
    fn line_col(&self, position: usize) -> (usize, usize) {
        let mut line = 1;
        let mut col = 1;

        for (i, c) in self.input.char_indices() {
            if i >= position {
                break;
            }
            if c == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }

        (line, col)
    }

    /// Get the content of a specific line (1-indexed).
    fn get_line(&self, line_num: usize) -> &str {
        self.input
            .lines()
            .nth(line_num.saturating_sub(1))
            .unwrap_or("")
    }
}

fn backtrack() -> winnow::error::ErrMode<ContextError> {
    winnow::error::ErrMode::Backtrack(ContextError::new())
}

/// Skip whitespace and comments.
fn skip_ws_and_comments(input: &mut Input<'_>) {
    loop {
        let _: ModalResult<&str, ContextError> = take_while(0.., is_ws).parse_next(input);

        if input.starts_with('#') {
            let _: ModalResult<&str, ContextError> =
                take_till(0.., |c| c == '\n' || c == '\r').parse_next(input);
            let _: ModalResult<Option<char>, ContextError> =
                opt(one_of(['\n', '\r'])).parse_next(input);
        } else {
            break;
        }
    }
}

/// Parse the next token.
fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        // Multi-char operators (must come before single-char)
        parse_double_caret,
        parse_implies,
        // IRIs (before `<=`, which only matches when no IRI does)
        parse_iri_ref,
        parse_implied_by,
        parse_equals,
        // Blank nodes (must come before prefixed names)
        parse_blank_node_label,
        parse_anon,
        // NIL: () with optional whitespace
        parse_nil,
        // Directives and language tags / @-keywords
        parse_at_word,
        // Default prefix (:name or just :)
        parse_default_prefix,
        // Prefixed names and barewords (a, true, is, of, has, ...)
        parse_name_or_bareword,
        // String literals
        parse_string_literal,
        // Numbers
        parse_number,
        // Single-char punctuation, including the dot/path-dot split
        parse_punctuation,
    ))
    .parse_next(input)
}

// =============================================================================
// IRI Parsing
// =============================================================================

/// Parse an IRI reference: `<...>`
fn parse_iri_ref(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('<', parse_iri_content, '>')
        .map(|s: String| TokenKind::Iri(Arc::from(s)))
        .parse_next(input)
}

/// Parse the content inside an IRI (validates characters and handles escapes).
fn parse_iri_content(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., is_iri_char).parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() || input.starts_with('>') {
            break;
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            if input.starts_with('u') || input.starts_with('U') {
                if let Some(c) = parse_unicode_escape(input)? {
                    result.push(c);
                } else {
                    return Err(backtrack());
                }
            } else {
                return Err(backtrack());
            }
        } else {
            return Err(backtrack());
        }
    }

    // Empty IRIs are legal (relative reference to the base)
    Ok(result)
}

/// Parse a Unicode escape sequence (\uXXXX or \UXXXXXXXX).
fn parse_unicode_escape(input: &mut Input<'_>) -> ModalResult<Option<char>> {
    if input.starts_with('u') {
        'u'.parse_next(input)?;
        let hex: &str = take_while(4..=4, AsChar::is_hex_digit).parse_next(input)?;
        let code = u32::from_str_radix(hex, 16).unwrap_or(0xFFFD);
        Ok(char::from_u32(code))
    } else if input.starts_with('U') {
        'U'.parse_next(input)?;
        let hex: &str = take_while(8..=8, AsChar::is_hex_digit).parse_next(input)?;
        let code = u32::from_str_radix(hex, 16).unwrap_or(0xFFFD);
        Ok(char::from_u32(code))
    } else {
        Ok(None)
    }
}

// =============================================================================
// Directives, language tags and @-keywords
// =============================================================================

/// Parse `@word`: directives get their own kinds, everything else is an
/// `AtWord` the parser resolves from context.
fn parse_at_word(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '@'.parse_next(input)?;

    let word: &str =
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-').parse_next(input)?;

    Ok(match word {
        "prefix" => TokenKind::KwPrefix,
        "base" => TokenKind::KwBase,
        "keywords" => TokenKind::KwKeywords,
        "forAll" => TokenKind::KwForAll,
        "forSome" => TokenKind::KwForSome,
        _ => TokenKind::AtWord(Arc::from(word)),
    })
}

// =============================================================================
// Prefixed Names and Barewords
// =============================================================================

/// Parse a default prefix name (`:local`) or bare default namespace (`:`).
fn parse_default_prefix(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ':'.parse_next(input)?;

    let local = opt(parse_pn_local).parse_next(input)?;

    Ok(TokenKind::PrefixedName {
        prefix: Arc::from(""),
        local: Arc::from(local.unwrap_or("")),
    })
}

/// Parse a prefixed name (`prefix:local`, either side possibly empty) or
/// a bare word.
fn parse_name_or_bareword(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    match input.chars().next() {
        Some(c) if is_pn_chars_u(c) => {}
        _ => return Err(backtrack()),
    }

    let word: &str = take_while(1.., is_pn_chars).parse_next(input)?;

    if opt(':').parse_next(input)?.is_some() {
        let local = opt(parse_pn_local).parse_next(input)?;
        Ok(TokenKind::PrefixedName {
            prefix: Arc::from(word),
            local: Arc::from(local.unwrap_or("")),
        })
    } else {
        Ok(TokenKind::Bareword(Arc::from(word)))
    }
}

/// Parse a local name (after the colon in a prefixed name).
fn parse_pn_local<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    match input.chars().next() {
        Some(c) if is_pn_local_start(c) => {}
        _ => return Err(backtrack()),
    }
    take_while(1.., is_pn_chars).parse_next(input)
}

// =============================================================================
// Blank Nodes
// =============================================================================

/// Parse a blank node label: `_:name`
fn parse_blank_node_label(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded("_:", parse_blank_node_name)
        .map(|name: &str| TokenKind::BlankNodeLabel(Arc::from(name)))
        .parse_next(input)
}

/// Parse a blank node name (after `_:`).
fn parse_blank_node_name<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    (
        take_while(1, |c: char| is_pn_chars_u(c) || c.is_ascii_digit()),
        take_while(0.., is_pn_chars),
    )
        .take()
        .parse_next(input)
}

/// Parse anonymous blank node: `[]`
fn parse_anon(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ('[', take_while(0.., is_ws), ']')
        .map(|_| TokenKind::Anon)
        .parse_next(input)
}

/// Parse NIL (empty list): `()`
fn parse_nil(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ('(', take_while(0.., is_ws), ')')
        .map(|_| TokenKind::Nil)
        .parse_next(input)
}

// =============================================================================
// String Literals
// =============================================================================

/// Parse a string literal (double-quoted, short or long). Single quotes
/// are not part of this grammar.
fn parse_string_literal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((parse_string_long, parse_string_short)).parse_next(input)
}

fn parse_string_short(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('"', parse_short_content, '"')
        .map(|s| TokenKind::String(Arc::from(s)))
        .parse_next(input)
}

fn parse_string_long(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited("\"\"\"", parse_long_content, "\"\"\"")
        .map(|s| TokenKind::String(Arc::from(s)))
        .parse_next(input)
}

fn parse_short_content(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., |c| c != '"' && c != '\\' && c != '\n' && c != '\r')
            .parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() || input.starts_with('"') {
            break;
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped = parse_escape_char(input)?;
            result.push(escaped);
        } else {
            break;
        }
    }

    Ok(result)
}

fn parse_long_content(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., |c| c != '"' && c != '\\').parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() {
            break;
        }

        if input.starts_with("\"\"\"") {
            break;
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped = parse_escape_char(input)?;
            result.push(escaped);
        } else if input.starts_with('"') {
            // A lone quote inside a long literal
            let c: char = any.parse_next(input)?;
            result.push(c);
        } else {
            break;
        }
    }

    Ok(result)
}

/// Parse the character after a backslash: `\" \\ \n \r \t \uXXXX
/// \UXXXXXXXX` only.
fn parse_escape_char(input: &mut Input<'_>) -> ModalResult<char> {
    let c: char = any.parse_next(input)?;
    match c {
        't' => Ok('\t'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        '"' => Ok('"'),
        '\\' => Ok('\\'),
        'u' => {
            let hex: &str = take_while(4..=4, AsChar::is_hex_digit).parse_next(input)?;
            if hex.len() != 4 {
                return Err(backtrack());
            }
            let code = u32::from_str_radix(hex, 16).map_err(|_| backtrack())?;
            char::from_u32(code).ok_or_else(backtrack)
        }
        'U' => {
            let hex: &str = take_while(8..=8, AsChar::is_hex_digit).parse_next(input)?;
            if hex.len() != 8 {
                return Err(backtrack());
            }
            let code = u32::from_str_radix(hex, 16).map_err(|_| backtrack())?;
            char::from_u32(code).ok_or_else(backtrack)
        }
        _ => Err(backtrack()),
    }
}

// =============================================================================
// Numbers
// =============================================================================

/// Parse a numeric literal, keeping the exact lexical text.
fn parse_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((parse_double, parse_decimal, parse_integer)).parse_next(input)
}

fn parse_double(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (
        opt(one_of(['+', '-'])),
        digit1,
        opt(('.', digit1)),
        one_of(['e', 'E']),
        opt(one_of(['+', '-'])),
        digit1,
    )
        .take()
        .parse_next(input)?;

    Ok(TokenKind::Double(Arc::from(text)))
}

fn parse_decimal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (opt(one_of(['+', '-'])), digit1, '.', digit1)
        .take()
        .parse_next(input)?;

    if input.starts_with('e') || input.starts_with('E') {
        return Err(backtrack());
    }

    Ok(TokenKind::Decimal(Arc::from(text)))
}

fn parse_integer(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (opt(one_of(['+', '-'])), digit1)
        .take()
        .parse_next(input)?;

    if input.starts_with('e') || input.starts_with('E') {
        return Err(backtrack());
    }
    if input.starts_with('.') {
        let rest = &input.as_ref()[1..];
        if rest.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return Err(backtrack());
        }
    }

    Ok(TokenKind::Integer(Arc::from(text)))
}

// =============================================================================
// Operators and Punctuation
// =============================================================================

fn parse_double_caret(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "^^".map(|_| TokenKind::DoubleCaret).parse_next(input)
}

fn parse_implies(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "=>".map(|_| TokenKind::Implies).parse_next(input)
}

fn parse_implied_by(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "<=".map(|_| TokenKind::ImpliedBy).parse_next(input)
}

fn parse_equals(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '='.map(|_| TokenKind::Equals).parse_next(input)
}

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let c: char = any.parse_next(input)?;
    match c {
        '.' => {
            // A dot running straight into a name is a path operator,
            // anything else ends the statement
            Ok(match input.chars().next() {
                Some(next) if is_path_continuation(next) => TokenKind::PathDot,
                _ => TokenKind::Dot,
            })
        }
        '!' => Ok(TokenKind::Bang),
        '^' => Ok(TokenKind::Caret),
        ',' => Ok(TokenKind::Comma),
        ';' => Ok(TokenKind::Semicolon),
        '[' => Ok(TokenKind::LBracket),
        ']' => Ok(TokenKind::RBracket),
        '(' => Ok(TokenKind::LParen),
        ')' => Ok(TokenKind::RParen),
        '{' => Ok(TokenKind::LBrace),
        '}' => Ok(TokenKind::RBrace),
        _ => Err(backtrack()),
    }
}

/// Tokenize an N3 document string.
///
/// Returns an error immediately on the first invalid token, with a clear
/// error message including line/column information and source context.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}
