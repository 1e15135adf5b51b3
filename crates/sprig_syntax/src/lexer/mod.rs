//! Lexer for Sprig source text.
//!
//! Produces the raw token sequence the arity resolver consumes. Handles:
//! - Identifiers and literals (int, radix int, float, string)
//! - Operator symbols (longest match, e.g. `==` before `=`)
//! - `#` line comments (folded into whitespace)
//! - Whitespace facts per token: adjacent space on either side, and the
//!   exact indentation of the line for the first token on each line
//!
//! ## Module Structure
//!
//! - `numbers` - Numeric literal scanning (decimal, hex/octal/binary, float)
//! - `strings` - String literal scanning with escapes
//!
//! ## Notes
//! - Indentation is **not** turned into tokens here; the resolver owns the
//!   open-indent stack and synthesizes indent/undent delimiters from the
//!   per-token indentation facts.
//! - Lexical mistakes produce an [`TokenKind::Error`] marker token in place
//!   plus a recorded diagnostic, and scanning continues.

mod numbers;
mod strings;

use crate::diagnostics::ParseError;
use crate::token::{Indent, Span, Token, TokenKind, WsFacts};
use sprig_core::grammar::OpKey;

/// Lexer for Sprig source code.
///
/// Pull-based: the resolver calls [`Lexer::peek`] / [`Lexer::next_token`].
/// The token stream ends with an `Eof` token (returned repeatedly if pulled
/// past the end).
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    lookahead: Option<Token>,
    errors: Vec<ParseError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            lookahead: None,
            errors: Vec::new(),
        }
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        if self.lookahead.is_none() {
            let tok = self.scan_token();
            self.lookahead = Some(tok);
        }
        self.lookahead.as_ref().expect("lookahead just filled")
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Token {
        match self.lookahead.take() {
            Some(tok) => tok,
            None => self.scan_token(),
        }
    }

    /// Drain the lexical diagnostics recorded so far.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_char_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Token {
        let ws = self.skip_trivia();

        let start = self.current_pos;
        let Some(c) = self.advance() else {
            let mut tok = Token::new(TokenKind::Eof, Span::empty(self.source.len()));
            tok.ws = ws;
            tok.ws.space_after = true;
            // Trailing whitespace is not a line of its own; its indentation
            // must not leak into the end-of-input token.
            if let Some(indent) = &mut tok.ws.newline_before {
                indent.0.clear();
            }
            return tok;
        };

        let kind = match c {
            // Operators and delimiters (longest match first)
            '=' => self.op_or(OpKey::EqEq, OpKey::Assign),
            '!' => self.op_or(OpKey::NotEq, OpKey::Bang),
            '<' => self.op_or(OpKey::LtEq, OpKey::Lt),
            '>' => self.op_or(OpKey::GtEq, OpKey::Gt),
            '+' => TokenKind::Op(OpKey::Plus),
            '-' => TokenKind::Op(OpKey::Minus),
            '*' => TokenKind::Op(OpKey::Star),
            '/' => TokenKind::Op(OpKey::Slash),
            '%' => TokenKind::Op(OpKey::Percent),
            '^' => TokenKind::Op(OpKey::Caret),
            ',' => TokenKind::Op(OpKey::Comma),
            ':' => TokenKind::Op(OpKey::Colon),
            ';' => TokenKind::Op(OpKey::Semi),
            '.' => TokenKind::Op(OpKey::Dot),
            '(' => TokenKind::Op(OpKey::LParen),
            ')' => TokenKind::Op(OpKey::RParen),
            '[' => TokenKind::Op(OpKey::LBracket),
            ']' => TokenKind::Op(OpKey::RBracket),

            // Strings
            '"' => self.scan_string(start, '"'),
            '\'' => self.scan_string(start, '\''),

            // Numbers
            '0'..='9' => self.scan_number(start, c),

            // Identifiers
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                self.errors.push(
                    ParseError::lexical(
                        format!("unrecognized character `{c}`"),
                        Span::new(start, self.current_pos),
                    )
                    .with_remedy("remove the character or quote it inside a string"),
                );
                TokenKind::Error
            }
        };

        let mut tok = Token::new(kind, Span::new(start, self.current_pos));
        tok.ws = ws;
        tok.ws.space_after = self.at_trailing_ws();
        tok
    }

    /// Skip spaces, comments, and newlines, accumulating whitespace facts
    /// for the upcoming token.
    fn skip_trivia(&mut self) -> WsFacts {
        let mut ws = WsFacts::default();
        let mut newline = false;
        let mut indent = String::new();

        while let Some(c) = self.peek_char() {
            match c {
                ' ' | '\t' => {
                    self.advance();
                    ws.space_before = true;
                    if newline {
                        indent.push(c);
                    }
                }
                '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    newline = true;
                    indent.clear();
                    ws.space_before = false;
                }
                '#' => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }

        if newline {
            ws.newline_before = Some(Indent(indent));
        }
        ws
    }

    fn at_trailing_ws(&mut self) -> bool {
        matches!(self.peek_char(), None | Some(' ' | '\t' | '\n' | '\r' | '#'))
    }

    fn op_or(&mut self, compound: OpKey, simple: OpKey) -> TokenKind {
        if self.match_char('=') {
            TokenKind::Op(compound)
        } else {
            TokenKind::Op(simple)
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) -> TokenKind {
        while let Some(c) = self.peek_char() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        TokenKind::Ident(self.source[start..self.current_pos].to_string())
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a whole source string.
///
/// Returns all tokens (ending with `Eof`) plus any lexical diagnostics.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> (Vec<Token>, Vec<ParseError>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let done = tok.kind == TokenKind::Eof;
        tokens.push(tok);
        if done {
            break;
        }
    }
    (tokens, lexer.take_errors())
}

// ============================================================================
// TESTS
// ============================================================================
