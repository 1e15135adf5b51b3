//! String literal scanning.
//!
//! Single- or double-quoted, single-line, with a small escape set. A string
//! that reaches a newline or end of input unterminated produces a marker
//! token and a diagnostic; the newline itself is left for the trivia
//! scanner so indentation tracking stays intact.

use crate::diagnostics::ParseError;
use crate::token::{Span, TokenKind};

use super::Lexer;

impl Lexer<'_> {
    /// Scan a string literal whose opening quote has been consumed.
    pub(super) fn scan_string(&mut self, start: usize, quote: char) -> TokenKind {
        let mut value = String::new();
        let mut bad_escape = false;

        loop {
            match self.peek_char() {
                None | Some('\n') => {
                    self.errors.push(
                        ParseError::lexical(
                            "unterminated string literal",
                            Span::new(start, self.current_pos),
                        )
                        .with_remedy(format!("add a closing `{quote}`")),
                    );
                    return TokenKind::Error;
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    let esc_start = self.current_pos;
                    match self.advance() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('r') => value.push('\r'),
                        Some('\\') => value.push('\\'),
                        Some('0') => value.push('\0'),
                        Some(c) if c == quote => value.push(c),
                        Some('\'') => value.push('\''),
                        Some('"') => value.push('"'),
                        Some(c) => {
                            self.errors.push(
                                ParseError::lexical(
                                    format!("unknown escape `\\{c}` in string literal"),
                                    Span::new(esc_start - 1, self.current_pos),
                                )
                                .with_remedy("use one of \\n \\t \\r \\\\ \\0 \\' \\\""),
                            );
                            bad_escape = true;
                        }
                        None => {
                            self.errors.push(
                                ParseError::lexical(
                                    "unterminated string literal",
                                    Span::new(start, self.current_pos),
                                )
                                .with_remedy(format!("add a closing `{quote}`")),
                            );
                            return TokenKind::Error;
                        }
                    }
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        if bad_escape {
            TokenKind::Error
        } else {
            TokenKind::Str(value)
        }
    }
}
