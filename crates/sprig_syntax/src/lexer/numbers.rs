//! Numeric literal scanning.
//!
//! Supports decimal integers and floats (with optional exponent), plus
//! restricted-radix integers (`0x`, `0o`, `0b`), all with `_` separators.
//! Illegal digits for the active radix are a lexical error; the literal
//! still produces a marker token so the parse can continue.

use crate::diagnostics::ParseError;
use crate::token::{Span, TokenKind};

use super::Lexer;

impl Lexer<'_> {
    /// Scan a numeric literal whose first digit has been consumed.
    pub(super) fn scan_number(&mut self, start: usize, first: char) -> TokenKind {
        if first == '0' {
            let radix = match self.peek_char() {
                Some('x' | 'X') => Some((16, "hexadecimal")),
                Some('o' | 'O') => Some((8, "octal")),
                Some('b' | 'B') => Some((2, "binary")),
                _ => None,
            };
            if let Some((radix, radix_name)) = radix {
                self.advance();
                return self.scan_radix_int(start, radix, radix_name);
            }
        }

        // Decimal integer part
        self.consume_digit_run();

        let mut is_float = false;

        // Fractional part: only when a digit follows the dot, so `1.x`
        // stays `1` `.` `x`.
        if self.peek_char() == Some('.') && self.peek_char_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.advance();
            self.consume_digit_run();
            is_float = true;
        }

        // Exponent part
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let after_sign = match self.peek_char_next() {
                Some('+' | '-') => self.nth_char(2),
                other => other,
            };
            if after_sign.is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
                if matches!(self.peek_char(), Some('+' | '-')) {
                    self.advance();
                }
                self.consume_digit_run();
                is_float = true;
            } else if self.peek_char_next().is_none()
                || self
                    .peek_char_next()
                    .is_some_and(|c| !c.is_ascii_alphanumeric())
            {
                // `1e` / `1e+` with nothing usable after: malformed.
                self.advance();
                if matches!(self.peek_char(), Some('+' | '-')) {
                    self.advance();
                }
                self.errors.push(
                    ParseError::lexical(
                        "malformed exponent in numeric literal",
                        Span::new(start, self.current_pos),
                    )
                    .with_remedy("follow `e` with at least one digit"),
                );
                return TokenKind::Error;
            }
            // Otherwise the `e` starts an identifier (`1em`); leave it.
        }

        let text: String = self.source[start..self.current_pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();

        if is_float {
            match text.parse::<f64>() {
                Ok(f) => TokenKind::Float(f),
                Err(_) => {
                    self.errors.push(ParseError::lexical(
                        "malformed numeric literal",
                        Span::new(start, self.current_pos),
                    ));
                    TokenKind::Error
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(n) => TokenKind::Int(n),
                Err(_) => {
                    self.errors.push(
                        ParseError::lexical(
                            "integer literal too large",
                            Span::new(start, self.current_pos),
                        )
                        .with_remedy("use a smaller value or a float literal"),
                    );
                    TokenKind::Error
                }
            }
        }
    }

    /// Scan the digits of a `0x`/`0o`/`0b` literal (prefix already consumed).
    fn scan_radix_int(&mut self, start: usize, radix: u32, radix_name: &str) -> TokenKind {
        let digits_start = self.current_pos;
        let mut bad_digit: Option<(char, usize)> = None;

        while let Some(c) = self.peek_char() {
            if c == '_' {
                self.advance();
            } else if c.is_ascii_alphanumeric() {
                if !c.is_digit(radix) && bad_digit.is_none() {
                    bad_digit = Some((c, self.current_pos));
                }
                self.advance();
            } else {
                break;
            }
        }

        if let Some((c, pos)) = bad_digit {
            self.errors.push(
                ParseError::lexical(
                    format!("illegal digit `{c}` in {radix_name} literal"),
                    Span::new(pos, pos + c.len_utf8()),
                )
                .with_remedy(format!("{radix_name} literals only allow digits below {radix}")),
            );
            return TokenKind::Error;
        }

        let digits: String = self.source[digits_start..self.current_pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();

        if digits.is_empty() {
            self.errors.push(
                ParseError::lexical(
                    format!("missing digits in {radix_name} literal"),
                    Span::new(start, self.current_pos),
                )
                .with_remedy("add at least one digit after the radix prefix"),
            );
            return TokenKind::Error;
        }

        match i64::from_str_radix(&digits, radix) {
            Ok(n) => TokenKind::Int(n),
            Err(_) => {
                self.errors.push(
                    ParseError::lexical(
                        "integer literal too large",
                        Span::new(start, self.current_pos),
                    )
                    .with_remedy("use a smaller value"),
                );
                TokenKind::Error
            }
        }
    }

    fn consume_digit_run(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn nth_char(&self, n: usize) -> Option<char> {
        self.source[self.current_pos..].chars().nth(n)
    }
}
