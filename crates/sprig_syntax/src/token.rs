//! Token types for the Sprig lexer.
//!
//! Every token carries its source span plus the whitespace facts the arity
//! resolver needs: whether whitespace touches the token on either side, and
//! the exact indentation of its line when it is the first token on one.
//!
//! ## Notes
//! - Operator tokens carry an [`OpKey`] from `sprig_core::grammar` rather
//!   than a string spelling; role picking happens later, in the resolver.
//! - Synthetic tokens (apply, seq, empty, indent, undent, begin, end) are
//!   manufactured by [`Token::synthetic`] with a zero-width span and flow
//!   through the same paths as lexed tokens.

use std::cmp::Ordering;

use sprig_core::grammar::OpKey;

/// Source location span (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at one offset, used for synthetic tokens.
    pub fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// Exact leading whitespace of a source line.
///
/// Widths are only comparable when one indent is a prefix of the other;
/// mixing tabs and spaces inconsistently makes two lines incomparable, which
/// the resolver reports as a fatal indentation error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Indent(pub String);

impl Indent {
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Compare two indents, or `None` when they share no common prefix.
    pub fn compare(&self, other: &Indent) -> Option<Ordering> {
        if self.0 == other.0 {
            Some(Ordering::Equal)
        } else if other.0.starts_with(&self.0) {
            Some(Ordering::Less)
        } else if self.0.starts_with(&other.0) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

/// Whitespace context around one token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WsFacts {
    /// A space or tab directly precedes the token.
    pub space_before: bool,
    /// A space, tab, newline, comment, or end of input directly follows.
    pub space_after: bool,
    /// Set when this is the first token of a line: the line's indentation.
    pub newline_before: Option<Indent>,
}

impl WsFacts {
    /// Leading whitespace for sticky-adjacency purposes: a preceding space
    /// or a preceding line break both count.
    pub fn leading_ws(&self) -> bool {
        self.space_before || self.newline_before.is_some()
    }
}

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    /// Operator-capable symbol; role definitions come from the grammar table.
    Op(OpKey),
    /// In-place marker for a lexically malformed token; parses as an atom.
    Error,
    Eof,
}

impl TokenKind {
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Str(_)
                | TokenKind::Error
        )
    }

    pub fn op_key(&self) -> Option<OpKey> {
        match self {
            TokenKind::Op(key) => Some(*key),
            _ => None,
        }
    }
}

/// A token with its kind, span, and whitespace facts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub ws: WsFacts,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            ws: WsFacts::default(),
        }
    }

    /// Manufacture a zero-width synthetic operator token at `offset`.
    pub fn synthetic(key: OpKey, offset: usize) -> Self {
        Self::new(TokenKind::Op(key), Span::empty(offset))
    }
}
