//! Structured syntax diagnostics.
//!
//! Every error the frontend produces carries an error kind, the offending
//! span, a human-readable message, and an optional one-line remedy. Errors
//! render through `miette` (the span becomes a label, the remedy becomes
//! help text) when the caller attaches source code.
//!
//! ## Severity policy
//! - [`ErrorKind::Indentation`] and [`ErrorKind::Structure`] are fatal: the
//!   parse stops at the first one.
//! - [`ErrorKind::Lexical`], [`ErrorKind::Arity`], and
//!   [`ErrorKind::MissingOperand`] leave an in-place marker in the tree and
//!   let the surrounding structure parse.

use miette::Diagnostic;
use thiserror::Error;

use crate::token::Span;

/// Taxonomy of frontend errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed literal, unrecognized character, unterminated string.
    Lexical,
    /// Line indentation that cannot be compared with the enclosing block.
    Indentation,
    /// An operator run admits no valid role assignment. This indicates a
    /// grammar-table bug rather than a user mistake, but is still reported
    /// with full context instead of panicking.
    Arity,
    /// Unmatched open or close delimiter.
    Structure,
    /// An operator configured to demand an operand did not get one.
    MissingOperand,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Indentation => write!(f, "indentation error"),
            ErrorKind::Arity => write!(f, "internal arity error"),
            ErrorKind::Structure => write!(f, "syntax error"),
            ErrorKind::MissingOperand => write!(f, "syntax error"),
        }
    }
}

/// A structured parse error.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("{kind}: {message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    #[label("here")]
    pub span: Span,
    #[help]
    pub remedy: Option<String>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            remedy: None,
        }
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lexical, message, span)
    }

    pub fn indentation(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Indentation, message, span)
    }

    pub fn arity(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Arity, message, span)
    }

    pub fn structure(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Structure, message, span)
    }

    pub fn missing_operand(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::MissingOperand, message, span)
    }

    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.remedy = Some(remedy.into());
        self
    }

    /// Whether this error aborts the parse.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ErrorKind::Indentation | ErrorKind::Structure)
    }
}
