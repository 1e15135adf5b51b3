//! Operator grammar table.
//!
//! Sprig deliberately overloads its operator symbols across grammatical
//! roles: `+` is simultaneously a prefix, an infix, and a postfix operator,
//! and the resolver picks exactly one role per occurrence. This module
//! defines the canonical set of role definitions along with precedence,
//! associativity, delimiter pairing, and block-opening metadata.
//!
//! ## Notes
//! - One [`OperatorDef`] exists per `(key, role)` pair; a symbol carries
//!   between one and three simultaneous role definitions.
//! - `precedence` is a relative ordering where **higher binds tighter**.
//! - Delimiter pairs (including the synthetic `indent`/`undent` and
//!   `begin`/`end` pairs) are the tightest-binding, left-associative
//!   entries, so a close delimiter only ever terminates its matching open
//!   and nothing binds through the pair.
//!
//! ## Examples
//! ```rust
//! use sprig_core::grammar::{self, OpKey, Role};
//!
//! assert_eq!(grammar::from_str("+"), Some(OpKey::Plus));
//! let infix = grammar::lookup(OpKey::Plus, Role::Infix).unwrap();
//! let tighter = grammar::lookup(OpKey::Star, Role::Infix).unwrap();
//! assert!(grammar::can_hold(infix, Some(tighter), grammar::Side::Right));
//! ```

/// Define how operators associate when chained at equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Which side of a prospective parent a child would attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Grammatical role of one operator definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A zero-operand atom (only the synthetic empty expression uses this).
    Expression,
    Prefix,
    Infix,
    Postfix,
    OpenDelim,
    CloseDelim,
}

/// Stable identifier for every operator symbol, shared across its roles.
///
/// Keys without a source spelling are synthetic: the resolver manufactures
/// their tokens with zero-width spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKey {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Bang,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Binding / structure
    Assign,
    Comma,
    Colon,
    Semi,
    Dot,

    // Bracket delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,

    // Synthetic (no source spelling)
    /// Juxtaposition-as-call, inserted between two adjacent operand phrases.
    Apply,
    /// Newline-as-statement-separator.
    Seq,
    /// Zero-width empty-expression atom.
    Empty,
    /// Virtual open delimiter for an indented block.
    Indent,
    /// Virtual close delimiter ending an indented block.
    Undent,
    /// Virtual open delimiter at the start of input.
    Begin,
    /// Virtual close delimiter at the end of input.
    End,
}

/// Metadata for one `(key, role)` definition.
#[derive(Debug, Clone, Copy)]
pub struct OperatorDef {
    pub key: OpKey,
    pub role: Role,
    pub precedence: u8,
    pub associativity: Associativity,
    /// Infix/prefix only: an immediately following newline opens an
    /// indented block after this operator.
    pub opens_block: bool,
    /// Delimiters only: the key of the partner open/close definition.
    pub partner: Option<OpKey>,
    /// Infix/prefix only: synthesizing an empty operand for this operator
    /// is reported as a missing-operand diagnostic instead of being silent.
    pub operand_required: bool,
}

/// Registry of all operator definitions.
///
/// Grouped loosest to tightest; delimiters last at the tightest level.
pub const OPERATORS: &[OperatorDef] = &[
    // Statement layer
    infix(OpKey::Seq, 5, Associativity::Left),
    infix(OpKey::Semi, 8, Associativity::Left),
    // Binding
    infix_demanding(OpKey::Assign, 15, Associativity::Right),
    infix(OpKey::Comma, 20, Associativity::Left),
    infix_block(OpKey::Colon, 25, Associativity::Right),
    // Comparison
    infix(OpKey::EqEq, 40, Associativity::Left),
    infix(OpKey::NotEq, 40, Associativity::Left),
    infix(OpKey::Lt, 40, Associativity::Left),
    infix(OpKey::LtEq, 40, Associativity::Left),
    infix(OpKey::Gt, 40, Associativity::Left),
    infix(OpKey::GtEq, 40, Associativity::Left),
    // Arithmetic
    infix(OpKey::Plus, 50, Associativity::Left),
    infix(OpKey::Minus, 50, Associativity::Left),
    infix(OpKey::Star, 60, Associativity::Left),
    infix(OpKey::Slash, 60, Associativity::Left),
    infix(OpKey::Percent, 60, Associativity::Left),
    infix(OpKey::Caret, 65, Associativity::Right),
    // Unary
    prefix(OpKey::Plus, 70),
    prefix(OpKey::Minus, 70),
    prefix(OpKey::Bang, 70),
    // Juxtaposition binds tighter than arithmetic, looser than postfix
    infix(OpKey::Apply, 85, Associativity::Left),
    postfix(OpKey::Plus, 90),
    postfix(OpKey::Bang, 90),
    // Access
    infix(OpKey::Dot, 95, Associativity::Left),
    // The empty expression is an atom; it binds like one
    expression(OpKey::Empty),
    // Delimiters: tightest-binding, always left-associative pairs
    open(OpKey::LParen, OpKey::RParen),
    close(OpKey::RParen, OpKey::LParen),
    open(OpKey::LBracket, OpKey::RBracket),
    close(OpKey::RBracket, OpKey::LBracket),
    open(OpKey::Indent, OpKey::Undent),
    close(OpKey::Undent, OpKey::Indent),
    open(OpKey::Begin, OpKey::End),
    close(OpKey::End, OpKey::Begin),
];

/// Precedence shared by every delimiter definition.
pub const DELIM_PRECEDENCE: u8 = 100;

/// Return all role definitions sharing one key (one to three entries).
pub fn defs_for(key: OpKey) -> impl Iterator<Item = &'static OperatorDef> {
    OPERATORS.iter().filter(move |d| d.key == key)
}

/// Return the definition for a `(key, role)` pair, if the table has one.
pub fn lookup(key: OpKey, role: Role) -> Option<&'static OperatorDef> {
    OPERATORS.iter().find(|d| d.key == key && d.role == role)
}

/// Resolve an operator spelling to its key.
///
/// ## Notes
/// - Synthetic keys have no spelling and never resolve.
/// - The lexer performs longest-match itself; this expects a full spelling.
pub fn from_str(spelling: &str) -> Option<OpKey> {
    let key = match spelling {
        "+" => OpKey::Plus,
        "-" => OpKey::Minus,
        "*" => OpKey::Star,
        "/" => OpKey::Slash,
        "%" => OpKey::Percent,
        "^" => OpKey::Caret,
        "!" => OpKey::Bang,
        "==" => OpKey::EqEq,
        "!=" => OpKey::NotEq,
        "<" => OpKey::Lt,
        "<=" => OpKey::LtEq,
        ">" => OpKey::Gt,
        ">=" => OpKey::GtEq,
        "=" => OpKey::Assign,
        "," => OpKey::Comma,
        ":" => OpKey::Colon,
        ";" => OpKey::Semi,
        "." => OpKey::Dot,
        "(" => OpKey::LParen,
        ")" => OpKey::RParen,
        "[" => OpKey::LBracket,
        "]" => OpKey::RBracket,
        _ => return None,
    };
    Some(key)
}

/// Source spelling of a key, or `None` for synthetic keys.
pub fn spelling(key: OpKey) -> Option<&'static str> {
    let s = match key {
        OpKey::Plus => "+",
        OpKey::Minus => "-",
        OpKey::Star => "*",
        OpKey::Slash => "/",
        OpKey::Percent => "%",
        OpKey::Caret => "^",
        OpKey::Bang => "!",
        OpKey::EqEq => "==",
        OpKey::NotEq => "!=",
        OpKey::Lt => "<",
        OpKey::LtEq => "<=",
        OpKey::Gt => ">",
        OpKey::GtEq => ">=",
        OpKey::Assign => "=",
        OpKey::Comma => ",",
        OpKey::Colon => ":",
        OpKey::Semi => ";",
        OpKey::Dot => ".",
        OpKey::LParen => "(",
        OpKey::RParen => ")",
        OpKey::LBracket => "[",
        OpKey::RBracket => "]",
        OpKey::Apply
        | OpKey::Seq
        | OpKey::Empty
        | OpKey::Indent
        | OpKey::Undent
        | OpKey::Begin
        | OpKey::End => return None,
    };
    Some(s)
}

/// Display name for a key: the spelling, or a word for synthetic keys.
pub fn name(key: OpKey) -> &'static str {
    match key {
        OpKey::Apply => "apply",
        OpKey::Seq => "seq",
        OpKey::Empty => "empty",
        OpKey::Indent => "indent",
        OpKey::Undent => "undent",
        OpKey::Begin => "begin",
        OpKey::End => "end",
        _ => spelling(key).unwrap_or("?"),
    }
}

/// Answer whether `parent` can directly hold `child` on the given side.
///
/// `child` is `None` for plain atoms, which bind tightest of all. A closed
/// delimiter pair behaves like an atom; an open delimiter is never
/// adoptable, so precedence climbing cannot escape an unclosed bracket or
/// block.
///
/// ## Returns
/// - `true` iff `child` binds strictly tighter than `parent`, or equally
///   tight with `parent`'s associativity matching `side`.
pub fn can_hold(parent: &OperatorDef, child: Option<&OperatorDef>, side: Side) -> bool {
    let Some(child) = child else {
        return true;
    };
    match child.role {
        Role::Expression | Role::CloseDelim => true,
        Role::OpenDelim => false,
        _ => {
            child.precedence > parent.precedence
                || (child.precedence == parent.precedence && assoc_matches(parent, side))
        }
    }
}

fn assoc_matches(parent: &OperatorDef, side: Side) -> bool {
    matches!(
        (parent.associativity, side),
        (Associativity::Left, Side::Left) | (Associativity::Right, Side::Right)
    )
}

// --- const builders ----------------------------------------------------------

const fn infix(key: OpKey, precedence: u8, associativity: Associativity) -> OperatorDef {
    OperatorDef {
        key,
        role: Role::Infix,
        precedence,
        associativity,
        opens_block: false,
        partner: None,
        operand_required: false,
    }
}

const fn infix_block(key: OpKey, precedence: u8, associativity: Associativity) -> OperatorDef {
    OperatorDef {
        key,
        role: Role::Infix,
        precedence,
        associativity,
        opens_block: true,
        partner: None,
        operand_required: false,
    }
}

const fn infix_demanding(key: OpKey, precedence: u8, associativity: Associativity) -> OperatorDef {
    OperatorDef {
        key,
        role: Role::Infix,
        precedence,
        associativity,
        opens_block: false,
        partner: None,
        operand_required: true,
    }
}

const fn prefix(key: OpKey, precedence: u8) -> OperatorDef {
    OperatorDef {
        key,
        role: Role::Prefix,
        precedence,
        associativity: Associativity::Right,
        opens_block: false,
        partner: None,
        operand_required: false,
    }
}

const fn postfix(key: OpKey, precedence: u8) -> OperatorDef {
    OperatorDef {
        key,
        role: Role::Postfix,
        precedence,
        associativity: Associativity::Left,
        opens_block: false,
        partner: None,
        operand_required: false,
    }
}

const fn expression(key: OpKey) -> OperatorDef {
    OperatorDef {
        key,
        role: Role::Expression,
        precedence: u8::MAX,
        associativity: Associativity::Left,
        opens_block: false,
        partner: None,
        operand_required: false,
    }
}

const fn open(key: OpKey, partner: OpKey) -> OperatorDef {
    OperatorDef {
        key,
        role: Role::OpenDelim,
        precedence: DELIM_PRECEDENCE,
        associativity: Associativity::Left,
        opens_block: false,
        partner: Some(partner),
        operand_required: false,
    }
}

const fn close(key: OpKey, partner: OpKey) -> OperatorDef {
    OperatorDef {
        key,
        role: Role::CloseDelim,
        precedence: DELIM_PRECEDENCE,
        associativity: Associativity::Left,
        opens_block: false,
        partner: Some(partner),
        operand_required: false,
    }
}

// ============================================================================
// TESTS
// ============================================================================
