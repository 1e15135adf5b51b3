//! Arity resolver: role picking for overloaded operators.
//!
//! Sprig symbols such as `+` or `:` are simultaneously valid in several
//! grammatical roles. This module consumes the raw token stream, decides
//! one role per operator occurrence, synthesizes the tokens that never
//! appear literally in the source (juxtaposition `apply`, newline `seq`,
//! `empty` operands, `indent`/`undent` block delimiters, and the outer
//! `begin`/`end` pair), and feeds everything to the tree builder in lexical
//! order.
//!
//! ## How roles are picked
//!
//! The resolver alternates between two phases: expecting an operand and
//! expecting an operator. In operator position, a run of consecutive
//! same-line operator tokens is buffered in a small deque and resolved
//! against what terminates it:
//!
//! 1. Sticky adjacency first: `a+ b` forces the `+` postfix, `a -b` forces
//!    the `-` prefix. Sticky constraints are dropped and the run re-planned
//!    if they make the run unsolvable (they are a bias, not a mandate).
//! 2. Otherwise the longest suffix of prefix-capable tokens wins, with
//!    exactly one infix immediately to its left and only postfix-capable
//!    tokens before that.
//! 3. With no infix available, a zero-width `seq` (when the phrase starts a
//!    new line) or `apply` (plain juxtaposition) is synthesized.
//!
//! A run that still admits no assignment is reported as an internal arity
//! error and recovered deterministically.
//!
//! ## Indentation
//!
//! A block-opening operator immediately followed by a line break pushes an
//! open-indent record holding the opening line's indentation and emits a
//! virtual `indent` delimiter. Each line start pops every record whose
//! indentation the new line does not exceed, emitting `undent` closes.
//! Indentation that cannot be compared (tab/space mixing) aborts the parse.

use std::cmp::Ordering;
use std::collections::VecDeque;

use sprig_core::grammar::{self, OpKey, OperatorDef, Role};

use crate::diagnostics::ParseError;
use crate::lexer::Lexer;
use crate::token::{Indent, Span, Token, TokenKind};
use crate::tree::{SyntaxTree, TreeBuilder};

/// Result of a successful parse: the tree plus non-fatal diagnostics
/// (lexical markers, arity recoveries, missing operands).
#[derive(Debug)]
pub struct Parse {
    pub tree: SyntaxTree,
    pub errors: Vec<ParseError>,
}

/// Parse one source string into a syntax tree.
///
/// ## Errors
/// Returns every collected diagnostic when a fatal one (indentation or
/// delimiter structure) aborts the parse. Non-fatal diagnostics ride along
/// inside [`Parse`].
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse(source: &str) -> Result<Parse, Vec<ParseError>> {
    Resolver::new(source).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Operand,
    Operator,
}

/// What terminates a buffered operator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// An atom or open delimiter on the same line: an operand follows.
    OperandStart,
    /// The next token starts a new line.
    LineEnd,
    /// A close delimiter or end of input: no operand can follow.
    CloseOrEof,
}

/// An indentation level opened by a block operator and not yet closed.
#[derive(Debug)]
struct OpenIndent {
    /// Indentation of the line containing the opening operator. The block
    /// holds every following line indented strictly deeper than this.
    indent: Indent,
}

/// One buffered operator token with its candidate roles.
struct RunTok {
    token: Token,
    prefix: Option<&'static OperatorDef>,
    infix: Option<&'static OperatorDef>,
    postfix: Option<&'static OperatorDef>,
    /// Role demanded by sticky whitespace adjacency, if any.
    forced: Option<Role>,
}

impl RunTok {
    fn classify(token: Token) -> Self {
        let key = token
            .kind
            .op_key()
            .expect("run tokens are operator tokens");
        let prefix = grammar::lookup(key, Role::Prefix);
        let infix = grammar::lookup(key, Role::Infix);
        let postfix = grammar::lookup(key, Role::Postfix);

        let leading = token.ws.leading_ws();
        let trailing = token.ws.space_after;
        let forced = if !leading && trailing && postfix.is_some() {
            Some(Role::Postfix)
        } else if leading && !trailing && prefix.is_some() {
            Some(Role::Prefix)
        } else {
            None
        };

        Self {
            token,
            prefix,
            infix,
            postfix,
            forced,
        }
    }

    fn prefix_ok(&self, strict: bool) -> bool {
        self.prefix.is_some() && (!strict || !matches!(self.forced, Some(Role::Postfix)))
    }

    fn infix_ok(&self, strict: bool) -> bool {
        self.infix.is_some() && (!strict || self.forced.is_none())
    }

    fn postfix_ok(&self, strict: bool) -> bool {
        self.postfix.is_some() && (!strict || !matches!(self.forced, Some(Role::Prefix)))
    }
}

/// Role assignment for one operator run: `postfix* infix? boundary? prefix*`.
struct Plan {
    /// Tokens `0..postfixes` play postfix.
    postfixes: usize,
    /// Index of the infix token, if the run contains one.
    infix: Option<usize>,
    /// Synthesize an apply/seq between postfix and prefix parts.
    synthesize_boundary: bool,
}

/// The arity resolver: one instance per parse, never reused.
pub struct Resolver<'a> {
    lexer: Lexer<'a>,
    /// Lookahead buffer; also receives re-queued tokens during recovery.
    pending: VecDeque<Token>,
    builder: TreeBuilder,
    phase: Phase,
    indents: Vec<OpenIndent>,
    /// Indentation of the line currently being read.
    line_indent: Indent,
    /// Span of a block-opening operator whose newline has not arrived yet.
    block_pending: Option<Span>,
    /// The operator owed the next operand, for missing-operand reporting.
    awaiting: Option<(Span, &'static OperatorDef)>,
    /// True while nothing has been consumed since the current line started.
    fresh_line: bool,
    errors: Vec<ParseError>,
    src_len: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            pending: VecDeque::new(),
            builder: TreeBuilder::new(),
            phase: Phase::Operand,
            indents: Vec::new(),
            line_indent: Indent::default(),
            block_pending: None,
            awaiting: None,
            fresh_line: false,
            errors: Vec::new(),
            src_len: source.len(),
        }
    }

    /// Run the full parse.
    pub fn run(mut self) -> Result<Parse, Vec<ParseError>> {
        let outcome = self.parse_loop();
        let mut errors = self.lexer.take_errors();
        errors.append(&mut self.errors);
        match outcome {
            Ok(()) => {
                errors.sort_by_key(|e| (e.span.start, e.span.end));
                Ok(Parse {
                    tree: self.builder.finish(),
                    errors,
                })
            }
            Err(fatal) => {
                errors.push(fatal);
                errors.sort_by_key(|e| (e.span.start, e.span.end));
                Err(errors)
            }
        }
    }

    fn parse_loop(&mut self) -> Result<(), ParseError> {
        self.builder.push_operand(
            Token::synthetic(OpKey::Begin, 0),
            Some(def_of(OpKey::Begin, Role::OpenDelim)),
        );

        loop {
            if self.peek().ws.newline_before.is_some() {
                let at = self.peek().span.start;
                let front = self.peek_mut();
                let indent = front
                    .ws
                    .newline_before
                    .take()
                    .expect("newline fact just observed");
                // A line break counts as leading whitespace for stickiness.
                front.ws.space_before = true;
                self.fresh_line = true;
                self.line_break(indent, at)?;
            }

            match self.phase {
                Phase::Operand => self.step_operand()?,
                Phase::Operator => {
                    if self.step_operator()? {
                        return Ok(());
                    }
                }
            }
        }
    }

    // ========================================================================
    // Token access
    // ========================================================================

    fn peek(&mut self) -> &Token {
        if self.pending.is_empty() {
            let tok = self.lexer.next_token();
            self.pending.push_back(tok);
        }
        &self.pending[0]
    }

    fn peek_mut(&mut self) -> &mut Token {
        self.peek();
        &mut self.pending[0]
    }

    fn bump(&mut self) -> Token {
        self.peek();
        self.fresh_line = false;
        self.pending.pop_front().expect("peek populated the buffer")
    }

    // ========================================================================
    // Indentation bookkeeping
    // ========================================================================

    /// Handle the start of a new line: open a pending indent block, then
    /// close every block the new line has dedented out of.
    fn line_break(&mut self, indent: Indent, at: usize) -> Result<(), ParseError> {
        if self.block_pending.take().is_some() {
            self.builder.push_operand(
                Token::synthetic(OpKey::Indent, at),
                Some(def_of(OpKey::Indent, Role::OpenDelim)),
            );
            self.indents.push(OpenIndent {
                indent: self.line_indent.clone(),
            });
        }

        while let Some(top) = self.indents.last() {
            match indent.compare(&top.indent) {
                Some(Ordering::Greater) => break,
                Some(_) => self.close_indent_block(at)?,
                None => {
                    return Err(ParseError::indentation(
                        "indentation mixes tabs and spaces in a way that cannot be compared",
                        Span::new(at - indent.width(), at),
                    )
                    .with_remedy("indent with the same characters as the enclosing block"));
                }
            }
        }

        self.line_indent = indent;
        Ok(())
    }

    fn close_indent_block(&mut self, at: usize) -> Result<(), ParseError> {
        if self.phase == Phase::Operand {
            // Block closed before its operand arrived: `a:` straight into a
            // dedent yields an empty block body.
            self.emit_empty(at);
        }
        self.builder.push_close(
            Token::synthetic(OpKey::Undent, at),
            def_of(OpKey::Undent, Role::CloseDelim),
        )?;
        self.indents.pop();
        Ok(())
    }

    // ========================================================================
    // Operand phase
    // ========================================================================

    fn step_operand(&mut self) -> Result<(), ParseError> {
        let front = self.peek();
        let is_atom = front.kind.is_atom();
        let is_eof = front.kind == TokenKind::Eof;
        let key = front.kind.op_key();
        let at = front.span.start;

        if is_atom {
            let tok = self.bump();
            self.awaiting = None;
            self.builder.push_operand(tok, None);
            self.phase = Phase::Operator;
        } else if is_eof {
            self.emit_empty(self.src_len);
        } else if let Some(key) = key {
            if let Some(def) = grammar::lookup(key, Role::OpenDelim) {
                let tok = self.bump();
                self.awaiting = None;
                self.builder.push_operand(tok, Some(def));
            } else if let Some(def) = grammar::lookup(key, Role::Prefix) {
                let tok = self.bump();
                let span = tok.span;
                self.builder.push_operand(tok, Some(def));
                self.awaiting = Some((span, def));
            } else {
                // Close delimiter or infix/postfix-only symbol where an
                // operand was expected: synthesize the empty expression and
                // let operator position deal with the token.
                self.emit_empty(at);
            }
        }
        Ok(())
    }

    /// Synthesize a zero-width empty-expression atom, reporting a missing
    /// operand when the operator owed one demands it.
    fn emit_empty(&mut self, at: usize) {
        if let Some((span, def)) = self.awaiting.take() {
            if def.operand_required {
                self.errors.push(
                    ParseError::missing_operand(
                        format!("operator `{}` is missing its operand", grammar::name(def.key)),
                        span,
                    )
                    .with_remedy("add an expression after the operator or remove it"),
                );
            }
        }
        self.builder.push_operand(
            Token::synthetic(OpKey::Empty, at),
            Some(def_of(OpKey::Empty, Role::Expression)),
        );
        self.phase = Phase::Operator;
    }

    // ========================================================================
    // Operator phase
    // ========================================================================

    /// Returns `true` once the final `end` delimiter has been matched.
    fn step_operator(&mut self) -> Result<bool, ParseError> {
        let line_led = self.fresh_line;
        let front = self.peek();
        let is_eof = front.kind == TokenKind::Eof;
        let key = front.kind.op_key();
        let at = front.span.start;

        if is_eof {
            while !self.indents.is_empty() {
                self.close_indent_block(self.src_len)?;
            }
            self.builder.push_close(
                Token::synthetic(OpKey::End, self.src_len),
                def_of(OpKey::End, Role::CloseDelim),
            )?;
            return Ok(true);
        }

        if let Some(key) = key {
            if let Some(def) = grammar::lookup(key, Role::CloseDelim) {
                let tok = self.bump();
                self.builder.push_close(tok, def)?;
            } else if grammar::lookup(key, Role::OpenDelim).is_some() {
                self.emit_phrase_boundary(line_led, at);
            } else {
                let run = self.collect_run();
                self.resolve_run(run, line_led);
            }
        } else {
            // A plain atom straight after a finished operand phrase.
            self.emit_phrase_boundary(line_led, at);
        }
        Ok(false)
    }

    /// Synthesize the infix joining two adjacent phrases: `seq` at a line
    /// break, `apply` (call-by-juxtaposition) otherwise.
    fn emit_phrase_boundary(&mut self, line_led: bool, at: usize) {
        let key = if line_led { OpKey::Seq } else { OpKey::Apply };
        let def = def_of(key, Role::Infix);
        self.builder
            .push_operator(Token::synthetic(key, at), def);
        self.awaiting = Some((Span::empty(at), def));
        self.phase = Phase::Operand;
    }

    /// Buffer a run of consecutive same-line, non-delimiter operator tokens.
    fn collect_run(&mut self) -> Vec<RunTok> {
        let mut run = vec![RunTok::classify(self.bump())];
        loop {
            let tok = self.peek();
            let continues = match tok.kind.op_key() {
                Some(key) => {
                    grammar::lookup(key, Role::OpenDelim).is_none()
                        && grammar::lookup(key, Role::CloseDelim).is_none()
                        && tok.ws.newline_before.is_none()
                }
                None => false,
            };
            if continues {
                run.push(RunTok::classify(self.bump()));
            } else {
                break;
            }
        }
        run
    }

    fn boundary_kind(&mut self) -> Boundary {
        let tok = self.peek();
        if tok.ws.newline_before.is_some() {
            return Boundary::LineEnd;
        }
        match &tok.kind {
            TokenKind::Eof => Boundary::CloseOrEof,
            TokenKind::Op(key) if grammar::lookup(*key, Role::CloseDelim).is_some() => {
                Boundary::CloseOrEof
            }
            _ => Boundary::OperandStart,
        }
    }

    /// Decide one role per buffered operator and emit the run.
    fn resolve_run(&mut self, run: Vec<RunTok>, line_led: bool) {
        let boundary = self.boundary_kind();
        let fallback_at = self.peek().span.start;

        let plan = [true, false]
            .iter()
            .find_map(|&strict| plan_run(&run, boundary, strict));

        match plan {
            Some(plan) => self.emit_plan(run, plan, boundary, line_led, fallback_at),
            None => self.recover_dead_run(run, line_led),
        }
    }

    fn emit_plan(
        &mut self,
        run: Vec<RunTok>,
        plan: Plan,
        boundary: Boundary,
        line_led: bool,
        fallback_at: usize,
    ) {
        let last = run.len() - 1;
        for (i, rt) in run.into_iter().enumerate() {
            if i < plan.postfixes {
                let def = rt.postfix.expect("planned postfix role");
                self.builder.push_operator(rt.token, def);
            } else if plan.infix == Some(i) {
                let def = rt.infix.expect("planned infix role");
                let span = rt.token.span;
                self.builder.push_operator(rt.token, def);
                self.awaiting = Some((span, def));
                self.phase = Phase::Operand;
                if def.opens_block && boundary == Boundary::LineEnd && i == last {
                    self.block_pending = Some(span);
                }
            } else {
                if plan.synthesize_boundary && plan.infix.is_none() && i == plan.postfixes {
                    // The prefix part starts here; splice the phrase joiner
                    // right before it.
                    self.emit_phrase_boundary(line_led, rt.token.span.start);
                }
                let def = rt.prefix.expect("planned prefix role");
                let span = rt.token.span;
                self.builder.push_operand(rt.token, Some(def));
                self.awaiting = Some((span, def));
                self.phase = Phase::Operand;
            }
        }
        // A synthesized boundary with an empty prefix part sits directly
        // before the terminator.
        if plan.synthesize_boundary && plan.infix.is_none() && self.phase == Phase::Operator {
            self.emit_phrase_boundary(line_led, fallback_at);
        }
    }

    /// No valid assignment even with sticky constraints dropped: report the
    /// internal arity error and force a deterministic recovery.
    fn recover_dead_run(&mut self, mut run: Vec<RunTok>, line_led: bool) {
        let run_span = run
            .iter()
            .map(|rt| rt.token.span)
            .reduce(Span::merge)
            .unwrap_or(Span::empty(self.src_len));
        let first_name = run[0]
            .token
            .kind
            .op_key()
            .map(grammar::name)
            .unwrap_or("?");
        self.errors.push(
            ParseError::arity(
                format!("operator run starting at `{first_name}` admits no valid role assignment"),
                run_span,
            )
            .with_remedy("this indicates a grammar-table bug rather than a source mistake"),
        );

        let first = run.remove(0);
        for rt in run.into_iter().rev() {
            self.pending.push_front(rt.token);
        }

        let span = first.token.span;
        if let Some(def) = first.infix {
            self.builder.push_operator(first.token, def);
            self.awaiting = Some((span, def));
            self.phase = Phase::Operand;
        } else if let Some(def) = first.postfix {
            self.builder.push_operator(first.token, def);
        } else if let Some(def) = first.prefix {
            self.emit_phrase_boundary(line_led, span.start);
            self.builder.push_operand(first.token, Some(def));
            self.awaiting = Some((span, def));
            self.phase = Phase::Operand;
        }
    }
}

/// Find a role assignment for a run, honoring sticky constraints when
/// `strict`.
fn plan_run(run: &[RunTok], boundary: Boundary, strict: bool) -> Option<Plan> {
    let n = run.len();
    match boundary {
        Boundary::OperandStart => {
            // One infix with the longest possible prefix run to its right.
            for j in 0..n {
                if run[j].infix_ok(strict)
                    && run[..j].iter().all(|t| t.postfix_ok(strict))
                    && run[j + 1..].iter().all(|t| t.prefix_ok(strict))
                {
                    return Some(Plan {
                        postfixes: j,
                        infix: Some(j),
                        synthesize_boundary: false,
                    });
                }
            }
            // No infix anywhere: split into postfixes then prefixes around a
            // synthesized apply/seq, maximizing the prefix part.
            for k in 0..=n {
                if run[..k].iter().all(|t| t.postfix_ok(strict))
                    && run[k..].iter().all(|t| t.prefix_ok(strict))
                {
                    return Some(Plan {
                        postfixes: k,
                        infix: None,
                        synthesize_boundary: true,
                    });
                }
            }
            None
        }
        Boundary::LineEnd | Boundary::CloseOrEof => {
            // No operand follows: everything should be postfix, or end in a
            // trailing infix whose operand arrives later (next line, or a
            // synthesized empty expression).
            if run.iter().all(|t| t.postfix_ok(strict)) {
                return Some(Plan {
                    postfixes: n,
                    infix: None,
                    synthesize_boundary: false,
                });
            }
            if run[n - 1].infix_ok(strict) && run[..n - 1].iter().all(|t| t.postfix_ok(strict)) {
                return Some(Plan {
                    postfixes: n - 1,
                    infix: Some(n - 1),
                    synthesize_boundary: false,
                });
            }
            None
        }
    }
}

fn def_of(key: OpKey, role: Role) -> &'static OperatorDef {
    grammar::lookup(key, role).expect("grammar table entry missing")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;
    use crate::pretty;

    fn expr(source: &str) -> String {
        let parsed = parse(source).expect("parse should succeed");
        assert!(
            parsed.errors.is_empty(),
            "unexpected diagnostics for {source:?}: {:?}",
            parsed.errors
        );
        pretty::subtree_to_string(&parsed.tree, parsed.tree.top_level(), source)
    }

    #[test]
    fn precedence_shapes_arithmetic() {
        assert_eq!(expr("a + b * c"), "(+ a (* b c))");
        assert_eq!(expr("a * b + c"), "(+ (* a b) c)");
        assert_eq!(expr("a + b - c"), "(- (+ a b) c)");
    }

    #[test]
    fn colon_is_right_associative() {
        assert_eq!(expr("a : b : c"), "(: a (: b c))");
        assert_eq!(expr("a ^ b ^ c"), "(^ a (^ b c))");
    }

    #[test]
    fn juxtaposition_synthesizes_apply() {
        assert_eq!(expr("f x"), "(apply f x)");
        assert_eq!(expr("f x y"), "(apply (apply f x) y)");
        assert_eq!(expr("f x + 1"), "(+ (apply f x) 1)");
    }

    #[test]
    fn apply_span_is_exact() {
        let parsed = parse("f x").unwrap();
        let tree = &parsed.tree;
        let apply = tree.top_level();
        assert_eq!(tree.operator_key_of(apply), Some(OpKey::Apply));
        assert_eq!(tree.span_of(apply), Span::new(0, 3));
        assert_eq!(tree.token_span(apply), Span::empty(2));
    }

    #[test]
    fn sticky_adjacency_biases_roles() {
        // Trailing-space `+` is postfix; the phrases join by apply.
        assert_eq!(expr("a+ b"), "(apply (+ a) b)");
        // Leading-space `-` hugging its operand is prefix.
        assert_eq!(expr("a -b"), "(apply a (- b))");
        // Symmetric spacing stays infix.
        assert_eq!(expr("a + b"), "(+ a b)");
        assert_eq!(expr("a+b"), "(+ a b)");
    }

    #[test]
    fn maximal_prefix_run_keeps_one_infix() {
        assert_eq!(expr("a + - b"), "(+ a (- b))");
        assert_eq!(expr("a + - - b"), "(+ a (- (- b)))");
        // `!` is not infix-capable, so the real infix sits to its left.
        assert_eq!(expr("a ! - b"), "(- (! a) b)");
    }

    #[test]
    fn newline_synthesizes_seq() {
        assert_eq!(expr("a\nb"), "(seq a b)");
        assert_eq!(expr("a\nb\nc"), "(seq (seq a b) c)");
    }

    #[test]
    fn operator_led_lines_continue_the_expression() {
        assert_eq!(expr("a\n+ b"), "(+ a b)");
        assert_eq!(expr("a =\nb"), "(= a b)");
    }

    #[test]
    fn line_trailing_postfix_ends_the_phrase() {
        assert_eq!(expr("a +\nb"), "(seq (+ a) b)");
    }

    #[test]
    fn indent_block_round_trip() {
        assert_eq!(expr("a:\n  b\nc"), "(seq (: a (block b)) c)");
    }

    #[test]
    fn indented_block_holds_multiple_lines() {
        assert_eq!(expr("a:\n  b\n  c"), "(: a (block (seq b c)))");
    }

    #[test]
    fn blocks_nest() {
        assert_eq!(
            expr("a:\n  b:\n    c\nd"),
            "(seq (: a (block (: b (block c)))) d)"
        );
    }

    #[test]
    fn immediate_dedent_makes_an_empty_block() {
        assert_eq!(expr("a:\nb"), "(seq (: a (block (empty))) b)");
    }

    #[test]
    fn block_still_open_at_eof_is_closed() {
        assert_eq!(expr("a:\n  b"), "(: a (block b))");
        assert_eq!(expr("a:\n  b\n"), "(: a (block b))");
    }

    #[test]
    fn delimiters_group() {
        assert_eq!(expr("(a + b) * c"), "(* (paren (+ a b)) c)");
        assert_eq!(expr("f (x)"), "(apply f (paren x))");
        assert_eq!(expr("[a, b]"), "(bracket (, a b))");
        assert_eq!(expr("()"), "(paren (empty))");
    }

    #[test]
    fn multiline_brackets_join_lines() {
        assert_eq!(expr("(\n  a,\n  b\n)"), "(paren (, a b))");
    }

    #[test]
    fn unmatched_open_is_fatal() {
        let errors = parse("(a").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Structure);
        assert!(errors[0].message.contains("unmatched open delimiter"));
        assert_eq!(errors[0].span, Span::new(0, 1));
    }

    #[test]
    fn unmatched_close_is_fatal() {
        let errors = parse("a)").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Structure);
        assert!(errors[0].message.contains("unmatched close delimiter"));
        assert_eq!(errors[0].span, Span::new(1, 2));
    }

    #[test]
    fn incomparable_indentation_is_fatal() {
        // The inner block opens on a space-indented line; a tab-indented
        // body line shares no prefix with it.
        let errors = parse("a:\n  b:\n\tc").unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ErrorKind::Indentation));
    }

    #[test]
    fn empty_program_is_a_zero_width_empty_atom() {
        let parsed = parse("").unwrap();
        assert!(parsed.errors.is_empty());
        let tree = &parsed.tree;
        let top = tree.top_level();
        assert_eq!(tree.operator_key_of(top), Some(OpKey::Empty));
        assert_eq!(tree.token_span(top), Span::empty(0));
    }

    #[test]
    fn missing_operand_is_reported_for_assign() {
        let parsed = parse("a =").unwrap();
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].kind, ErrorKind::MissingOperand);
        assert_eq!(parsed.errors[0].span, Span::new(2, 3));
        assert!(parsed.errors[0].remedy.is_some());
    }

    #[test]
    fn empty_operands_elsewhere_stay_silent() {
        let parsed = parse("a + ").unwrap();
        // `+` is postfix-capable, so the trailing operator binds postfix
        // rather than demanding an operand.
        assert!(parsed.errors.is_empty());
        assert_eq!(
            pretty::subtree_to_string(&parsed.tree, parsed.tree.top_level(), "a + "),
            "(+ a)"
        );
    }

    #[test]
    fn non_infix_left_neighbour_of_the_infix_goes_postfix() {
        // `+` cannot stay infix once `*` claims the infix slot, so it binds
        // postfix on `a`.
        assert_eq!(expr("(a + * b)"), "(paren (* (+ a) b))");
    }

    #[test]
    fn close_in_operand_position_synthesizes_empty() {
        assert_eq!(expr("(a ; )"), "(paren (; a (empty)))");
    }

    #[test]
    fn dead_runs_recover_with_an_arity_error() {
        let parsed = parse("a ; ; b").unwrap();
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].kind, ErrorKind::Arity);
    }

    #[test]
    fn lexical_markers_keep_the_structure_parsing() {
        let parsed = parse("a + 0b12 + c").unwrap();
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].kind, ErrorKind::Lexical);
        assert_eq!(
            pretty::subtree_to_string(&parsed.tree, parsed.tree.top_level(), "a + 0b12 + c"),
            "(+ (+ a <error>) c)"
        );
    }

    #[test]
    fn parsing_is_deterministic() {
        let source = "f x:\n  y + z * 2\n  g -1\nh";
        let a = parse(source).unwrap();
        let b = parse(source).unwrap();
        assert_eq!(a.tree.len(), b.tree.len());
        for ((ia, na), (_, nb)) in a.tree.iter().zip(b.tree.iter()) {
            assert_eq!(na.parent, nb.parent, "parent mismatch at {ia:?}");
            assert_eq!(na.token.span, nb.token.span);
        }
    }
}
