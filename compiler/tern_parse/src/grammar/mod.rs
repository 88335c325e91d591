//! A small ECMAScript-shaped statement grammar.
//!
//! ```text
//! Program             := Statement* <end>
//! Statement           := ReturnStatement | VarStatement | ExpressionStatement
//! ReturnStatement     := 'return' Expression? ';'
//! VarStatement        := 'var' Identifier ('=' Expression)? ';'
//! ExpressionStatement := Expression ';'
//! Expression          := Multiplicative (('+' | '-') Multiplicative)*
//! Multiplicative      := Primary (('*' | '/') Primary)*
//! Primary             := NumericLiteral | RegularExpressionLiteral
//!                      | Identifier | '(' Expression ')'
//! ```
//!
//! There is no lexer pass, so `/` means whatever the active rule asks for.
//! `Primary` probes `RegularExpressionLiteral` and never `'/'`, while
//! `Multiplicative` probes `'/'` only after an operand: `10/2` divides and
//! `return /ab+c/g;` returns a regex literal.

mod ast;

pub use ast::{BinaryOp, Expr, ExprKind, Program, Stmt};

use tern_ir::{Span, TokenFlags, TokenKindId};
use tern_scan::{Scan, ScanConfig, Scanner, Vocabulary, VocabularyError};

use crate::{
    AlternativeLookahead, LookaheadError, MessageBuilder, OptionalLookahead, ParseOutput,
    ParseResult, Parser,
};

/// Errors raised while building a grammar.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
    #[error(transparent)]
    Lookahead(#[from] LookaheadError),
}

/// Characters that continue an identifier, and so also a keyword.
const IDENTIFIER_PART: &str = "[A-Za-z0-9_$]";

/// Token kinds of [`EcmaGrammar`].
#[derive(Copy, Clone, Debug)]
pub struct EcmaKinds {
    pub white_space: TokenKindId,
    pub line_comment: TokenKindId,
    pub block_comment: TokenKindId,
    pub return_kw: TokenKindId,
    pub var_kw: TokenKindId,
    pub identifier: TokenKindId,
    pub numeric_literal: TokenKindId,
    pub regex_literal: TokenKindId,
    pub slash: TokenKindId,
    pub star: TokenKindId,
    pub plus: TokenKindId,
    pub minus: TokenKindId,
    pub eq: TokenKindId,
    pub semicolon: TokenKindId,
    pub lparen: TokenKindId,
    pub rparen: TokenKindId,
}

impl EcmaKinds {
    fn define(b: &mut tern_scan::VocabularyBuilder) -> Self {
        EcmaKinds {
            white_space: b.skip("WhiteSpace", r"[ \t\r\n]+", TokenFlags::LINE_BREAKS),
            line_comment: b.skip("LineComment", r"//[^\n]*", TokenFlags::empty()),
            block_comment: b.skip("BlockComment", r"/\*[\s\S]*?\*/", TokenFlags::LINE_BREAKS),
            return_kw: b.keyword("'return'", "return", IDENTIFIER_PART),
            var_kw: b.keyword("'var'", "var", IDENTIFIER_PART),
            identifier: b.pattern("Identifier", r"[A-Za-z_$][A-Za-z0-9_$]*"),
            numeric_literal: b.pattern("NumericLiteral", r"[0-9]+(?:\.[0-9]+)?"),
            regex_literal: b.pattern(
                "RegularExpressionLiteral",
                r"/(?:[^/\\\r\n\[]|\\.|\[(?:[^\]\\\r\n]|\\.)*\])+/[A-Za-z]*",
            ),
            slash: b.literal("'/'", "/"),
            star: b.literal("'*'", "*"),
            plus: b.literal("'+'", "+"),
            minus: b.literal("'-'", "-"),
            eq: b.literal("'='", "="),
            semicolon: b.literal("';'", ";"),
            lparen: b.literal("'('", "("),
            rparen: b.literal("')'", ")"),
        }
    }
}

/// Decision points, built once with the vocabulary.
#[derive(Clone, Debug)]
struct Lookaheads {
    statement_start: OptionalLookahead,
    statement: AlternativeLookahead,
    expression_start: OptionalLookahead,
    initializer: OptionalLookahead,
    additive: OptionalLookahead,
    additive_op: AlternativeLookahead,
    multiplicative: OptionalLookahead,
    multiplicative_op: AlternativeLookahead,
    primary: AlternativeLookahead,
}

impl Lookaheads {
    fn build(vocabulary: &Vocabulary, k: &EcmaKinds) -> Result<Self, LookaheadError> {
        let operand = [k.numeric_literal, k.regex_literal, k.identifier, k.lparen];
        let statement_start = [
            k.return_kw,
            k.var_kw,
            k.numeric_literal,
            k.regex_literal,
            k.identifier,
            k.lparen,
        ];
        Ok(Lookaheads {
            statement_start: OptionalLookahead::from_kinds(vocabulary, &statement_start)?,
            statement: AlternativeLookahead::from_kinds(
                vocabulary,
                &[&[k.return_kw], &[k.var_kw], &operand],
            )?,
            expression_start: OptionalLookahead::from_kinds(vocabulary, &operand)?,
            initializer: OptionalLookahead::from_kinds(vocabulary, &[k.eq])?,
            additive: OptionalLookahead::from_kinds(vocabulary, &[k.plus, k.minus])?,
            additive_op: AlternativeLookahead::from_kinds(vocabulary, &[&[k.plus], &[k.minus]])?,
            multiplicative: OptionalLookahead::from_kinds(vocabulary, &[k.star, k.slash])?,
            multiplicative_op: AlternativeLookahead::from_kinds(
                vocabulary,
                &[&[k.star], &[k.slash]],
            )?,
            primary: AlternativeLookahead::from_kinds(
                vocabulary,
                &[
                    &[k.numeric_literal],
                    &[k.regex_literal],
                    &[k.identifier],
                    &[k.lparen],
                ],
            )?,
        })
    }
}

/// The demonstration grammar: vocabulary, kinds and lookaheads.
///
/// Immutable once built; one instance can serve any number of parsers.
#[derive(Clone, Debug)]
pub struct EcmaGrammar {
    vocabulary: Vocabulary,
    kinds: EcmaKinds,
    la: Lookaheads,
}

impl EcmaGrammar {
    pub fn new() -> Result<Self, GrammarError> {
        let mut builder = Vocabulary::builder();
        let kinds = EcmaKinds::define(&mut builder);
        let vocabulary = builder.build()?;
        let la = Lookaheads::build(&vocabulary, &kinds)?;
        Ok(EcmaGrammar {
            vocabulary,
            kinds,
            la,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn kinds(&self) -> &EcmaKinds {
        &self.kinds
    }

    /// A fresh parser over this grammar's vocabulary.
    pub fn parser<'src>(&self) -> Parser<'src, Scanner<'_, 'src>> {
        Parser::new(Scanner::new(&self.vocabulary, ScanConfig::default()))
    }

    /// Parse a whole program with a fresh parser.
    pub fn parse<'src>(&self, source: &'src str) -> ParseOutput<'src, Program<'src>> {
        let mut parser = self.parser();
        self.parse_with(&mut parser, source)
    }

    /// Parse a whole program, reusing `parser`.
    pub fn parse_with<'src, S: Scan<'src>, M: MessageBuilder>(
        &self,
        parser: &mut Parser<'src, S, M>,
        source: &'src str,
    ) -> ParseOutput<'src, Program<'src>> {
        parser.run(source, |p| self.program(p))
    }

    fn program<'src, S: Scan<'src>, M: MessageBuilder>(
        &self,
        p: &mut Parser<'src, S, M>,
    ) -> ParseResult<'src, Program<'src>> {
        p.rule("Program", |p| {
            let start = p.position().offset();
            let body = p.many(&self.la.statement_start, |p| self.statement(p))?;
            p.expect_end()?;
            let end = body.last().map_or(start, |stmt| stmt.span().end);
            Ok(Program {
                body,
                span: Span::new(start, end),
            })
        })
    }

    fn statement<'src, S: Scan<'src>, M: MessageBuilder>(
        &self,
        p: &mut Parser<'src, S, M>,
    ) -> ParseResult<'src, Stmt<'src>> {
        p.rule("Statement", |p| match p.alternatives(&self.la.statement)? {
            0 => self.return_statement(p),
            1 => self.var_statement(p),
            _ => self.expression_statement(p),
        })
    }

    fn return_statement<'src, S: Scan<'src>, M: MessageBuilder>(
        &self,
        p: &mut Parser<'src, S, M>,
    ) -> ParseResult<'src, Stmt<'src>> {
        p.rule("ReturnStatement", |p| {
            let keyword = p.consume(self.kinds.return_kw)?;
            let value = p.optional(&self.la.expression_start, |p| self.expression(p))?;
            let semi = p.consume(self.kinds.semicolon)?;
            Ok(Stmt::Return {
                value,
                span: keyword.span.merge(semi.span),
            })
        })
    }

    fn var_statement<'src, S: Scan<'src>, M: MessageBuilder>(
        &self,
        p: &mut Parser<'src, S, M>,
    ) -> ParseResult<'src, Stmt<'src>> {
        p.rule("VarStatement", |p| {
            let keyword = p.consume(self.kinds.var_kw)?;
            let name = p.consume(self.kinds.identifier)?;
            let init = p.optional(&self.la.initializer, |p| {
                p.consume(self.kinds.eq)?;
                self.expression(p)
            })?;
            let semi = p.consume(self.kinds.semicolon)?;
            Ok(Stmt::Var {
                name: name.text,
                init,
                span: keyword.span.merge(semi.span),
            })
        })
    }

    fn expression_statement<'src, S: Scan<'src>, M: MessageBuilder>(
        &self,
        p: &mut Parser<'src, S, M>,
    ) -> ParseResult<'src, Stmt<'src>> {
        p.rule("ExpressionStatement", |p| {
            let expr = self.expression(p)?;
            let semi = p.consume(self.kinds.semicolon)?;
            let span = expr.span.merge(semi.span);
            Ok(Stmt::Expr { expr, span })
        })
    }

    fn expression<'src, S: Scan<'src>, M: MessageBuilder>(
        &self,
        p: &mut Parser<'src, S, M>,
    ) -> ParseResult<'src, Expr<'src>> {
        p.rule("Expression", |p| {
            let lhs = self.multiplicative(p)?;
            let rest = p.many(&self.la.additive, |p| {
                let op = if p.alternatives(&self.la.additive_op)? == 0 {
                    p.consume(self.kinds.plus)?;
                    BinaryOp::Add
                } else {
                    p.consume(self.kinds.minus)?;
                    BinaryOp::Sub
                };
                Ok((op, self.multiplicative(p)?))
            })?;
            Ok(fold_left(lhs, rest))
        })
    }

    fn multiplicative<'src, S: Scan<'src>, M: MessageBuilder>(
        &self,
        p: &mut Parser<'src, S, M>,
    ) -> ParseResult<'src, Expr<'src>> {
        p.rule("Multiplicative", |p| {
            let lhs = self.primary(p)?;
            let rest = p.many(&self.la.multiplicative, |p| {
                let op = if p.alternatives(&self.la.multiplicative_op)? == 0 {
                    p.consume(self.kinds.star)?;
                    BinaryOp::Mul
                } else {
                    p.consume(self.kinds.slash)?;
                    BinaryOp::Div
                };
                Ok((op, self.primary(p)?))
            })?;
            Ok(fold_left(lhs, rest))
        })
    }

    fn primary<'src, S: Scan<'src>, M: MessageBuilder>(
        &self,
        p: &mut Parser<'src, S, M>,
    ) -> ParseResult<'src, Expr<'src>> {
        p.rule("Primary", |p| match p.alternatives(&self.la.primary)? {
            0 => {
                let token = p.consume(self.kinds.numeric_literal)?;
                Ok(Expr::new(ExprKind::Number(token.text), token.span))
            }
            1 => {
                let token = p.consume(self.kinds.regex_literal)?;
                let (pattern, flags) = split_regex_literal(token.text);
                Ok(Expr::new(ExprKind::Regex { pattern, flags }, token.span))
            }
            2 => {
                let token = p.consume(self.kinds.identifier)?;
                Ok(Expr::new(ExprKind::Ident(token.text), token.span))
            }
            _ => {
                let open = p.consume(self.kinds.lparen)?;
                let inner = self.expression(p)?;
                let close = p.consume(self.kinds.rparen)?;
                Ok(Expr::new(
                    ExprKind::Paren(Box::new(inner)),
                    open.span.merge(close.span),
                ))
            }
        })
    }
}

fn fold_left<'src>(first: Expr<'src>, rest: Vec<(BinaryOp, Expr<'src>)>) -> Expr<'src> {
    rest.into_iter().fold(first, |lhs, (op, rhs)| {
        let span = lhs.span.merge(rhs.span);
        Expr::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    })
}

/// `/body/flags` into `(body, flags)`.
fn split_regex_literal(text: &str) -> (&str, &str) {
    match text.rfind('/') {
        Some(close) if close > 0 => (
            text.get(1..close).unwrap_or_default(),
            text.get(close + 1..).unwrap_or_default(),
        ),
        _ => (text, ""),
    }
}

#[cfg(test)]
mod tests;
