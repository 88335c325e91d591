//! Spanned syntax tree produced by [`EcmaGrammar`](super::EcmaGrammar).
//!
//! Leaves borrow their text from the source, like tokens do.

use std::fmt;

use tern_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Program<'src> {
    pub body: Vec<Stmt<'src>>,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Stmt<'src> {
    Return {
        value: Option<Expr<'src>>,
        span: Span,
    },
    Var {
        name: &'src str,
        init: Option<Expr<'src>>,
        span: Span,
    },
    Expr {
        expr: Expr<'src>,
        span: Span,
    },
}

impl Stmt<'_> {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Return { span, .. } | Stmt::Var { span, .. } | Stmt::Expr { span, .. } => *span,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expr<'src> {
    pub kind: ExprKind<'src>,
    pub span: Span,
}

impl<'src> Expr<'src> {
    pub fn new(kind: ExprKind<'src>, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExprKind<'src> {
    Number(&'src str),
    Regex {
        pattern: &'src str,
        flags: &'src str,
    },
    Ident(&'src str),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr<'src>>,
        rhs: Box<Expr<'src>>,
    },
    Paren(Box<Expr<'src>>),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// Fully parenthesized form: `(1 + (2 * 3))`.
impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(text) | ExprKind::Ident(text) => f.write_str(text),
            ExprKind::Regex { pattern, flags } => write!(f, "/{pattern}/{flags}"),
            ExprKind::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.as_str()),
            ExprKind::Paren(inner) => write!(f, "{inner}"),
        }
    }
}

impl fmt::Display for Stmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Return { value: None, .. } => f.write_str("return;"),
            Stmt::Return { value: Some(value), .. } => write!(f, "return {value};"),
            Stmt::Var { name, init: None, .. } => write!(f, "var {name};"),
            Stmt::Var { name, init: Some(init), .. } => write!(f, "var {name} = {init};"),
            Stmt::Expr { expr, .. } => write!(f, "{expr};"),
        }
    }
}
