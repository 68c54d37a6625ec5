//! The parser's contract: the node kinds the interpreter consumes.
//!
//! This mirrors a small Python-like statement language — the restricted
//! sublanguage this tool analyzes, not general Python.

use crate::error::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mult,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    NotEq,
}

#[derive(Debug, Clone)]
pub enum ExprNode {
    Name { id: String, span: Span },
    Num { n: i64, span: Span },
    BinOp { left: Box<ExprNode>, op: BinOp, right: Box<ExprNode>, span: Span },
    Compare { left: Box<ExprNode>, ops: Vec<CompareOp>, comparators: Vec<ExprNode>, span: Span },
    Call { func: String, args: Vec<ExprNode>, span: Span },
}

impl ExprNode {
    pub fn span(&self) -> Span {
        match self {
            Self::Name { span, .. }
            | Self::Num { span, .. }
            | Self::BinOp { span, .. }
            | Self::Compare { span, .. }
            | Self::Call { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Return { value: Option<ExprNode>, span: Span },
    Assign { target: String, value: ExprNode, span: Span },
    AugAssign { target: String, op: BinOp, value: ExprNode, span: Span },
    For { target: String, iter: ExprNode, body: Vec<Stmt>, span: Span },
    While { test: ExprNode, body: Vec<Stmt>, span: Span },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Self::Return { span, .. }
            | Self::Assign { span, .. }
            | Self::AugAssign { span, .. }
            | Self::For { span, .. }
            | Self::While { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Module {
    pub functions: Vec<FunctionDef>,
}
