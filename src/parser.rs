//! Recursive-descent parser over the token stream from `crate::lexer`.

use crate::ast::{BinOp, CompareOp, ExprNode, FunctionDef, Module, Stmt};
use crate::error::{ParseError, Span};
use crate::lexer::{Token, tokenize};

pub fn parse(source: &str) -> Result<Module, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.parse_module()
}

struct Parser {
    tokens: Vec<crate::lexer::SpannedToken>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    fn span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn advance(&mut self) -> Token {
        let t = self.tokens[self.pos].token.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, expected: &Token, name: &str) -> Result<(), ParseError> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: name.to_string(),
                got: format!("{:?}", self.peek()),
                span: self.span(),
            })
        }
    }

    fn expect_name(&mut self) -> Result<String, ParseError> {
        match self.peek().clone() {
            Token::Name(n) => {
                self.advance();
                Ok(n)
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "identifier".to_string(),
                got: format!("{other:?}"),
                span: self.span(),
            }),
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek(), Token::Newline) {
            self.advance();
        }
    }

    fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut functions = Vec::new();
        self.skip_newlines();
        while !matches!(self.peek(), Token::Eof) {
            functions.push(self.parse_function()?);
            self.skip_newlines();
        }
        Ok(Module { functions })
    }

    fn parse_function(&mut self) -> Result<FunctionDef, ParseError> {
        let span = self.span();
        self.expect(&Token::Def, "'def'")?;
        let name = self.expect_name()?;
        self.expect(&Token::LParen, "'('")?;
        let mut params = Vec::new();
        if !matches!(self.peek(), Token::RParen) {
            params.push(self.expect_name()?);
            while matches!(self.peek(), Token::Comma) {
                self.advance();
                params.push(self.expect_name()?);
            }
        }
        self.expect(&Token::RParen, "')'")?;
        self.expect(&Token::Colon, "':'")?;
        let body = self.parse_block()?;
        Ok(FunctionDef { name, params, body, span })
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&Token::Newline, "newline")?;
        self.expect(&Token::Indent, "indented block")?;
        let mut stmts = Vec::new();
        loop {
            stmts.push(self.parse_statement()?);
            match self.peek() {
                Token::Newline => {
                    self.advance();
                    if matches!(self.peek(), Token::Dedent) {
                        break;
                    }
                }
                Token::Dedent | Token::Eof => break,
                _ => {
                    return Err(ParseError::UnterminatedStatement { span: self.span() });
                }
            }
        }
        if matches!(self.peek(), Token::Dedent) {
            self.advance();
        }
        Ok(stmts)
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let span = self.span();
        match self.peek().clone() {
            Token::Return => {
                self.advance();
                let value = if matches!(self.peek(), Token::Newline | Token::Dedent | Token::Eof) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                Ok(Stmt::Return { value, span })
            }
            Token::For => {
                self.advance();
                let target = self.expect_name()?;
                self.expect(&Token::In, "'in'")?;
                let iter = self.parse_expr()?;
                self.expect(&Token::Colon, "':'")?;
                let body = self.parse_block()?;
                Ok(Stmt::For { target, iter, body, span })
            }
            Token::While => {
                self.advance();
                let test = self.parse_compare()?;
                self.expect(&Token::Colon, "':'")?;
                let body = self.parse_block()?;
                Ok(Stmt::While { test, body, span })
            }
            Token::Name(name) => {
                self.advance();
                let op = match self.peek() {
                    Token::Assign => None,
                    Token::PlusEq => Some(BinOp::Add),
                    Token::MinusEq => Some(BinOp::Sub),
                    Token::StarEq => Some(BinOp::Mult),
                    Token::SlashEq => Some(BinOp::Div),
                    other => {
                        return Err(ParseError::UnexpectedToken {
                            expected: "'=', '+=', '-=', '*=' or '/='".to_string(),
                            got: format!("{other:?}"),
                            span: self.span(),
                        });
                    }
                };
                self.advance();
                let value = self.parse_expr()?;
                match op {
                    None => Ok(Stmt::Assign { target: name, value, span }),
                    Some(op) => Ok(Stmt::AugAssign { target: name, op, value, span }),
                }
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "statement".to_string(),
                got: format!("{other:?}"),
                span,
            }),
        }
    }

    /// An arithmetic expression, possibly followed by a chain of
    /// comparisons — used for `while` tests, the only place `Compare`
    /// nodes appear in this grammar.
    fn parse_compare(&mut self) -> Result<ExprNode, ParseError> {
        let span = self.span();
        let left = self.parse_expr()?;
        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(op) = compare_op(self.peek()) {
            self.advance();
            ops.push(op);
            comparators.push(self.parse_expr()?);
        }
        if ops.is_empty() {
            Ok(left)
        } else {
            Ok(ExprNode::Compare { left: Box::new(left), ops, comparators, span })
        }
    }

    fn parse_expr(&mut self) -> Result<ExprNode, ParseError> {
        let span = self.span();
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = ExprNode::BinOp { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<ExprNode, ParseError> {
        let span = self.span();
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinOp::Mult,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = ExprNode::BinOp { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExprNode, ParseError> {
        let span = self.span();
        if matches!(self.peek(), Token::Minus) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(ExprNode::BinOp {
                left: Box::new(ExprNode::Num { n: 0, span }),
                op: BinOp::Sub,
                right: Box::new(operand),
                span,
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<ExprNode, ParseError> {
        let span = self.span();
        match self.peek().clone() {
            Token::Number(n) => {
                self.advance();
                Ok(ExprNode::Num { n, span })
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(inner)
            }
            Token::Name(name) => {
                self.advance();
                if matches!(self.peek(), Token::LParen) {
                    self.advance();
                    let mut args = Vec::new();
                    if !matches!(self.peek(), Token::RParen) {
                        args.push(self.parse_expr()?);
                        while matches!(self.peek(), Token::Comma) {
                            self.advance();
                            args.push(self.parse_expr()?);
                        }
                    }
                    self.expect(&Token::RParen, "')'")?;
                    Ok(ExprNode::Call { func: name, args, span })
                } else {
                    Ok(ExprNode::Name { id: name, span })
                }
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "expression".to_string(),
                got: format!("{other:?}"),
                span,
            }),
        }
    }
}

fn compare_op(token: &Token) -> Option<CompareOp> {
    match token {
        Token::Lt => Some(CompareOp::Lt),
        Token::Le => Some(CompareOp::Le),
        Token::Gt => Some(CompareOp::Gt),
        Token::Ge => Some(CompareOp::Ge),
        Token::EqEq => Some(CompareOp::Eq),
        Token::NotEq => Some(CompareOp::NotEq),
        _ => None,
    }
}
