//! Precedence-climbing parser for the charge formula language.
//!
//! Variables are resolved by name lookup at evaluation time, never by text
//! substitution, so one variable name being a prefix of another can never
//! corrupt a formula.

use super::error::FormulaError;
use super::token::{tokenize, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Negate(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Numeric remainder, not a percentage operator.
    Rem,
}

impl Expr {
    /// Every variable referenced by the expression, in source order.
    /// Duplicates are kept; callers that want a set can build one.
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(name) => out.push(name),
            Expr::Negate(inner) => inner.collect_variables(out),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
        }
    }
}

/// Parses a formula into an expression tree.
pub fn parse(src: &str) -> Result<Expr, FormulaError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let expr = parser.parse_sum()?;

    // The grammar must consume everything; "1 2" or "<x> +" are errors.
    if let Some(extra) = parser.peek() {
        return Err(FormulaError::UnexpectedToken { found: extra.describe() });
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    // sum := term { ("+" | "-") term }
    fn parse_sum(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.parse_term()?;
        while let Some(token) = self.peek() {
            let op = match token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    // term := unary { ("*" | "/" | "%") unary }
    fn parse_term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.parse_unary()?;
        while let Some(token) = self.peek() {
            let op = match token {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                Token::Percent => BinOp::Rem,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    // unary := "-" unary | primary
    fn parse_unary(&mut self) -> Result<Expr, FormulaError> {
        if let Some(Token::Minus) = self.peek() {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(Expr::Negate(Box::new(inner)));
        }
        self.parse_primary()
    }

    // primary := number | variable | "(" sum ")"
    fn parse_primary(&mut self) -> Result<Expr, FormulaError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(*value)),
            Some(Token::Variable(name)) => Ok(Expr::Variable(name.clone())),
            Some(Token::LParen) => {
                let inner = self.parse_sum()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(FormulaError::MissingCloseParen),
                }
            }
            Some(other) => Err(FormulaError::UnexpectedToken { found: other.describe() }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}
