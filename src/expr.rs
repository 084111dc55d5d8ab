use crate::scanner;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Grouping(Box<Expr>),
    Unary(scanner::Token, Box<Expr>),
    Binary(Box<Expr>, scanner::Token, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    String(String),
    Nil,
}

impl Expr {
    pub fn literal(literal: Literal) -> Expr {
        Expr::Literal(literal)
    }

    pub fn grouping(inner: Expr) -> Expr {
        Expr::Grouping(Box::new(inner))
    }

    pub fn unary(operator: scanner::Token, right: Expr) -> Expr {
        Expr::Unary(operator, Box::new(right))
    }

    pub fn binary(left: Expr, operator: scanner::Token, right: Expr) -> Expr {
        Expr::Binary(Box::new(left), operator, Box::new(right))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{:?}", n),
            Literal::String(s) => write!(f, "{}", s),
            Literal::Nil => write!(f, "nil"),
        }
    }
}
