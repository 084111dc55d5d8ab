use crate::expr;
use crate::scanner;

use std::fmt;

/*
Recursive descent using the following grammar

expression → equality ;
equality   → comparison ( ( "!=" | "==" ) comparison )* ;
comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
term       → factor ( ( "-" | "+" ) factor )* ;
factor     → unary ( ( "/" | "*" ) unary )* ;
unary      → ( "!" | "-" ) unary | primary ;
primary    → NUMBER | STRING | "true" | "false" | "nil"
           | "(" expression ")" ;
*/

/// Keywords that begin a statement. `synchronize` stops in front of these.
#[allow(dead_code)]
pub const STATEMENT_START: [scanner::TokenType; 8] = [
    scanner::TokenType::Class,
    scanner::TokenType::Fun,
    scanner::TokenType::Var,
    scanner::TokenType::For,
    scanner::TokenType::If,
    scanner::TokenType::While,
    scanner::TokenType::Print,
    scanner::TokenType::Return,
];

#[derive(Clone, PartialEq)]
pub struct ParserError {
    pub token: scanner::Token,
    pub message: String,
}

impl ParserError {
    fn new(token: &scanner::Token, message: &str) -> ParserError {
        ParserError {
            token: token.clone(),
            message: message.into(),
        }
    }
}

impl fmt::Debug for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (found {} {:?} at line={})",
            self.message, self.token.ty, self.token.lexeme, self.token.line
        )
    }
}

/// `[line N] Error at '<lexeme>': <message>`, or `at end` for `Eof`.
impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[line {}] Error", self.token.line)?;
        match self.token.ty {
            scanner::TokenType::Eof => write!(f, " at end")?,
            _ => write!(f, " at '{}'", self.token.lexeme)?,
        }
        write!(f, ": {}", self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub expr: Option<expr::Expr>,
    pub errors: Vec<ParserError>,
}

/// Parses a single expression spanning the whole token stream.
///
/// Parsing stops at the first syntax error, so `errors` holds at most one
/// entry and `expr` is `None` whenever it is non-empty.
pub fn parse(tokens: &[scanner::Token]) -> ParseResult {
    let normalized;
    let tokens = if is_eof_terminated(tokens) {
        tokens
    } else {
        normalized = terminate_with_eof(tokens);
        &normalized[..]
    };

    let mut p = Parser { tokens, current: 0 };

    match p.parse() {
        Ok(expr) => ParseResult {
            expr: Some(expr),
            errors: Vec::new(),
        },
        Err(err) => ParseResult {
            expr: None,
            errors: vec![err],
        },
    }
}

fn is_eof_terminated(tokens: &[scanner::Token]) -> bool {
    match tokens.split_last() {
        Some((last, rest)) => {
            last.ty == scanner::TokenType::Eof
                && rest.iter().all(|tok| tok.ty != scanner::TokenType::Eof)
        }
        None => false,
    }
}

// Drops stray `Eof` tokens and appends the single one the cursor relies on.
fn terminate_with_eof(tokens: &[scanner::Token]) -> Vec<scanner::Token> {
    let line = tokens.last().map_or(1, |tok| tok.line);
    let mut terminated: Vec<scanner::Token> = tokens
        .iter()
        .filter(|tok| tok.ty != scanner::TokenType::Eof)
        .cloned()
        .collect();
    terminated.push(scanner::Token::eof(line));
    terminated
}

struct Parser<'a> {
    tokens: &'a [scanner::Token],
    current: usize,
}

type Operand<'a> = fn(&mut Parser<'a>) -> Result<expr::Expr, ParserError>;

impl<'a> Parser<'a> {
    fn parse(&mut self) -> Result<expr::Expr, ParserError> {
        let expr = self.expression()?;

        if !self.is_at_end() {
            return Err(ParserError::new(self.peek(), "Expect end of expression"));
        }

        Ok(expr)
    }

    fn expression(&mut self) -> Result<expr::Expr, ParserError> {
        self.equality()
    }

    fn equality(&mut self) -> Result<expr::Expr, ParserError> {
        self.left_binary(
            Self::comparison,
            &[scanner::TokenType::BangEqual, scanner::TokenType::EqualEqual],
        )
    }

    fn comparison(&mut self) -> Result<expr::Expr, ParserError> {
        self.left_binary(
            Self::term,
            &[
                scanner::TokenType::Greater,
                scanner::TokenType::GreaterEqual,
                scanner::TokenType::Less,
                scanner::TokenType::LessEqual,
            ],
        )
    }

    fn term(&mut self) -> Result<expr::Expr, ParserError> {
        self.left_binary(
            Self::factor,
            &[scanner::TokenType::Minus, scanner::TokenType::Plus],
        )
    }

    fn factor(&mut self) -> Result<expr::Expr, ParserError> {
        self.left_binary(
            Self::unary,
            &[scanner::TokenType::Slash, scanner::TokenType::Star],
        )
    }

    fn left_binary(
        &mut self,
        operand: Operand<'a>,
        types: &[scanner::TokenType],
    ) -> Result<expr::Expr, ParserError> {
        let mut expr = operand(self)?;

        while self.match_one_of(types) {
            let operator_token = self.previous().clone();
            let right = operand(self)?;
            expr = expr::Expr::binary(expr, operator_token, right);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<expr::Expr, ParserError> {
        if self.match_one_of(&[scanner::TokenType::Bang, scanner::TokenType::Minus]) {
            let operator_token = self.previous().clone();
            let right = self.unary()?;
            return Ok(expr::Expr::unary(operator_token, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<expr::Expr, ParserError> {
        if self.matches(scanner::TokenType::False) {
            return Ok(expr::Expr::literal(expr::Literal::Bool(false)));
        }
        if self.matches(scanner::TokenType::True) {
            return Ok(expr::Expr::literal(expr::Literal::Bool(true)));
        }
        if self.matches(scanner::TokenType::Nil) {
            return Ok(expr::Expr::literal(expr::Literal::Nil));
        }
        if self.match_one_of(&[scanner::TokenType::Number, scanner::TokenType::String]) {
            let literal = match &self.previous().literal {
                Some(scanner::Literal::Number(n)) => expr::Literal::Number(*n),
                Some(scanner::Literal::Str(s)) => expr::Literal::String(s.clone()),
                None => expr::Literal::Nil,
            };
            return Ok(expr::Expr::literal(literal));
        }
        if self.matches(scanner::TokenType::LeftParen) {
            let expr = self.expression()?;
            self.consume(
                scanner::TokenType::RightParen,
                "Expect ')' after expression",
            )?;
            return Ok(expr::Expr::grouping(expr));
        }

        Err(ParserError::new(self.peek(), "Expect expression"))
    }

    /// Discards tokens until a likely statement boundary: just past a `;`, or
    /// in front of a keyword from `STATEMENT_START`. Expressions have no
    /// statement boundaries, so nothing calls this until statements exist.
    #[allow(dead_code)]
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().ty == scanner::TokenType::Semicolon {
                return;
            }
            if STATEMENT_START.contains(&self.peek().ty) {
                return;
            }
            self.advance();
        }
    }

    fn consume(
        &mut self,
        ty: scanner::TokenType,
        on_err_str: &str,
    ) -> Result<&scanner::Token, ParserError> {
        if self.check(ty) {
            return Ok(self.advance());
        }
        Err(ParserError::new(self.peek(), on_err_str))
    }

    fn match_one_of(&mut self, types: &[scanner::TokenType]) -> bool {
        for ty in types.iter() {
            if self.matches(*ty) {
                return true;
            }
        }
        false
    }

    fn matches(&mut self, ty: scanner::TokenType) -> bool {
        if self.check(ty) {
            self.advance();
            return true;
        }
        false
    }

    fn check(&self, ty: scanner::TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().ty == ty
    }

    fn advance(&mut self) -> &scanner::Token {
        if !self.is_at_end() {
            self.current += 1
        }

        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().ty == scanner::TokenType::Eof
    }

    fn peek(&self) -> &scanner::Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &scanner::Token {
        &self.tokens[self.current - 1]
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::{Expr, Literal};
    use crate::parser::*;
    use crate::scanner::{self, Token, TokenType};

    fn parse_str(code: &str) -> ParseResult {
        let res = scanner::scan_tokens(code);
        assert!(res.errors.is_empty(), "lexical errors: {:?}", res.errors);
        parse(&res.tokens)
    }

    fn parse_ok(code: &str) -> Expr {
        let res = parse_str(code);
        match res.expr {
            Some(expr) => {
                assert!(res.errors.is_empty());
                expr
            }
            None => panic!("{:?}", res.errors),
        }
    }

    fn parse_err(code: &str) -> ParserError {
        let res = parse_str(code);
        assert_eq!(res.expr, None);
        assert_eq!(res.errors.len(), 1);
        res.errors[0].clone()
    }

    fn num(n: f64) -> Expr {
        Expr::literal(Literal::Number(n))
    }

    fn op(ty: TokenType, lexeme: &str) -> Token {
        Token::new(ty, 1, lexeme)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse_ok("1 + 2 * 3"),
            Expr::binary(
                num(1.0),
                op(TokenType::Plus, "+"),
                Expr::binary(num(2.0), op(TokenType::Star, "*"), num(3.0))
            )
        );
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(
            parse_ok("1 - 2 - 3"),
            Expr::binary(
                Expr::binary(num(1.0), op(TokenType::Minus, "-"), num(2.0)),
                op(TokenType::Minus, "-"),
                num(3.0)
            )
        );
    }

    #[test]
    fn test_unary_chaining() {
        assert_eq!(
            parse_ok("!!true"),
            Expr::unary(
                op(TokenType::Bang, "!"),
                Expr::unary(op(TokenType::Bang, "!"), Expr::literal(Literal::Bool(true)))
            )
        );
        assert_eq!(
            parse_ok("--1"),
            Expr::unary(
                op(TokenType::Minus, "-"),
                Expr::unary(op(TokenType::Minus, "-"), num(1.0))
            )
        );
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        assert_eq!(
            parse_ok("(1 + 2) * 3"),
            Expr::binary(
                Expr::grouping(Expr::binary(num(1.0), op(TokenType::Plus, "+"), num(2.0))),
                op(TokenType::Star, "*"),
                num(3.0)
            )
        );
    }

    #[test]
    fn test_comparison_binds_tighter_than_equality() {
        assert_eq!(
            parse_ok("1 < 2 == false"),
            Expr::binary(
                Expr::binary(num(1.0), op(TokenType::Less, "<"), num(2.0)),
                op(TokenType::EqualEqual, "=="),
                Expr::literal(Literal::Bool(false))
            )
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_ok("nil"), Expr::literal(Literal::Nil));
        assert_eq!(parse_ok("false"), Expr::literal(Literal::Bool(false)));
        assert_eq!(
            parse_ok("\"cat\""),
            Expr::literal(Literal::String("cat".into()))
        );
    }

    #[test]
    fn test_missing_right_paren() {
        let err = parse_err("(1 + 2");

        assert_eq!(err.message, "Expect ')' after expression");
        assert_eq!(err.token.ty, TokenType::Eof);
    }

    #[test]
    fn test_expect_expression() {
        let err = parse_err("1 + ;");

        assert_eq!(err.message, "Expect expression");
        assert_eq!(err.token, op(TokenType::Semicolon, ";"));
    }

    #[test]
    fn test_empty_input() {
        let err = parse_err("");

        assert_eq!(err.message, "Expect expression");
        assert_eq!(err.token, Token::eof(1));
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse_err("1 2");

        assert_eq!(err.message, "Expect end of expression");
        assert_eq!(err.token.lexeme, "2");
    }

    #[test]
    fn test_error_token_line() {
        let err = parse_err("1 +\n\n)");

        assert_eq!(err.token.line, 3);
        assert_eq!(err.token.ty, TokenType::RightParen);
    }

    #[test]
    fn test_empty_token_slice() {
        let res = parse(&[]);

        assert_eq!(res.expr, None);
        assert_eq!(res.errors[0].message, "Expect expression");
        assert_eq!(res.errors[0].token, Token::eof(1));
    }

    #[test]
    fn test_token_slice_without_eof() {
        let tokens = vec![
            Token {
                ty: TokenType::Number,
                line: 1,
                lexeme: "1".into(),
                literal: Some(scanner::Literal::Number(1.0)),
            },
            op(TokenType::Plus, "+"),
        ];

        assert_eq!(parse(&tokens[..1]).expr, Some(num(1.0)));

        let res = parse(&tokens);
        assert_eq!(res.expr, None);
        assert_eq!(res.errors[0].message, "Expect expression");
        assert_eq!(res.errors[0].token, Token::eof(1));
    }

    #[test]
    fn test_stray_eof_does_not_end_parsing() {
        let mut tokens = scanner::scan_tokens("1 +").tokens;
        tokens.extend(scanner::scan_tokens("2").tokens);

        assert_eq!(
            parse(&tokens).expr,
            Some(Expr::binary(num(1.0), op(TokenType::Plus, "+"), num(2.0)))
        );
    }

    #[test]
    fn test_synchronize_stops_after_semicolon() {
        let tokens = scanner::scan_tokens("1 2 ; 3").tokens;
        let mut p = Parser {
            tokens: &tokens,
            current: 0,
        };

        p.synchronize();

        assert_eq!(p.peek().lexeme, "3");
    }

    #[test]
    fn test_synchronize_stops_before_statement_keyword() {
        let tokens = scanner::scan_tokens("1 2 print 3").tokens;
        let mut p = Parser {
            tokens: &tokens,
            current: 0,
        };

        p.synchronize();

        assert_eq!(p.peek().ty, TokenType::Print);
    }

    #[test]
    fn test_synchronize_stops_at_end() {
        let tokens = scanner::scan_tokens("1 2 3").tokens;
        let mut p = Parser {
            tokens: &tokens,
            current: 0,
        };

        p.synchronize();

        assert!(p.is_at_end());
    }
}
