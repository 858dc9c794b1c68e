use crate::ast::{Expression, Statement};
use crate::token::{Token, TokenType};
use crate::value::Value;
use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}] Error{location}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub location: String,
    pub message: String,
}

type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting of blocks, groupings, prefix operators and assignments,
/// counting each folded binary operator as one level too. Keeps recursion in
/// the parser and interpreter within the native stack.
pub const MAX_NESTING: usize = 200;

macro_rules! consume {
    ($self:expr, $token_type:pat, $error:expr) => {
        match $self.peek().tokentype {
            $token_type => Ok($self.advance()),
            _ => Err($self.error($self.peek(), $error)),
        }
    };
}

pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
    depth: usize,
    errors: Vec<ParseError>,
}

/// Parses as much of the program as possible. A statement that fails to
/// parse is left out of the program and its fault is returned alongside.
pub fn parse<'a>(tokens: &'a [Token<'a>]) -> (Vec<Statement<'a>>, Vec<ParseError>) {
    Parser::new(tokens).parse()
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Parser<'a> {
        Parser {
            tokens,
            current: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }
    pub fn parse(mut self) -> (Vec<Statement<'a>>, Vec<ParseError>) {
        let mut statements: Vec<Statement<'a>> = Vec::new();
        if self.tokens.is_empty() {
            return (statements, self.errors);
        }
        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        debug!(
            "parsed {} statements, {} errors",
            statements.len(),
            self.errors.len()
        );
        (statements, self.errors)
    }
    fn declaration(&mut self) -> Option<Statement<'a>> {
        let result = match self.peek().tokentype {
            TokenType::Var => {
                self.advance();
                self.var_declaration()
            }
            _ => self.statement(),
        };
        match result {
            Ok(stmt) => Some(stmt),
            Err(e) => {
                debug!("{}; synchronizing", e);
                self.errors.push(e);
                self.synchronize();
                None
            }
        }
    }
    fn var_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let name = consume!(self, TokenType::Identifier(_), "Expect variable name.")?;
        let initializer = match self.peek().tokentype {
            TokenType::Equal => {
                self.advance();
                Some(self.expression()?)
            }
            _ => None,
        };
        consume!(
            self,
            TokenType::Semicolon,
            "Expect ';' after variable declaration."
        )?;
        Ok(Statement::Var { name, initializer })
    }
    fn statement(&mut self) -> ParseResult<Statement<'a>> {
        match self.peek().tokentype {
            TokenType::Print => {
                self.advance();
                self.print_statement()
            }
            TokenType::LeftBrace => {
                self.advance();
                self.nested(Parser::block)
            }
            _ => self.expression_statement(),
        }
    }
    fn block(&mut self) -> ParseResult<Statement<'a>> {
        let mut statements: Vec<Statement<'a>> = Vec::new();
        while !self.is_at_end() {
            if let TokenType::RightBrace = self.peek().tokentype {
                break;
            }
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        consume!(self, TokenType::RightBrace, "Expect '}' after block.")?;
        Ok(Statement::Block(statements))
    }
    fn print_statement(&mut self) -> ParseResult<Statement<'a>> {
        let expr = self.expression()?;
        consume!(self, TokenType::Semicolon, "Expect ';' after value.")?;
        Ok(Statement::Print(expr))
    }
    fn expression_statement(&mut self) -> ParseResult<Statement<'a>> {
        let expr = self.expression()?;
        consume!(self, TokenType::Semicolon, "Expect ';' after expression.")?;
        Ok(Statement::Expression(expr))
    }
    fn expression(&mut self) -> ParseResult<Expression<'a>> {
        self.assignment()
    }
    fn assignment(&mut self) -> ParseResult<Expression<'a>> {
        let expr = self.equality()?;
        match self.peek().tokentype {
            TokenType::Equal => {
                let equals = self.advance();
                let value = self.nested(Parser::assignment)?;
                match expr {
                    Expression::Variable(name) => Ok(Expression::Assign {
                        name,
                        value: Box::new(value),
                    }),
                    _ => Err(self.error(equals, "Invalid assignment target.")),
                }
            }
            _ => Ok(expr),
        }
    }
    fn equality(&mut self) -> ParseResult<Expression<'a>> {
        self.left_associative(
            &[TokenType::BangEqual, TokenType::EqualEqual],
            Parser::comparison,
        )
    }
    fn comparison(&mut self) -> ParseResult<Expression<'a>> {
        self.left_associative(
            &[
                TokenType::Greater,
                TokenType::GreaterEqual,
                TokenType::Less,
                TokenType::LessEqual,
            ],
            Parser::term,
        )
    }
    fn term(&mut self) -> ParseResult<Expression<'a>> {
        self.left_associative(&[TokenType::Minus, TokenType::Plus], Parser::factor)
    }
    fn factor(&mut self) -> ParseResult<Expression<'a>> {
        self.left_associative(&[TokenType::Slash, TokenType::Star], Parser::unary)
    }
    // operand (operator operand)*, folded to the left.
    fn left_associative(
        &mut self,
        operators: &[TokenType<'a>],
        operand: fn(&mut Parser<'a>) -> ParseResult<Expression<'a>>,
    ) -> ParseResult<Expression<'a>> {
        let mut expr = operand(self)?;
        let mut folded = 0;
        while operators.contains(&self.peek().tokentype) {
            if self.depth + folded >= MAX_NESTING {
                return Err(self.error(self.peek(), "Too much nesting."));
            }
            folded += 1;
            let operator = self.advance();
            let right = operand(self)?;
            expr = Expression::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }
    fn unary(&mut self) -> ParseResult<Expression<'a>> {
        match self.peek().tokentype {
            TokenType::Bang | TokenType::Minus => {
                let operator = self.advance();
                let right = self.nested(Parser::unary)?;
                Ok(Expression::Unary {
                    operator,
                    right: Box::new(right),
                })
            }
            _ => self.primary(),
        }
    }
    fn primary(&mut self) -> ParseResult<Expression<'a>> {
        let literal = match self.peek().tokentype {
            TokenType::False => Value::Boolean(false),
            TokenType::True => Value::Boolean(true),
            TokenType::Nil => Value::Nil,
            TokenType::Number(x) => Value::Number(x),
            TokenType::String(x) => Value::String(x.to_string()),
            TokenType::Identifier(_) => return Ok(Expression::Variable(self.advance())),
            TokenType::LeftParen => {
                self.advance();
                let expr = self.nested(Parser::expression)?;
                consume!(self, TokenType::RightParen, "Expect ')' after expression.")?;
                return Ok(Expression::Grouping(Box::new(expr)));
            }
            _ => return Err(self.error(self.peek(), "Expect expression.")),
        };
        self.advance();
        Ok(Expression::Literal(literal))
    }
    fn nested<T>(&mut self, rule: fn(&mut Parser<'a>) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(self.peek(), "Too much nesting."));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if let TokenType::Semicolon = self.previous().tokentype {
                return;
            }
            match self.peek().tokentype {
                TokenType::Class
                | TokenType::Fun
                | TokenType::Var
                | TokenType::For
                | TokenType::If
                | TokenType::While
                | TokenType::Print
                | TokenType::Return => return,
                _ => (),
            }
            self.advance();
        }
    }
    fn advance(&mut self) -> &'a Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }
    fn is_at_end(&self) -> bool {
        matches!(self.peek().tokentype, TokenType::EOF)
    }
    // The token list always ends with EOF and `current` never moves past it.
    fn peek(&self) -> &'a Token<'a> {
        let tokens = self.tokens;
        &tokens[self.current.min(tokens.len() - 1)]
    }
    fn previous(&self) -> &'a Token<'a> {
        let tokens = self.tokens;
        &tokens[self.current.saturating_sub(1)]
    }
    fn error(&self, token: &Token, message: &str) -> ParseError {
        ParseError {
            line: token.line,
            location: token.location(),
            message: message.to_string(),
        }
    }
}
