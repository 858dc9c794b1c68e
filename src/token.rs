use crate::value::Value;
use std::fmt;
use strum_macros::Display;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType<'a> {
    // Single-character tokens.
    LeftParen, RightParen, LeftBrace, RightBrace,
    Comma, Dot, Minus, Plus, Semicolon, Slash, Star,

    // One or two character tokens.
    Bang, BangEqual,
    Equal, EqualEqual,
    Greater, GreaterEqual,
    Less, LessEqual,

    // Literals.
    Identifier(&'a str), String(&'a str), Number(f64),

    // Keywords.
    And, Class, Else, False, Fun, For, If, Nil, Or,
    Print, Return, Super, This, True, Var, While,

    #[strum(serialize = "EOF")]
    EOF
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub tokentype: TokenType<'a>,
    pub lexeme: &'a str,
    pub line: usize,
}

impl<'a> Token<'a> {
    /// The decoded value of a number or string literal.
    pub fn literal(&self) -> Option<Value> {
        match self.tokentype {
            TokenType::Number(x) => Some(Value::Number(x)),
            TokenType::String(x) => Some(Value::String(x.to_string())),
            _ => None,
        }
    }

    /// Where a diagnostic about this token points: ` at end` or ` at 'lexeme'`.
    pub fn location(&self) -> String {
        match self.tokentype {
            TokenType::EOF => " at end".to_string(),
            _ => format!(" at '{}'", self.lexeme),
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal() {
            Some(literal) => write!(f, "{} {} {}", self.tokentype, self.lexeme, literal),
            None => write!(f, "{} {} nil", self.tokentype, self.lexeme),
        }
    }
}
