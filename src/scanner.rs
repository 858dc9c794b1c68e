use crate::token::{Token, TokenType};
use log::{debug, trace};
use phf::phf_map;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}] Error: {message}")]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

// Note: current becomes self.iter.peek()?.0
struct Scanner<'a> {
    source: &'a str,
    iter: Peekable<CharIndices<'a>>,
    start: usize,
    line: usize,
}

/// Scans the whole source. Faults are collected and scanning carries on past
/// them, so the token list always ends with an `EOF` token.
pub fn scan_tokens(source: &str) -> (Vec<Token<'_>>, Vec<ScanError>) {
    let mut scanner = Scanner {
        source,
        iter: source.char_indices().peekable(),
        start: 0,
        line: 1,
    };
    let mut tokens: Vec<Token> = Vec::new();
    let mut errors: Vec<ScanError> = Vec::new();

    while let Some((idx, c)) = scanner.iter.next() {
        scanner.start = idx;
        match scanner.scan_token(c) {
            Ok(Some(token)) => {
                trace!("scanned {}", token);
                tokens.push(token);
            }
            Ok(None) => (),
            Err(e) => {
                debug!("{}", e);
                errors.push(e);
            }
        }
    }
    tokens.push(Token {
        tokentype: TokenType::EOF,
        lexeme: "",
        line: scanner.line,
    });
    debug!("scanned {} tokens, {} errors", tokens.len(), errors.len());
    (tokens, errors)
}

impl<'a> Scanner<'a> {
    fn scan_token(&mut self, c: char) -> Result<Option<Token<'a>>, ScanError> {
        match c {
            '(' => Ok(Some(self.token(TokenType::LeftParen))),
            ')' => Ok(Some(self.token(TokenType::RightParen))),
            '{' => Ok(Some(self.token(TokenType::LeftBrace))),
            '}' => Ok(Some(self.token(TokenType::RightBrace))),
            ',' => Ok(Some(self.token(TokenType::Comma))),
            '.' => Ok(Some(self.token(TokenType::Dot))),
            '-' => Ok(Some(self.token(TokenType::Minus))),
            '+' => Ok(Some(self.token(TokenType::Plus))),
            ';' => Ok(Some(self.token(TokenType::Semicolon))),
            '*' => Ok(Some(self.token(TokenType::Star))),
            '!' => Ok(Some(self.either('=', TokenType::BangEqual, TokenType::Bang))),
            '=' => Ok(Some(self.either('=', TokenType::EqualEqual, TokenType::Equal))),
            '<' => Ok(Some(self.either('=', TokenType::LessEqual, TokenType::Less))),
            '>' => Ok(Some(self.either('=', TokenType::GreaterEqual, TokenType::Greater))),
            '/' => {
                if self.next_if('/') {
                    while let Some((_, c)) = self.iter.peek() {
                        if *c == '\n' {
                            break;
                        }
                        self.iter.next();
                    }
                    Ok(None)
                } else {
                    Ok(Some(self.token(TokenType::Slash)))
                }
            }
            ' ' | '\r' | '\t' => Ok(None),
            '\n' => {
                self.line += 1;
                Ok(None)
            }
            '"' => Ok(Some(self.string()?)),
            '0'..='9' => Ok(Some(self.number()?)),
            'a'..='z' | 'A'..='Z' | '_' => Ok(Some(self.identifier())),
            _ => Err(self.error("Unexpected character.")),
        }
    }
    fn current(&mut self) -> usize {
        match self.iter.peek() {
            None => self.source.len(),
            Some((idx, _)) => *idx,
        }
    }
    fn text(&mut self) -> &'a str {
        let source = self.source;
        let current = self.current();
        &source[self.start..current]
    }
    fn token(&mut self, token_type: TokenType<'a>) -> Token<'a> {
        Token {
            tokentype: token_type,
            lexeme: self.text(),
            line: self.line,
        }
    }
    fn either(
        &mut self,
        expected: char,
        matched: TokenType<'a>,
        otherwise: TokenType<'a>,
    ) -> Token<'a> {
        if self.next_if(expected) {
            self.token(matched)
        } else {
            self.token(otherwise)
        }
    }
    fn next_if(&mut self, expected: char) -> bool {
        self.iter.next_if(|(_, c)| *c == expected).is_some()
    }
    fn error(&self, message: &str) -> ScanError {
        ScanError {
            line: self.line,
            message: message.to_string(),
        }
    }
    fn string(&mut self) -> Result<Token<'a>, ScanError> {
        loop {
            match self.iter.next() {
                None => return Err(self.error("Unterminated string.")),
                Some((_, '"')) => break,
                Some((_, '\n')) => self.line += 1,
                Some(_) => (),
            }
        }
        let text = self.text();
        Ok(self.token(TokenType::String(&text[1..text.len() - 1])))
    }
    fn digits(&mut self) {
        while self.iter.next_if(|(_, c)| c.is_ascii_digit()).is_some() {}
    }
    fn number(&mut self) -> Result<Token<'a>, ScanError> {
        self.digits();

        // A '.' only belongs to the number when a digit follows it.
        let mut lookahead = self.iter.clone();
        if let Some((_, '.')) = lookahead.next() {
            if let Some((_, '0'..='9')) = lookahead.peek() {
                self.iter.next();
                self.digits();
            }
        }

        let text = self.text();
        match text.parse() {
            Ok(x) => Ok(self.token(TokenType::Number(x))),
            Err(_) => Err(self.error("Invalid number literal.")),
        }
    }
    fn identifier(&mut self) -> Token<'a> {
        while self
            .iter
            .next_if(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
            .is_some()
        {}
        let text = self.text();
        match KEYWORDS.get(text) {
            None => self.token(TokenType::Identifier(text)),
            Some(x) => self.token(x.clone()),
        }
    }
}

static KEYWORDS: phf::Map<&'static str, TokenType<'static>> = phf_map! {
    "and" => TokenType::And,
    "class" => TokenType::Class,
    "else" => TokenType::Else,
    "false" => TokenType::False,
    "for" => TokenType::For,
    "fun" => TokenType::Fun,
    "if" => TokenType::If,
    "nil" => TokenType::Nil,
    "or" => TokenType::Or,
    "print" => TokenType::Print,
    "return" => TokenType::Return,
    "super" => TokenType::Super,
    "this" => TokenType::This,
    "true" => TokenType::True,
    "var" => TokenType::Var,
    "while" => TokenType::While,
};
