use crate::token::Token;
use crate::value::Value;
use log::trace;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Undefined variable '{name}'.")]
pub struct VariableError {
    pub name: String,
    pub line: usize,
}

impl VariableError {
    fn new(token: &Token) -> VariableError {
        VariableError {
            name: token.lexeme.to_string(),
            line: token.line,
        }
    }
}

/// Lexical scopes as a stack of frames. The last frame is the innermost
/// scope; each frame's enclosing scope is the one beneath it.
#[derive(Debug)]
pub struct Environment {
    values: Vec<BTreeMap<String, Value>>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    pub fn new() -> Environment {
        Environment {
            values: vec![BTreeMap::new()],
        }
    }
    pub fn start_block(&mut self) {
        self.values.push(BTreeMap::new());
        trace!("entered scope, depth {}", self.depth());
    }
    /// Discards the innermost frame. The global frame is never dropped.
    pub fn end_block(&mut self) {
        if self.values.len() > 1 {
            self.values.pop();
        }
        trace!("left scope, depth {}", self.depth());
    }
    pub fn depth(&self) -> usize {
        self.values.len()
    }
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.values.last_mut() {
            frame.insert(name.to_string(), value);
        }
    }
    pub fn get(&self, token: &Token) -> Result<Value, VariableError> {
        for cur in self.values.iter().rev() {
            if let Some(x) = cur.get(token.lexeme) {
                return Ok(x.clone());
            }
        }
        Err(VariableError::new(token))
    }
    pub fn assign(&mut self, token: &Token, value: Value) -> Result<(), VariableError> {
        for cur in self.values.iter_mut().rev() {
            if let Some(x) = cur.get_mut(token.lexeme) {
                *x = value;
                return Ok(());
            }
        }
        Err(VariableError::new(token))
    }
}

#[cfg(test)]
mod environment_tests {
    use crate::environment::Environment;
    use crate::token::{Token, TokenType};
    use crate::value::Value;

    fn name(lexeme: &str) -> Token<'_> {
        Token {
            tokentype: TokenType::Identifier(lexeme),
            lexeme,
            line: 7,
        }
    }

    #[test]
    fn define_and_get() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        assert_eq!(env.get(&name("a")), Ok(Value::Number(1.0)));
        env.define("a", Value::Nil);
        assert_eq!(env.get(&name("a")), Ok(Value::Nil));
    }

    #[test]
    fn shadowing() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        env.start_block();
        env.define("a", Value::Number(2.0));
        assert_eq!(env.get(&name("a")), Ok(Value::Number(2.0)));
        env.end_block();
        assert_eq!(env.get(&name("a")), Ok(Value::Number(1.0)));
    }

    #[test]
    fn assignment_writes_through() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        env.start_block();
        env.start_block();
        assert!(env.assign(&name("a"), Value::Boolean(true)).is_ok());
        env.end_block();
        env.end_block();
        assert_eq!(env.get(&name("a")), Ok(Value::Boolean(true)));
    }

    #[test]
    fn undefined_variable() {
        let mut env = Environment::new();
        let err = env.get(&name("b")).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'b'.");
        assert_eq!(err.line, 7);
        assert!(env.assign(&name("b"), Value::Nil).is_err());
        assert!(env.get(&name("b")).is_err());
    }

    #[test]
    fn global_frame_survives_extra_end_block() {
        let mut env = Environment::new();
        env.define("a", Value::Nil);
        env.end_block();
        assert_eq!(env.depth(), 1);
        assert!(env.get(&name("a")).is_ok());
    }
}
