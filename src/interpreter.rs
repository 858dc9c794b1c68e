use crate::ast::{Expression, Statement};
use crate::environment::{Environment, VariableError};
use crate::report::Output;
use crate::token::{Token, TokenType};
use crate::value::Value;
use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("{message}")]
    Type {
        line: usize,
        lexeme: String,
        message: &'static str,
    },
    #[error(transparent)]
    Variable(#[from] VariableError),
}

impl RuntimeError {
    fn operand(operator: &Token, message: &'static str) -> RuntimeError {
        RuntimeError::Type {
            line: operator.line,
            lexeme: operator.lexeme.to_string(),
            message,
        }
    }
    pub fn line(&self) -> usize {
        match self {
            RuntimeError::Type { line, .. } => *line,
            RuntimeError::Variable(e) => e.line,
        }
    }
    pub fn location(&self) -> String {
        match self {
            RuntimeError::Type { lexeme, .. } => format!(" at '{}'", lexeme),
            RuntimeError::Variable(e) => format!(" at '{}'", e.name),
        }
    }
}

const NUMBER_OPERAND: &str = "Operand must be a number.";
const NUMBER_OPERANDS: &str = "Operands must be numbers.";
const ADD_OPERANDS: &str = "Operands must be two numbers or two strings.";

pub struct Interpreter<O: Output> {
    environment: Environment,
    output: O,
}

impl<O: Output> Interpreter<O> {
    pub fn new(output: O) -> Interpreter<O> {
        Interpreter {
            environment: Environment::new(),
            output,
        }
    }
    pub fn output(&self) -> &O {
        &self.output
    }
    pub fn into_output(self) -> O {
        self.output
    }
    /// Runs the program until it finishes or the first runtime fault.
    /// Globals defined here stay visible to later calls.
    pub fn interpret(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        debug!("interpreting {} statements", statements.len());
        let result = self.execute_all(statements);
        if let Err(e) = &result {
            debug!("runtime error on line {}: {}", e.line(), e);
        }
        result
    }
    fn execute_all(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }
    fn execute(&mut self, stmt: &Statement) -> Result<(), RuntimeError> {
        match stmt {
            Statement::Print(e) => {
                let val = self.evaluate(e)?;
                self.output.emit(&val.to_string());
            }
            Statement::Expression(e) => {
                self.evaluate(e)?;
            }
            Statement::Var { name, initializer } => {
                let val = match initializer {
                    Some(e) => self.evaluate(e)?,
                    None => Value::Nil,
                };
                self.environment.define(name.lexeme, val);
            }
            Statement::Block(stmts) => {
                self.environment.start_block();
                let result = self.execute_all(stmts);
                self.environment.end_block();
                result?;
            }
        }
        Ok(())
    }
    fn evaluate(&mut self, expr: &Expression) -> Result<Value, RuntimeError> {
        match expr {
            Expression::Literal(x) => Ok(x.clone()),
            Expression::Grouping(x) => self.evaluate(x),
            Expression::Unary { operator, right } => {
                let rv = self.evaluate(right)?;
                match (&operator.tokentype, rv) {
                    (TokenType::Minus, Value::Number(r)) => Ok(Value::Number(-r)),
                    (TokenType::Minus, _) => Err(RuntimeError::operand(operator, NUMBER_OPERAND)),
                    (TokenType::Bang, rv) => Ok(Value::Boolean(!rv.is_truthy())),
                    // The parser only builds unary nodes from '!' and '-'.
                    (tokentype, _) => unreachable!("unary expression with operator {}", tokentype),
                }
            }
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                let lv = self.evaluate(left)?;
                let rv = self.evaluate(right)?;
                binary(operator, lv, rv)
            }
            Expression::Variable(token) => Ok(self.environment.get(token)?),
            Expression::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.assign(name, value.clone())?;
                Ok(value)
            }
        }
    }
}

fn binary(operator: &Token, lv: Value, rv: Value) -> Result<Value, RuntimeError> {
    match &operator.tokentype {
        TokenType::EqualEqual => Ok(Value::Boolean(lv.equals(&rv))),
        TokenType::BangEqual => Ok(Value::Boolean(!lv.equals(&rv))),
        TokenType::Plus => match (lv, rv) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
            (Value::String(mut l), Value::String(r)) => {
                l.push_str(&r);
                Ok(Value::String(l))
            }
            (l, r) => {
                debug!("cannot add {} and {}", l.type_name(), r.type_name());
                Err(RuntimeError::operand(operator, ADD_OPERANDS))
            }
        },
        TokenType::Minus => numbers(operator, lv, rv).map(|(l, r)| Value::Number(l - r)),
        TokenType::Slash => numbers(operator, lv, rv).map(|(l, r)| Value::Number(l / r)),
        TokenType::Star => numbers(operator, lv, rv).map(|(l, r)| Value::Number(l * r)),
        TokenType::Greater => numbers(operator, lv, rv).map(|(l, r)| Value::Boolean(l > r)),
        TokenType::GreaterEqual => {
            numbers(operator, lv, rv).map(|(l, r)| Value::Boolean(l >= r))
        }
        TokenType::Less => numbers(operator, lv, rv).map(|(l, r)| Value::Boolean(l < r)),
        TokenType::LessEqual => numbers(operator, lv, rv).map(|(l, r)| Value::Boolean(l <= r)),
        // The parser only builds binary nodes from the operators above.
        _ => unreachable!("binary expression with operator {}", operator.tokentype),
    }
}

fn numbers(operator: &Token, lv: Value, rv: Value) -> Result<(f64, f64), RuntimeError> {
    match (lv, rv) {
        (Value::Number(l), Value::Number(r)) => Ok((l, r)),
        _ => Err(RuntimeError::operand(operator, NUMBER_OPERANDS)),
    }
}
