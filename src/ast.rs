use crate::token::Token;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'a> {
    Binary {
        left: Box<Expression<'a>>,
        operator: &'a Token<'a>,
        right: Box<Expression<'a>>,
    },
    Grouping(Box<Expression<'a>>),
    Literal(Value),
    Unary {
        operator: &'a Token<'a>,
        right: Box<Expression<'a>>,
    },
    Variable(&'a Token<'a>),
    Assign {
        name: &'a Token<'a>,
        value: Box<Expression<'a>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    Print(Expression<'a>),
    Expression(Expression<'a>),
    Var {
        name: &'a Token<'a>,
        initializer: Option<Expression<'a>>,
    },
    Block(Vec<Statement<'a>>),
}

/// Renders syntax trees in a parenthesized prefix form, for debugging.
pub struct AstPrinter {}

impl AstPrinter {
    pub fn print(&self, expr: &Expression) -> String {
        match expr {
            Expression::Binary {
                left,
                operator,
                right,
            } => self.parenthesize(operator.lexeme, &[left, right]),
            Expression::Grouping(x) => self.parenthesize("group", &[x]),
            Expression::Literal(x) => x.to_string(),
            Expression::Unary { operator, right } => self.parenthesize(operator.lexeme, &[right]),
            Expression::Variable(x) => x.lexeme.to_string(),
            Expression::Assign { name, value } => {
                format!("(assign {} {})", name.lexeme, self.print(value))
            }
        }
    }
    pub fn print_statement(&self, stmt: &Statement) -> String {
        match stmt {
            Statement::Print(e) => format!("(print {})", self.print(e)),
            Statement::Expression(e) => format!("(expr {})", self.print(e)),
            Statement::Var {
                name,
                initializer: Some(e),
            } => format!("(var {} {})", name.lexeme, self.print(e)),
            Statement::Var {
                name,
                initializer: None,
            } => format!("(var {})", name.lexeme),
            Statement::Block(stmts) => {
                let mut x = String::from("(block");
                for stmt in stmts {
                    x.push(' ');
                    x.push_str(&self.print_statement(stmt));
                }
                x.push(')');
                x
            }
        }
    }
    fn parenthesize(&self, name: &str, args: &[&Box<Expression>]) -> String {
        let mut x = String::from("(");
        x.push_str(name);
        for arg in args {
            x.push(' ');
            x.push_str(self.print(arg).as_str());
        }
        x.push(')');
        x
    }
}

#[cfg(test)]
mod ast_tests {
    use crate::ast::{AstPrinter, Expression, Statement};
    use crate::token::{Token, TokenType};
    use crate::value::Value;

    #[test]
    fn basic_ast_test() {
        let minus = Token {
            tokentype: TokenType::Minus,
            lexeme: "-",
            line: 1,
        };
        let star = Token {
            tokentype: TokenType::Star,
            lexeme: "*",
            line: 1,
        };
        let expression = Expression::Binary {
            left: Box::new(Expression::Unary {
                operator: &minus,
                right: Box::new(Expression::Literal(Value::Number(123.0))),
            }),
            operator: &star,
            right: Box::new(Expression::Grouping(Box::new(Expression::Literal(
                Value::Number(45.67),
            )))),
        };
        let printer = AstPrinter {};
        assert_eq!(printer.print(&expression), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn variables_and_assignment() {
        let name = Token {
            tokentype: TokenType::Identifier("a"),
            lexeme: "a",
            line: 1,
        };
        let other = Token {
            tokentype: TokenType::Identifier("b"),
            lexeme: "b",
            line: 1,
        };
        let expression = Expression::Assign {
            name: &name,
            value: Box::new(Expression::Variable(&other)),
        };
        let printer = AstPrinter {};
        assert_eq!(printer.print(&expression), "(assign a b)");
        assert_eq!(printer.print(&Expression::Literal(Value::Nil)), "nil");
    }

    #[test]
    fn statements() {
        let name = Token {
            tokentype: TokenType::Identifier("a"),
            lexeme: "a",
            line: 1,
        };
        let program = Statement::Block(vec![
            Statement::Var {
                name: &name,
                initializer: Some(Expression::Literal(Value::Boolean(true))),
            },
            Statement::Var {
                name: &name,
                initializer: None,
            },
            Statement::Print(Expression::Variable(&name)),
            Statement::Expression(Expression::Literal(Value::String("s".to_string()))),
        ]);
        let printer = AstPrinter {};
        assert_eq!(
            printer.print_statement(&program),
            "(block (var a true) (var a) (print a) (expr s))"
        );
    }
}
