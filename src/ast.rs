use serde::Serialize;

use crate::token::TokenKind;

/// Root of the syntax tree: an ordered sequence of statements.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Statement {
    /// `target = value`. Exactly an identifier plus one expression subtree.
    Assignment { target: String, value: Expression },
    Expression(Expression),
}

/// Leaves keep the literal source lexeme; the parser never evaluates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Expression {
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Number(String),
    Decimal(String),
    Identifier(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Minus => Some(BinaryOperator::Sub),
            TokenKind::Star => Some(BinaryOperator::Mul),
            TokenKind::Slash => Some(BinaryOperator::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        }
    }
}

/// Renders the tree as an indented outline, one node per line, with `├─`
/// and `└─` connectors distinguishing siblings from the last child.
pub fn render(program: &Program) -> String {
    let mut out = String::new();
    push_line(&mut out, 0, "", "Program", None);
    let count = program.statements.len();
    for (index, statement) in program.statements.iter().enumerate() {
        render_statement(&mut out, statement, 1, connector(index, count));
    }
    out
}

fn connector(index: usize, count: usize) -> &'static str {
    if index + 1 == count {
        "└─ "
    } else {
        "├─ "
    }
}

fn render_statement(out: &mut String, statement: &Statement, level: usize, prefix: &str) {
    match statement {
        Statement::Assignment { target, value } => {
            push_line(out, level, prefix, "Assignment", None);
            push_line(out, level + 1, "├─ ", "Identifier", Some(target));
            render_expression(out, value, level + 1, "└─ ");
        }
        Statement::Expression(expression) => render_expression(out, expression, level, prefix),
    }
}

fn render_expression(out: &mut String, expression: &Expression, level: usize, prefix: &str) {
    match expression {
        Expression::Binary {
            operator,
            left,
            right,
        } => {
            push_line(out, level, prefix, "BinaryOp", Some(operator.symbol()));
            render_expression(out, left, level + 1, "├─ ");
            render_expression(out, right, level + 1, "└─ ");
        }
        Expression::Number(text) => push_line(out, level, prefix, "Number", Some(text)),
        Expression::Decimal(text) => push_line(out, level, prefix, "Decimal", Some(text)),
        Expression::Identifier(name) => push_line(out, level, prefix, "Identifier", Some(name)),
    }
}

fn push_line(out: &mut String, level: usize, prefix: &str, label: &str, literal: Option<&str>) {
    for _ in 0..level {
        out.push_str("  ");
    }
    out.push_str(prefix);
    out.push_str(label);
    if let Some(literal) = literal {
        out.push_str(": ");
        out.push_str(literal);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{render, BinaryOperator, Expression, Program, Statement};

    fn sample_program() -> Program {
        Program {
            statements: vec![
                Statement::Assignment {
                    target: "x".to_string(),
                    value: Expression::Binary {
                        operator: BinaryOperator::Add,
                        left: Box::new(Expression::Number("3".to_string())),
                        right: Box::new(Expression::Binary {
                            operator: BinaryOperator::Mul,
                            left: Box::new(Expression::Identifier("y".to_string())),
                            right: Box::new(Expression::Decimal("2.5".to_string())),
                        }),
                    },
                },
                Statement::Expression(Expression::Identifier("x".to_string())),
            ],
        }
    }

    #[test]
    fn renders_connectors_and_literals() {
        insta::assert_snapshot!(render(&sample_program()), @r"
        Program
          ├─ Assignment
            ├─ Identifier: x
            └─ BinaryOp: +
              ├─ Number: 3
              └─ BinaryOp: *
                ├─ Identifier: y
                └─ Decimal: 2.5
          └─ Identifier: x
        ");
    }

    #[test]
    fn renders_empty_program_as_single_line() {
        let program = Program { statements: vec![] };
        assert_eq!(render(&program), "Program\n");
    }
}
