//! Recursive-descent syntactic analyzer.
//!
//! One function per grammar non-terminal:
//!
//! ```text
//! Program    → Statement*
//! Statement  → Assignment | Expression
//! Assignment → IDENTIFIER '=' Expression
//! Expression → Term (('+' | '-') Term)*
//! Term       → Factor (('*' | '/') Factor)*
//! Factor     → NUMBER | DECIMAL | IDENTIFIER | '(' Expression ')'
//! ```
//!
//! A failed production returns `None` after recording a diagnostic; callers
//! add their own contextual message where the grammar calls for one and
//! propagate `None` upward. There is no resynchronization: the first failed
//! statement aborts the whole parse.

use tracing::trace;

use crate::ast::{BinaryOperator, Expression, Program, Statement};
use crate::token::{Token, TokenKind};

/// Parses one token sequence once. Returns the syntax tree (absent when the
/// parse failed) together with every diagnostic recorded along the way, in
/// order. Deterministic: the same tokens always produce the same result.
pub fn analyze(tokens: Vec<Token>) -> (Option<Program>, Vec<String>) {
    let mut parser = Parser {
        tokens,
        pos: 0,
        diagnostics: Vec::new(),
    };

    let program = parser.program();

    // Completeness guard: a surviving tree must account for every token.
    if program.is_some() && parser.current().is_some() {
        parser
            .diagnostics
            .push("unexpected trailing tokens after program end".to_string());
    }

    (program, parser.diagnostics)
}

struct Parser {
    tokens: Vec<Token>,
    /// Read cursor; only ever moves forward.
    pos: usize,
    diagnostics: Vec<String>,
}

impl Parser {
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// The sole checked-consumption primitive: consumes the current token if
    /// it has the given kind, otherwise records a diagnostic and stays put.
    fn expect(&mut self, kind: TokenKind) -> bool {
        let Some(token) = self.current() else {
            self.diagnostics
                .push(format!("expected `{kind}` but reached end of input"));
            return false;
        };
        if token.kind != kind {
            let message = format!(
                "expected `{kind}` but found `{}` (`{}`)",
                token.kind, token.text
            );
            self.diagnostics.push(message);
            return false;
        }
        self.advance();
        true
    }

    fn program(&mut self) -> Option<Program> {
        let mut statements = Vec::new();

        // Empty input is reported, not treated as a syntax failure.
        if self.current().is_none() {
            self.diagnostics.push("empty program".to_string());
            return Some(Program { statements });
        }

        while self.current().is_some() {
            statements.push(self.statement()?);
        }

        Some(Program { statements })
    }

    fn statement(&mut self) -> Option<Statement> {
        trace!(pos = self.pos, "parsing statement");
        let token = self.current()?;

        // The grammar's only two-token lookahead: IDENTIFIER followed by
        // ASSIGN means an assignment, anything else is an expression.
        if token.kind == TokenKind::Identifier
            && self
                .tokens
                .get(self.pos + 1)
                .is_some_and(|next| next.kind == TokenKind::Assign)
        {
            self.assignment()
        } else {
            self.expression().map(Statement::Expression)
        }
    }

    fn assignment(&mut self) -> Option<Statement> {
        let target = match self.current() {
            Some(token) if token.kind == TokenKind::Identifier => token.text.clone(),
            _ => {
                self.diagnostics
                    .push("expected an identifier in assignment".to_string());
                return None;
            }
        };
        self.advance();

        if !self.expect(TokenKind::Assign) {
            return None;
        }

        let value = self.expression()?;
        Some(Statement::Assignment { target, value })
    }

    fn expression(&mut self) -> Option<Expression> {
        trace!(pos = self.pos, "parsing expression");
        let mut node = self.term()?;

        while let Some(operator) = self.peek_operator(&[TokenKind::Plus, TokenKind::Minus]) {
            self.advance();
            let Some(right) = self.term() else {
                self.diagnostics
                    .push(format!("expected a term after `{}`", operator.symbol()));
                return None;
            };
            node = Expression::Binary {
                operator,
                left: Box::new(node),
                right: Box::new(right),
            };
        }

        Some(node)
    }

    fn term(&mut self) -> Option<Expression> {
        let mut node = self.factor()?;

        while let Some(operator) = self.peek_operator(&[TokenKind::Star, TokenKind::Slash]) {
            self.advance();
            let Some(right) = self.factor() else {
                self.diagnostics
                    .push(format!("expected a factor after `{}`", operator.symbol()));
                return None;
            };
            node = Expression::Binary {
                operator,
                left: Box::new(node),
                right: Box::new(right),
            };
        }

        Some(node)
    }

    fn factor(&mut self) -> Option<Expression> {
        let Some(token) = self.current() else {
            self.diagnostics
                .push("expected a factor but reached end of input".to_string());
            return None;
        };

        match token.kind {
            TokenKind::Number => {
                let node = Expression::Number(token.text.clone());
                self.advance();
                Some(node)
            }
            TokenKind::Decimal => {
                let node = Expression::Decimal(token.text.clone());
                self.advance();
                Some(node)
            }
            TokenKind::Identifier => {
                let node = Expression::Identifier(token.text.clone());
                self.advance();
                Some(node)
            }
            TokenKind::LParen => {
                self.advance();
                // The closing parenthesis is checked even when the inner
                // expression failed, so both messages surface for `(2 +`.
                let node = self.expression();
                if !self.expect(TokenKind::RParen) {
                    self.diagnostics
                        .push("missing closing parenthesis `)`".to_string());
                    return None;
                }
                node
            }
            _ => {
                let message = format!("unexpected token `{}` (`{}`)", token.kind, token.text);
                self.diagnostics.push(message);
                None
            }
        }
    }

    /// One-token peek at the operator set for a precedence level. Never
    /// advances; `expression`/`term` consume the operator themselves.
    fn peek_operator(&self, kinds: &[TokenKind]) -> Option<BinaryOperator> {
        let token = self.current()?;
        if kinds.contains(&token.kind) {
            BinaryOperator::from_kind(token.kind)
        } else {
            None
        }
    }
}
