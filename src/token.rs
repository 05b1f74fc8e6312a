use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed token vocabulary of the expression language.
///
/// The lexical scanner reports each token as a `KIND:TEXT` line; the KIND
/// column uses the wire tags below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    Number,
    Decimal,
    Identifier,
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    LParen,
    RParen,
}

impl TokenKind {
    pub fn from_wire_tag(tag: &str) -> Option<Self> {
        match tag {
            "NUMBER" => Some(TokenKind::Number),
            "DECIMAL" => Some(TokenKind::Decimal),
            "IDENTIFIER" => Some(TokenKind::Identifier),
            "PLUS" => Some(TokenKind::Plus),
            "MINUS" => Some(TokenKind::Minus),
            "STAR" => Some(TokenKind::Star),
            "SLASH" => Some(TokenKind::Slash),
            "ASSIGN" => Some(TokenKind::Assign),
            "LPAREN" => Some(TokenKind::LParen),
            "RPAREN" => Some(TokenKind::RParen),
            _ => None,
        }
    }

    pub fn wire_tag(&self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Decimal => "DECIMAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Assign => "ASSIGN",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_tag())
    }
}

/// A single lexical unit: its kind plus the literal source lexeme.
/// Immutable once created; the parser only ever reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
