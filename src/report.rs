//! Adapter between the external lexical scanner and the parser.
//!
//! The scanner prints one `KIND:TEXT` line per token. Separator lines
//! (starting with `---`) and `ERROR:` lines (lexical-stage failures) never
//! become tokens; every other line must carry a known kind tag.

use crate::token::{Token, TokenKind};

const SEPARATOR_MARKER: &str = "---";
const LEXICAL_ERROR_TAG: &str = "ERROR";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("malformed lexer report: unknown token kind `{tag}` on line {line}")]
    UnknownKind { line: usize, tag: String },
}

/// Converts the scanner's textual report into the parser's token sequence,
/// preserving line order as token order.
pub fn parse_report(report: &str) -> Result<Vec<Token>, ReportError> {
    let mut tokens = Vec::new();

    for (index, raw_line) in report.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(SEPARATOR_MARKER) {
            continue;
        }

        // Split on the first colon only; TEXT may be empty.
        let Some((tag, text)) = line.split_once(':') else {
            continue;
        };

        if tag == LEXICAL_ERROR_TAG {
            continue;
        }

        let kind = TokenKind::from_wire_tag(tag).ok_or_else(|| ReportError::UnknownKind {
            line: index + 1,
            tag: tag.to_string(),
        })?;
        tokens.push(Token::new(kind, text));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::{parse_report, ReportError};
    use crate::token::{Token, TokenKind};

    #[test]
    fn adapts_report_preserving_order() {
        let report = "\
--- tokens ---
IDENTIFIER:x
ASSIGN:=
NUMBER:3
PLUS:+
NUMBER:5
--- end ---
";
        let tokens = parse_report(report).expect("well-formed report");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Identifier, "x"),
                Token::new(TokenKind::Assign, "="),
                Token::new(TokenKind::Number, "3"),
                Token::new(TokenKind::Plus, "+"),
                Token::new(TokenKind::Number, "5"),
            ]
        );
    }

    #[test]
    fn skips_error_lines_and_blanks() {
        let report = "NUMBER:1\n\nERROR:unexpected char '$'\n   \nNUMBER:2\n";
        let tokens = parse_report(report).expect("well-formed report");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Number, "1"),
                Token::new(TokenKind::Number, "2"),
            ]
        );
    }

    #[test]
    fn skips_lines_without_delimiter() {
        let report = "banner without colon\nNUMBER:7\n";
        let tokens = parse_report(report).expect("well-formed report");
        assert_eq!(tokens, vec![Token::new(TokenKind::Number, "7")]);
    }

    #[test]
    fn splits_on_first_colon_and_allows_empty_text() {
        let tokens = parse_report("ASSIGN:\nIDENTIFIER:a:b\n").expect("well-formed report");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Assign, ""),
                Token::new(TokenKind::Identifier, "a:b"),
            ]
        );
    }

    #[test]
    fn rejects_unknown_kind_with_line_number() {
        let err = parse_report("NUMBER:1\nFLOAT:2.0\n").expect_err("unknown tag must fail");
        assert_eq!(
            err,
            ReportError::UnknownKind {
                line: 2,
                tag: "FLOAT".to_string(),
            }
        );
    }

    #[test]
    fn empty_report_yields_no_tokens() {
        assert_eq!(parse_report("").expect("empty report"), vec![]);
        assert_eq!(
            parse_report("--- tokens ---\n").expect("separators only"),
            vec![]
        );
    }
}
