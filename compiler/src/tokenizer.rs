use regex::Regex;
use lazy_static::lazy_static;
use crate::utils::{quote, error};
use crate::error::IntentionError;

lazy_static! {
    pub static ref TOKEN_REGEX: Regex = Regex::new(
        r#"("(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)'|//[^\n]*|\s+|->|::|-?\d+\.\d+(?:[eE][+-]?\d+)?[fF]?|-?\d+|[@(){}<>,;:=?.]|[A-Za-z_][A-Za-z0-9_]*)"#
    ).unwrap();
    pub static ref WHITESPACE_RX: Regex = Regex::new(r"^(//.*|\s+)$").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text:   String,
    pub line:   usize,
    pub column: usize,
}

/// 1-based position of the next unread character.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    line:   usize,
    column: usize,
}

impl Cursor {
    fn advance(&mut self, consumed: &str) {
        match consumed.rfind('\n') {
            Some(pos) => {
                self.line += consumed.matches('\n').count();
                self.column = consumed[pos + 1..].chars().count() + 1;
            }
            None => self.column += consumed.chars().count(),
        }
    }

    fn syntax_error(&self, rest: &str) -> IntentionError {
        error(&format!("Syntax error: {}", quote(rest)), self.line, self.column)
    }
}

/// Splits a declaration file into tokens, dropping whitespace and comments.
/// The last token is always an empty EOF marker.
pub fn tokenize_source(text: &str) -> Result<Vec<Token>, IntentionError> {
    let mut tokens = Vec::new();
    let mut cursor = Cursor { line: 1, column: 1 };
    let mut offset = 0;

    for mat in TOKEN_REGEX.find_iter(text) {
        // Anything the regex skipped over is not a token.
        if mat.start() != offset {
            return Err(cursor.syntax_error(&text[offset..mat.start()]));
        }
        let part = mat.as_str();
        if !WHITESPACE_RX.is_match(part) {
            tokens.push(Token {
                text:   part.to_string(),
                line:   cursor.line,
                column: cursor.column,
            });
        }
        cursor.advance(part);
        offset = mat.end();
    }

    if offset != text.len() {
        return Err(cursor.syntax_error(&text[offset..]));
    }

    tokens.push(Token {
        text:   String::new(),
        line:   cursor.line,
        column: cursor.column,
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize_source(input)
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_tokenize_simple() {
        let input = "fn go(ctx: Context) -> Request;";
        let expected = vec![
            Token { text: "fn".into(),      line: 1, column: 1 },
            Token { text: "go".into(),      line: 1, column: 4 },
            Token { text: "(".into(),       line: 1, column: 6 },
            Token { text: "ctx".into(),     line: 1, column: 7 },
            Token { text: ":".into(),       line: 1, column: 10 },
            Token { text: "Context".into(), line: 1, column: 12 },
            Token { text: ")".into(),       line: 1, column: 19 },
            Token { text: "->".into(),      line: 1, column: 21 },
            Token { text: "Request".into(), line: 1, column: 24 },
            Token { text: ";".into(),       line: 1, column: 31 },
            Token { text: "".into(),        line: 1, column: 32 },
        ];
        assert_eq!(tokenize_source(input).unwrap(), expected);
    }

    #[test]
    fn test_tokenize_annotation_with_string() {
        assert_eq!(
            texts(r#"@Extra("extra \"id\"") id: Integer?"#),
            vec!["@", "Extra", "(", r#""extra \"id\"""#, ")", "id", ":", "Integer", "?", ""]
        );
    }

    #[test]
    fn test_tokenize_paths_and_comments() {
        let tokens = tokenize_source("// routes\nuse app::data::Ticket;").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["use", "app", "::", "data", "::", "Ticket", ";", ""]);
        assert_eq!((tokens[0].line, tokens[0].column), (2, 1));
    }

    #[test]
    fn test_tokenize_float_and_char_literals() {
        assert_eq!(
            texts("ratio: Double? = 1.5, scale: Float = -2.25f, grade: Char = 'A'"),
            vec![
                "ratio", ":", "Double", "?", "=", "1.5", ",", "scale", ":", "Float", "=", "-2.25f", ",",
                "grade", ":", "Char", "=", "'A'", "",
            ]
        );
    }

    #[test]
    fn test_tokenize_nested_generics() {
        assert_eq!(
            texts("Vec<Vec<i32>>"),
            vec!["Vec", "<", "Vec", "<", "i32", ">", ">", ""]
        );
    }

    #[test]
    fn test_tokenize_unexpected_text() {
        let err = tokenize_source("fn go() # nope").unwrap_err();
        assert!(
            matches!(err, IntentionError::ParseError { line: 1, column: 9, .. }),
            "expected a ParseError but got {:?}",
            err
        );
    }
}
