use crate::{
    tokenizer::Token,
    types::{Annotation, AnnotationArg, Element, ElementKind, FieldDecl, Method, Param, SourceFile, TypeName},
    utils::{error, quote},
    error::IntentionError,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER:        Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    static ref STRING_LITERAL:    Regex = Regex::new(r#"^"(?:[^"\\]|\\.)*"$"#).unwrap();
    static ref INTEGER:           Regex = Regex::new(r"^-?\d+$").unwrap();
    static ref FLOAT:             Regex = Regex::new(r"^-?\d+\.\d+(?:[eE][+-]?\d+)?[fF]?$").unwrap();
    static ref CHAR_LITERAL:      Regex = Regex::new(r"^'(?:[^'\\]|\\.)'$").unwrap();
    static ref PATH_SEPARATOR:    Regex = Regex::new(r"^::$").unwrap();
    static ref AT:                Regex = Regex::new(r"^@$").unwrap();
    static ref COLON:             Regex = Regex::new(r"^:$").unwrap();
    static ref COMMA:             Regex = Regex::new(r"^,$").unwrap();
    static ref EQUALS:            Regex = Regex::new(r"^=$").unwrap();
    static ref SEMICOLON:         Regex = Regex::new(r"^;$").unwrap();
    static ref QUESTION:          Regex = Regex::new(r"^\?$").unwrap();
    static ref ARROW:             Regex = Regex::new(r"^->$").unwrap();
    static ref LEFT_PAREN:        Regex = Regex::new(r"^\($").unwrap();
    static ref RIGHT_PAREN:       Regex = Regex::new(r"^\)$").unwrap();
    static ref LEFT_BRACE:        Regex = Regex::new(r"^\{$").unwrap();
    static ref RIGHT_BRACE:       Regex = Regex::new(r"^\}$").unwrap();
    static ref LEFT_ANGLE:        Regex = Regex::new(r"^<$").unwrap();
    static ref RIGHT_ANGLE:       Regex = Regex::new(r"^>$").unwrap();
    static ref PACKAGE_KEYWORD:   Regex = Regex::new(r"^package$").unwrap();
    static ref USE_KEYWORD:       Regex = Regex::new(r"^use$").unwrap();
    static ref FN_KEYWORD:        Regex = Regex::new(r"^fn$").unwrap();
    static ref INTERFACE_KEYWORD: Regex = Regex::new(r"^interface$").unwrap();
    static ref CLASS_KEYWORD:     Regex = Regex::new(r"^class$").unwrap();
    static ref OBJECT_KEYWORD:    Regex = Regex::new(r"^object$").unwrap();
    static ref EOF:               Regex = Regex::new(r"^$").unwrap();
}

struct Parser<'a> {
    tokens: &'a [Token],
    index:  usize,
}

impl<'a> Parser<'a> {
    /// The EOF token is returned for any index past the end.
    fn current(&self) -> &'a Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.index.min(last)]
    }

    fn peek(&self, test: &Regex) -> bool {
        test.is_match(&self.current().text)
    }

    fn eat(&mut self, test: &Regex) -> bool {
        if self.peek(test) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, test: &Regex, expected: &str) -> Result<&'a Token, IntentionError> {
        let tok = self.current();
        if !self.eat(test) {
            return Err(error(
                &format!("Expected {} but found {}", expected, quote(&tok.text)),
                tok.line,
                tok.column,
            ));
        }
        Ok(tok)
    }

    fn unexpected_token(&self) -> IntentionError {
        let tok = self.current();
        error(
            &format!("Unexpected token {}", quote(&tok.text)),
            tok.line,
            tok.column,
        )
    }

    fn at_eof(&self) -> bool {
        self.index >= self.tokens.len() - 1 || self.peek(&EOF)
    }

    fn parse_path(&mut self) -> Result<String, IntentionError> {
        let mut path = self.expect(&IDENTIFIER, "identifier")?.text.clone();
        while self.eat(&PATH_SEPARATOR) {
            path.push_str("::");
            path.push_str(&self.expect(&IDENTIFIER, "identifier")?.text);
        }
        Ok(path)
    }

    fn parse_type(&mut self) -> Result<TypeName, IntentionError> {
        let path = self.parse_path()?;
        let mut args = Vec::new();
        if self.eat(&LEFT_ANGLE) {
            loop {
                args.push(self.parse_type()?);
                if !self.eat(&COMMA) {
                    break;
                }
            }
            self.expect(&RIGHT_ANGLE, "\">\"")?;
        }
        let nullable = self.eat(&QUESTION);
        Ok(TypeName { path, args, nullable })
    }

    fn parse_annotations(&mut self) -> Result<Vec<Annotation>, IntentionError> {
        let mut annotations = Vec::new();
        while self.peek(&AT) {
            let at = self.current();
            self.index += 1;
            let path = self.parse_path()?;
            let name = match path.rfind("::") {
                Some(pos) => path[pos + 2..].to_string(),
                None => path,
            };

            let mut args = Vec::new();
            if self.eat(&LEFT_PAREN) {
                while !self.eat(&RIGHT_PAREN) {
                    args.push(self.parse_annotation_arg()?);
                    if !self.eat(&COMMA) {
                        self.expect(&RIGHT_PAREN, "\")\"")?;
                        break;
                    }
                }
            }

            annotations.push(Annotation {
                name,
                line: at.line,
                column: at.column,
                args,
            });
        }
        Ok(annotations)
    }

    fn parse_annotation_arg(&mut self) -> Result<AnnotationArg, IntentionError> {
        let tok = self.current();
        if self.eat(&STRING_LITERAL) {
            return Ok(AnnotationArg::Str(unescape_string(&tok.text)));
        }
        if self.eat(&INTEGER) {
            let value = tok.text.parse::<i64>().map_err(|_| {
                error(&format!("Invalid integer {}", quote(&tok.text)), tok.line, tok.column)
            })?;
            return Ok(AnnotationArg::Int(value));
        }
        if self.peek(&IDENTIFIER) {
            return Ok(AnnotationArg::Path(self.parse_path()?));
        }
        Err(self.unexpected_token())
    }

    /// A default value is kept as written.
    fn parse_default(&mut self) -> Result<String, IntentionError> {
        let tok = self.current();
        if self.eat(&STRING_LITERAL)
            || self.eat(&INTEGER)
            || self.eat(&FLOAT)
            || self.eat(&CHAR_LITERAL)
        {
            return Ok(tok.text.clone());
        }
        if self.peek(&IDENTIFIER) {
            return self.parse_path();
        }
        Err(self.unexpected_token())
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, IntentionError> {
        let mut params = Vec::new();
        self.expect(&LEFT_PAREN, "\"(\"")?;
        while !self.eat(&RIGHT_PAREN) {
            let annotations = self.parse_annotations()?;
            let name_tok = self.expect(&IDENTIFIER, "parameter name")?;
            self.expect(&COLON, "\":\"")?;
            let type_ = self.parse_type()?;
            let default = if self.eat(&EQUALS) {
                Some(self.parse_default()?)
            } else {
                None
            };

            params.push(Param {
                name: name_tok.text.clone(),
                line: name_tok.line,
                column: name_tok.column,
                annotations,
                type_,
                default,
            });

            if !self.eat(&COMMA) {
                self.expect(&RIGHT_PAREN, "\")\"")?;
                break;
            }
        }
        Ok(params)
    }

    fn parse_element(&mut self, package: &str, imports: &[String]) -> Result<Element, IntentionError> {
        let annotations = self.parse_annotations()?;

        let kind = if self.eat(&INTERFACE_KEYWORD) {
            ElementKind::Interface
        } else if self.eat(&CLASS_KEYWORD) {
            ElementKind::Class
        } else if self.eat(&OBJECT_KEYWORD) {
            ElementKind::Object
        } else {
            return Err(self.unexpected_token());
        };

        let name_tok = self.expect(&IDENTIFIER, "identifier")?;
        let mut methods = Vec::new();
        let mut fields = Vec::new();

        if !self.eat(&SEMICOLON) {
            self.expect(&LEFT_BRACE, "\"{\"")?;
            while !self.eat(&RIGHT_BRACE) {
                if self.at_eof() {
                    return Err(self.unexpected_token());
                }
                let member_annotations = self.parse_annotations()?;
                if self.eat(&FN_KEYWORD) {
                    let fn_tok = self.expect(&IDENTIFIER, "method name")?;
                    let params = self.parse_params()?;
                    let return_type = if self.eat(&ARROW) {
                        Some(self.parse_type()?)
                    } else {
                        None
                    };
                    self.expect(&SEMICOLON, "\";\"")?;
                    methods.push(Method {
                        name: fn_tok.text.clone(),
                        line: fn_tok.line,
                        column: fn_tok.column,
                        annotations: member_annotations,
                        params,
                        return_type,
                    });
                } else {
                    let field_tok = self.expect(&IDENTIFIER, "member")?;
                    self.expect(&COLON, "\":\"")?;
                    let type_ = self.parse_type()?;
                    self.expect(&SEMICOLON, "\";\"")?;
                    fields.push(FieldDecl {
                        name: field_tok.text.clone(),
                        line: field_tok.line,
                        column: field_tok.column,
                        type_,
                    });
                }
            }
        }

        Ok(Element {
            name: name_tok.text.clone(),
            package: package.to_string(),
            imports: imports.to_vec(),
            line: name_tok.line,
            column: name_tok.column,
            kind,
            annotations,
            methods,
            fields,
        })
    }
}

/// Parses a token stream produced by `tokenize_source`.
pub fn parse_source(tokens: &[Token]) -> Result<SourceFile, IntentionError> {
    if tokens.is_empty() {
        return Err(error("Expected EOF token", 0, 0));
    }
    let mut parser = Parser { tokens, index: 0 };

    let mut package = None;
    if parser.eat(&PACKAGE_KEYWORD) {
        package = Some(parser.parse_path()?);
        parser.expect(&SEMICOLON, "\";\"")?;
    }

    let mut imports = Vec::new();
    while parser.eat(&USE_KEYWORD) {
        imports.push(parser.parse_path()?);
        parser.expect(&SEMICOLON, "\";\"")?;
    }

    let package_name = package.clone().unwrap_or_default();
    let mut elements = Vec::new();
    while !parser.at_eof() {
        elements.push(parser.parse_element(&package_name, &imports)?);
    }

    Ok(SourceFile {
        package,
        imports,
        elements,
    })
}

/// Strips the quotes from a string literal token and resolves escapes.
pub fn unescape_string(literal: &str) -> String {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize_source;

    fn parse(text: &str) -> Result<SourceFile, IntentionError> {
        parse_source(&tokenize_source(text)?)
    }

    #[test]
    fn parses_package_imports_and_elements() {
        let file = parse(
            r#"
            package app::screens;
            use app::data::Ticket;

            class MainActivity;

            @Intention(MainActivity)
            interface Router {
                fn open(context: Context, @Extra("id") id: Integer? = null) -> Request;
            }
            "#,
        )
        .unwrap();

        assert_eq!(file.package.as_deref(), Some("app::screens"));
        assert_eq!(file.imports, vec!["app::data::Ticket".to_string()]);
        assert_eq!(file.elements.len(), 2);

        let router = &file.elements[1];
        assert_eq!(router.kind, ElementKind::Interface);
        assert_eq!(router.package, "app::screens");
        assert_eq!(
            router.annotation("Intention").and_then(|a| a.path_value()),
            Some("MainActivity")
        );

        let method = &router.methods[0];
        assert_eq!(method.name, "open");
        assert_eq!(method.return_type, Some(TypeName::new("Request")));
        assert_eq!(method.params.len(), 2);
        assert_eq!(method.params[1].type_, TypeName::new("Integer").nullable(true));
        assert_eq!(method.params[1].default.as_deref(), Some("null"));
        assert_eq!(
            method.params[1].annotation("Extra").and_then(|a| a.string_value()),
            Some("id")
        );
    }

    #[test]
    fn parses_generic_types_and_trailing_commas() {
        let file = parse(
            "interface R { fn go(ctx: Context, @IntegerArrayListExtra(\"ids\") ids: Vec<i32>?,) -> Request; }",
        )
        .unwrap();
        let ids = &file.elements[0].methods[0].params[1];
        assert_eq!(ids.type_.to_rust(), "Option<Vec<i32>>");
    }

    #[test]
    fn float_and_char_defaults_are_kept() {
        let file = parse(
            r#"interface R {
                fn go(
                    ctx: Context,
                    @Extra("ratio") ratio: Double? = 1.5,
                    @Extra("scale") scale: Float? = 0.25f,
                    @Extra("grade") grade: Char = 'A',
                ) -> Request;
            }"#,
        )
        .unwrap();
        let defaults: Vec<Option<&str>> = file.elements[0].methods[0]
            .params
            .iter()
            .map(|p| p.default.as_deref())
            .collect();
        assert_eq!(defaults, vec![None, Some("1.5"), Some("0.25f"), Some("'A'")]);
    }

    #[test]
    fn fields_are_recorded_as_state() {
        let file = parse("class Holder { count: i32; fn touch(); }").unwrap();
        let holder = &file.elements[0];
        assert_eq!(holder.fields.len(), 1);
        assert_eq!(holder.methods.len(), 1);
        assert_eq!(holder.methods[0].return_type, None);
    }

    #[test]
    fn qualified_annotation_uses_last_segment() {
        let file = parse("@intention::Intention(app::Target) interface R {}").unwrap();
        let marker = &file.elements[0].annotations[0];
        assert_eq!(marker.name, "Intention");
        assert_eq!(marker.path_value(), Some("app::Target"));
    }

    #[test]
    fn reports_position_of_unexpected_token() {
        let err = parse("interface R {\n  fn go(ctx Context);\n}").unwrap_err();
        match err {
            IntentionError::ParseError { line, column, msg } => {
                assert_eq!((line, column), (2, 13));
                assert!(msg.contains("\":\""), "{}", msg);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn unterminated_body_is_an_error() {
        assert!(matches!(
            parse("interface R { fn go(ctx: Context);"),
            Err(IntentionError::ParseError { .. })
        ));
    }

    #[test]
    fn unescapes_string_literals() {
        assert_eq!(unescape_string(r#""a\"b\\c\n""#), "a\"b\\c\n");
    }
}
