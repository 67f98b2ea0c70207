//! Inline declaration parser.
//!
//! Parses `style` attribute text (`margin-top: 8px; color: red`) into a list
//! of [`Declaration`]s using the logos lexer from [`crate::css::tokenizer`].
//! Values are kept verbatim (original spacing inside the value is preserved).

use std::ops::Range;

use logos::Logos;

use crate::css::tokenizer::Token;

/// Errors from declaration parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleParseError {
    #[error("unexpected token at byte {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("invalid character at byte {position}")]
    InvalidCharacter { position: usize },
    #[error("expected ':' after property `{property}`")]
    ExpectedColon { property: String },
    #[error("property `{property}` has an empty value")]
    EmptyValue { property: String },
    #[error("unbalanced parentheses in value of `{property}`")]
    UnbalancedParens { property: String },
}

/// One `name: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name as written (kebab-case or `--custom`).
    pub name: String,
    /// Value text, trimmed, without `!important`.
    pub value: String,
    pub important: bool,
}

/// A token with its byte span in the (comment-stripped) source.
#[derive(Debug, Clone)]
struct SpannedToken {
    token: Token,
    span: Range<usize>,
}

/// Replace each `/* ... */` comment with a single space. Unterminated comments
/// swallow the rest of the input.
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        out.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

fn lex(input: &str) -> Result<Vec<SpannedToken>, StyleParseError> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok(SpannedToken { token, span }),
            Err(()) => Err(StyleParseError::InvalidCharacter {
                position: span.start,
            }),
        })
        .collect()
}

/// Parse declaration text into declarations, in source order.
///
/// Empty declarations (`;;`) are skipped. Duplicate names are all returned;
/// callers applying them in order get last-wins behavior.
pub fn parse_declarations(input: &str) -> Result<Vec<Declaration>, StyleParseError> {
    let source = strip_comments(input);
    let tokens = lex(&source)?;
    let mut parser = Parser {
        source: &source,
        tokens,
        cursor: 0,
    };

    let mut declarations = Vec::new();
    loop {
        parser.skip_semicolons();
        if parser.is_eof() {
            break;
        }
        declarations.push(parser.parse_declaration()?);
    }
    Ok(declarations)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<SpannedToken>,
    cursor: usize,
}

impl Parser<'_> {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.cursor)
    }

    fn skip_semicolons(&mut self) {
        while matches!(self.peek(), Some(t) if t.token == Token::Semicolon) {
            self.cursor += 1;
        }
    }

    fn text(&self, span: &Range<usize>) -> &str {
        &self.source[span.clone()]
    }

    fn parse_declaration(&mut self) -> Result<Declaration, StyleParseError> {
        let name_token = self.tokens[self.cursor].clone();
        if !matches!(name_token.token, Token::Ident | Token::CustomProperty) {
            return Err(StyleParseError::UnexpectedToken {
                position: name_token.span.start,
                message: format!(
                    "expected property name, found `{}`",
                    self.text(&name_token.span)
                ),
            });
        }
        let name = self.text(&name_token.span).to_owned();
        self.cursor += 1;

        match self.peek() {
            Some(t) if t.token == Token::Colon => self.cursor += 1,
            _ => return Err(StyleParseError::ExpectedColon { property: name }),
        }

        let mut depth = 0usize;
        let mut important = false;
        let mut value_span: Option<Range<usize>> = None;

        while let Some(tok) = self.peek().cloned() {
            match tok.token {
                Token::Semicolon if depth == 0 => break,
                Token::Important if depth == 0 => {
                    important = true;
                    self.cursor += 1;
                    continue;
                }
                Token::ParenOpen => depth += 1,
                Token::ParenClose => {
                    if depth == 0 {
                        return Err(StyleParseError::UnbalancedParens { property: name });
                    }
                    depth -= 1;
                }
                _ => {}
            }
            if important {
                return Err(StyleParseError::UnexpectedToken {
                    position: tok.span.start,
                    message: "`!important` must end the declaration".into(),
                });
            }
            value_span = Some(match value_span {
                Some(span) => span.start..tok.span.end,
                None => tok.span.clone(),
            });
            self.cursor += 1;
        }

        if depth != 0 {
            return Err(StyleParseError::UnbalancedParens { property: name });
        }
        let Some(span) = value_span else {
            return Err(StyleParseError::EmptyValue { property: name });
        };

        Ok(Declaration {
            value: self.text(&span).trim().to_owned(),
            name,
            important,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decl(name: &str, value: &str) -> Declaration {
        Declaration {
            name: name.into(),
            value: value.into(),
            important: false,
        }
    }

    #[test]
    fn parses_simple_list() {
        let parsed = parse_declarations("margin-top: 8px; color: red").unwrap();
        assert_eq!(parsed, vec![decl("margin-top", "8px"), decl("color", "red")]);
    }

    #[test]
    fn keeps_value_spacing() {
        let parsed = parse_declarations("box-shadow: 0px 2px 4px rgba(0, 0, 0, 0.2);").unwrap();
        assert_eq!(parsed[0].value, "0px 2px 4px rgba(0, 0, 0, 0.2)");
    }

    #[test]
    fn semicolon_inside_parens_is_part_of_value() {
        let parsed = parse_declarations("background: url(a;b); color: blue").unwrap();
        assert_eq!(parsed[0].value, "url(a;b)");
        assert_eq!(parsed[1], decl("color", "blue"));
    }

    #[test]
    fn important_flag() {
        let parsed = parse_declarations("color: red !important").unwrap();
        assert_eq!(parsed[0].value, "red");
        assert!(parsed[0].important);
    }

    #[test]
    fn custom_property() {
        let parsed = parse_declarations("--accent: #ff00aa").unwrap();
        assert_eq!(parsed, vec![decl("--accent", "#ff00aa")]);
    }

    #[test]
    fn comments_are_ignored() {
        let parsed = parse_declarations("/* lead */ color: red; /* tail").unwrap();
        assert_eq!(parsed, vec![decl("color", "red")]);
    }

    #[test]
    fn empty_input_and_stray_semicolons() {
        assert!(parse_declarations("").unwrap().is_empty());
        assert_eq!(parse_declarations(";;color:red;;").unwrap().len(), 1);
    }

    #[test]
    fn missing_colon() {
        let err = parse_declarations("color red").unwrap_err();
        assert_eq!(
            err,
            StyleParseError::ExpectedColon {
                property: "color".into()
            }
        );
    }

    #[test]
    fn empty_value() {
        let err = parse_declarations("color: ;").unwrap_err();
        assert!(matches!(err, StyleParseError::EmptyValue { .. }));
    }

    #[test]
    fn unbalanced_parens() {
        assert!(matches!(
            parse_declarations("transform: scale(1.2").unwrap_err(),
            StyleParseError::UnbalancedParens { .. }
        ));
        assert!(matches!(
            parse_declarations("width: 1)").unwrap_err(),
            StyleParseError::UnbalancedParens { .. }
        ));
    }

    #[test]
    fn bad_property_name() {
        assert!(matches!(
            parse_declarations("12: red").unwrap_err(),
            StyleParseError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn invalid_character() {
        assert!(matches!(
            parse_declarations("color: $red").unwrap_err(),
            StyleParseError::InvalidCharacter { .. }
        ));
    }
}
