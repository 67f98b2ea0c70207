//! logos-based tokenizer for inline style declarations.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `10px` as Dimension beats `10` as Number)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `--accent` matches [`Token::CustomProperty`], not two delimiters + `Ident`
//! - `#ff00aa` matches [`Token::HexColor`], not `Delim` + `Ident`
//! - `1.5rem` matches [`Token::Dimension`], not `Number` + `Ident`

use logos::Logos;

/// Token produced by the declaration lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `!important` flag.
    #[token("!important")]
    Important,

    /// Custom property name: `--accent`, `--space-2`.
    #[regex(r"--[a-zA-Z0-9_-]+")]
    CustomProperty,

    /// Hex color: `#fff`, `#ff00aa`, `#ff00aa80`.
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// Number with a unit suffix: `16px`, `50%`, `45deg`, `300ms`.
    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)(px|%|em|rem|vw|vh|deg|rad|turn|ms|s|fr)")]
    Dimension,

    /// Unitless number, possibly negative or fractional.
    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)")]
    Number,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Identifier: property names, keywords, function names.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// Any other single-character delimiter that may appear inside a value
    /// (`/` in `grid-area`, `+` in `calc()`, `.` in URLs...).
    #[regex(r"[-+*/=!.<>~^&|?@%#]")]
    Delim,
}

/// Tokenize declaration text into `(Token, text)` pairs.
///
/// Characters that fail to lex are skipped; use the parser for strict handling.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn simple_declaration() {
        assert_eq!(
            tokens("color: red;"),
            vec![Token::Ident, Token::Colon, Token::Ident, Token::Semicolon]
        );
    }

    #[test]
    fn dimension_beats_number() {
        let toks = tokenize("16px 1.5rem 45deg 300ms .5s");
        assert!(toks.iter().all(|(t, _)| *t == Token::Dimension));
        assert_eq!(toks[0].1, "16px");
        assert_eq!(toks[4].1, ".5s");
    }

    #[test]
    fn number_and_negative() {
        assert_eq!(tokens("-4 0.5"), vec![Token::Number, Token::Number]);
    }

    #[test]
    fn custom_property_name() {
        let toks = tokenize("--accent-color: #ff00aa");
        assert_eq!(toks[0], (Token::CustomProperty, "--accent-color".into()));
        assert_eq!(toks[2], (Token::HexColor, "#ff00aa".into()));
    }

    #[test]
    fn vendor_prefixed_ident() {
        assert_eq!(tokens("-webkit-box"), vec![Token::Ident]);
    }

    #[test]
    fn function_call_tokens() {
        assert_eq!(
            tokens("rgba(0, 0, 0, 0.2)"),
            vec![
                Token::Ident,
                Token::ParenOpen,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn strings_and_important() {
        assert_eq!(
            tokens(r#"font-family: "Inter", 'Helvetica' !important"#),
            vec![
                Token::Ident,
                Token::Colon,
                Token::StringLiteral,
                Token::Comma,
                Token::StringLiteralSingle,
                Token::Important,
            ]
        );
    }

    #[test]
    fn calc_minus_is_a_delimiter() {
        assert_eq!(
            tokens("calc(100% - 8px)"),
            vec![
                Token::Ident,
                Token::ParenOpen,
                Token::Dimension,
                Token::Delim,
                Token::Dimension,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn delimiters() {
        assert_eq!(
            tokens("1 / 3"),
            vec![Token::Number, Token::Delim, Token::Number]
        );
    }
}
