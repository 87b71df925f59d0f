//! Line tokenizer.
//!
//! Splits one source line into tokens using a logos-generated scanner.
//! Two token shapes exist: a double-quoted span (whose inner `\x` escapes
//! are reduced by one level) and a bare run of non-whitespace characters.
//! The scanner is purely syntactic; keywords are recognised later by the
//! dispatcher.

use logos::Logos;

use super::error::ParseFailure;

/// Raw token shapes on a line. A bare word never begins with `"`, so the
/// two patterns are disjoint and the only unmatched input is a quote that
/// never closes.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
enum RawToken {
    #[regex(r#""([^"\\]|\\.)*""#)]
    Quoted,

    #[regex(r#"[^ \t"][^ \t]*"#)]
    Word,
}

/// Tokenize one trimmed source line.
///
/// Comment and blank detection happens before this is called; here every
/// line is expected to carry at least one token.
pub(crate) fn tokenize(line: &str) -> Result<Vec<String>, ParseFailure> {
    let mut lexer = RawToken::lexer(line);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(RawToken::Quoted) => {
                let slice = lexer.slice();
                tokens.push(unescape(&slice[1..slice.len() - 1]));
            }
            Ok(RawToken::Word) => tokens.push(lexer.slice().to_string()),
            Err(()) => {
                return Err(ParseFailure::Lexical(format!(
                    "Unterminated string: {}",
                    &line[lexer.span().start..]
                )));
            }
        }
    }
    Ok(tokens)
}

/// Reduce `\x` escapes by one level: the character after a backslash is
/// taken literally, whatever it is.
fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
