//! Error types for the DSL engine.
//!
//! Production parsers and the dispatcher fail with [`ParseFailure`], which
//! carries the cause but no location. The line loop wraps every failure
//! into the public [`ParserError`], attaching the 1-based line number and
//! the verbatim source line.

use std::fmt;

use thiserror::Error;

use crate::workspace::ModelError;

/// The single error kind surfaced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    pub message: String,
    /// 1-based index into the line sequence being parsed when the error
    /// was raised; 0 when the failure preceded parsing (e.g. unreadable
    /// input file).
    pub line_number: usize,
    /// The verbatim offending line; empty when `line_number` is 0.
    pub source_line: String,
}

impl ParserError {
    /// A failure with no associated source line.
    pub(crate) fn without_line(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line_number: 0,
            source_line: String::new(),
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line_number == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(
                f,
                "{} at line {}: {}",
                self.message, self.line_number, self.source_line
            )
        }
    }
}

impl std::error::Error for ParserError {}

/// Internal failure raised while parsing one line, before location
/// information is attached. The variants follow the error taxonomy:
/// lexical, structural, grammatical, semantic, I/O, internal.
#[derive(Debug, Error)]
pub(crate) enum ParseFailure {
    /// Unterminated quoted string.
    #[error("{0}")]
    Lexical(String),

    /// Block structure violation: unexpected `}` or unclosed block.
    #[error("{0}")]
    Structural(String),

    /// No dispatch rule matched the line in the current context.
    #[error("Unexpected tokens")]
    UnexpectedTokens,

    /// A production parser got fewer or more tokens than its grammar.
    #[error("Expected: {0}")]
    Expected(&'static str),

    /// Invalid or double-booked binding identifier.
    #[error("{0}")]
    Identifier(String),

    /// Reference to an unknown identifier, or to one of the wrong type.
    #[error("{0}")]
    Reference(String),

    /// Include or documentation load failure.
    #[error("{0}")]
    Io(String),

    /// A production parser found the wrong context on top of the stack;
    /// this signals a dispatcher bug, not a user error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The model rejected the operation.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// An error already located inside an included file; passed through
    /// unchanged by the outer line loop.
    #[error(transparent)]
    Nested(Box<ParserError>),
}
