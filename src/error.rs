//! Error types for values, path expressions and tree algorithms.

use thiserror::Error;

use crate::lexer::LexError;
use crate::value::Kind;

/// Recoverable failures raised by the value model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// A (possibly negative) index does not address an existing element.
    /// Carries the index as the caller wrote it, before normalisation.
    #[error("index out of range: {index}")]
    OutOfRange { index: i64 },

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("expected {expected}, but got {actual}")]
    KindMismatch { expected: &'static str, actual: Kind },

    /// The value type-satisfies a capability but declines the operation.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Only produced by the checked number constructor.
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("cannot convert number {literal} to {target}")]
    NumberConversion { literal: String, target: &'static str },

    #[error("invalid bit width: {0}")]
    InvalidBitWidth(u32),
}

/// What the parser found where it expected something else.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    Eof,
    Text(String),
}

impl std::fmt::Display for Found {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Found::Eof => write!(f, "<EOF>"),
            Found::Text(text) => write!(f, "'{}'", text),
        }
    }
}

/// Why a path expression failed to parse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("expected '{expected}', but got {found}")]
    Unexpected { expected: &'static str, found: Found },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("integer {0} does not fit in 64 bits")]
    IntegerOverflow(String),
}

/// Errors produced while compiling or evaluating a [`crate::Path`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// `text` is the full expression, `consumed` the prefix accepted before
    /// the offending token.
    #[error("invalid path '{text}': {cause} (after '{consumed}')")]
    Syntax {
        text: String,
        consumed: String,
        cause: SyntaxError,
    },

    /// `path` is the rendering of every segment up to and including the one
    /// that failed.
    #[error("error evaluating path '{path}': {cause}")]
    Evaluation { path: String, cause: ValueError },
}

impl PathError {
    /// The underlying value failure, if this is an evaluation error.
    pub fn value_error(&self) -> Option<&ValueError> {
        match self {
            PathError::Evaluation { cause, .. } => Some(cause),
            PathError::Syntax { .. } => None,
        }
    }
}

/// Crate-level error used by the walker, comparison and diff engines.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Path(#[from] PathError),

    /// A panic raised inside visitor logic, caught by the walker.
    #[error("panic: {0}")]
    Panic(String),

    /// An error returned by a caller-supplied callback.
    #[error("{0}")]
    Handler(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary caller error so it can be returned from a callback.
    pub fn handler<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Handler(error.into())
    }
}

/// Convenience alias used throughout valpath.
pub type Result<T> = std::result::Result<T, Error>;
