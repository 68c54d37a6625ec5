//! Error types, hand-rolled in the `Display`/`std::error::Error` style
//! used throughout this codebase rather than pulling in a derive macro
//! for the handful of variants each enum needs.

use std::fmt;

/// A byte-offset range into the source, used to render a caret under the
/// offending column in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub lineno: usize,
    pub col_offset: usize,
}

impl Span {
    pub fn new(lineno: usize, col_offset: usize) -> Self {
        Self { lineno, col_offset }
    }

    /// A span with no known source location (e.g. a synthesized node).
    pub fn unknown() -> Self {
        Self::default()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.lineno, self.col_offset)
    }
}

/// Lexing/parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedChar { ch: char, span: Span },
    UnterminatedStatement { span: Span },
    UnexpectedToken { expected: String, got: String, span: Span },
    UnexpectedEndOfInput,
    InvalidIndentation { span: Span },
    InvalidNumber { text: String, span: Span },
}

impl ParseError {
    /// The offending location, when one is known (a bare "ran out of
    /// input" error has none).
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedChar { span, .. }
            | Self::UnterminatedStatement { span }
            | Self::UnexpectedToken { span, .. }
            | Self::InvalidIndentation { span }
            | Self::InvalidNumber { span, .. } => Some(*span),
            Self::UnexpectedEndOfInput => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar { ch, span } => {
                write!(f, "unexpected character '{ch}' at {span}")
            }
            Self::UnterminatedStatement { span } => {
                write!(f, "unterminated statement at {span}")
            }
            Self::UnexpectedToken { expected, got, span } => {
                write!(f, "expected {expected}, found {got} at {span}")
            }
            Self::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            Self::InvalidIndentation { span } => {
                write!(f, "inconsistent indentation at {span}")
            }
            Self::InvalidNumber { text, span } => {
                write!(f, "invalid numeric literal '{text}' at {span}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Failures from the statement interpreter and symbolic kernel. Every
/// variant here is fatal: analysis of the enclosing function is
/// abandoned and the diagnostic replaces its report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// An AST node kind the interpreter does not model: conditionals,
    /// calls other than `range`, multiple assignment targets,
    /// unsupported operators, 3-argument `range`, and so on.
    UnsupportedSyntax { node: String, span: Span },
    /// The recurrence closer could not match any case in its table.
    UnsupportedRecurrence { detail: String, span: Span },
    /// A `while` test shares no symbol with any variable changed in its body.
    NoProgress { span: Span },
    /// The termination solver found no solution, or the test was not a
    /// recognized comparison.
    UnsolvableTermination { detail: String, span: Span },
    /// A second `return` in the same scope.
    MultipleReturns { span: Span },
    /// A name used before assignment in any enclosing scope.
    UnknownName { name: String, span: Span },
}

impl AnalysisError {
    pub fn span(&self) -> Span {
        match self {
            Self::UnsupportedSyntax { span, .. }
            | Self::UnsupportedRecurrence { span, .. }
            | Self::NoProgress { span }
            | Self::UnsolvableTermination { span, .. }
            | Self::MultipleReturns { span }
            | Self::UnknownName { span, .. } => *span,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSyntax { node, span } => {
                write!(f, "unsupported syntax: {node} at {span}")
            }
            Self::UnsupportedRecurrence { detail, span } => {
                write!(f, "unsupported recurrence: {detail} at {span}")
            }
            Self::NoProgress { span } => {
                write!(f, "while loop makes no recognized progress at {span}")
            }
            Self::UnsolvableTermination { detail, span } => {
                write!(f, "could not solve for loop termination: {detail} at {span}")
            }
            Self::MultipleReturns { span } => {
                write!(f, "a second return in the same scope at {span}")
            }
            Self::UnknownName { name, span } => {
                write!(f, "name '{name}' used before assignment at {span}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
