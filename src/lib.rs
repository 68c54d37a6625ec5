#![forbid(unsafe_code)]
//! Static asymptotic complexity inference for a restricted imperative
//! sublanguage.
//!
//! # Pipeline
//!
//! Source text is tokenized ([`lexer`]), parsed into a small statement AST
//! ([`parser`], [`ast`]), then walked by an abstract interpreter
//! ([`interp`]) that drives a symbolic expression kernel ([`expr`]), a
//! scope/effect store ([`scope`]), and the recurrence and loop-termination
//! solvers ([`recurrence`], [`relation`]) to produce a `Big-O` bound (and,
//! when the function returns a value, a closed form for it) per function.
//! [`report`] turns that into the text the CLI binary prints.
//!
//! # Example
//!
//! ```
//! use asymptotica::{analyze_source, report};
//!
//! let source = "def f(n):\n    s = 0\n    for i in range(n):\n        s += 1\n    return s\n";
//! let results = analyze_source(source).unwrap();
//! assert_eq!(results.len(), 1);
//! let (name, outcome) = &results[0];
//! assert_eq!(name, "f");
//! assert_eq!(report::render(outcome.as_ref().unwrap()), "Function f: O(n)\nResult: n\n\n");
//! ```

pub mod ast;
pub mod error;
pub mod expr;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod rational;
pub mod recurrence;
pub mod relation;
pub mod report;
pub mod scope;
pub mod symbol;

pub use error::{AnalysisError, ParseError, Span};
pub use interp::{FunctionReport, analyze_function};

/// Parse and analyze every function definition in `source`, in source
/// order. Each function is analyzed independently: one function's
/// [`AnalysisError`] does not prevent the others from being reported.
/// Paired with each result is the function's name, since a failed
/// analysis carries no [`FunctionReport`] to read it back from.
pub fn analyze_source(source: &str) -> Result<Vec<(String, Result<FunctionReport, AnalysisError>)>, ParseError> {
    let module = parser::parse(source)?;
    Ok(module.functions.iter().map(|def| (def.name.clone(), analyze_function(def))).collect())
}
