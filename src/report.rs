//! Turns a [`FunctionReport`](crate::interp::FunctionReport) or a failure
//! into the text the CLI prints.
//!
//! Error rendering (a source excerpt with a caret under the offending
//! column) follows `source_backtrace` from the original tool this one
//! replaces: name the failing line, print it verbatim, then underline the
//! column.

use crate::error::{AnalysisError, ParseError, Span};
use crate::interp::FunctionReport;

/// `Function <name>: O(<bound>)`, plus a `Result: <expr>` line when the
/// function returns a value, followed by a blank line.
pub fn render(report: &FunctionReport) -> String {
    let mut out = format!("Function {}: {}\n", report.name, report.big_o);
    if let Some(result) = &report.result {
        out.push_str(&format!("Result: {result}\n"));
    }
    out.push('\n');
    out
}

/// Replaces a function's report block when its analysis failed.
pub fn render_analysis_error(name: &str, err: &AnalysisError, source: &str) -> String {
    let mut out = format!("Function {name}: error: {err}\n");
    out.push_str(&excerpt(source, err.span()));
    out.push('\n');
    out
}

/// A module-level parse failure; there is no per-function block to
/// attach to, since the module never finished parsing.
pub fn render_parse_error(err: &ParseError, source: &str) -> String {
    let mut out = format!("error: {err}\n");
    if let Some(span) = err.span() {
        out.push_str(&excerpt(source, span));
    }
    out
}

fn excerpt(source: &str, span: Span) -> String {
    match span.lineno.checked_sub(1).and_then(|idx| source.lines().nth(idx)) {
        Some(line) => format!("{line}\n{}^\n", " ".repeat(span.col_offset)),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::expr::{BigO, Expr};
    use crate::symbol::Symbol;

    #[test]
    fn renders_a_function_with_a_result() {
        let n = Symbol::new("n");
        let report = FunctionReport {
            name: "f".to_string(),
            big_o: BigO::of(&Expr::symbol(n.clone()), &n),
            result: Some(Expr::symbol(n)),
        };
        assert_eq!(render(&report), "Function f: O(n)\nResult: n\n\n");
    }

    #[test]
    fn renders_a_function_with_no_return() {
        let n = Symbol::new("n");
        let report = FunctionReport { name: "f".to_string(), big_o: BigO::of(&Expr::symbol(n.clone()), &n), result: None };
        assert_eq!(render(&report), "Function f: O(n)\n\n");
    }

    #[test]
    fn error_rendering_underlines_the_offending_column() {
        let source = "def f(n):\n    return m\n";
        let err = AnalysisError::UnknownName { name: "m".to_string(), span: Span::new(2, 11) };
        let rendered = render_analysis_error("f", &err, source);
        assert!(rendered.contains("    return m"));
        assert!(rendered.ends_with(&format!("{}^\n", " ".repeat(11))));
    }
}
