//! The statement interpreter: walks the AST, driving the symbolic
//! kernel, the scope/effect store, and the recurrence and termination
//! solvers. Mirrors `original_source/complexity.py`'s `Visitor` class,
//! one AST shape at a time.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::ast::{self, ExprNode, FunctionDef, Stmt};
use crate::error::{AnalysisError, Span};
use crate::expr::{BigO, Expr, solve_linear_or_log, substitute};
use crate::recurrence::repeated;
use crate::relation::{BoolExpr, CompareOp, Relation, termination_function};
use crate::scope::Scope;
use crate::symbol::Symbol;

/// Everything reported for one analyzed function.
pub struct FunctionReport {
    pub name: String,
    pub big_o: BigO,
    pub result: Option<Arc<Expr>>,
}

pub fn analyze_function(def: &FunctionDef) -> Result<FunctionReport, AnalysisError> {
    if def.params.is_empty() {
        return Err(AnalysisError::UnsupportedSyntax {
            node: "function with no parameters".to_string(),
            span: def.span,
        });
    }

    let mut stack: Vec<Scope> = Vec::new();
    let mut locals = IndexMap::new();
    let mut param_symbols = Vec::new();
    for p in &def.params {
        let sym = Symbol::new(p.as_str());
        locals.insert(p.clone(), sym.clone());
        param_symbols.push(sym);
    }
    push_scope(&mut stack, locals);

    interp_block(&def.body, &mut stack)?;

    let root = pop_scope(&mut stack, def.span)?;
    let steps = root.affect(&Expr::symbol(root.steps_symbol().clone()));
    let big_o = BigO::of(&steps, &param_symbols[0]);
    let result = root.output().map(|o| root.affect(o));

    Ok(FunctionReport { name: def.name.clone(), big_o, result })
}

fn push_scope(stack: &mut Vec<Scope>, locals: IndexMap<String, Symbol>) {
    let ancestors: Vec<&Scope> = stack.iter().collect();
    stack.push(Scope::enter(&ancestors, locals));
}

fn pop_scope(stack: &mut Vec<Scope>, span: Span) -> Result<Scope, AnalysisError> {
    stack
        .pop()
        .ok_or_else(|| AnalysisError::UnsupportedSyntax { node: "internal: scope stack underflow".to_string(), span })
}

fn lookup(stack: &[Scope], name: &str, span: Span) -> Result<Symbol, AnalysisError> {
    stack
        .iter()
        .rev()
        .find_map(|s| s.lookup_local(name).cloned())
        .ok_or_else(|| AnalysisError::UnknownName { name: name.to_string(), span })
}

fn resolve_or_declare(stack: &mut Vec<Scope>, name: &str) -> Symbol {
    if let Some(sym) = stack.iter().rev().find_map(|s| s.lookup_local(name).cloned()) {
        return sym;
    }
    let sym = Symbol::new(name);
    if let Some(top) = stack.last_mut() {
        top.declare_local(name, sym.clone());
    }
    sym
}

fn interp_block(body: &[Stmt], stack: &mut Vec<Scope>) -> Result<(), AnalysisError> {
    for stmt in body {
        interp_stmt(stmt, stack)?;
    }
    Ok(())
}

fn interp_stmt(stmt: &Stmt, stack: &mut Vec<Scope>) -> Result<(), AnalysisError> {
    match stmt {
        Stmt::Return { value, span } => {
            let Some(value) = value else {
                return Err(AnalysisError::UnsupportedSyntax { node: "bare return".to_string(), span: *span });
            };
            let visited = eval_expr(value, stack)?;
            let top = stack.last_mut().ok_or(AnalysisError::UnsupportedSyntax {
                node: "internal: scope stack underflow".to_string(),
                span: *span,
            })?;
            top.set_output(visited).map_err(|()| AnalysisError::MultipleReturns { span: *span })
        }
        Stmt::Assign { target, value, span: _ } => {
            let visited = eval_expr(value, stack)?;
            let sym = resolve_or_declare(stack, target);
            if let Some(top) = stack.last_mut() {
                top.add_effect_symbol(sym, visited);
            }
            Ok(())
        }
        Stmt::AugAssign { target, op, value, span } => {
            let sym = lookup(stack, target, *span)?;
            let rhs = eval_expr(value, stack)?;
            let combined = apply_binop(Expr::symbol(sym.clone()), *op, rhs);
            if let Some(top) = stack.last_mut() {
                top.add_effect_symbol(sym, combined);
            }
            Ok(())
        }
        Stmt::For { target, iter, body, span } => interp_for(target, iter, body, *span, stack),
        Stmt::While { test, body, span } => interp_while(test, body, *span, stack),
    }
}

fn interp_for(target: &str, iter: &ExprNode, body: &[Stmt], span: Span, stack: &mut Vec<Scope>) -> Result<(), AnalysisError> {
    let (a, b_exclusive) = eval_range(iter, stack)?;
    let b = Expr::sub(b_exclusive, Expr::int(1));

    let idx = Symbol::new_counter(target);
    let mut locals = IndexMap::new();
    locals.insert(target.to_string(), idx.clone());
    push_scope(stack, locals);

    interp_block(body, stack)?;

    let inner = pop_scope(stack, span)?;
    let effects: Vec<(Symbol, Arc<Expr>)> = inner.effects().iter().map(|(s, e)| (s.clone(), e.clone())).collect();

    for (sym, e) in effects {
        let closed = repeated(&sym, &idx, &e, &a, &b)
            .map_err(|detail| AnalysisError::UnsupportedRecurrence { detail, span })?;
        if let Some(top) = stack.last_mut() {
            top.add_effect_symbol(sym, closed);
        }
    }
    Ok(())
}

fn interp_while(test: &ExprNode, body: &[Stmt], span: Span, stack: &mut Vec<Scope>) -> Result<(), AnalysisError> {
    let bool_expr = eval_compare(test, stack)?;
    let rel = single_relation(&bool_expr, span)?;

    let mut test_vars = rel.lhs.free_symbols();
    test_vars.extend(rel.rhs.free_symbols());
    test_vars.sort();
    test_vars.dedup();

    push_scope(stack, IndexMap::new());
    interp_block(body, stack)?;
    let inner = pop_scope(stack, span)?;

    let changed = inner.changed_vars();
    if !test_vars.iter().any(|v| changed.contains(v)) {
        return Err(AnalysisError::NoProgress { span });
    }

    let idx = Symbol::new_counter("itervar");
    let total = Symbol::new_counter("imax");

    // `raw`: each symbol's value after `total` generic iterations,
    // self-referential in terms of its own value going into the loop.
    // Only for solving `total` do we need the *other* variables' current
    // values folded in (`for_tau`) — composing the store-time value would
    // double that composition, since `add_effect_symbol` below already
    // folds prior state in exactly once.
    let mut raw = Vec::new();
    for (sym, e) in inner.effects() {
        let closed = repeated(sym, &idx, e, &Expr::int(1), &Expr::symbol(total.clone()))
            .map_err(|detail| AnalysisError::UnsupportedRecurrence { detail, span })?;
        raw.push((sym.clone(), closed));
    }

    let outer = stack.last_mut().ok_or(AnalysisError::UnsupportedSyntax {
        node: "internal: scope stack underflow".to_string(),
        span,
    })?;

    let mut lhs = rel.lhs.clone();
    let mut rhs = rel.rhs.clone();
    for (sym, e) in &raw {
        let for_tau = outer.affect(e);
        lhs = substitute(&lhs, sym, &for_tau);
        rhs = substitute(&rhs, sym, &for_tau);
    }
    let tau = termination_function(&Relation { op: rel.op, lhs, rhs });

    let solved = solve_linear_or_log(&tau, &Expr::int(0), &total)
        .map_err(|detail| AnalysisError::UnsolvableTermination { detail, span })?;

    for (sym, e) in raw {
        let value = substitute(&e, &total, &solved);
        outer.add_effect_symbol(sym, value);
    }
    Ok(())
}

fn single_relation(bool_expr: &BoolExpr, span: Span) -> Result<Relation, AnalysisError> {
    if bool_expr.relations.len() != 1 {
        return Err(AnalysisError::UnsupportedSyntax { node: "chained comparison in while test".to_string(), span });
    }
    Ok(bool_expr.relations[0].clone())
}

fn eval_expr(node: &ExprNode, stack: &[Scope]) -> Result<Arc<Expr>, AnalysisError> {
    match node {
        ExprNode::Name { id, span } => Ok(Expr::symbol(lookup(stack, id, *span)?)),
        ExprNode::Num { n, .. } => Ok(Expr::int(*n)),
        ExprNode::BinOp { left, op, right, .. } => {
            let l = eval_expr(left, stack)?;
            let r = eval_expr(right, stack)?;
            Ok(apply_binop(l, *op, r))
        }
        ExprNode::Compare { span, .. } => {
            Err(AnalysisError::UnsupportedSyntax { node: "comparison outside a while test".to_string(), span: *span })
        }
        ExprNode::Call { span, .. } => {
            Err(AnalysisError::UnsupportedSyntax { node: "function call other than range(...) in for".to_string(), span: *span })
        }
    }
}

fn apply_binop(left: Arc<Expr>, op: ast::BinOp, right: Arc<Expr>) -> Arc<Expr> {
    match op {
        ast::BinOp::Add => Expr::sum(vec![left, right]),
        ast::BinOp::Sub => Expr::sub(left, right),
        ast::BinOp::Mult => Expr::product(vec![left, right]),
        ast::BinOp::Div => Expr::div(left, right),
    }
}

fn eval_range(iter: &ExprNode, stack: &[Scope]) -> Result<(Arc<Expr>, Arc<Expr>), AnalysisError> {
    match iter {
        ExprNode::Call { func, args, span } if func == "range" => match args.len() {
            1 => Ok((Expr::int(0), eval_expr(&args[0], stack)?)),
            2 => Ok((eval_expr(&args[0], stack)?, eval_expr(&args[1], stack)?)),
            _ => Err(AnalysisError::UnsupportedSyntax { node: "range with more than 2 arguments".to_string(), span: *span }),
        },
        other => Err(AnalysisError::UnsupportedSyntax {
            node: "for-loop iterable other than range(...)".to_string(),
            span: other.span(),
        }),
    }
}

fn eval_compare(test: &ExprNode, stack: &[Scope]) -> Result<BoolExpr, AnalysisError> {
    match test {
        ExprNode::Compare { left, ops, comparators, span } => {
            let mut cur_left = eval_expr(left, stack)?;
            let mut relations = Vec::new();
            for (op, comparator) in ops.iter().zip(comparators.iter()) {
                let right = eval_expr(comparator, stack)?;
                let rel_op = match op {
                    ast::CompareOp::Lt => CompareOp::Lt,
                    ast::CompareOp::Le => CompareOp::Le,
                    ast::CompareOp::Gt => CompareOp::Gt,
                    ast::CompareOp::Ge => CompareOp::Ge,
                    ast::CompareOp::Eq | ast::CompareOp::NotEq => {
                        return Err(AnalysisError::UnsupportedSyntax {
                            node: "equality comparison in while test".to_string(),
                            span: *span,
                        });
                    }
                };
                relations.push(Relation { op: rel_op, lhs: cur_left.clone(), rhs: right.clone() });
                cur_left = right;
            }
            Ok(BoolExpr { relations })
        }
        other => Err(AnalysisError::UnsupportedSyntax { node: "while test must be a comparison".to_string(), span: other.span() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn analyze(source: &str) -> FunctionReport {
        let module = parse(source).unwrap();
        analyze_function(&module.functions[0]).unwrap()
    }

    #[test]
    fn nested_for_loops_give_quadratic_complexity() {
        let report = analyze(
            "def f(n):\n    s = 0\n    for i in range(1, n + 1):\n        for j in range(1, i + 1):\n            s += 1\n    return s\n",
        );
        assert_eq!(report.big_o.to_string(), "O(n^2)");
    }

    #[test]
    fn while_with_two_pointers_is_linear() {
        let report = analyze(
            "def f(n):\n    i = 0\n    j = n\n    while i <= j:\n        i += 1\n        j -= 1\n    return i\n",
        );
        assert_eq!(report.big_o.to_string(), "O(n)");
    }

    #[test]
    fn doubling_while_is_logarithmic() {
        let report = analyze("def f(n):\n    j = 1\n    while j < n:\n        j += j\n");
        assert_eq!(report.big_o.to_string(), "O(log(n))");
    }

    #[test]
    fn unknown_name_is_reported() {
        let module = parse("def f(n):\n    return m\n").unwrap();
        let err = analyze_function(&module.functions[0]).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownName { .. }));
    }

    #[test]
    fn while_with_no_progress_is_reported() {
        let module = parse("def f(n):\n    i = 0\n    while i < n:\n        s = 1\n").unwrap();
        let err = analyze_function(&module.functions[0]).unwrap_err();
        assert!(matches!(err, AnalysisError::NoProgress { .. }));
    }
}
