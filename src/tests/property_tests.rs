//! Property-based tests
//!
//! Uses quickcheck for:
//! - Parser robustness (fuzz on arbitrary strings)
//! - Display/re-parse stability
//! - Compiled bytecode agreeing with direct AST interpretation

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

use crate::evaluator::CompiledFormula;
use crate::functions::Registry;
use crate::{Expr, parse};

/// Generate random well-formed expression strings
fn random_expr_string(g: &mut Gen) -> String {
    let depth = g.size().min(4);
    gen_expr_string_recursive(g, depth)
}

fn gen_expr_string_recursive(g: &mut Gen, depth: usize) -> String {
    if depth == 0 {
        match u8::arbitrary(g) % 4 {
            0 => {
                let n = u16::arbitrary(g);
                format!("{}", n % 1000)
            }
            1 => "x".to_string(),
            2 => "y".to_string(),
            _ => "z".to_string(),
        }
    } else {
        match u8::arbitrary(g) % 10 {
            0..=3 => {
                let ops = ["+", "-", "*", "/", "^"];
                let op = ops[usize::arbitrary(g) % ops.len()];
                let left = gen_expr_string_recursive(g, depth - 1);
                let right = gen_expr_string_recursive(g, depth - 1);
                format!("({} {} {})", left, op, right)
            }
            4..=6 => {
                let fns = ["sin", "cos", "abs", "sqrt", "exp", "floor"];
                let f = fns[usize::arbitrary(g) % fns.len()];
                let arg = gen_expr_string_recursive(g, depth - 1);
                format!("{}({})", f, arg)
            }
            7 => {
                let arg = gen_expr_string_recursive(g, depth - 1);
                format!("-({})", arg)
            }
            _ => gen_expr_string_recursive(g, depth - 1),
        }
    }
}

/// Reference interpreter: direct recursion over the tree. Slow but
/// obviously correct, used as an oracle for the bytecode evaluator.
fn eval_tree(expr: &Expr, params: &[(String, f64)]) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::Symbol(name) => params
            .iter()
            .find(|(p, _)| p == name)
            .map(|(_, v)| *v)
            .unwrap_or(f64::NAN),
        Expr::Add(l, r) => eval_tree(l, params) + eval_tree(r, params),
        Expr::Sub(l, r) => eval_tree(l, params) - eval_tree(r, params),
        Expr::Mul(l, r) => eval_tree(l, params) * eval_tree(r, params),
        Expr::Div(l, r) => eval_tree(l, params) / eval_tree(r, params),
        Expr::Pow(l, r) => eval_tree(l, params).powf(eval_tree(r, params)),
        Expr::FunctionCall { name, args } => {
            let values: Vec<f64> = args.iter().map(|a| eval_tree(a, params)).collect();
            match Registry::get(name) {
                Some(def) => (def.eval)(&values),
                None => f64::NAN,
            }
        }
    }
}

/// Equality that treats NaN as equal to NaN
fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

#[test]
fn test_parser_never_panics_on_random_input() {
    fn prop_parser_no_panic(input: String) -> TestResult {
        // Succeed or Err, never panic
        let _ = parse(&input);
        TestResult::passed()
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(2000)
        .quickcheck(prop_parser_no_panic as fn(String) -> TestResult);
}

#[test]
fn test_display_reparse_is_stable() {
    fn prop_display_reparses() -> bool {
        let mut g = Gen::new(8);
        let source = random_expr_string(&mut g);
        let Ok(expr) = parse(&source) else {
            return true;
        };
        let printed = expr.to_string();
        match parse(&printed) {
            // Canonical form must be a fixed point of print
            Ok(reparsed) => reparsed.to_string() == printed,
            Err(_) => false,
        }
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop_display_reparses as fn() -> bool);
}

#[test]
fn test_compiled_matches_tree_interpreter() {
    fn prop_bytecode_oracle(x: f64, y: f64, z: f64) -> TestResult {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return TestResult::discard();
        }
        let mut g = Gen::new(8);
        let source = random_expr_string(&mut g);
        let Ok(expr) = parse(&source) else {
            return TestResult::discard();
        };
        let Ok(compiled) = CompiledFormula::compile(&expr) else {
            return TestResult::discard();
        };

        let bindings = [
            ("x".to_string(), x),
            ("y".to_string(), y),
            ("z".to_string(), z),
        ];
        let values: Vec<f64> = compiled
            .param_names()
            .iter()
            .map(|name| {
                bindings
                    .iter()
                    .find(|(p, _)| p == name)
                    .map(|(_, v)| *v)
                    .unwrap_or(f64::NAN)
            })
            .collect();

        let fast = compiled.evaluate(&values);
        let slow = eval_tree(&expr, &bindings);
        TestResult::from_bool(same_value(fast, slow))
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop_bytecode_oracle as fn(f64, f64, f64) -> TestResult);
}

#[test]
fn test_evaluation_is_pure() {
    fn prop_repeat_eval(x: f64) -> TestResult {
        if !x.is_finite() {
            return TestResult::discard();
        }
        let compiled = match parse("sin(x) + x^2 / (abs(x) + 1)")
            .and_then(|e| CompiledFormula::compile(&e))
        {
            Ok(c) => c,
            Err(_) => return TestResult::discard(),
        };
        let first = compiled.evaluate(&[x]);
        let again = compiled.evaluate(&[x]);
        TestResult::from_bool(same_value(first, again))
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop_repeat_eval as fn(f64) -> TestResult);
}

#[test]
fn test_parser_edge_cases_do_not_panic() {
    let edge_cases = [
        "",
        "   ",
        "()",
        "((()))",
        "+++",
        "---x",
        "1+",
        "+1",
        "sin()",
        "sqrt(x,y)",
        "1..2",
        "1e999999",
        "1e-999999",
        "x^y^z",
        "((((x))))",
        "1 2",
        "c0c1",
        "2x3",
        "∞",
        "π",
    ];
    for case in &edge_cases {
        let _ = parse(case);
    }
}

#[test]
fn test_deep_nesting_parses() {
    let mut expr = "x".to_string();
    for _ in 0..50 {
        expr = format!("({}+1)", expr);
    }
    assert!(parse(&expr).is_ok());
}
