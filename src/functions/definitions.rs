//! Built-in function table
//!
//! The set follows what stat formulas actually use: the usual unary math
//! functions plus min/max/pow/clamp/lerp. All of them evaluate with plain
//! IEEE-754 semantics; out-of-domain inputs produce NaN, never an error.

use super::registry::FunctionDefinition;

fn def(
    name: &'static str,
    arity: std::ops::RangeInclusive<usize>,
    eval: fn(&[f64]) -> f64,
) -> FunctionDefinition {
    FunctionDefinition { name, arity, eval }
}

/// Maximum argument count for the variadic min/max functions
const VARIADIC_MAX: usize = 16;

pub(crate) fn all_definitions() -> Vec<FunctionDefinition> {
    vec![
        def("abs", 1..=1, |a| a[0].abs()),
        def("sign", 1..=1, |a| {
            if a[0] == 0.0 {
                0.0
            } else {
                a[0].signum()
            }
        }),
        def("sqrt", 1..=1, |a| a[0].sqrt()),
        def("cbrt", 1..=1, |a| a[0].cbrt()),
        def("sin", 1..=1, |a| a[0].sin()),
        def("cos", 1..=1, |a| a[0].cos()),
        def("tan", 1..=1, |a| a[0].tan()),
        def("asin", 1..=1, |a| a[0].asin()),
        def("acos", 1..=1, |a| a[0].acos()),
        def("atan", 1..=1, |a| a[0].atan()),
        def("atan2", 2..=2, |a| a[0].atan2(a[1])),
        def("exp", 1..=1, |a| a[0].exp()),
        def("ln", 1..=1, |a| a[0].ln()),
        def("log10", 1..=1, |a| a[0].log10()),
        def("floor", 1..=1, |a| a[0].floor()),
        def("ceil", 1..=1, |a| a[0].ceil()),
        def("round", 1..=1, |a| a[0].round()),
        def("trunc", 1..=1, |a| a[0].trunc()),
        def("pow", 2..=2, |a| a[0].powf(a[1])),
        def("min", 2..=VARIADIC_MAX, |a| {
            a.iter().copied().fold(f64::INFINITY, f64::min)
        }),
        def("max", 2..=VARIADIC_MAX, |a| {
            a.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        }),
        // clamp(value, lo, hi)
        def("clamp", 3..=3, |a| a[0].max(a[1]).min(a[2])),
        // lerp(from, to, t) - unclamped linear interpolation
        def("lerp", 3..=3, |a| a[0] + (a[1] - a[0]) * a[2]),
    ]
}
