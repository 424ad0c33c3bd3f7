//! Abstract syntax tree for formula expressions

use std::sync::Arc;

/// Parsed formula expression tree
///
/// Binary nodes share children via `Arc` so clones of a compiled formula's
/// source tree are cheap.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant number (e.g., 3.14, 1e10)
    Number(f64),

    /// Named variable or constant slot (e.g., "base", "armor", "c0")
    Symbol(String),

    /// Built-in function call
    FunctionCall { name: String, args: Vec<Expr> },

    /// Addition
    Add(Arc<Expr>, Arc<Expr>),

    /// Subtraction
    Sub(Arc<Expr>, Arc<Expr>),

    /// Multiplication
    Mul(Arc<Expr>, Arc<Expr>),

    /// Division
    Div(Arc<Expr>, Arc<Expr>),

    /// Exponentiation
    Pow(Arc<Expr>, Arc<Expr>),
}

impl Expr {
    // Convenience constructors

    /// Create a number expression
    pub fn number(n: f64) -> Self {
        Expr::Number(n)
    }

    /// Create a symbol expression
    pub fn symbol(s: impl Into<String>) -> Self {
        Expr::Symbol(s.into())
    }

    /// Create an addition expression
    pub fn add_expr(left: Expr, right: Expr) -> Self {
        Expr::Add(Arc::new(left), Arc::new(right))
    }

    /// Create a subtraction expression
    pub fn sub_expr(left: Expr, right: Expr) -> Self {
        Expr::Sub(Arc::new(left), Arc::new(right))
    }

    /// Create a multiplication expression
    pub fn mul_expr(left: Expr, right: Expr) -> Self {
        Expr::Mul(Arc::new(left), Arc::new(right))
    }

    /// Create a division expression
    pub fn div_expr(left: Expr, right: Expr) -> Self {
        Expr::Div(Arc::new(left), Arc::new(right))
    }

    /// Create a power expression
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Expr::Pow(Arc::new(base), Arc::new(exponent))
    }

    /// Create a function call expression
    pub fn func(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::FunctionCall {
            name: name.into(),
            args,
        }
    }

    /// Check if expression is a constant number and return its value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Count the total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Symbol(_) => 1,
            Expr::FunctionCall { args, .. } => {
                1 + args.iter().map(|a| a.node_count()).sum::<usize>()
            }
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => 1 + l.node_count() + r.node_count(),
        }
    }

    /// Collect the distinct symbol names of this expression, in the order
    /// they are first encountered in a left-to-right (in-order) walk.
    ///
    /// For an infix source string this matches the order in which the
    /// variables first appear in the text, which is the parameter order the
    /// evaluator exposes to callers.
    pub fn symbols_in_order(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut Vec<String>) {
        match self {
            Expr::Number(_) => {}
            Expr::Symbol(s) => {
                if !out.iter().any(|existing| existing == s) {
                    out.push(s.clone());
                }
            }
            Expr::FunctionCall { args, .. } => {
                for arg in args {
                    arg.collect_symbols(out);
                }
            }
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => {
                l.collect_symbols(out);
                r.collect_symbols(out);
            }
        }
    }

    /// Check if the expression contains a specific symbol
    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Symbol(s) => s == name,
            Expr::FunctionCall { args, .. } => args.iter().any(|a| a.contains_symbol(name)),
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => l.contains_symbol(name) || r.contains_symbol(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let num = Expr::number(3.5);
        assert_eq!(num.as_number(), Some(3.5));

        let sym = Expr::symbol("base");
        assert_eq!(sym, Expr::Symbol("base".to_string()));

        let add = Expr::add_expr(Expr::number(1.0), Expr::number(2.0));
        assert!(matches!(add, Expr::Add(_, _)));
    }

    #[test]
    fn test_node_count() {
        let x = Expr::symbol("x");
        assert_eq!(x.node_count(), 1);

        let x_plus_1 = Expr::add_expr(Expr::symbol("x"), Expr::number(1.0));
        assert_eq!(x_plus_1.node_count(), 3); // Add + x + 1

        let call = Expr::func("max", vec![Expr::symbol("a"), Expr::symbol("b")]);
        assert_eq!(call.node_count(), 3);
    }

    #[test]
    fn test_symbols_in_order() {
        // base * multiplier - base
        let expr = Expr::sub_expr(
            Expr::mul_expr(Expr::symbol("base"), Expr::symbol("multiplier")),
            Expr::symbol("base"),
        );
        assert_eq!(expr.symbols_in_order(), vec!["base", "multiplier"]);
    }

    #[test]
    fn test_contains_symbol() {
        let expr = Expr::add_expr(
            Expr::mul_expr(Expr::symbol("x"), Expr::symbol("y")),
            Expr::number(1.0),
        );
        assert!(expr.contains_symbol("x"));
        assert!(expr.contains_symbol("y"));
        assert!(!expr.contains_symbol("z"));
    }
}
