// Display formatting for the AST; this is the canonical re-printed form
// exposed as Formula::parsed_expression.
use crate::Expr;
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else if n.fract() == 0.0 && n.abs() < 1e10 {
                    // Display as integer if no fractional part
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }

            Expr::Symbol(s) => write!(f, "{}", s),

            Expr::FunctionCall { name, args } => {
                if args.is_empty() {
                    write!(f, "{}()", name)
                } else {
                    let args_str: Vec<String> = args.iter().map(|arg| format!("{}", arg)).collect();
                    write!(f, "{}({})", name, args_str.join(", "))
                }
            }

            Expr::Add(u, v) => {
                // Check if v is a negated term (Mul with -1) to display as subtraction
                if let Expr::Mul(left, right) = &**v {
                    if let Expr::Number(n) = **left {
                        if n == -1.0 {
                            let inner_str = format_mul_operand(right);
                            write!(f, "{} - {}", u, inner_str)
                        } else {
                            write!(f, "{} + {}", u, v)
                        }
                    } else {
                        write!(f, "{} + {}", u, v)
                    }
                } else {
                    write!(f, "{} + {}", u, v)
                }
            }

            Expr::Sub(u, v) => {
                // Parenthesize RHS when it's an addition or subtraction to preserve
                // the intended grouping: `a - (b + c)` instead of `a - b + c`.
                let right_str = match &**v {
                    Expr::Add(_, _) | Expr::Sub(_, _) => format!("({})", v),
                    _ => format!("{}", v),
                };
                write!(f, "{} - {}", u, right_str)
            }

            Expr::Mul(u, v) => {
                if let Expr::Number(n) = **u {
                    if n == -1.0 {
                        write!(f, "-{}", format_mul_operand(v))
                    } else {
                        write!(f, "{} * {}", format_mul_operand(u), format_mul_operand(v))
                    }
                } else {
                    write!(f, "{} * {}", format_mul_operand(u), format_mul_operand(v))
                }
            }

            Expr::Div(u, v) => {
                let num_str = format!("{}", u);
                let denom_str = format!("{}", v);
                // Parenthesize the numerator if it's addition or subtraction
                let formatted_num = match **u {
                    Expr::Add(_, _) | Expr::Sub(_, _) => format!("({})", num_str),
                    _ => num_str,
                };
                // Parenthesize the denominator unless it's a simple identifier,
                // number, power, or function call
                let formatted_denom = match **v {
                    Expr::Symbol(_)
                    | Expr::Number(_)
                    | Expr::Pow(_, _)
                    | Expr::FunctionCall { .. } => denom_str,
                    _ => format!("({})", denom_str),
                };
                write!(f, "{} / {}", formatted_num, formatted_denom)
            }

            Expr::Pow(u, v) => {
                let base_str = format!("{}", u);
                let exp_str = format!("{}", v);

                // Lower-precedence bases need parens: (a * b)^2, not a * b^2.
                // A power base does too, since ^ is right-associative and
                // (x^y)^z would otherwise re-read as x^(y^z).
                let formatted_base = match **u {
                    Expr::Add(_, _)
                    | Expr::Sub(_, _)
                    | Expr::Mul(_, _)
                    | Expr::Div(_, _)
                    | Expr::Pow(_, _) => format!("({})", base_str),
                    _ => base_str,
                };

                let formatted_exp = match **v {
                    Expr::Number(_) | Expr::Symbol(_) => exp_str,
                    _ => format!("({})", exp_str),
                };

                write!(f, "{}^{}", formatted_base, formatted_exp)
            }
        }
    }
}

/// Format operand for multiplication to minimize parentheses
fn format_mul_operand(expr: &Expr) -> String {
    match expr {
        Expr::Add(_, _) | Expr::Sub(_, _) => format!("({})", expr),
        _ => format!("{}", expr),
    }
}
