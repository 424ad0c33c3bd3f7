use std::fmt;

/// Source location span for error reporting
/// Represents a range of characters in the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (0-indexed byte offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed byte offset)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single position
    pub fn at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Check if this span has valid location info
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Format the span for display (1-indexed for users)
    pub fn display(&self) -> String {
        if !self.is_valid() {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

/// Errors that can occur while parsing, compiling, or evaluating a formula
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaError {
    // Input validation errors
    EmptyFormula,

    // Parsing errors
    InvalidNumber {
        value: String,
        span: Option<Span>,
    },
    InvalidToken {
        token: String,
        span: Option<Span>,
    },
    UnexpectedToken {
        expected: String,
        got: String,
        span: Option<Span>,
    },
    UnexpectedEndOfInput,

    // Semantic errors
    UnknownFunction {
        name: String,
        span: Option<Span>,
    },
    WrongArity {
        name: String,
        min: usize,
        max: usize,
        got: usize,
    },

    // Evaluation errors
    NotParsed,
    UnboundVariable {
        name: String,
    },
    TooManyConstants {
        count: usize,
    },
}

impl FormulaError {
    /// Create InvalidNumber with span
    pub fn invalid_number(value: impl Into<String>, span: Span) -> Self {
        FormulaError::InvalidNumber {
            value: value.into(),
            span: Some(span),
        }
    }

    /// Create InvalidToken with span
    pub fn invalid_token(token: impl Into<String>, span: Span) -> Self {
        FormulaError::InvalidToken {
            token: token.into(),
            span: Some(span),
        }
    }

    /// Create UnexpectedToken with span
    pub fn unexpected_token(
        expected: impl Into<String>,
        got: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        FormulaError::UnexpectedToken {
            expected: expected.into(),
            got: got.into(),
            span,
        }
    }

    /// Whether this error originated in the parsing stage (as opposed to
    /// evaluation-time errors like `UnboundVariable`)
    pub fn is_parse_error(&self) -> bool {
        !matches!(
            self,
            FormulaError::NotParsed
                | FormulaError::UnboundVariable { .. }
                | FormulaError::TooManyConstants { .. }
        )
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::EmptyFormula => write!(f, "Formula cannot be empty"),
            FormulaError::InvalidNumber { value, span } => {
                write!(
                    f,
                    "Invalid number format: '{}'{}",
                    value,
                    span.map_or(String::new(), |s| s.display())
                )
            }
            FormulaError::InvalidToken { token, span } => {
                write!(
                    f,
                    "Invalid token: '{}'{}",
                    token,
                    span.map_or(String::new(), |s| s.display())
                )
            }
            FormulaError::UnexpectedToken {
                expected,
                got,
                span,
            } => {
                write!(
                    f,
                    "Expected '{}', but got '{}'{}",
                    expected,
                    got,
                    span.map_or(String::new(), |s| s.display())
                )
            }
            FormulaError::UnexpectedEndOfInput => write!(f, "Unexpected end of input"),
            FormulaError::UnknownFunction { name, span } => {
                write!(
                    f,
                    "Unknown function '{}'{}",
                    name,
                    span.map_or(String::new(), |s| s.display())
                )
            }
            FormulaError::WrongArity {
                name,
                min,
                max,
                got,
            } => {
                if min == max {
                    write!(
                        f,
                        "Function '{}' expects {} argument(s), but got {}",
                        name, min, got
                    )
                } else {
                    write!(
                        f,
                        "Function '{}' expects {} to {} arguments, but got {}",
                        name, min, max, got
                    )
                }
            }
            FormulaError::NotParsed => {
                write!(f, "Formula has not been parsed yet; call parse() first")
            }
            FormulaError::UnboundVariable { name } => {
                write!(f, "No value bound for variable '{}'", name)
            }
            FormulaError::TooManyConstants { count } => {
                write!(
                    f,
                    "At most 10 constants (c0..c9) are supported, but got {}",
                    count
                )
            }
        }
    }
}

impl std::error::Error for FormulaError {}

/// Warning-level conditions that do not stop parsing or evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A user-chosen variable name shadows a built-in function or a
    /// constant slot name. Evaluation proceeds, but the binding may not
    /// do what the author intended.
    ReservedNameCollision { name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ReservedNameCollision { name } => {
                write!(f, "Variable name '{}' is a reserved keyword", name)
            }
        }
    }
}
