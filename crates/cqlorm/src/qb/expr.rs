//! Predicates and ordering.

use crate::value::CqlValue;
use std::fmt;

/// Comparison operator of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// The bound value is a list; the session expands it.
    In,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::In => "IN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Quote a column identifier.
pub(crate) fn quote(column: &str) -> String {
    format!("\"{column}\"")
}

/// A single `column operator ?` comparison with its bound value.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    column: String,
    operator: Operator,
    value: CqlValue,
}

impl Argument {
    pub fn new(column: impl Into<String>, operator: Operator, value: CqlValue) -> Self {
        Self {
            column: column.into(),
            operator,
            value,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &CqlValue {
        &self.value
    }

    pub fn into_value(self) -> CqlValue {
        self.value
    }

    /// `"column" op ?`. The value is always bound, never inlined.
    pub fn render_predicate(&self) -> String {
        format!("{} {} ?", quote(&self.column), self.operator)
    }

    /// `"column"`.
    pub fn render_column(&self) -> String {
        quote(&self.column)
    }
}
