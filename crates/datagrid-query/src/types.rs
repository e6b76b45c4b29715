use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Leading marker that flips a field to descending order.
pub const DESCENDING_MARKER: char = '-';

/// One record as returned by a source, keyed by field name
pub type DataRow = HashMap<String, Value>;

/// Sort direction for an order key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A single `ORDER BY` term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderKey {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse a field name that may carry the descending marker (`-age`).
    pub fn parse(spec: &str) -> Self {
        match spec.strip_prefix(DESCENDING_MARKER) {
            Some(field) => Self::desc(field),
            None => Self::asc(spec),
        }
    }
}

/// Renders back in marker form, e.g. `-age`.
impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field),
            SortDirection::Desc => write!(f, "{}{}", DESCENDING_MARKER, self.field),
        }
    }
}

/// Comparison applied by a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Case-insensitive substring containment over the textual value
    IContains,
}

/// Composable filter expression understood by every `GridSource`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterExpr {
    Predicate {
        field: String,
        op: Operator,
        value: String,
    },
    /// Disjunction. Matches nothing when empty.
    Any { exprs: Vec<FilterExpr> },
    /// Conjunction. Matches everything when empty.
    All { exprs: Vec<FilterExpr> },
}

/// Build a single `(field, operator, value)` predicate.
pub fn predicate(field: impl Into<String>, op: Operator, value: impl Into<String>) -> FilterExpr {
    FilterExpr::Predicate {
        field: field.into(),
        op,
        value: value.into(),
    }
}

impl FilterExpr {
    pub fn any(exprs: impl IntoIterator<Item = FilterExpr>) -> Self {
        FilterExpr::Any {
            exprs: exprs.into_iter().collect(),
        }
    }

    pub fn all(exprs: impl IntoIterator<Item = FilterExpr>) -> Self {
        FilterExpr::All {
            exprs: exprs.into_iter().collect(),
        }
    }

    /// Every field name referenced by this expression, in visiting order.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            FilterExpr::Predicate { field, .. } => out.push(field.as_str()),
            FilterExpr::Any { exprs } | FilterExpr::All { exprs } => {
                for expr in exprs {
                    expr.collect_fields(out);
                }
            }
        }
    }

    /// Evaluate against an in-process row. A missing field never matches.
    pub fn matches(&self, row: &DataRow) -> bool {
        match self {
            FilterExpr::Predicate { field, op, value } => match row.get(field) {
                Some(cell) => match op {
                    Operator::IContains => display_value(cell)
                        .to_lowercase()
                        .contains(&value.to_lowercase()),
                },
                None => false,
            },
            FilterExpr::Any { exprs } => exprs.iter().any(|expr| expr.matches(row)),
            FilterExpr::All { exprs } => exprs.iter().all(|expr| expr.matches(row)),
        }
    }
}

/// Ordering and filters accumulated for one request.
///
/// Filters are AND-ed together; order keys apply in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridQuery {
    pub order: Vec<OrderKey>,
    pub filters: Vec<FilterExpr>,
}

impl GridQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, keys: impl IntoIterator<Item = OrderKey>) -> Self {
        self.order.extend(keys);
        self
    }

    pub fn filter(mut self, expr: FilterExpr) -> Self {
        self.filters.push(expr);
        self
    }

    pub fn is_filtered(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Same ordering, no filters.
    pub fn unfiltered(&self) -> Self {
        Self {
            order: self.order.clone(),
            filters: Vec::new(),
        }
    }

    pub fn matches(&self, row: &DataRow) -> bool {
        self.filters.iter().all(|expr| expr.matches(row))
    }
}

/// Textual form of a cell as shown in the grid.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
