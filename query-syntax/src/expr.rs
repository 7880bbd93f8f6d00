use serde::Serialize;
use std::fmt;

/// Boolean expression produced by [`parse_query`](crate::parse_query).
///
/// `And`/`Or` always hold at least two children: a group with a single
/// operand is returned as that operand. Rendering with [`Display`](fmt::Display)
/// wraps every conjunction and disjunction in parentheses, so the output
/// spells out the precedence the parser applied.
///
/// ```
/// use query_syntax::{parse_query, QueryExpr};
///
/// let parsed = parse_query("course 1 AND course 2 OR course 3", &["tag"]).unwrap();
/// let expr = parsed.expr.unwrap();
/// assert!(matches!(&expr, QueryExpr::Or(children) if children.len() == 2));
/// assert_eq!(expr.to_string(), "((course 1 AND course 2) OR course 3)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryExpr {
    /// Free text, matched against whatever column the caller searches.
    Value(String),
    /// An allow-listed `key:value` filter.
    Filter(Filter),
    And(Vec<QueryExpr>),
    Or(Vec<QueryExpr>),
}

/// A `key:value` pair whose key appeared in the caller's allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub key: String,
    pub value: String,
}

impl Filter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExpr::Value(value) => f.write_str(value),
            QueryExpr::Filter(filter) => fmt::Display::fmt(filter, f),
            QueryExpr::And(children) => write_group(f, children, " AND "),
            QueryExpr::Or(children) => write_group(f, children, " OR "),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, children: &[QueryExpr], sep: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        fmt::Display::fmt(child, f)?;
    }
    f.write_str(")")
}

impl QueryExpr {
    pub fn value(value: impl Into<String>) -> Self {
        QueryExpr::Value(value.into())
    }

    pub fn filter(key: impl Into<String>, value: impl Into<String>) -> Self {
        QueryExpr::Filter(Filter::new(key, value))
    }

    pub fn as_filter(&self) -> Option<&Filter> {
        match self {
            QueryExpr::Filter(filter) => Some(filter),
            _ => None,
        }
    }

    /// `true` when this node is a filter on `key`.
    pub fn is_filter_with_key(&self, key: &str) -> bool {
        self.as_filter().is_some_and(|filter| filter.key == key)
    }

    /// Operands of a conjunction or disjunction; empty for leaves.
    pub fn children(&self) -> &[QueryExpr] {
        match self {
            QueryExpr::And(children) | QueryExpr::Or(children) => children,
            QueryExpr::Value(_) | QueryExpr::Filter(_) => &[],
        }
    }

    /// Leaf nodes (values and filters) in left-to-right order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    pub fn filters(&self) -> impl Iterator<Item = &Filter> {
        self.leaves().filter_map(QueryExpr::as_filter)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.leaves().filter_map(|leaf| match leaf {
            QueryExpr::Value(value) => Some(value.as_str()),
            _ => None,
        })
    }
}

/// Depth-first iterator over the leaves of a [`QueryExpr`].
pub struct Leaves<'e> {
    stack: Vec<&'e QueryExpr>,
}

impl<'e> Iterator for Leaves<'e> {
    type Item = &'e QueryExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = self.stack.pop()?;
            match expr {
                QueryExpr::And(children) | QueryExpr::Or(children) => {
                    self.stack.extend(children.iter().rev());
                }
                leaf => return Some(leaf),
            }
        }
    }
}

/// Tests whether `expr` is a filter on `key`.
pub fn is_filter_with_key(expr: &QueryExpr, key: &str) -> bool {
    expr.is_filter_with_key(key)
}

/// Splits the operands of a conjunction into the values of `key` filters and
/// everything else.
///
/// Predicate builders use this to fold several filters on the same key (tags,
/// typically) into a single subquery while composing the rest one by one.
///
/// ```
/// use query_syntax::{parse_query, split_filters};
///
/// let parsed = parse_query("tag:go intro tag:rust", &["tag"]).unwrap();
/// let expr = parsed.expr.unwrap();
/// let (tags, rest) = split_filters(expr.children(), "tag");
/// assert_eq!(tags, ["go", "rust"]);
/// assert_eq!(rest.len(), 1);
/// assert_eq!(rest[0].to_string(), "intro");
/// ```
pub fn split_filters<'e>(children: &'e [QueryExpr], key: &str) -> (Vec<&'e str>, Vec<&'e QueryExpr>) {
    let mut values = Vec::new();
    let mut rest = Vec::new();
    for child in children {
        match child.as_filter() {
            Some(filter) if filter.key == key => values.push(filter.value.as_str()),
            _ => rest.push(child),
        }
    }
    (values, rest)
}
