//! # Search query syntax for list endpoints
//!
//! `query-syntax` compiles the free-form `q` string that list endpoints accept
//! into three things:
//!
//! - a boolean [`QueryExpr`] over free text and allow-listed `key:value`
//!   filters,
//! - the ordered `sort:` directives,
//! - which allow-listed filter keys the query actually used, so callers only
//!   pay for joins they need.
//!
//! The grammar is small: whitespace-separated words, `"quoted phrases"`,
//! `AND`/`OR` (adjacency means `AND`, which binds tighter than `OR`),
//! parentheses for grouping, and `key:value` pairs. A `key:` immediately
//! followed by a quoted phrase takes the phrase as its value, which is how
//! values with spaces are written.
//!
//! ## Example
//! ```
//! use query_syntax::{parse_query, QueryExpr};
//!
//! let parsed = parse_query(
//!     r#"intro tag:"web dev" OR progress:completed sort:"title asc""#,
//!     &["tag", "progress", "available"],
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     parsed.expr.as_ref().unwrap().to_string(),
//!     "((intro AND tag:web dev) OR progress:completed)"
//! );
//! assert_eq!(parsed.sort, ["title asc"]);
//! assert!(parsed.found_filters.is_found("tag"));
//! assert!(!parsed.found_filters.is_found("available"));
//! ```
//!
//! Anything malformed degrades rather than failing: stray operators and
//! empty values are skipped, unknown `key:value` pairs are searched as plain
//! text, and an unterminated quote runs to the end of the input. Only an
//! unclosed `(` ([`ParseError::UnclosedGroup`]) and nesting past
//! [`MAX_GROUP_DEPTH`] ([`ParseError::TooDeep`]) are reported.

mod config;
mod expr;
mod lexer;
mod parser;
mod sort;

pub use config::{DEFAULT_ORDER_BY, QueryConfig};
pub use expr::{Filter, Leaves, QueryExpr, is_filter_with_key, split_filters};
pub use lexer::{Token, tokenize};
pub use sort::extract_sort;

use parser::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Deepest parenthesized nesting [`parse_query`] accepts. Anything deeper
/// fails with [`ParseError::TooDeep`] instead of exhausting the stack.
pub const MAX_GROUP_DEPTH: usize = 128;

/// Compiles `query`, recognizing filters only for keys in `allowed_filters`.
///
/// Returns `Ok` with `expr == None` when the query has no boolean content
/// (empty, or nothing but `sort:` directives).
pub fn parse_query<S: AsRef<str>>(
    query: &str,
    allowed_filters: &[S],
) -> Result<QueryResult, ParseError> {
    let tokens = tokenize(query);
    let (remaining, sort) = extract_sort(&tokens);
    debug!(
        "Query tokenized: {} tokens, sort directives: {:?}",
        tokens.len(),
        sort
    );

    let mut parser = Parser::new(&remaining, FoundFilters::seeded(allowed_filters));
    let expr = parser.parse_or().inspect_err(|e| {
        debug!("Failed to parse query {query:?}: {e}");
    })?;
    let found_filters = parser.into_found();

    let free_text = expr
        .as_ref()
        .map(|expr| expr.values().map(str::to_owned).collect())
        .unwrap_or_default();

    if let Some(expr) = &expr {
        debug!("Query compiled: {expr}");
    }

    Ok(QueryResult {
        expr,
        sort,
        free_text,
        found_filters,
    })
}

/// Everything a list endpoint needs from a compiled query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub expr: Option<QueryExpr>,
    /// Raw `sort:` values such as `created_at desc`, in query order.
    pub sort: Vec<String>,
    /// Free-text leaves of `expr`, left to right.
    pub free_text: Vec<String>,
    pub found_filters: FoundFilters,
}

impl QueryResult {
    /// `true` when the query carried no boolean content.
    pub fn is_empty(&self) -> bool {
        self.expr.is_none()
    }
}

/// Allow-listed filter keys and whether the query used each one.
///
/// Every allowed key starts out `false` and only turns `true` when the key is
/// used as a filter. `tag:x` typed for a key that is not allowed never shows
/// up here. Lookups are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FoundFilters(BTreeMap<String, bool>);

impl FoundFilters {
    pub fn seeded<S: AsRef<str>>(allowed: &[S]) -> Self {
        Self(
            allowed
                .iter()
                .map(|key| (key.as_ref().to_string(), false))
                .collect(),
        )
    }

    pub fn is_allowed(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_found(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    /// `None` for keys outside the allow-list.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    pub(crate) fn mark_found(&mut self, key: &str) {
        if let Some(found) = self.0.get_mut(key) {
            *found = true;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(key, found)| (key.as_str(), *found))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A `(` was never closed.
    #[error("expected ')'")]
    UnclosedGroup,
    /// Groups were nested more than `limit` levels deep.
    #[error("groups nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}
