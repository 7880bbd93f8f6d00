use crate::{ParseError, QueryResult, parse_query};
use serde::{Deserialize, Serialize};

/// Ordering used when neither the query nor the config names one.
pub const DEFAULT_ORDER_BY: &str = "created_at desc";

/// Per-endpoint query settings: which filter keys are recognized and how to
/// order results when the query has no `sort:` directive.
///
/// ```
/// use query_syntax::QueryConfig;
///
/// let config = QueryConfig::new(["tag", "progress"]).with_default_sort(["title asc"]);
///
/// let parsed = config.parse("tag:go").unwrap();
/// assert_eq!(config.order_by(&parsed), ["title asc"]);
///
/// let parsed = config.parse("tag:go sort:duration").unwrap();
/// assert_eq!(config.order_by(&parsed), ["duration"]);
///
/// let bare = QueryConfig::new(["tag"]);
/// assert_eq!(bare.order_by(&parsed), ["duration"]);
/// assert_eq!(bare.order_by(&bare.parse("tag:go").unwrap()), ["created_at desc"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub allowed_filters: Vec<String>,
    pub default_sort: Vec<String>,
}

impl QueryConfig {
    pub fn new<I, S>(allowed_filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_filters: allowed_filters.into_iter().map(Into::into).collect(),
            default_sort: Vec::new(),
        }
    }

    pub fn with_default_sort<I, S>(mut self, default_sort: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_sort = default_sort.into_iter().map(Into::into).collect();
        self
    }

    pub fn parse(&self, query: &str) -> Result<QueryResult, ParseError> {
        parse_query(query, self.allowed_filters.as_slice())
    }

    /// The query's own sort directives, else `default_sort`, else
    /// [`DEFAULT_ORDER_BY`].
    pub fn order_by<'r>(&'r self, result: &'r QueryResult) -> Vec<&'r str> {
        let sort = if result.sort.is_empty() {
            &self.default_sort
        } else {
            &result.sort
        };
        if sort.is_empty() {
            return vec![DEFAULT_ORDER_BY];
        }
        sort.iter().map(String::as_str).collect()
    }
}
