#![allow(dead_code)]
//! Shared helpers for `query-syntax` integration tests.

use query_syntax::*;

pub const ALLOWED: &[&str] = &["available", "tag", "progress"];

pub fn parse_ok(input: &str) -> QueryResult {
    parse_query(input, ALLOWED).unwrap()
}

pub fn parse_expr(input: &str) -> QueryExpr {
    match parse_ok(input).expr {
        Some(expr) => expr,
        None => panic!("expected an expression for {input:?}"),
    }
}

pub fn render(input: &str) -> String {
    parse_expr(input).to_string()
}

pub fn parse_err(input: &str) -> ParseError {
    parse_query(input, ALLOWED).unwrap_err()
}

pub fn as_and(expr: &QueryExpr) -> &Vec<QueryExpr> {
    match expr {
        QueryExpr::And(parts) => parts,
        other => panic!("expected And, got: {other:?}"),
    }
}

pub fn as_or(expr: &QueryExpr) -> &Vec<QueryExpr> {
    match expr {
        QueryExpr::Or(parts) => parts,
        other => panic!("expected Or, got: {other:?}"),
    }
}

pub fn value_is(expr: &QueryExpr, expected: &str) {
    match expr {
        QueryExpr::Value(value) => assert_eq!(value, expected),
        other => panic!("expected Value, got: {other:?}"),
    }
}

pub fn filter_is(expr: &QueryExpr, key: &str, value: &str) {
    match expr {
        QueryExpr::Filter(filter) => {
            assert_eq!(filter.key, key);
            assert_eq!(filter.value, value);
        }
        other => panic!("expected Filter, got: {other:?}"),
    }
}

/// Asserts the found state of every key in [`ALLOWED`].
pub fn found_exactly(result: &QueryResult, found: &[&str]) {
    for key in ALLOWED {
        assert_eq!(
            result.found_filters.is_found(key),
            found.contains(key),
            "found state of {key:?}"
        );
    }
}
