mod common;
use common::*;
use query_syntax::*;

#[test]
fn empty_query() {
    let result = parse_ok("");
    assert!(result.expr.is_none());
    assert!(result.sort.is_empty());
    found_exactly(&result, &[]);
}

#[test]
fn missing_filter_value_is_dropped() {
    let result = parse_ok("course 1 AND progress: OR progress:started");
    assert_eq!(
        result.expr.as_ref().unwrap().to_string(),
        "(course 1 OR progress:started)"
    );
    assert!(result.sort.is_empty());
    found_exactly(&result, &["progress"]);
}

#[test]
fn repeated_operators_and_empty_phrases() {
    let result = parse_ok(r#"AND "" OR "   " AND AND course 1 OR OR course 2"#);
    assert_eq!(
        result.expr.as_ref().unwrap().to_string(),
        "(course 1 OR course 2)"
    );
    found_exactly(&result, &[]);
}

#[test]
fn operators_inside_words_are_case_sensitive() {
    assert_eq!(
        render(r#"course 1 or "course 2" CANDY OR BORE"#),
        "((course 1 or AND course 2 AND CANDY) OR BORE)"
    );
}

#[test]
fn unbalanced_quote_runs_to_the_end() {
    let result = parse_ok(r#""course 1 AND course 2"#);
    value_is(result.expr.as_ref().unwrap(), "course 1 AND course 2");
    found_exactly(&result, &[]);
}

#[test]
fn unbalanced_parenthesis_fails() {
    let err = parse_err("(course 1 AND course 2");
    assert_eq!(err, ParseError::UnclosedGroup);
    assert_eq!(err.to_string(), "expected ')'");
}

#[test]
fn nested_unbalanced_parenthesis_fails() {
    assert_eq!(parse_err("(a OR (b AND c)"), ParseError::UnclosedGroup);
}

#[test]
fn dangling_operator_inside_group_fails() {
    assert_eq!(parse_err("(course 1 AND)"), ParseError::UnclosedGroup);
    assert_eq!(parse_err("tag:go OR ()"), ParseError::UnclosedGroup);
}

#[test]
fn leading_close_paren_is_free_text() {
    let result = parse_ok(") course 1");
    value_is(result.expr.as_ref().unwrap(), ") course 1");
    assert_eq!(result.free_text, [") course 1"]);

    let result = parse_ok(") tag:go");
    let parts = as_and(result.expr.as_ref().unwrap());
    value_is(&parts[0], ")");
    filter_is(&parts[1], "tag", "go");
    found_exactly(&result, &["tag"]);
}

#[test]
fn stray_close_paren_ends_the_query() {
    value_is(&parse_expr("course 1 ) course 2"), "course 1");
}

#[test]
fn quoted_or_still_splits_operands() {
    assert_eq!(render(r#"course 1 "OR" course 2"#), "(course 1 OR course 2)");
}

#[test]
fn and_binds_tighter_than_or() {
    assert_eq!(
        render("course 1 AND course 2 OR course 3"),
        "((course 1 AND course 2) OR course 3)"
    );
    assert_eq!(
        render(r#"course 1 OR course 2 AND "course 3" OR course 4 "course 5""#),
        "((course 1 OR (course 2 AND course 3)) OR (course 4 AND course 5))"
    );
}

#[test]
fn implicit_and_matches_explicit_and() {
    let implicit = parse_expr(r#""course 1" "course 2""#);
    let explicit = parse_expr(r#""course 1" AND "course 2""#);
    assert_eq!(implicit, explicit);
    assert_eq!(
        render("tag:go progress:started"),
        render("tag:go AND progress:started")
    );
    assert_eq!(
        render("(course 1) (course 2)"),
        render("course 1 AND course 2")
    );
}

#[test]
fn free_text_mixed_with_filters() {
    let result = parse_ok(r#"course 1 AND course 2 OR "course 3" OR available:true"#);
    assert_eq!(
        result.expr.as_ref().unwrap().to_string(),
        "(((course 1 AND course 2) OR course 3) OR available:true)"
    );
    found_exactly(&result, &["available"]);
}

#[test]
fn pretend_filters_are_free_text() {
    let result = parse_ok(r#"course:1 AND tag:a OR "course: a b""#);
    let expr = result.expr.as_ref().unwrap();
    assert_eq!(expr.to_string(), "((course:1 AND tag:a) OR course: a b)");

    let or = as_or(expr);
    let and = as_and(&or[0]);
    value_is(&and[0], "course:1");
    filter_is(&and[1], "tag", "a");
    value_is(&or[1], "course: a b");
    found_exactly(&result, &["tag"]);
}

#[test]
fn empty_phrases_vanish() {
    let result = parse_ok(r#""" AND "   " OR tag:1"#);
    filter_is(result.expr.as_ref().unwrap(), "tag", "1");
    found_exactly(&result, &["tag"]);
}

#[test]
fn only_filters() {
    let result = parse_ok("available:true AND tag:go OR progress:completed");
    assert_eq!(
        result.expr.as_ref().unwrap().to_string(),
        "((available:true AND tag:go) OR progress:completed)"
    );
    found_exactly(&result, &["available", "tag", "progress"]);
}

#[test]
fn nested_parentheses_round_trip() {
    let query =
        "(course 1 AND (progress:started OR progress:completed)) OR (course 2 AND progress:completed)";
    let result = parse_ok(query);
    assert_eq!(
        result.expr.as_ref().unwrap().to_string(),
        "((course 1 AND (progress:started OR progress:completed)) OR (course 2 AND progress:completed))"
    );
    assert!(result.sort.is_empty());
    found_exactly(&result, &["progress"]);
}

#[test]
fn redundant_parentheses_collapse() {
    let expr = parse_expr("((( course 1 )))");
    value_is(&expr, "course 1");
}

#[test]
fn quoted_operators_and_colons_are_one_value() {
    let result = parse_ok(r#""AND OR :x""#);
    value_is(result.expr.as_ref().unwrap(), "AND OR :x");
    found_exactly(&result, &[]);
}

#[test]
fn quoted_phrase_is_trimmed() {
    value_is(&parse_expr(r#""   spaced out  ""#), "spaced out");
}

#[test]
fn free_text_is_collected() {
    let result = parse_ok(r#"intro rust tag:go OR "advanced topics""#);
    assert_eq!(result.free_text, ["intro rust", "advanced topics"]);
}

#[test]
fn parser_keeps_no_state_between_calls() {
    let first = parse_ok("tag:go");
    let second = parse_ok("course");
    assert!(first.found_filters.is_found("tag"));
    found_exactly(&second, &[]);
}
