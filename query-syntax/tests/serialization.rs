mod common;
use common::*;
use serde_json::json;

#[test]
fn result_serializes_with_tagged_expressions() {
    let result = parse_ok(r#"intro tag:go OR progress:"not started" sort:title"#);
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({
            "expr": {
                "or": [
                    { "and": [
                        { "value": "intro" },
                        { "filter": { "key": "tag", "value": "go" } }
                    ]},
                    { "filter": { "key": "progress", "value": "not started" } }
                ]
            },
            "sort": ["title"],
            "free_text": ["intro"],
            "found_filters": { "available": false, "progress": true, "tag": true }
        })
    );
}

#[test]
fn empty_result_serializes_null_expression() {
    let value = serde_json::to_value(parse_ok("")).unwrap();
    assert_eq!(value["expr"], serde_json::Value::Null);
    assert_eq!(value["sort"], json!([]));
}
