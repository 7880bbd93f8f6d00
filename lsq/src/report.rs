use anyhow::Result;
use query_syntax::{QueryConfig, QueryResult};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a QueryResult,
    order_by: Vec<&'a str>,
}

pub fn render(config: &QueryConfig, result: &QueryResult, json: bool) -> Result<String> {
    let order_by = config.order_by(result);
    if json {
        return Ok(serde_json::to_string_pretty(&JsonReport { result, order_by })?);
    }

    let expr = result
        .expr
        .as_ref()
        .map_or_else(|| "(none)".to_string(), ToString::to_string);
    let filters = result
        .found_filters
        .iter()
        .map(|(key, found)| format!("{key}={found}"))
        .collect::<Vec<_>>()
        .join(" ");

    Ok(format!(
        "expr: {expr}\nsort: {}\nfilters: {filters}\nfree text: {}",
        order_by.join(", "),
        result.free_text.join(" | "),
    ))
}
