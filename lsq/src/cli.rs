use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(about = "Compile search queries and show how they are understood")]
pub struct Cli {
    /// Filter key to recognize (repeatable). Extends `allowed_filters` from --config.
    #[clap(long = "allow", value_name = "KEY")]
    pub allow: Vec<String>,
    /// Ordering used when the query has no `sort:` directive (repeatable).
    #[clap(long = "default-sort", value_name = "DIRECTIVE")]
    pub default_sort: Vec<String>,
    /// JSON file deserialized into a query config.
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Print results as JSON.
    #[clap(long, default_value = "false")]
    pub json: bool,
    /// Query to compile. Without it, queries are read interactively.
    pub query: Option<String>,
}
