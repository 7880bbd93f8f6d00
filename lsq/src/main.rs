mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use query_syntax::QueryConfig;
use std::io::Write;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    debug!("Query config: {config:?}");

    if let Some(query) = &cli.query {
        let result = config.parse(query).context("Failed to parse query")?;
        println!("{}", report::render(&config, &result, cli.json)?);
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        if stdin
            .read_line(&mut line)
            .context("Failed to read stdin")?
            == 0
        {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        } else if line == "/bye" {
            break;
        }

        match config.parse(line) {
            Ok(result) => println!("{}", report::render(&config, &result, cli.json)?),
            Err(e) => eprintln!("Failed to parse: {e}"),
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<QueryConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => QueryConfig::default(),
    };
    config.allowed_filters.extend(cli.allow.iter().cloned());
    config.default_sort.extend(cli.default_sort.iter().cloned());
    Ok(config)
}
