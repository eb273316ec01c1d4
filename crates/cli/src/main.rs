mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use filterkit_core::{
    load_config, registry, validate_config, EngineConfig, FilterParam, ParsedFilter,
};

use cli::{Cli, Commands};

#[derive(Serialize)]
struct ListEntry {
    name: &'static str,
    description: &'static str,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => read_config(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::List { json } => list(json),
        Commands::Describe { filter, json } => describe(&filter, json),
        Commands::Render { filter, args } => render(&filter, &args, config),
        Commands::Check { filter, json } => check(&filter, json, config),
    }
}

fn read_config(path: &Path) -> Result<EngineConfig> {
    debug!("Loading configuration from {:?}", path);
    let config = load_config(path)
        .with_context(|| format!("Failed to load config from {:?}", path))?;
    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

fn list(json: bool) -> Result<()> {
    let entries = registry::names()
        .map(registry::lookup)
        .map(|spec| {
            spec.map(|spec| ListEntry {
                name: spec.name,
                description: spec.description,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in entries {
            println!("{:<12} {}", entry.name, entry.description);
        }
    }
    Ok(())
}

fn describe(filter: &str, json: bool) -> Result<()> {
    let summary = registry::lookup(filter)?.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} - {}", summary.name, summary.description);
    for option in &summary.options {
        let mut notes = Vec::new();
        if option.required {
            notes.push("required".to_string());
        }
        if option.positional {
            notes.push("positional".to_string());
        }
        if !option.conflicts_with.is_empty() {
            notes.push(format!("excludes {}", option.conflicts_with.join(", ")));
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" [{}]", notes.join("; "))
        };
        println!("  {:<28} {}{}", option.name, option.kind, notes);
        if !option.description.is_empty() {
            println!("  {:<28} {}", "", option.description);
        }
    }
    Ok(())
}

fn render(filter: &str, args: &[String], config: EngineConfig) -> Result<()> {
    let params = args
        .iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) => FilterParam {
                key: Some(key.to_string()),
                value: value.to_string(),
            },
            None => FilterParam {
                key: None,
                value: arg.clone(),
            },
        })
        .collect();
    let parsed = ParsedFilter {
        name: filter.to_string(),
        params,
    };

    debug!(filter, args = args.len(), "rendering from command line");
    let rendered = parsed
        .to_builder_with_config(config)
        .and_then(|builder| builder.render())
        .with_context(|| format!("Failed to render '{filter}'"))?;
    println!("{rendered}");
    Ok(())
}

fn check(input: &str, json: bool, config: EngineConfig) -> Result<()> {
    let parsed = ParsedFilter::parse(input).context("Failed to parse filter string")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    let rendered = parsed
        .to_builder_with_config(config)
        .and_then(|builder| builder.render())
        .with_context(|| format!("Invalid '{}' invocation", parsed.name))?;
    println!("{rendered}");
    Ok(())
}
