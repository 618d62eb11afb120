use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use yomu_config::{Config, LogFormat};

use crate::events::OutputFormat;

/// Dictionary lookups for the text under the pointer.
///
/// Reads pointer events (`{"sentence": .., "offset": ..}`) from stdin, one
/// JSON object per line, or from a websocket, and writes the dictionary
/// entries found at each position to stdout.
#[derive(Debug, Default, Parser)]
#[command(name = "yomu", version)]
pub struct Args {
    /// JSON config file applied over the environment defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Lookup server base URL
    #[arg(long)]
    pub server_url: Option<String>,

    /// Quiescence window for pointer events, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Read pointer events from the websocket instead of stdin
    #[arg(long)]
    pub ws: bool,

    #[arg(long)]
    pub ws_url: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// auto, pretty or json
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

/// Environment, then the config file, then command-line flags.
pub fn load_config(args: &Args) -> anyhow::Result<Config> {
    let config = Config::new();
    let config = match &args.config {
        Some(path) => config
            .merge_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => config,
    };
    Ok(apply_args(config, args))
}

pub fn apply_args(mut config: Config, args: &Args) -> Config {
    if let Some(url) = &args.server_url {
        config.server.url = url.clone();
    }
    if let Some(debounce_ms) = args.debounce_ms {
        config.tracker.debounce_ms = debounce_ms;
    }
    if args.ws {
        config.input.listen_to_ws = true;
    }
    if let Some(ws_url) = &args.ws_url {
        config.input.ws_url = ws_url.clone();
    }
    if let Some(format) = args.log_format {
        config.log.format = format;
    }
    config
}
