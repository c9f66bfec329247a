use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};

use simgate_config::GatewayConfig;
use simgate_gateway::{Gateway, GatewayError};
use simgate_params::RawParams;
use simgate_telemetry::logging::EventLogger;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file; without it the standard hierarchy
    /// (config/simgate.yaml, SIMGATE_* env) applies.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all simulations in the catalog
    List,
    /// Show a simulation's full version map
    Show(ShowArgs),
    /// Resolve a version label to its concrete definition
    Resolve(ResolveArgs),
    /// Validate parameters against a simulation version (dry-run submission)
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    pub name: String,
    /// Version label to resolve; defaults to the configured default
    #[arg(short, long)]
    pub version: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    pub name: String,
    #[arg(short, long)]
    pub version: Option<String>,
    /// Parameter as NAME=VALUE; repeatable
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => GatewayConfig::load_from_path(path)?,
        None => GatewayConfig::load()?,
    };
    EventLogger::init_with_level(&config.telemetry.log_level);
    let gateway = Gateway::new(config);

    match cli.command {
        Commands::List => {
            let simulations = gateway.list_simulations().map_err(status_error)?;
            print_json(&serde_json::json!({ "simulations": simulations }))
        }
        Commands::Show(args) => {
            let spec = gateway.simulation(&args.name).map_err(status_error)?;
            print_json(&spec)
        }
        Commands::Resolve(args) => {
            let resolved = gateway
                .resolved(&args.name, args.version.as_deref())
                .map_err(status_error)?;
            print_json(&resolved)
        }
        Commands::Validate(args) => {
            let raw = parse_params(&args.params)?;
            let job = gateway
                .prepare_submission(&args.name, args.version.as_deref(), &raw)
                .map_err(status_error)?;
            print_json(&job)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse repeated `NAME=VALUE` arguments into a raw parameter map. Values
/// stay strings; the validator coerces them to the declared dtypes.
fn parse_params(pairs: &[String]) -> anyhow::Result<RawParams> {
    let mut raw = RawParams::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("parameter '{}' is not NAME=VALUE", pair))?;
        raw.insert(name.to_string(), serde_json::Value::from(value));
    }
    Ok(raw)
}

fn status_error(err: GatewayError) -> anyhow::Error {
    let status = err.status();
    anyhow!(err).context(format!("request failed with status {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_parse_as_strings() {
        let raw = parse_params(&["x=3.5".into(), "mode=fast".into()]).unwrap();
        assert_eq!(raw["x"], serde_json::json!("3.5"));
        assert_eq!(raw["mode"], serde_json::json!("fast"));
    }

    #[test]
    fn bare_param_is_rejected() {
        assert!(parse_params(&["oops".into()]).is_err());
    }
}
