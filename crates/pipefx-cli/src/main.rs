//! pipefx - interactive image filter shell
//!
//! Loads the configured filters, lets the user pick one that applies to the
//! image, asks for its parameters and writes the filtered copy as PNG.

use anyhow::{Context, Result};
use clap::Parser;
use pipefx_filters::FilterId;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use commands::shell::ShellOptions;
use config::{Config, FILTERS_ENV};

#[derive(Parser)]
#[command(name = "pipefx")]
#[command(author, version, about = "Interactive image filter shell")]
#[command(long_about = "
Applies configured filters to a PNG image, one pass at a time.

Each pass lists the filters applicable to the image, asks for a filter id
and its parameter values (blank keeps the default), applies the filter and
saves the result. Type q or close the input to quit.

Examples:
  pipefx photo.png                              # Interactive session
  pipefx photo.png -f 2 -s channel=Red --once   # One pass, no prompts left
  pipefx photo.png --filters BlurFilter -o blurred.png
  pipefx --list                                 # Show loaded filters
")]
struct Cli {
    /// Input image (PNG)
    #[arg(required_unless_present = "list")]
    image: Option<PathBuf>,

    /// Filter id to apply on the first pass
    #[arg(short, long)]
    filter: Option<FilterId>,

    /// Preset a parameter of the selected filter (repeatable)
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Output file [default: <output_dir>/<stem>_<filter>_<n>.png]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Apply one filter and exit
    #[arg(long)]
    once: bool,

    /// Comma-separated filter list, overrides the config file and PIPEFX_FILTERS
    #[arg(long)]
    filters: Option<String>,

    /// YAML config file [default: ./pipefx.yaml if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List the loaded filters and their parameters, then exit
    #[arg(short, long)]
    list: bool,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parses `name=value`.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{s}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = Config::layered(
        cli.config.as_deref(),
        std::env::var(FILTERS_ENV).ok(),
        cli.filters,
    )?;

    if cli.list {
        return commands::list::run(&config, &mut std::io::stdout().lock());
    }

    let image_path = cli.image.context("No image given")?;
    let output_dir = config
        .output_dir
        .unwrap_or_else(|| commands::shell::image_dir(&image_path));

    commands::shell::run(ShellOptions {
        image_path,
        filters: config.load_filters,
        filter: cli.filter,
        presets: cli.set,
        output: cli.output,
        output_dir,
        once: cli.once,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("channel=Red").unwrap(),
            ("channel".to_string(), "Red".to_string())
        );
        assert_eq!(
            parse_assignment("color = 1, 2, 3").unwrap(),
            ("color".to_string(), "1, 2, 3".to_string())
        );
        assert!(parse_assignment("radius").is_err());
        assert!(parse_assignment("=3").is_err());
    }

    #[test]
    fn test_args() {
        let cli = Cli::try_parse_from([
            "pipefx", "in.png", "-f", "2", "-s", "channel=Blue", "--set", "x=1", "--once", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.image, Some(PathBuf::from("in.png")));
        assert_eq!(cli.filter, Some(2));
        assert_eq!(cli.set.len(), 2);
        assert!(cli.once);
        assert_eq!(cli.verbose, 2);

        assert!(Cli::try_parse_from(["pipefx"]).is_err());
        assert!(Cli::try_parse_from(["pipefx", "--list"]).is_ok());
    }
}
