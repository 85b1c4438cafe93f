//! List command
//!
//! Prints the configured filters with their ids and declared parameters.

use crate::config::Config;
use anyhow::{Context, Result};
use pipefx_filters::FilterRegistry;
use std::io::Write;
use tracing::trace;

pub fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    trace!(filters = %config.load_filters, "list::run");

    let registry = FilterRegistry::from_list(&config.load_filters)
        .context("Error loading available filters")?;

    for (id, filter) in registry.iter() {
        let kind = if filter.execution().is_in_place() { "in-place" } else { "copy" };
        writeln!(out, " {id} {} ({kind})", filter.name())?;
        for spec in filter.schema() {
            match spec.default {
                Some(default) => writeln!(
                    out,
                    "     {}: {} = {}",
                    spec.name, spec.value_type, default
                )?,
                None => writeln!(out, "     {}: {} (required)", spec.name, spec.value_type)?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_builtins() {
        let mut out = Vec::new();
        run(&Config::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(" 1 Blur (copy)"));
        assert!(text.contains("     radius: Int = 1"));
        assert!(text.contains(" 2 Rgb split (in-place)"));
        assert!(text.contains("     channel: Channel (required)"));
    }

    #[test]
    fn test_unknown_filter() {
        let config = Config {
            load_filters: "BlurFilter, Sharpen".into(),
            output_dir: None,
        };
        let err = run(&config, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Error loading available filters"));
    }
}
