//! List command implementation

use super::ListCommands;
use crate::commands::process::OutputFormat;
use anyhow::Result;
use clap::ValueEnum;
use tessera_core::{ContentType, SizeTable};

/// Print the requested listing to stdout
pub fn execute(subcommand: ListCommands) -> Result<()> {
    match subcommand {
        ListCommands::ContentTypes => {
            println!("Content types (default chunk size in characters):");
            for line in content_type_lines(&SizeTable::default()) {
                println!("  {line}");
            }
        }
        ListCommands::Formats => {
            println!("Output formats:");
            for line in format_lines() {
                println!("  {line}");
            }
        }
    }
    Ok(())
}

fn content_type_lines(sizes: &SizeTable) -> Vec<String> {
    ContentType::ALL
        .iter()
        .map(|ct| format!("{:<8} {}", ct.as_str(), sizes.get(*ct)))
        .collect()
}

fn format_lines() -> Vec<String> {
    OutputFormat::value_variants()
        .iter()
        .filter_map(|f| f.to_possible_value())
        .map(|v| match v.get_help() {
            Some(help) => format!("{:<9} {help}", v.get_name()),
            None => v.get_name().to_string(),
        })
        .collect()
}
