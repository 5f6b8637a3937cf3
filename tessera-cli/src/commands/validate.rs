//! Validate command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tessera_core::SegmenterConfig;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the segmenter configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let content = fs::read_to_string(&self.config)
            .with_context(|| format!("Failed to read config file: {}", self.config.display()))?;

        match SegmenterConfig::from_toml_str(&content) {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                for line in summary(&config) {
                    println!("  {line}");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}

fn summary(config: &SegmenterConfig) -> Vec<String> {
    let c = &config.chunking;
    let s = &config.structure;
    vec![
        format!(
            "Chunking: max_size={} overlap={} min_size={}",
            c.max_size, c.overlap, c.min_size
        ),
        format!(
            "Cleaning: repetition_threshold={} min_line_length={}",
            config.cleaning.repetition_threshold, config.cleaning.min_line_length
        ),
        format!(
            "Structure: headers={} tables={} lists={} dynamic_sizing={}",
            s.respect_headers, s.preserve_tables, s.preserve_lists, s.use_dynamic_sizing
        ),
    ]
}
