//! Generate config command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use tessera_core::SegmenterConfig;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating segmenter configuration...");
        println!("  Output file: {}", self.output.display());

        let template = generate_template(&SegmenterConfig::default());

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to tune chunking and cleaning");
        println!("2. Validate your configuration:");
        println!("   tessera validate --config {}", self.output.display());
        println!("3. Use it for processing:");
        println!(
            "   tessera process -i 'docs/*.txt' --config {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Commented TOML document holding the values of `config`
fn generate_template(config: &SegmenterConfig) -> String {
    let n = &config.normalization;
    let ch = &config.chunking;
    let cl = &config.cleaning;
    let st = &config.structure;
    let sz = &config.sizes;

    format!(
        r#"# tessera segmenter configuration
# Every key is optional; missing keys take the values shown here.

# Character normalization applied to every chunk
[normalization]
# Fold alef and yeh shape variants onto their canonical letters
unify_letter_variants = {}
# Strip combining diacritical marks
remove_diacritics = {}
# Strip tatweel and collapse runs of 3+ identical characters to 2
remove_elongation = {}
# Map Persian lookalike letters onto Arabic ones
map_lookalikes = {}

# Sentence chunker sizes, in characters
[chunking]
max_size = {}
# Must be smaller than max_size
overlap = {}
# Chunks shorter than this are dropped
min_size = {}

# Artifact cleaning on the structured path
[cleaning]
remove_page_numbers = {}
# Remove lines repeated at least repetition_threshold times
remove_headers_footers = {}
# Collapse whitespace, remove invisible and control characters
clean_artifacts = {}
# Fold presentation forms and Persian letters during cleaning
normalize_script = {}
min_line_length = {}
repetition_threshold = {}

# Structure-aware chunking
[structure]
# Split at detected headers
respect_headers = {}
# Keep table rows together
preserve_tables = {}
# Size list-heavy text with the list size
preserve_lists = {}
# Pick chunk size per content type instead of max_size
use_dynamic_sizing = {}
# Header lines are strictly longer than header_min_len and shorter than header_max_len
header_min_len = {}
header_max_len = {}
# Share of list-marker lines that makes a text a list
list_line_ratio = {}

# Target chunk size per content type
[sizes]
table = {}
list = {}
heading = {}
text = {}
default = {}
"#,
        n.unify_letter_variants,
        n.remove_diacritics,
        n.remove_elongation,
        n.map_lookalikes,
        ch.max_size,
        ch.overlap,
        ch.min_size,
        cl.remove_page_numbers,
        cl.remove_headers_footers,
        cl.clean_artifacts,
        cl.normalize_script,
        cl.min_line_length,
        cl.repetition_threshold,
        st.respect_headers,
        st.preserve_tables,
        st.preserve_lists,
        st.use_dynamic_sizing,
        st.header_min_len,
        st.header_max_len,
        st.list_line_ratio,
        sz.table,
        sz.list,
        sz.heading,
        sz.text,
        sz.default,
    )
}
