//! Process command implementation

use crate::config::{load_config, Overrides};
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{
    BoxedWriter, JsonFormatter, JsonLinesFormatter, MarkdownFormatter, OutputFormatter,
    TextFormatter,
};
use crate::progress::ProgressReporter;
use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tessera_core::{Document, GateMode, Segmenter};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", env = "TESSERA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum chunk size in characters
    #[arg(long, value_name = "CHARS")]
    pub max_size: Option<usize>,

    /// Characters carried over between consecutive chunks
    #[arg(long, value_name = "CHARS")]
    pub overlap: Option<usize>,

    /// Chunks shorter than this are dropped
    #[arg(long, value_name = "CHARS")]
    pub min_size: Option<usize>,

    /// Declared source format for every input (pdf, docx, md, ...)
    #[arg(long, value_name = "TYPE")]
    pub document_type: Option<String>,

    /// Always clean and chunk structurally
    #[arg(long, conflicts_with = "plain")]
    pub force_structured: bool,

    /// Always use the plain sentence chunker
    #[arg(long)]
    pub plain: bool,

    /// Skip character normalization (chunks are only trimmed)
    #[arg(long)]
    pub no_normalize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Chunk texts separated by blank lines
    Text,
    /// JSON array of documents with chunks and metadata
    Json,
    /// One JSON chunk object per line
    Jsonl,
    /// Markdown sections per document and chunk
    Markdown,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting text processing");
        log::debug!("Arguments: {self:?}");

        let segmenter = self.build_segmenter()?;
        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} file(s) to process", files.len());

        let (files, documents) = self.read_documents(files)?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let results = segmenter.segment_batch(&documents);

        let mut formatter = self.create_formatter()?;
        let mut total_chunks = 0;
        for (path, segmentation) in files.iter().zip(&results) {
            let source = path.display().to_string();
            for warning in &segmentation.warnings {
                log::warn!("{source}: {warning}");
            }
            if segmentation.structured {
                log::debug!(
                    "{source}: structured, strategy {:?}",
                    segmentation.strategy.map(|s| s.as_str())
                );
            }

            formatter.format_document(&source, segmentation)?;
            total_chunks += segmentation.chunks.len();
            progress.file_completed(&source, segmentation.chunks.len());
        }
        formatter.finish()?;
        progress.finish();

        log::info!(
            "Processed {} file(s) into {total_chunks} chunk(s)",
            files.len()
        );
        Ok(())
    }

    /// Read every input, skipping the ones that cannot be read as UTF-8 text
    fn read_documents(&self, files: Vec<PathBuf>) -> Result<(Vec<PathBuf>, Vec<Document>)> {
        let mut readable = Vec::with_capacity(files.len());
        let mut documents = Vec::with_capacity(files.len());

        for path in files {
            match FileReader::read_document(&path, self.document_type.as_deref()) {
                Ok(document) => {
                    readable.push(path);
                    documents.push(document);
                }
                Err(e) => log::warn!("Skipping {}: {e:#}", path.display()),
            }
        }

        if documents.is_empty() {
            bail!("None of the input files could be read");
        }
        Ok((readable, documents))
    }

    fn build_segmenter(&self) -> Result<Segmenter> {
        let mut config = load_config(self.config.as_deref())?;
        self.overrides().apply(&mut config)?;

        let segmenter = Segmenter::new(&config).map_err(CliError::from)?;
        Ok(segmenter.with_gate_mode(self.gate_mode()))
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            max_size: self.max_size,
            overlap: self.overlap,
            min_size: self.min_size,
            no_normalize: self.no_normalize,
        }
    }

    fn gate_mode(&self) -> GateMode {
        if self.force_structured {
            GateMode::Structured
        } else if self.plain {
            GateMode::Plain
        } else {
            GateMode::Auto
        }
    }

    fn create_formatter(&self) -> Result<Box<dyn OutputFormatter>> {
        let writer: BoxedWriter = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        Ok(match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Jsonl => Box::new(JsonLinesFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // a logger may already be installed when commands run in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: Vec<String>) -> ProcessArgs {
        ProcessArgs {
            input,
            output: None,
            format: OutputFormat::Text,
            config: None,
            max_size: None,
            overlap: None,
            min_size: None,
            document_type: None,
            force_structured: false,
            plain: false,
            no_normalize: false,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_gate_mode_from_flags() {
        let mut a = args(vec![]);
        assert_eq!(a.gate_mode(), GateMode::Auto);
        a.plain = true;
        assert_eq!(a.gate_mode(), GateMode::Plain);
        a.plain = false;
        a.force_structured = true;
        assert_eq!(a.gate_mode(), GateMode::Structured);
    }

    #[test]
    fn test_invalid_overrides_fail_before_reading() {
        let mut a = args(vec!["/nonexistent/*.txt".to_string()]);
        a.max_size = Some(10);
        a.overlap = Some(10);
        let err = a.execute().unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn test_unreadable_input_is_skipped() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        fs::write(&good, "A readable document with one sentence.").unwrap();
        fs::write(&bad, [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        let a = args(vec![]);
        let (files, documents) = a.read_documents(vec![bad, good.clone()]).unwrap();
        assert_eq!(files, vec![good]);
        assert_eq!(documents.len(), 1);
        assert!(documents[0].text.starts_with("A readable document"));
    }

    #[test]
    fn test_all_inputs_unreadable_fails() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("bad.txt");
        fs::write(&bad, [0xff, 0xfe]).unwrap();

        let err = args(vec![]).read_documents(vec![bad]).unwrap_err();
        assert!(err.to_string().contains("could be read"));
    }

    #[test]
    fn test_writes_jsonl_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("doc.txt");
        fs::write(&input, "One plain sentence for the output file.").unwrap();
        let output = dir.path().join("out.jsonl");

        let mut a = args(vec![input.display().to_string()]);
        a.format = OutputFormat::Jsonl;
        a.output = Some(output.clone());
        a.execute().unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.contains("\"chunk_index\":0"));
        assert!(written.contains("doc.txt"));
    }
}
