//! Configuration loading and command-line overrides

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tessera_core::{NormalizationConfig, SegmenterConfig};

/// Load a segmenter configuration, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<SegmenterConfig> {
    let Some(path) = path else {
        return Ok(SegmenterConfig::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = SegmenterConfig::from_toml_str(&content)
        .map_err(CliError::from)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Values given on the command line that take precedence over the file
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub max_size: Option<usize>,
    pub overlap: Option<usize>,
    pub min_size: Option<usize>,
    pub no_normalize: bool,
}

impl Overrides {
    /// Apply the overrides and re-validate
    pub fn apply(&self, config: &mut SegmenterConfig) -> Result<()> {
        if let Some(max_size) = self.max_size {
            config.chunking.max_size = max_size;
        }
        if let Some(overlap) = self.overlap {
            config.chunking.overlap = overlap;
        }
        if let Some(min_size) = self.min_size {
            config.chunking.min_size = min_size;
        }
        if self.no_normalize {
            config.normalization = NormalizationConfig::none();
        }
        config.validate().map_err(CliError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), SegmenterConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[chunking]\nmax_size = 320\n").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.chunking.max_size, 320);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[chunking]\nmax_size = 0\n").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = SegmenterConfig::default();
        let overrides = Overrides {
            max_size: Some(200),
            overlap: Some(10),
            no_normalize: true,
            ..Default::default()
        };
        overrides.apply(&mut config).unwrap();

        assert_eq!(config.chunking.max_size, 200);
        assert_eq!(config.chunking.overlap, 10);
        assert_eq!(config.normalization, NormalizationConfig::none());
    }

    #[test]
    fn test_overrides_revalidate() {
        let mut config = SegmenterConfig::default();
        let overrides = Overrides {
            max_size: Some(30),
            ..Default::default()
        };
        // default overlap 50 no longer fits
        assert!(overrides.apply(&mut config).is_err());
    }
}
