//! Run configuration.
//!
//! A [`SplitConfig`] holds the raw settings as given by the user. Calling
//! [`SplitConfig::validate`] checks them and produces a [`ValidatedConfig`],
//! which is what the pipeline consumes. Both are plain immutable values passed
//! explicitly into the run.

use crate::error::{Result, SplitError};
use crate::io::compression::strip_codec_extension;
use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Rows per output part when none is configured.
pub const DEFAULT_LINES_PER_FILE: i64 = 100_000;

/// Unvalidated settings for one split run.
///
/// `lines_per_file` is signed so that zero and negative values can be
/// reported as configuration errors instead of being rejected at parse time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub lines_per_file: i64,
}

impl SplitConfig {
    /// Settings for `input` with the defaults: parts are named after the
    /// input file and placed next to it, [`DEFAULT_LINES_PER_FILE`] rows each.
    ///
    /// Parts are plain CSV, so a compression suffix on the input name
    /// (`data.csv.gz`) is left out of the default output name (`data.csv`).
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input_path = input.into();
        Self {
            output_path: default_output_path(&input_path),
            input_path,
            lines_per_file: DEFAULT_LINES_PER_FILE,
        }
    }

    /// Use `output` as the part-name template, exactly as given.
    #[must_use]
    pub fn with_output_path(mut self, output: impl Into<PathBuf>) -> Self {
        self.output_path = output.into();
        self
    }

    #[must_use]
    pub fn with_lines_per_file(mut self, lines: i64) -> Self {
        self.lines_per_file = lines;
        self
    }

    /// Check the settings before any processing happens.
    ///
    /// # Errors
    /// - [`SplitError::InvalidLinesPerFile`] if `lines_per_file <= 0`
    /// - [`SplitError::InputNotFound`] if the input path does not exist
    /// - [`SplitError::InvalidOutputPath`] if the output path has no file name
    pub fn validate(&self) -> Result<ValidatedConfig> {
        let lines_per_file = usize::try_from(self.lines_per_file)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(SplitError::InvalidLinesPerFile(self.lines_per_file))?;

        match std::fs::metadata(&self.input_path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SplitError::InputNotFound(self.input_path.clone()));
            }
            Err(e) => return Err(SplitError::io("stat", &self.input_path, e)),
        }

        let template = OutputTemplate::from_path(&self.output_path)?;

        Ok(ValidatedConfig {
            input_path: self.input_path.clone(),
            template,
            lines_per_file,
        })
    }
}

/// Checked settings; the only configuration the pipeline accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub input_path: PathBuf,
    pub template: OutputTemplate,
    pub lines_per_file: NonZeroUsize,
}

/// Directory and base file name shared by all parts of a run.
///
/// Part `i` is written to `{dir}{i}_{base_name}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTemplate {
    dir: PathBuf,
    base_name: String,
}

impl OutputTemplate {
    /// Split `path` into its directory and file-name components.
    ///
    /// # Errors
    /// Returns [`SplitError::InvalidOutputPath`] when `path` ends in a
    /// separator or otherwise has no file-name component.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = path.as_os_str().to_string_lossy();
        if raw.ends_with('/') || raw.ends_with(MAIN_SEPARATOR) {
            return Err(SplitError::InvalidOutputPath(path.to_path_buf()));
        }
        let base_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| SplitError::InvalidOutputPath(path.to_path_buf()))?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self { dir, base_name })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Path of the part with the given 0-based index.
    #[must_use]
    pub fn part_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{index}_{}", self.base_name))
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    match input.file_name().and_then(|n| n.to_str()) {
        Some(name) => input.with_file_name(strip_codec_extension(name)),
        None => input.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_path_keeps_directory() {
        let t = OutputTemplate::from_path("out/nested/data.csv").unwrap();
        assert_eq!(t.dir(), Path::new("out/nested"));
        assert_eq!(t.base_name(), "data.csv");
        assert_eq!(t.part_path(0), Path::new("out/nested/0_data.csv"));
        assert_eq!(t.part_path(12), Path::new("out/nested/12_data.csv"));
    }

    #[test]
    fn bare_file_name_has_empty_dir() {
        let t = OutputTemplate::from_path("data.csv").unwrap();
        assert_eq!(t.dir(), Path::new(""));
        assert_eq!(t.part_path(3), Path::new("3_data.csv"));
    }

    #[test]
    fn trailing_separator_is_rejected() {
        let err = OutputTemplate::from_path("out/").unwrap_err();
        assert!(matches!(err, SplitError::InvalidOutputPath(_)));
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn default_output_drops_compression_suffix() {
        let config = SplitConfig::new("in/data.csv.gz");
        assert_eq!(config.input_path, Path::new("in/data.csv.gz"));
        assert_eq!(config.output_path, Path::new("in/data.csv"));
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn explicit_output_keeps_its_suffix() {
        let config = SplitConfig::new("in/data.csv.gz").with_output_path("out/parts.csv.gz");
        assert_eq!(config.output_path, Path::new("out/parts.csv.gz"));

        let t = OutputTemplate::from_path(&config.output_path).unwrap();
        assert_eq!(t.base_name(), "parts.csv.gz");
        assert_eq!(t.part_path(0), Path::new("out/0_parts.csv.gz"));
    }

    #[test]
    fn non_positive_lines_rejected_before_input_check() {
        for lines in [0, -1, -100_000] {
            let err = SplitConfig::new("does/not/exist.csv")
                .with_lines_per_file(lines)
                .validate()
                .unwrap_err();
            assert!(matches!(err, SplitError::InvalidLinesPerFile(n) if n == lines));
        }
    }
}
