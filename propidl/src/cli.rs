//! Command-line interface definitions for `propidl`.

use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser};

use propidl::config::CliOverrides;
use propidl::error::PropidlError;
use propidl::output::OutputMode;

/// Parsed CLI arguments for `propidl`.
#[derive(Debug, Parser)]
#[command(name = "propidl")]
#[command(about = "Generate CSS property WebIDL interfaces from a property table")]
#[command(version)]
pub struct Args {
    /// Property table to read (TOML, or JSON by `.json` extension).
    #[arg(long, value_name = "path")]
    pub table: Utf8PathBuf,
    /// Top-level binding holding the descriptor records.
    #[arg(long, value_name = "name")]
    pub binding: Option<String>,
    /// Configuration file (defaults to `propidl.toml` when present).
    #[arg(long, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Interface to generate (repeat for several; default is every target).
    #[arg(long = "target", value_name = "interface")]
    pub targets: Vec<String>,
    /// Output destination flags.
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Output destination flags.
#[derive(Debug, ClapArgs, Clone)]
pub struct OutputArgs {
    /// Directory to write one `.webidl` file per interface into.
    #[arg(long, value_name = "path", conflicts_with = "should_use_stdout")]
    pub out_dir: Option<Utf8PathBuf>,
    /// Stream interfaces to standard output instead of writing files.
    #[arg(long = "stdout")]
    pub should_use_stdout: bool,
    /// Fail if files in the output directory differ from fresh output.
    #[arg(long = "check", conflicts_with = "should_use_stdout")]
    pub should_check: bool,
}

impl Args {
    /// Values that take precedence over every configuration source.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            binding: self.binding.clone(),
            out_dir: self.output.out_dir.clone(),
        }
    }
}

impl OutputArgs {
    /// Resolves the output mode against the configured output directory.
    ///
    /// Without `--stdout` or an output directory, interfaces go to standard
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`PropidlError::MissingOutDir`] when `--check` has no
    /// directory to compare against.
    pub fn mode(&self, out_dir: Option<&Utf8PathBuf>) -> Result<OutputMode, PropidlError> {
        match (self.should_use_stdout, self.should_check, out_dir) {
            (true, _, _) => Ok(OutputMode::Stdout),
            (false, true, Some(dir)) => Ok(OutputMode::Check(dir.clone())),
            (false, true, None) => Err(PropidlError::MissingOutDir),
            (false, false, Some(dir)) => Ok(OutputMode::Directory(dir.clone())),
            (false, false, None) => Ok(OutputMode::Stdout),
        }
    }
}
