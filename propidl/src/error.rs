//! Error types for `propidl`.
//!
//! Every failure is fatal: the tool runs as a build step and a partially
//! generated interface is never usable, so nothing here is retried.

use std::error::Error as StdError;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures reading or decoding a property table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The table path does not exist.
    #[error("property table not found at {0}")]
    NotFound(Utf8PathBuf),

    /// The table exists but could not be read.
    #[error("failed to read property table {path}: {source}")]
    Read {
        /// Table path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The table is not valid TOML or JSON.
    #[error("failed to parse property table {path}: {source}")]
    Parse {
        /// Table path.
        path: Utf8PathBuf,
        /// Parser error reported by the format backend.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The expected top-level binding is absent.
    #[error("property table {path} has no top-level `{binding}` binding")]
    MissingBinding {
        /// Table path.
        path: Utf8PathBuf,
        /// Binding that was looked up.
        binding: String,
    },

    /// The top-level binding exists but is not a mapping.
    #[error("binding `{binding}` in {path} is not a mapping")]
    BindingNotMapping {
        /// Table path.
        path: Utf8PathBuf,
        /// Binding that was looked up.
        binding: String,
    },

    /// A descriptor record does not match the schema.
    #[error("property `{id}` is malformed: {message}")]
    Record {
        /// Identifier of the offending record.
        id: String,
        /// What was wrong with it.
        message: String,
    },

    /// Two records share an identifier.
    #[error("property `{0}` is defined more than once")]
    DuplicateId(String),
}

/// Table contents that break the generator's invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An `Internal` property carries a pref gate.
    #[error("property `{id}` is flagged Internal but gated behind pref `{pref}`")]
    InternalWithPref {
        /// Offending property.
        id: String,
        /// The pref it was gated behind.
        pref: String,
    },

    /// A property lists an alias that is not in the table.
    #[error("property `{id}` lists alias `{alias}`, which is not in the table")]
    DanglingAlias {
        /// Property owning the alias list.
        id: String,
        /// The unresolved alias identifier.
        alias: String,
    },

    /// An alias points at a property that is not in the table.
    #[error("alias `{id}` points at `{prop_id}`, which is not in the table")]
    UnknownAliasTarget {
        /// The alias property.
        id: String,
        /// The unresolved target identifier.
        prop_id: String,
    },
}

impl InvariantViolation {
    /// Identifier of the property that triggered the violation.
    #[must_use]
    pub fn property_id(&self) -> &str {
        match self {
            Self::InternalWithPref { id, .. }
            | Self::DanglingAlias { id, .. }
            | Self::UnknownAliasTarget { id, .. } => id,
        }
    }
}

/// Failures writing a generated interface.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The caller-supplied sink rejected a write.
    #[error("failed to write interface {interface}: {source}")]
    Sink {
        /// Interface being written.
        interface: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation on an output file failed.
    #[error("I/O error at {path}: {source}")]
    File {
        /// Path being written or inspected.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Failures assembling the generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {0}")]
    MissingFile(Utf8PathBuf),

    /// The merged configuration could not be extracted.
    #[error("invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// Errors surfaced by the `propidl` pipeline.
#[derive(Debug, Error)]
pub enum PropidlError {
    /// Loading the property table failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The property table broke a generator invariant.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    /// Writing generated output failed.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// The configuration could not be assembled.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A requested interface is not among the configured targets.
    #[error("unknown target interface '{0}'")]
    UnknownTarget(String),

    /// `--check` was requested without an output directory.
    #[error("--check needs an output directory; pass --out-dir or set out_dir")]
    MissingOutDir,

    /// `--check` found outputs that differ from a fresh generation.
    #[error("generated interfaces are out of date: {0}")]
    Stale(String),
}
