//! Layered generator configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `PROPIDL_*` environment variables, then command-line overrides.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::emit::{DEFAULT_HEADER, DEFAULT_PARENT_INTERFACE, InterfaceLayout};
use crate::error::ConfigError;
use crate::overrides::{OverrideTable, PropertyOverride};
use crate::table::DEFAULT_BINDING;
use crate::target::InterfaceTarget;
use crate::transform::{GenerationRules, VendorPrefix};

/// Configuration file read from the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "propidl.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "PROPIDL_";

/// Fully merged generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Top-level binding in the property table.
    pub binding: String,
    /// Interface the generated interfaces inherit from.
    pub parent_interface: String,
    /// Comment block written before each interface.
    pub header: String,
    /// Directory generated files are written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<Utf8PathBuf>,
    /// Interfaces to generate.
    pub targets: Vec<InterfaceTarget>,
    /// Extra per-property exceptions, merged over the built-in ones.
    pub overrides: Vec<PropertyOverride>,
    /// Recognized vendor prefixes.
    pub vendor_prefixes: Vec<VendorPrefix>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            binding: DEFAULT_BINDING.to_owned(),
            parent_interface: DEFAULT_PARENT_INTERFACE.to_owned(),
            header: DEFAULT_HEADER.to_owned(),
            out_dir: None,
            targets: InterfaceTarget::defaults(),
            overrides: Vec::new(),
            vendor_prefixes: VendorPrefix::defaults(),
        }
    }
}

/// Values supplied on the command line, merged last.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    /// Binding name from `--binding`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    /// Output directory from `--out-dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<Utf8PathBuf>,
}

impl GeneratorConfig {
    /// Builds the layered figment without extracting it.
    ///
    /// A missing default configuration file is skipped.
    #[must_use]
    pub fn figment(config_path: Option<&Utf8Path>, cli: &CliOverrides) -> Figment {
        let file = config_path.unwrap_or_else(|| Utf8Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file.as_std_path()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(cli))
    }

    /// Loads and merges every configuration source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] when `config_path` names a file
    /// that does not exist, or [`ConfigError::Extract`] when the merged
    /// values do not fit the schema.
    pub fn load(config_path: Option<&Utf8Path>, cli: &CliOverrides) -> Result<Self, ConfigError> {
        if let Some(path) = config_path.filter(|path| !path.is_file()) {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        Self::figment(config_path, cli)
            .extract()
            .map_err(|err| ConfigError::Extract(Box::new(err)))
    }

    /// Override table and prefixes the transform stage runs with.
    #[must_use]
    pub fn rules(&self) -> GenerationRules {
        GenerationRules {
            overrides: OverrideTable::builtin().with_entries(&self.overrides),
            vendor_prefixes: self.vendor_prefixes.clone(),
        }
    }

    /// Header and parent interface the emitter writes.
    #[must_use]
    pub fn layout(&self) -> InterfaceLayout<'_> {
        InterfaceLayout {
            header: &self.header,
            parent: &self.parent_interface,
        }
    }
}
