//! Isolated configuration environments for `propidl` tests.
//!
//! [`with_config_jail`] runs a test inside a `figment::Jail` whose working
//! directory optionally holds a `propidl.toml` and whose environment holds
//! only the `PROPIDL_*` variables the test asks for.

use std::fmt::Display;

use anyhow::{Result, anyhow};

/// File name the generator reads its configuration from by default.
pub const CONFIG_FILE: &str = "propidl.toml";

/// Contents of the jailed working directory and environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLayers<'a> {
    /// Body of `propidl.toml`; no file is written when `None`.
    pub file: Option<&'a str>,
    /// Environment variables set after the environment is cleared.
    pub env: &'a [(&'a str, &'a str)],
}

impl<'a> ConfigLayers<'a> {
    /// Layers with only a configuration file.
    #[must_use]
    pub const fn file(body: &'a str) -> Self {
        Self {
            file: Some(body),
            env: &[],
        }
    }

    /// Adds environment variables.
    #[must_use]
    pub const fn with_env(self, env: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            file: self.file,
            env,
        }
    }
}

/// Runs `load` with `layers` in place and returns what it produced.
///
/// Inherited environment variables are cleared first, so stray
/// `PROPIDL_*` values from the calling shell never reach the test.
///
/// # Errors
///
/// Returns an error when the jail cannot be prepared or `load` fails; the
/// message carries `load`'s error text.
pub fn with_config_jail<T, E, F>(layers: ConfigLayers<'_>, load: F) -> Result<T>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    let mut loaded = None;
    figment::Jail::try_with(|jail| {
        jail.clear_env();
        if let Some(body) = layers.file {
            jail.create_file(CONFIG_FILE, body)?;
        }
        for (key, value) in layers.env {
            jail.set_env(key, value);
        }
        let value = load().map_err(|err| figment::Error::from(err.to_string()))?;
        loaded = Some(value);
        Ok(())
    })
    .map_err(|err| anyhow!("configuration jail failed: {err}"))?;
    loaded.ok_or_else(|| anyhow!("configuration jail produced no value"))
}
