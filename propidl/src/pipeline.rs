//! Runs the transform stage for every selected target.
//!
//! Planning is separate from output so that stdout streaming, file writes
//! and `--check` all see the same attributes and digests.

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::config::GeneratorConfig;
use crate::emit::{InterfaceLayout, render_interface};
use crate::error::PropidlError;
use crate::table::PropertyTable;
use crate::target::InterfaceTarget;
use crate::transform::{GeneratedAttribute, generate};

/// Attributes planned for one interface target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfacePlan {
    /// Target the attributes belong to.
    pub target: InterfaceTarget,
    /// Attributes in emission order.
    pub attributes: Vec<GeneratedAttribute>,
}

impl InterfacePlan {
    /// Renders the complete interface text.
    #[must_use]
    pub fn render(&self, layout: &InterfaceLayout<'_>) -> String {
        render_interface(layout, &self.target, &self.attributes)
    }
}

/// Hex-encoded SHA-256 digest of rendered interface text.
#[must_use]
pub fn digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Picks the configured targets named in `selection`, or all of them when
/// `selection` is empty. Selected targets keep configuration order.
///
/// # Errors
///
/// Returns [`PropidlError::UnknownTarget`] for a name no target carries.
pub fn select_targets<'a>(
    targets: &'a [InterfaceTarget],
    selection: &[String],
) -> Result<Vec<&'a InterfaceTarget>, PropidlError> {
    if let Some(unknown) = selection
        .iter()
        .find(|name| !targets.iter().any(|t| &t.interface == *name))
    {
        return Err(PropidlError::UnknownTarget(unknown.clone()));
    }
    Ok(targets
        .iter()
        .filter(|t| selection.is_empty() || selection.contains(&t.interface))
        .collect())
}

/// Plans every selected interface.
///
/// # Errors
///
/// Returns [`PropidlError::UnknownTarget`] for an unknown selection and
/// [`PropidlError::Invariant`] when the table breaks a generator invariant.
pub fn plan_interfaces(
    table: &PropertyTable,
    config: &GeneratorConfig,
    selection: &[String],
) -> Result<Vec<InterfacePlan>, PropidlError> {
    let targets = select_targets(&config.targets, selection)?;
    let rules = config.rules();
    for method in rules.overrides.unmatched(table) {
        warn!(method, "override matches no property in the table");
    }

    targets
        .into_iter()
        .map(|target| {
            Ok(InterfacePlan {
                target: target.clone(),
                attributes: generate(table, target, &rules)?,
            })
        })
        .collect()
}
