//! Exposure gating for generated attributes.

use crate::error::InvariantViolation;
use crate::overrides::OverrideTable;
use crate::table::{PropertyDescriptor, PropertyFlag};

/// Condition under which an attribute is exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Always exposed.
    Unconditional,
    /// Exposed to chrome code only.
    ChromeOnly,
    /// Exposed while the named pref is enabled.
    Pref(String),
    /// Exposed when the named availability-check function returns true.
    Func(String),
}

impl Gate {
    /// Extended attribute expressing the gate, if the gate needs one.
    #[must_use]
    pub fn annotation(&self) -> Option<String> {
        match self {
            Self::Unconditional => None,
            Self::ChromeOnly => Some("ChromeOnly".to_owned()),
            Self::Pref(pref) => Some(format!("Pref=\"{pref}\"")),
            Self::Func(func) => Some(format!("Func=\"{func}\"")),
        }
    }
}

/// Outcome of gate resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exposure {
    /// The property is exposed behind `Gate`.
    Exposed(Gate),
    /// The property is internal and never exposed.
    Excluded,
}

/// Resolves how `descriptor` is gated, given its effective `pref`.
///
/// A non-empty pref wins, then chrome-only exposure, then the `Internal`
/// exclusion.
///
/// # Errors
///
/// Returns [`InvariantViolation::InternalWithPref`] when an `Internal`
/// property carries a pref.
pub fn resolve_gate(
    descriptor: &PropertyDescriptor,
    pref: &str,
    overrides: &OverrideTable,
) -> Result<Exposure, InvariantViolation> {
    if !pref.is_empty() {
        if descriptor.has_flag(&PropertyFlag::Internal) {
            return Err(InvariantViolation::InternalWithPref {
                id: descriptor.id.clone(),
                pref: pref.to_owned(),
            });
        }
        let gate = overrides
            .availability_func(&descriptor.method)
            .map_or_else(|| Gate::Pref(pref.to_owned()), |func| Gate::Func(func.to_owned()));
        return Ok(Exposure::Exposed(gate));
    }

    if descriptor.has_flag(&PropertyFlag::EnabledInUaSheetsAndChrome) {
        return Ok(Exposure::Exposed(Gate::ChromeOnly));
    }
    if descriptor.has_flag(&PropertyFlag::Internal) {
        return Ok(Exposure::Excluded);
    }
    Ok(Exposure::Exposed(Gate::Unconditional))
}
