//! Filter and transform stage.
//!
//! Walks a [`PropertyTable`] in source order and decides, per descriptor,
//! whether it becomes an attribute of the target interface, what it is
//! called, which other names it answers to and how it is gated.

mod gate;
mod spelling;

pub use gate::{Exposure, Gate, resolve_gate};
pub use spelling::{Spelling, VendorPrefix, derive_spelling};

use tracing::{debug, info};

use crate::error::InvariantViolation;
use crate::overrides::OverrideTable;
use crate::table::{PropertyDescriptor, PropertyKind, PropertyTable};
use crate::target::InterfaceTarget;

/// Override table and prefix list shared by every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRules {
    /// Per-property exceptions.
    pub overrides: OverrideTable,
    /// Recognized vendor prefixes.
    pub vendor_prefixes: Vec<VendorPrefix>,
}

impl Default for GenerationRules {
    fn default() -> Self {
        Self {
            overrides: OverrideTable::builtin(),
            vendor_prefixes: VendorPrefix::defaults(),
        }
    }
}

impl GenerationRules {
    /// Pref that gates `descriptor` once alias overrides are applied.
    #[must_use]
    pub fn effective_pref<'a>(&'a self, descriptor: &'a PropertyDescriptor) -> &'a str {
        if descriptor.is_alias()
            && let Some(forced) = self.overrides.alias_pref(&descriptor.method)
        {
            return forced;
        }
        &descriptor.pref
    }

    fn forces_pref(&self, descriptor: &PropertyDescriptor) -> bool {
        descriptor.is_alias() && self.overrides.alias_pref(&descriptor.method).is_some()
    }

    fn spelling(&self, descriptor: &PropertyDescriptor) -> Spelling {
        derive_spelling(descriptor, &self.overrides, &self.vendor_prefixes)
    }
}

/// Binding template hook attached to an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBinding {
    /// Template name, for example `CSS2Property`.
    pub template: String,
    /// Identifier of the property the accessor reads and writes.
    pub property_id: String,
}

impl TemplateBinding {
    /// The `BindingTemplate` extended attribute.
    #[must_use]
    pub fn annotation(&self) -> String {
        format!(
            "BindingTemplate=({}, eCSSProperty_{})",
            self.template, self.property_id
        )
    }
}

/// One attribute of a generated interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAttribute {
    /// Attribute name.
    pub spelling: String,
    /// Alternate names resolving to the same accessor.
    pub binding_aliases: Vec<String>,
    /// Exposure condition.
    pub gate: Gate,
    /// Accessor template binding.
    pub template: TemplateBinding,
}

/// Produces the attributes of `target` from `table`, in table order.
///
/// # Errors
///
/// Returns an [`InvariantViolation`] naming the offending property when an
/// alias reference does not resolve or an `Internal` property is pref-gated.
pub fn generate(
    table: &PropertyTable,
    target: &InterfaceTarget,
    rules: &GenerationRules,
) -> Result<Vec<GeneratedAttribute>, InvariantViolation> {
    table.check_references()?;
    let attributes = table
        .iter()
        .map(|descriptor| transform_descriptor(table, descriptor, target, rules))
        .filter_map(Result::transpose)
        .collect::<Result<Vec<_>, _>>()?;
    info!(
        interface = %target.interface,
        rule_type = %target.rule_type,
        attributes = attributes.len(),
        "generated interface attributes"
    );
    Ok(attributes)
}

fn transform_descriptor(
    table: &PropertyTable,
    descriptor: &PropertyDescriptor,
    target: &InterfaceTarget,
    rules: &GenerationRules,
) -> Result<Option<GeneratedAttribute>, InvariantViolation> {
    if !descriptor.applies_to(&target.rule_type) {
        return Ok(None);
    }

    let pref = rules.effective_pref(descriptor);
    let property_id = match &descriptor.kind {
        PropertyKind::Alias { prop_id } => {
            let aliased = lookup_alias_target(table, descriptor, prop_id)?;
            if !rules.forces_pref(descriptor) && pref == aliased.pref {
                debug!(id = %descriptor.id, target = %prop_id, "exposed as a binding alias");
                return Ok(None);
            }
            prop_id
        }
        PropertyKind::Longhand | PropertyKind::Shorthand => &descriptor.id,
    };

    let gate = match resolve_gate(descriptor, pref, &rules.overrides)? {
        Exposure::Exposed(gate) => gate,
        Exposure::Excluded => {
            debug!(id = %descriptor.id, "internal property excluded");
            return Ok(None);
        }
    };

    let Spelling { primary, aliases } = rules.spelling(descriptor);
    let siblings = sibling_aliases(table, descriptor, pref, rules)?;
    let binding_aliases = aliases.into_iter().chain(siblings).collect();

    Ok(Some(GeneratedAttribute {
        spelling: primary,
        binding_aliases,
        gate,
        template: TemplateBinding {
            template: target.template.clone(),
            property_id: property_id.clone(),
        },
    }))
}

/// Spellings of `owner`'s aliases that share its gate.
///
/// Each alias contributes its own extra names followed by its primary
/// spelling. Aliases gated differently are emitted as separate attributes
/// instead.
fn sibling_aliases(
    table: &PropertyTable,
    owner: &PropertyDescriptor,
    owner_pref: &str,
    rules: &GenerationRules,
) -> Result<Vec<String>, InvariantViolation> {
    if owner.is_alias() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for alias_id in &owner.aliases {
        let alias = table
            .get(alias_id)
            .ok_or_else(|| InvariantViolation::DanglingAlias {
                id: owner.id.clone(),
                alias: alias_id.clone(),
            })?;
        if rules.effective_pref(alias) != owner_pref {
            continue;
        }
        let Spelling { primary, aliases } = rules.spelling(alias);
        names.extend(aliases);
        names.push(primary);
    }
    Ok(names)
}

fn lookup_alias_target<'a>(
    table: &'a PropertyTable,
    alias: &PropertyDescriptor,
    prop_id: &str,
) -> Result<&'a PropertyDescriptor, InvariantViolation> {
    table
        .get(prop_id)
        .ok_or_else(|| InvariantViolation::UnknownAliasTarget {
            id: alias.id.clone(),
            prop_id: prop_id.to_owned(),
        })
}
