//! Exposed attribute spellings.

use serde::{Deserialize, Serialize};

use crate::overrides::OverrideTable;
use crate::table::PropertyDescriptor;

/// A recognized vendor prefix on `method` spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorPrefix {
    /// Capitalized prefix token, for example `Webkit`.
    pub token: String,
    /// Whether the lower-camel variant (`webkitFoo`) is also exposed.
    #[serde(default)]
    pub lower_camel_alias: bool,
}

impl VendorPrefix {
    /// Creates a prefix entry.
    #[must_use]
    pub fn new(token: impl Into<String>, lower_camel_alias: bool) -> Self {
        Self {
            token: token.into(),
            lower_camel_alias,
        }
    }

    /// Prefixes the generator recognizes by default.
    ///
    /// `Webkit` properties answer to both `WebkitFoo` and `webkitFoo`;
    /// `Moz` properties only keep their capitalized form.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("Webkit", true), Self::new("Moz", false)]
    }
}

/// Primary spelling of a property plus the extra names it answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spelling {
    /// Attribute name in the interface.
    pub primary: String,
    /// Additional `BindingAlias` spellings, in emission order.
    pub aliases: Vec<String>,
}

/// Derives the exposed spelling of `descriptor`.
///
/// An override spelling wins; otherwise vendor-prefixed methods keep their
/// capitalized form and everything else is lower-camel-cased. The dashed
/// `name` is added as an alias whenever it differs from the primary.
#[must_use]
pub fn derive_spelling(
    descriptor: &PropertyDescriptor,
    overrides: &OverrideTable,
    prefixes: &[VendorPrefix],
) -> Spelling {
    let method = descriptor.method.as_str();
    let prefix = prefixes.iter().find(|p| method.starts_with(p.token.as_str()));

    let (primary, mut aliases) = match (overrides.spelling(method), prefix) {
        (Some(fixed), _) => (fixed.to_owned(), Vec::new()),
        (None, Some(vendor)) if vendor.lower_camel_alias => {
            (method.to_owned(), vec![lower_first(method)])
        }
        (None, Some(_)) => (method.to_owned(), Vec::new()),
        (None, None) => (lower_first(method), Vec::new()),
    };

    if primary != descriptor.name {
        aliases.push(descriptor.name.clone());
    }

    Spelling { primary, aliases }
}

fn lower_first(ident: &str) -> String {
    let mut chars = ident.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}
