//! Property table schema.
//!
//! A [`PropertyTable`] is the ordered, read-only set of
//! [`PropertyDescriptor`] records the generator walks. Tables come from
//! [`load_table`] or, for callers with their own data source,
//! [`PropertyTable::from_descriptors`].

mod loader;

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use loader::{DEFAULT_BINDING, load_table};

use crate::error::{InvariantViolation, LoadError};

/// Declaration block kinds a property may appear in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleType {
    /// Ordinary style rules.
    Style,
    /// `@page` rules.
    Page,
    /// `@position-try` rules.
    PositionTry,
    /// Any rule type this tool has no special knowledge of.
    Other(String),
}

impl RuleType {
    /// Returns the spelling used in property tables.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Style => "Style",
            Self::Page => "Page",
            Self::PositionTry => "PositionTry",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for RuleType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Style" => Self::Style,
            "Page" => Self::Page,
            "PositionTry" => Self::PositionTry,
            _ => Self::Other(value),
        }
    }
}

impl From<RuleType> for String {
    fn from(value: RuleType) -> Self {
        match value {
            RuleType::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl FromStr for RuleType {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(value.to_owned()))
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Property modifiers that influence exposure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyFlag {
    /// Never exposed to content unless pref-gated (which is forbidden).
    Internal,
    /// Usable from UA sheets and chrome; exposed as `ChromeOnly`.
    EnabledInUaSheetsAndChrome,
    /// A flag with no bearing on interface generation.
    Other(String),
}

impl PropertyFlag {
    /// Returns the spelling used in property tables.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Internal => "Internal",
            Self::EnabledInUaSheetsAndChrome => "EnabledInUASheetsAndChrome",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for PropertyFlag {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Internal" => Self::Internal,
            "EnabledInUASheetsAndChrome" => Self::EnabledInUaSheetsAndChrome,
            _ => Self::Other(value),
        }
    }
}

impl From<PropertyFlag> for String {
    fn from(value: PropertyFlag) -> Self {
        match value {
            PropertyFlag::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

/// Structural kind of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// A property holding a single value.
    Longhand,
    /// A property expanding into several longhands.
    Shorthand,
    /// Another name for the property identified by `prop_id`.
    Alias {
        /// Identifier of the aliased property.
        prop_id: String,
    },
}

impl PropertyKind {
    /// Returns the spelling used in property tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Longhand => "longhand",
            Self::Shorthand => "shorthand",
            Self::Alias { .. } => "alias",
        }
    }
}

/// Metadata describing one CSS property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Stable internal identifier, used in `eCSSProperty_<id>`.
    pub id: String,
    /// Canonical dashed spelling, for example `background-color`.
    pub name: String,
    /// Symbol-style spelling, for example `BackgroundColor`.
    pub method: String,
    /// Longhand, shorthand or alias.
    pub kind: PropertyKind,
    /// Rule types in which the property is valid.
    pub rules: Vec<RuleType>,
    /// Gating pref; empty when ungated.
    pub pref: String,
    /// Exposure modifiers.
    pub flags: Vec<PropertyFlag>,
    /// Identifiers of alias properties, in declaration order.
    pub aliases: Vec<String>,
}

impl PropertyDescriptor {
    /// Creates an ungated descriptor with no rules, flags or aliases.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        method: impl Into<String>,
        kind: PropertyKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            method: method.into(),
            kind,
            rules: Vec::new(),
            pref: String::new(),
            flags: Vec::new(),
            aliases: Vec::new(),
        }
    }

    /// Sets the rule types the property is valid in.
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = RuleType>) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }

    /// Sets the gating pref.
    #[must_use]
    pub fn with_pref(mut self, pref: impl Into<String>) -> Self {
        self.pref = pref.into();
        self
    }

    /// Sets the exposure flags.
    #[must_use]
    pub fn with_flags(mut self, flags: impl IntoIterator<Item = PropertyFlag>) -> Self {
        self.flags = flags.into_iter().collect();
        self
    }

    /// Sets the alias identifiers.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Returns whether the property is valid in `rule`.
    #[must_use]
    pub fn applies_to(&self, rule: &RuleType) -> bool {
        self.rules.contains(rule)
    }

    /// Returns whether the property carries `flag`.
    #[must_use]
    pub fn has_flag(&self, flag: &PropertyFlag) -> bool {
        self.flags.contains(flag)
    }

    /// Returns whether this descriptor is an alias.
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self.kind, PropertyKind::Alias { .. })
    }

    /// Confirms every spelling can be written into a declaration verbatim.
    ///
    /// `id` and `method` become identifiers in the output, so they must be
    /// non-empty ASCII identifiers. `name` and `pref` end up inside quoted
    /// strings and may not contain quotes, backslashes or control
    /// characters; `name` may not be empty.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Record`] naming the descriptor and the first
    /// offending field.
    pub fn check_spellings(&self) -> Result<(), LoadError> {
        let problem = if !is_identifier(&self.id) {
            Some("`id` must be a non-empty identifier")
        } else if !is_identifier(&self.method) {
            Some("`method` must be a non-empty identifier")
        } else if self.name.is_empty() {
            Some("`name` must not be empty")
        } else if !is_quotable(&self.name) {
            Some("`name` contains a quote, backslash or control character")
        } else if !is_quotable(&self.pref) {
            Some("`pref` contains a quote, backslash or control character")
        } else {
            None
        };
        problem.map_or(Ok(()), |message| {
            Err(LoadError::Record {
                id: self.id.clone(),
                message: message.to_owned(),
            })
        })
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn is_quotable(value: &str) -> bool {
    !value
        .chars()
        .any(|ch| ch == '"' || ch == '\\' || ch.is_control())
}

/// Ordered, read-only mapping from identifier to descriptor.
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    descriptors: Vec<PropertyDescriptor>,
    index: HashMap<String, usize>,
}

impl PropertyTable {
    /// Builds a table from descriptors, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateId`] when two descriptors share an
    /// identifier, or [`LoadError::Record`] when a descriptor fails
    /// [`PropertyDescriptor::check_spellings`].
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = PropertyDescriptor>,
    ) -> Result<Self, LoadError> {
        let mut table = Self::default();
        for descriptor in descriptors {
            descriptor.check_spellings()?;
            if table.index.contains_key(&descriptor.id) {
                return Err(LoadError::DuplicateId(descriptor.id));
            }
            table
                .index
                .insert(descriptor.id.clone(), table.descriptors.len());
            table.descriptors.push(descriptor);
        }
        Ok(table)
    }

    /// Looks up a descriptor by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PropertyDescriptor> {
        self.index
            .get(id)
            .and_then(|position| self.descriptors.get(*position))
    }

    /// Iterates descriptors in source order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.descriptors.iter()
    }

    /// Number of descriptors in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns whether the table has no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Confirms every alias list entry and alias target resolves.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found, in table order.
    pub fn check_references(&self) -> Result<(), InvariantViolation> {
        for descriptor in &self.descriptors {
            if let PropertyKind::Alias { prop_id } = &descriptor.kind
                && self.get(prop_id).is_none()
            {
                return Err(InvariantViolation::UnknownAliasTarget {
                    id: descriptor.id.clone(),
                    prop_id: prop_id.clone(),
                });
            }
            if let Some(missing) = descriptor.aliases.iter().find(|a| self.get(a).is_none()) {
                return Err(InvariantViolation::DanglingAlias {
                    id: descriptor.id.clone(),
                    alias: missing.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PropertyTable {
    type Item = &'a PropertyDescriptor;
    type IntoIter = std::slice::Iter<'a, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}
