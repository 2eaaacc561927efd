//! Per-property exceptions to the general generation rules.
//!
//! Exceptions are keyed by a property's `method` spelling and consulted
//! before the general derivation, so every special case is listed in one
//! place instead of being spread across conditionals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::table::PropertyTable;

/// A single special rule applied to one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideRule {
    /// Gate an alias behind this pref regardless of the table, and always
    /// expose it as its own attribute.
    AliasPref(String),
    /// Gate a pref-gated property on this availability-check function
    /// instead of the literal pref.
    Func(String),
    /// Use this primary spelling instead of deriving one from `method`.
    Spelling(String),
}

/// Configuration form of an override entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOverride {
    /// `method` spelling of the property the rule applies to.
    pub method: String,
    /// The rule itself.
    #[serde(flatten)]
    pub rule: OverrideRule,
}

/// Lookup table of per-property exceptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    rules: BTreeMap<String, OverrideRule>,
}

impl OverrideTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the exceptions the generator ships with.
    ///
    /// - `MozAppearance` is hidden behind its own pref so existing content
    ///   special-casing Gecko does not start seeing it.
    /// - `BackdropFilter` availability depends on more than one pref.
    /// - `float` is exposed as `cssFloat`, the one name whose camel-case
    ///   form does not follow from the dashed name.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert(
            "MozAppearance",
            OverrideRule::AliasPref("layout.css.moz-appearance.webidl.enabled".to_owned()),
        );
        table.insert(
            "BackdropFilter",
            OverrideRule::Func("nsCSSProps::IsBackdropFilterAvailable".to_owned()),
        );
        table.insert("CssFloat", OverrideRule::Spelling("cssFloat".to_owned()));
        table
    }

    /// Adds or replaces the rule for `method`.
    pub fn insert(&mut self, method: impl Into<String>, rule: OverrideRule) {
        self.rules.insert(method.into(), rule);
    }

    /// Merges configured entries over the current rules.
    #[must_use]
    pub fn with_entries<'a>(mut self, entries: impl IntoIterator<Item = &'a PropertyOverride>) -> Self {
        for entry in entries {
            self.insert(entry.method.clone(), entry.rule.clone());
        }
        self
    }

    /// Returns the forced pref for an alias, if any.
    #[must_use]
    pub fn alias_pref(&self, method: &str) -> Option<&str> {
        match self.rules.get(method) {
            Some(OverrideRule::AliasPref(pref)) => Some(pref),
            _ => None,
        }
    }

    /// Returns the availability-check function for a property, if any.
    #[must_use]
    pub fn availability_func(&self, method: &str) -> Option<&str> {
        match self.rules.get(method) {
            Some(OverrideRule::Func(func)) => Some(func),
            _ => None,
        }
    }

    /// Returns the fixed primary spelling for a property, if any.
    #[must_use]
    pub fn spelling(&self, method: &str) -> Option<&str> {
        match self.rules.get(method) {
            Some(OverrideRule::Spelling(spelling)) => Some(spelling),
            _ => None,
        }
    }

    /// Lists override methods that no property in `table` uses.
    #[must_use]
    pub fn unmatched<'a>(&'a self, table: &PropertyTable) -> Vec<&'a str> {
        self.rules
            .keys()
            .filter(|method| !table.iter().any(|d| &d.method == *method))
            .map(String::as_str)
            .collect()
    }

    /// Number of rules in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether the table holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
