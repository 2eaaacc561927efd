//! Interface targets generated from a property table.

use serde::{Deserialize, Serialize};

use crate::table::RuleType;

/// One WebIDL interface to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceTarget {
    /// Interface name, for example `CSS2Properties`.
    pub interface: String,
    /// Rule type a property must be valid in to be included.
    pub rule_type: RuleType,
    /// Binding template named in every `BindingTemplate` annotation.
    pub template: String,
    /// Pref gating the whole interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pref: Option<String>,
    /// Output file name; defaults to `<interface>.webidl`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl InterfaceTarget {
    /// Creates an ungated target.
    #[must_use]
    pub fn new(
        interface: impl Into<String>,
        rule_type: RuleType,
        template: impl Into<String>,
    ) -> Self {
        Self {
            interface: interface.into(),
            rule_type,
            template: template.into(),
            pref: None,
            file: None,
        }
    }

    /// Gates the whole interface behind `pref`.
    #[must_use]
    pub fn with_pref(mut self, pref: impl Into<String>) -> Self {
        self.pref = Some(pref.into());
        self
    }

    /// Style-rule properties exposed on `CSSStyleDeclaration`.
    #[must_use]
    pub fn css2_properties() -> Self {
        Self::new("CSS2Properties", RuleType::Style, "CSS2Property")
    }

    /// Descriptors valid in `@page` rules.
    #[must_use]
    pub fn css_page_descriptors() -> Self {
        Self::new("CSSPageDescriptors", RuleType::Page, "CSSPageDescriptor")
    }

    /// Descriptors valid in `@position-try` rules.
    #[must_use]
    pub fn css_position_try_descriptors() -> Self {
        Self::new(
            "CSSPositionTryDescriptors",
            RuleType::PositionTry,
            "CSSPositionTryDescriptor",
        )
        .with_pref("layout.css.anchor-positioning.enabled")
    }

    /// The three interfaces generated by default.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::css2_properties(),
            Self::css_page_descriptors(),
            Self::css_position_try_descriptors(),
        ]
    }

    /// File name the interface is written to.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.file
            .clone()
            .unwrap_or_else(|| format!("{}.webidl", self.interface))
    }
}
