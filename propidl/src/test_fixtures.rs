//! Shared descriptor fixtures for unit tests.

use crate::table::{PropertyDescriptor, PropertyFlag, PropertyKind, PropertyTable, RuleType};

pub fn longhand(id: &str, name: &str, method: &str) -> PropertyDescriptor {
    PropertyDescriptor::new(id, name, method, PropertyKind::Longhand).with_rules([RuleType::Style])
}

pub fn alias(id: &str, name: &str, method: &str, prop_id: &str) -> PropertyDescriptor {
    PropertyDescriptor::new(
        id,
        name,
        method,
        PropertyKind::Alias {
            prop_id: prop_id.to_owned(),
        },
    )
    .with_rules([RuleType::Style])
}

pub fn table(descriptors: impl IntoIterator<Item = PropertyDescriptor>) -> PropertyTable {
    PropertyTable::from_descriptors(descriptors).expect("fixture table is valid")
}

/// A cross-section of real property shapes: plain, irregular, prefixed,
/// aliased, pref-gated, chrome-only, internal and rule-restricted.
pub fn sample_table() -> PropertyTable {
    table([
        longhand("background_color", "background-color", "BackgroundColor"),
        longhand("float", "float", "CssFloat"),
        longhand("transform", "transform", "Transform").with_aliases(["webkit_transform"]),
        alias("webkit_transform", "-webkit-transform", "WebkitTransform", "transform"),
        longhand("appearance", "appearance", "Appearance").with_aliases(["moz_appearance"]),
        alias("moz_appearance", "-moz-appearance", "MozAppearance", "appearance"),
        longhand("backdrop_filter", "backdrop-filter", "BackdropFilter")
            .with_pref("layout.css.backdrop-filter.enabled"),
        longhand("x_lang", "-x-lang", "XLang").with_flags([PropertyFlag::Internal]),
        longhand("moz_window_dragging", "-moz-window-dragging", "MozWindowDragging")
            .with_flags([PropertyFlag::EnabledInUaSheetsAndChrome]),
        longhand("overflow_wrap", "overflow-wrap", "OverflowWrap").with_aliases(["word_wrap"]),
        alias("word_wrap", "word-wrap", "WordWrap", "overflow_wrap"),
        longhand("user_select", "user-select", "UserSelect")
            .with_aliases(["webkit_user_select", "moz_user_select"]),
        alias("webkit_user_select", "-webkit-user-select", "WebkitUserSelect", "user_select"),
        alias("moz_user_select", "-moz-user-select", "MozUserSelect", "user_select")
            .with_pref("layout.css.moz-user-select.enabled"),
        longhand("size", "size", "Size").with_rules([RuleType::Page]),
        longhand("margin_top", "margin-top", "MarginTop").with_rules([
            RuleType::Style,
            RuleType::Page,
            RuleType::PositionTry,
        ]),
        longhand("position_anchor", "position-anchor", "PositionAnchor")
            .with_rules([RuleType::Style, RuleType::PositionTry])
            .with_pref("layout.css.anchor-positioning.enabled"),
    ])
}
