//! WebIDL emitter.
//!
//! Serializes a header comment block, the interface clause and one attribute
//! declaration per [`GeneratedAttribute`]. Writes go straight to the sink and
//! the first failure aborts the interface.

use std::io::Write;

use crate::error::WriteError;
use crate::target::InterfaceTarget;
use crate::transform::GeneratedAttribute;

/// Comment block written at the top of every generated interface.
pub const DEFAULT_HEADER: &str = concat!(
    "/* THIS IS AN AUTOGENERATED FILE.  DO NOT EDIT */\n",
    "\n",
    "/* -*- Mode: C++; tab-width: 8; indent-tabs-mode: nil; c-basic-offset: 2 -*- */\n",
    "/* vim: set ts=8 sts=2 et sw=2 tw=80: */\n",
    "/* This Source Code Form is subject to the terms of the Mozilla Public\n",
    " * License, v. 2.0. If a copy of the MPL was not distributed with this\n",
    " * file, You can obtain one at https://mozilla.org/MPL/2.0/. */\n",
);

/// Interface every generated interface inherits from.
pub const DEFAULT_PARENT_INTERFACE: &str = "CSSStyleDeclaration";

/// Annotations every attribute carries, after the binding template.
const MANDATORY_ANNOTATIONS: [&str; 3] = [
    "CEReactions",
    "SetterThrows",
    "SetterNeedsSubjectPrincipal=NonSystem",
];

/// Surrounding text shared by all interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceLayout<'a> {
    /// Comment block preceding the interface.
    pub header: &'a str,
    /// Parent interface name.
    pub parent: &'a str,
}

impl Default for InterfaceLayout<'_> {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER,
            parent: DEFAULT_PARENT_INTERFACE,
        }
    }
}

/// Extended attributes of one attribute declaration, in emission order.
#[must_use]
pub fn annotations(attribute: &GeneratedAttribute) -> Vec<String> {
    std::iter::once(attribute.template.annotation())
        .chain(MANDATORY_ANNOTATIONS.iter().map(|a| (*a).to_owned()))
        .chain(attribute.gate.annotation())
        .chain(
            attribute
                .binding_aliases
                .iter()
                .map(|alias| format!("BindingAlias=\"{alias}\"")),
        )
        .collect()
}

/// One attribute declaration line, including the trailing newline.
#[must_use]
pub fn attribute_line(attribute: &GeneratedAttribute) -> String {
    format!(
        "  [{}] attribute [LegacyNullToEmptyString] UTF8String {};\n",
        annotations(attribute).join(", "),
        attribute.spelling
    )
}

/// Header block and interface clause, up to and including the opening brace.
#[must_use]
pub fn interface_preamble(layout: &InterfaceLayout<'_>, target: &InterfaceTarget) -> String {
    let exposure = target.pref.as_deref().map_or_else(
        || "[Exposed=Window]".to_owned(),
        |pref| format!("[Exposed=Window, Pref=\"{pref}\"]"),
    );
    format!(
        "{header}\n{exposure}\ninterface {name} : {parent} {{\n",
        header = layout.header,
        name = target.interface,
        parent = layout.parent,
    )
}

const INTERFACE_CLOSE: &str = "};\n";

/// Writes a complete interface to `sink`.
///
/// # Errors
///
/// Returns [`WriteError::Sink`] as soon as any write fails; nothing after
/// the failing write is attempted.
pub fn write_interface<W: Write>(
    sink: &mut W,
    layout: &InterfaceLayout<'_>,
    target: &InterfaceTarget,
    attributes: &[GeneratedAttribute],
) -> Result<(), WriteError> {
    let sink_error = |source| WriteError::Sink {
        interface: target.interface.clone(),
        source,
    };

    sink.write_all(interface_preamble(layout, target).as_bytes())
        .map_err(sink_error)?;
    for attribute in attributes {
        sink.write_all(attribute_line(attribute).as_bytes())
            .map_err(sink_error)?;
    }
    sink.write_all(INTERFACE_CLOSE.as_bytes())
        .map_err(sink_error)?;
    sink.flush().map_err(sink_error)
}

/// Renders a complete interface into a string.
#[must_use]
pub fn render_interface(
    layout: &InterfaceLayout<'_>,
    target: &InterfaceTarget,
    attributes: &[GeneratedAttribute],
) -> String {
    let mut content = interface_preamble(layout, target);
    for attribute in attributes {
        content.push_str(&attribute_line(attribute));
    }
    content.push_str(INTERFACE_CLOSE);
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{Gate, TemplateBinding};
    use rstest::rstest;
    use std::io;

    fn attribute(spelling: &str, gate: Gate, aliases: &[&str]) -> GeneratedAttribute {
        GeneratedAttribute {
            spelling: spelling.to_owned(),
            binding_aliases: aliases.iter().map(|a| (*a).to_owned()).collect(),
            gate,
            template: TemplateBinding {
                template: "CSS2Property".to_owned(),
                property_id: "background_color".to_owned(),
            },
        }
    }

    #[rstest]
    fn attribute_line_orders_annotations() {
        let line = attribute_line(&attribute(
            "backgroundColor",
            Gate::Pref("layout.css.bg.enabled".to_owned()),
            &["background-color"],
        ));
        assert_eq!(
            line,
            "  [BindingTemplate=(CSS2Property, eCSSProperty_background_color), CEReactions, \
             SetterThrows, SetterNeedsSubjectPrincipal=NonSystem, Pref=\"layout.css.bg.enabled\", \
             BindingAlias=\"background-color\"] attribute [LegacyNullToEmptyString] UTF8String \
             backgroundColor;\n"
        );
    }

    #[rstest]
    fn unconditional_attribute_has_no_gate_annotation() {
        let list = annotations(&attribute("color", Gate::Unconditional, &[]));
        assert_eq!(list.len(), 4);
        assert!(!list.iter().any(|a| a.starts_with("Pref") || a == "ChromeOnly"));
    }

    #[rstest]
    #[case::ungated(InterfaceTarget::css2_properties(), "[Exposed=Window]\ninterface CSS2Properties : CSSStyleDeclaration {\n")]
    #[case::gated(
        InterfaceTarget::css_position_try_descriptors(),
        "[Exposed=Window, Pref=\"layout.css.anchor-positioning.enabled\"]\ninterface CSSPositionTryDescriptors : CSSStyleDeclaration {\n"
    )]
    fn preamble_carries_interface_gate(#[case] target: InterfaceTarget, #[case] clause: &str) {
        let preamble = interface_preamble(&InterfaceLayout::default(), &target);
        assert!(preamble.starts_with("/* THIS IS AN AUTOGENERATED FILE.  DO NOT EDIT */\n"));
        assert!(preamble.ends_with(&format!(" */\n\n{clause}")), "{preamble}");
    }

    #[rstest]
    fn streamed_and_rendered_output_match() {
        let target = InterfaceTarget::css2_properties();
        let attributes = [
            attribute("color", Gate::Unconditional, &[]),
            attribute("MozBoxFlex", Gate::ChromeOnly, &["-moz-box-flex"]),
        ];
        let layout = InterfaceLayout::default();
        let mut sink = Vec::new();
        write_interface(&mut sink, &layout, &target, &attributes).expect("write to vec");
        let rendered = render_interface(&layout, &target, &attributes);
        assert_eq!(String::from_utf8(sink).expect("UTF-8 output"), rendered);
        assert!(rendered.ends_with("UTF8String MozBoxFlex;\n};\n"));
    }

    struct FailingSink {
        budget: usize,
        writes: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.writes == self.budget {
                return Err(io::Error::other("disk full"));
            }
            self.writes += 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[rstest]
    fn first_write_error_aborts() {
        let mut sink = FailingSink {
            budget: 1,
            writes: 0,
        };
        let attributes = [
            attribute("color", Gate::Unconditional, &[]),
            attribute("zoom", Gate::Unconditional, &[]),
        ];
        let err = write_interface(
            &mut sink,
            &InterfaceLayout::default(),
            &InterfaceTarget::css2_properties(),
            &attributes,
        )
        .expect_err("second write fails");
        assert!(matches!(err, WriteError::Sink { interface, .. } if interface == "CSS2Properties"));
        assert_eq!(sink.writes, 1);
    }
}
