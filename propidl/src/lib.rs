//! Generates CSS property WebIDL interfaces from a declarative property
//! table.
//!
//! The pipeline has three stages:
//!
//! - [`table`] loads descriptor records from TOML or JSON into an ordered
//!   [`table::PropertyTable`].
//! - [`transform`] selects the descriptors that belong to an
//!   [`target::InterfaceTarget`] and derives their spelling, binding aliases
//!   and exposure gate.
//! - [`emit`] serializes the resulting attributes as a WebIDL interface.
//!
//! [`config`] layers defaults, `propidl.toml`, `PROPIDL_*` variables and
//! command-line values; [`pipeline`] and [`output`] tie the stages to the
//! `propidl` binary.

pub mod config;
pub mod emit;
pub mod error;
pub mod output;
pub mod overrides;
pub mod pipeline;
pub mod table;
pub mod target;
pub mod transform;

#[cfg(test)]
mod test_fixtures;

pub use config::GeneratorConfig;
pub use error::PropidlError;
pub use table::{PropertyTable, load_table};
pub use transform::{GeneratedAttribute, GenerationRules, generate};
