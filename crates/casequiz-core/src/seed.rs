//! Built-in seed catalog compiled into the binary.

use std::path::Path;

use anyhow::Result;

use crate::parser::{parse_catalog_str, Catalog};

/// TOML source of the built-in catalog.
pub const BUILTIN_CATALOG: &str = include_str!("../data/cases.toml");

/// Parse the built-in catalog.
pub fn builtin_catalog() -> Result<Catalog> {
    parse_catalog_str(BUILTIN_CATALOG, Path::new("<builtin>"))
}
