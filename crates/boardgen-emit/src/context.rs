//! Inputs shared by every generator.

use boardgen_family::FamilyRules;
use boardgen_model::Configuration;

/// Run-level options that are not part of the board document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Year stamped into the license banner of generated sources.
    pub copyright_year: i32,
}

impl EmitOptions {
    pub fn new(copyright_year: i32) -> Self {
        Self { copyright_year }
    }
}

/// A validated configuration paired with its family's rules.
#[derive(Debug, Clone, Copy)]
pub struct GenContext<'a> {
    pub config: &'a Configuration,
    pub rules: &'a FamilyRules,
    pub options: &'a EmitOptions,
}

impl GenContext<'_> {
    /// License banner for C sources.
    pub(crate) fn banner(&self) -> String {
        crate::text::banner(self.options.copyright_year)
    }
}
