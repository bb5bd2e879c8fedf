//! Family resolution for boardgen.
//!
//! Maps a declared hardware family to its [`FamilyRules`]: which artifacts it
//! produces, which flash kinds it accepts, which fields it requires, and the
//! handful of family-specific switches the generators consult. This is the
//! only place that knows how families differ.

pub mod artifact;
pub mod rules;

pub use artifact::ArtifactKind;
pub use rules::{all, resolve, rules_for, ChipVar, FamilyRules};
