//! Artifact kinds a family can require.

use std::fmt;

use serde::Serialize;

/// One kind of generated file.
///
/// Variants are declared in emission order; sorting a set of kinds yields the
/// order in which the orchestrator renders and writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Board constant definitions (`mpconfigboard.h`).
    ConstantsHeader,
    /// Build variables (`mpconfigboard.mk`).
    BuildVariables,
    /// Peripheral registration table (`pins.c`).
    PeripheralTable,
    /// Board lifecycle hooks (`board.c`).
    InitStub,
    /// Vendor SDK configuration (`sdkconfig`).
    VendorSdkConfig,
    /// Vendor board configuration header (`pico-sdk-configboard.h`).
    VendorBoardHeader,
}

impl ArtifactKind {
    /// Artifacts every family produces.
    pub const COMMON: [ArtifactKind; 4] = [
        ArtifactKind::ConstantsHeader,
        ArtifactKind::BuildVariables,
        ArtifactKind::PeripheralTable,
        ArtifactKind::InitStub,
    ];

    /// File name written into the destination directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::ConstantsHeader => "mpconfigboard.h",
            Self::BuildVariables => "mpconfigboard.mk",
            Self::PeripheralTable => "pins.c",
            Self::InitStub => "board.c",
            Self::VendorSdkConfig => "sdkconfig",
            Self::VendorBoardHeader => "pico-sdk-configboard.h",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
