//! The generator trait and the lookup from artifact kind to generator.

use boardgen_family::ArtifactKind;

use crate::build_vars::BuildVariables;
use crate::context::GenContext;
use crate::header::ConstantsHeader;
use crate::init_stub::InitStub;
use crate::pin_table::PeripheralTable;
use crate::vendor::{VendorBoardHeader, VendorSdkConfig};

/// Renders one artifact.
///
/// Generators are pure: the output depends only on the context, and no
/// generator reads another's output.
pub trait Generator {
    /// The artifact this generator produces.
    fn kind(&self) -> ArtifactKind;

    /// Render the artifact's full contents.
    fn render(&self, ctx: &GenContext<'_>) -> String;
}

/// The generator responsible for an artifact kind.
pub fn generator_for(kind: ArtifactKind) -> &'static dyn Generator {
    match kind {
        ArtifactKind::ConstantsHeader => &ConstantsHeader,
        ArtifactKind::BuildVariables => &BuildVariables,
        ArtifactKind::PeripheralTable => &PeripheralTable,
        ArtifactKind::InitStub => &InitStub,
        ArtifactKind::VendorSdkConfig => &VendorSdkConfig,
        ArtifactKind::VendorBoardHeader => &VendorBoardHeader,
    }
}
