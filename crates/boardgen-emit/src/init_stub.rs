//! Board lifecycle hooks (`board.c`).
//!
//! The stub is the same for every board. It exists so each board links its
//! own `board_init`, `board_requests_safe_mode` and `reset_board` symbols;
//! board authors fill the bodies in by hand after generation.

use boardgen_family::ArtifactKind;

use crate::context::GenContext;
use crate::generator::Generator;

const BODY: &str = "\
#include \"supervisor/board.h\"
#include \"mpconfigboard.h\"

void board_init(void) {
}

bool board_requests_safe_mode(void) {
    return false;
}

void reset_board(void) {
}
";

pub struct InitStub;

impl Generator for InitStub {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::InitStub
    }

    fn render(&self, ctx: &GenContext<'_>) -> String {
        let mut out = ctx.banner();
        out.push_str(BODY);
        out
    }
}
