//! Peripheral registration table (`pins.c`).

use boardgen_family::ArtifactKind;

use crate::context::GenContext;
use crate::generator::Generator;
use crate::text::{pin_ref, qstr};

/// Board objects appended after the pins, in this order.
const BOARD_OBJECTS: [(&str, &str); 3] = [
    ("UART", "board_uart_obj"),
    ("SPI", "board_spi_obj"),
    ("I2C", "board_i2c_obj"),
];

/// Maps every logical pin name and alias to its pin object.
pub struct PeripheralTable;

impl Generator for PeripheralTable {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::PeripheralTable
    }

    fn render(&self, ctx: &GenContext<'_>) -> String {
        let mut out = ctx.banner();
        out.push_str("#include \"shared-bindings/board/__init__.h\"\n\n");
        out.push_str("static const mp_rom_map_elem_t board_module_globals_table[] = {\n");
        out.push_str("    CIRCUITPYTHON_BOARD_DICT_STANDARD_ITEMS\n\n");

        if let Some(pins) = ctx.config.pins() {
            for (name, physical) in pins {
                out.push_str(&entry(&qstr(name), &pin_ref(physical)));
            }
        }
        if let Some(aliases) = ctx.config.aliases() {
            for (alias, _) in aliases {
                // Validation guarantees every alias resolves.
                if let Some(physical) = ctx.config.resolve_alias(alias) {
                    out.push_str(&entry(&qstr(alias), &pin_ref(physical)));
                }
            }
        }

        out.push('\n');
        for (name, object) in BOARD_OBJECTS {
            out.push_str(&entry(&qstr(name), &format!("&{object}")));
        }
        out.push_str("};\n\n");
        out.push_str("MP_DEFINE_CONST_DICT(board_module_globals, board_module_globals_table);\n");
        out
    }
}

fn entry(key: &str, ptr: &str) -> String {
    format!("    {{ MP_ROM_QSTR({key}), MP_ROM_PTR({ptr}) }},\n")
}
