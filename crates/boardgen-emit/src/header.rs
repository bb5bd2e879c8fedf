//! Constants header (`mpconfigboard.h`).

use boardgen_family::ArtifactKind;
use boardgen_model::{BusKind, FlashKind, QspiLine, SpiFlashLine};

use crate::context::GenContext;
use crate::generator::Generator;
use crate::text::{define, define_unaligned, pin_expr, pin_ref, quoted, Blocks};

/// Board name, MCU, LEDs, flash pins, crystal, PSRAM and default bus pins.
pub struct ConstantsHeader;

impl Generator for ConstantsHeader {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ConstantsHeader
    }

    fn render(&self, ctx: &GenContext<'_>) -> String {
        let mut out = ctx.banner();
        out.push_str("#pragma once\n\n");
        for include in ctx.rules.header_includes {
            out.push_str(&format!("#include \"{include}\"\n"));
        }
        if !ctx.rules.header_includes.is_empty() {
            out.push('\n');
        }

        let mut blocks = Blocks::new();
        let board = ctx.config.board();
        blocks.push(define("MICROPY_HW_BOARD_NAME", &quoted(&board.name)));
        blocks.push(define("MICROPY_HW_MCU_NAME", &quoted(&board.mcu)));
        blocks.end_block();

        led_block(ctx, &mut blocks);
        flash_block(ctx, &mut blocks);

        if ctx.rules.emits_crystal {
            if let Some(has_crystal) = board.has_crystal {
                blocks.push(define_unaligned(
                    "BOARD_HAS_CRYSTAL",
                    if has_crystal { "1" } else { "0" },
                ));
                blocks.end_block();
            }
        }

        psram_block(ctx, &mut blocks);
        bus_blocks(ctx, &mut blocks);
        board_bus_block(ctx, &mut blocks);

        out.push_str(&blocks.finish());
        out
    }
}

fn led_block(ctx: &GenContext<'_>, blocks: &mut Blocks) {
    let Some(led) = ctx.config.led() else {
        return;
    };
    for (name, pin) in [
        ("MICROPY_HW_LED_STATUS", &led.status),
        ("MICROPY_HW_NEOPIXEL", &led.neopixel),
        ("CIRCUITPY_STATUS_LED_POWER", &led.neopixel_power),
    ] {
        if let Some(pin) = pin {
            blocks.push(define(name, &pin_expr(pin)));
        }
    }
    blocks.end_block();
}

/// Pin assignments for the declared flash kind, inside `#if <TOKEN>`.
fn flash_block(ctx: &GenContext<'_>, blocks: &mut Blocks) {
    let (Some(flash), Some(map)) = (ctx.config.flash(), ctx.rules.flash_pin_map) else {
        return;
    };
    let Some(kind) = flash.kind() else {
        return;
    };
    let Some(token) = kind.filesystem_token() else {
        return;
    };

    let lines: Vec<String> = match kind {
        FlashKind::Qspi => QspiLine::ALL
            .iter()
            .filter_map(|line| {
                let pp = flash.qspi_line(*line)?;
                Some(define(
                    &format!("MICROPY_QSPI_{}", line.token()),
                    &format!("{map}({}, {})", pp.port, pp.pin),
                ))
            })
            .collect(),
        FlashKind::Spi => SpiFlashLine::ALL
            .iter()
            .filter_map(|line| {
                let pin = flash.spi_line(*line)?;
                Some(define_unaligned(
                    &format!("SPI_FLASH_{}_PIN", line.token()),
                    &pin_ref(pin),
                ))
            })
            .collect(),
        FlashKind::None | FlashKind::DeviceList => Vec::new(),
    };
    if lines.is_empty() {
        return;
    }

    blocks.push(format!("#if {token}\n"));
    for line in lines {
        blocks.push(line);
    }
    blocks.push("#endif\n");
    blocks.end_block();
}

fn psram_block(ctx: &GenContext<'_>, blocks: &mut Blocks) {
    if !ctx.rules.supports_psram {
        return;
    }
    let Some(psram) = ctx.config.psram() else {
        return;
    };
    for (name, value) in [
        ("MICROPY_HW_PSRAM_SIZE", &psram.size),
        ("MICROPY_HW_PSRAM_MODE", &psram.mode),
        ("MICROPY_HW_PSRAM_FREQ", &psram.freq),
    ] {
        if let Some(value) = value {
            blocks.push(define(name, &quoted(value)));
        }
    }
    blocks.end_block();
}

/// One block of `DEFAULT_<BUS>_BUS_<ROLE>` per declared bus.
fn bus_blocks(ctx: &GenContext<'_>, blocks: &mut Blocks) {
    let Some(buses) = ctx.config.buses() else {
        return;
    };
    for kind in BusKind::ALL {
        for (role, pin) in buses.pins(kind) {
            let name = format!("DEFAULT_{}_BUS_{}", kind.token(), role.token());
            blocks.push(define(&name, &pin_expr(pin)));
        }
        blocks.end_block();
    }
}

/// `CIRCUITPY_BOARD_<BUS>` for families that expose a board bus object.
/// Emitted only when every role of the bus is declared.
fn board_bus_block(ctx: &GenContext<'_>, blocks: &mut Blocks) {
    let (Some(kind), Some(buses)) = (ctx.rules.board_bus, ctx.config.buses()) else {
        return;
    };
    let pins = buses.pins(kind);
    if pins.len() != kind.roles().len() {
        return;
    }

    let fields: Vec<String> = pins
        .iter()
        .map(|(role, pin)| format!(".{} = {}", role.as_str(), pin_ref(pin)))
        .collect();
    let name = format!("CIRCUITPY_BOARD_{}", kind.token());
    blocks.push(define(&name, "(1)"));
    blocks.push(define(
        &format!("{name}_PIN"),
        &format!("{{{}}}", fields.join(", ")),
    ));
    blocks.end_block();
}
