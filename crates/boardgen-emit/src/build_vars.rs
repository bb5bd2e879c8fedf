//! Build-variables file (`mpconfigboard.mk`).

use boardgen_family::ArtifactKind;

use crate::context::GenContext;
use crate::generator::Generator;
use crate::text::{assign, quoted, Blocks};

/// USB identity, chip selection, flash and sizing variables, and feature
/// switches.
pub struct BuildVariables;

impl Generator for BuildVariables {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::BuildVariables
    }

    fn render(&self, ctx: &GenContext<'_>) -> String {
        let mut blocks = Blocks::new();

        if let Some(usb) = ctx.config.usb() {
            if let Some(vid) = &usb.vid {
                blocks.push(assign("USB_VID", vid));
            }
            if let Some(pid) = &usb.pid {
                blocks.push(assign("USB_PID", pid));
            }
            if let Some(product) = &usb.product {
                blocks.push(assign("USB_PRODUCT", &quoted(product)));
            }
            if let Some(manufacturer) = &usb.manufacturer {
                blocks.push(assign("USB_MANUFACTURER", &quoted(manufacturer)));
            }
            blocks.end_block();
        }

        for var in ctx.rules.chip_vars {
            if let Some(value) = var.value(ctx.config) {
                blocks.push(assign(var.name, &value));
            }
        }
        blocks.end_block();

        if let Some(flash) = ctx.config.flash() {
            if let Some(token) = flash.kind().and_then(|k| k.filesystem_token()) {
                blocks.push(assign(token, "1"));
            }
            let lists_devices = ctx.rules.flash_kinds.iter().any(|k| k.uses_device_list());
            if let Some(devices) = flash.active_devices().filter(|_| lists_devices) {
                blocks.push(assign("EXTERNAL_FLASH_DEVICES", &quoted(&devices.join(", "))));
            }
            blocks.end_block();
        }

        sizing(ctx, &mut blocks);

        // Feature lines trail the last blank line, so switching one on adds
        // exactly that line.
        let mut out = blocks.finish_separated();
        for feature in ctx.config.enabled_features() {
            out.push_str(&assign(&format!("CIRCUITPY_{}", feature.to_uppercase()), "1"));
        }
        out
    }
}

/// `<PREFIX>_FLASH_*` and `<PREFIX>_PSRAM_*` for families with a sizing prefix.
fn sizing(ctx: &GenContext<'_>, blocks: &mut Blocks) {
    let Some(prefix) = ctx.rules.sizing_prefix else {
        return;
    };

    if let Some(flash) = ctx.config.flash() {
        for (suffix, value) in [
            ("FLASH_SIZE", &flash.size),
            ("FLASH_MODE", &flash.mode),
            ("FLASH_FREQ", &flash.freq),
        ] {
            if let Some(value) = value {
                blocks.push(assign(&format!("{prefix}_{suffix}"), value));
            }
        }
        blocks.end_block();
    }

    if !ctx.rules.supports_psram {
        return;
    }
    if let Some(psram) = ctx.config.psram() {
        for (suffix, value) in [
            ("PSRAM_SIZE", &psram.size),
            ("PSRAM_MODE", &psram.mode),
            ("PSRAM_FREQ", &psram.freq),
        ] {
            if let Some(value) = value {
                blocks.push(assign(&format!("{prefix}_{suffix}"), value));
            }
        }
        blocks.end_block();
    }
}
