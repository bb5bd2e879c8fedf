//! Vendor SDK pass-through files: `sdkconfig` and `pico-sdk-configboard.h`.
//!
//! Both are flat dumps of a free-form map, sorted by key. Text values are
//! written verbatim, so any quoting the SDK expects must be part of the value.

use std::collections::BTreeMap;

use boardgen_family::ArtifactKind;
use boardgen_model::ConfigValue;

use crate::context::GenContext;
use crate::generator::Generator;

/// ESP-IDF `sdkconfig` fragment from the `sdkconfig` map.
pub struct VendorSdkConfig;

impl Generator for VendorSdkConfig {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::VendorSdkConfig
    }

    fn render(&self, ctx: &GenContext<'_>) -> String {
        entries(ctx.config.sdkconfig())
            .map(|(key, value)| match value {
                ConfigValue::Boolean(true) => format!("{key}=y\n"),
                ConfigValue::Boolean(false) => format!("# {key} is not set\n"),
                other => format!("{key}={other}\n"),
            })
            .collect()
    }
}

/// Pico SDK board header from the `pico_sdk_config` map.
pub struct VendorBoardHeader;

impl Generator for VendorBoardHeader {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::VendorBoardHeader
    }

    fn render(&self, ctx: &GenContext<'_>) -> String {
        let mut out = ctx.banner();
        out.push_str("#pragma once\n\n");
        for (key, value) in entries(ctx.config.pico_sdk_config()) {
            let value = match value {
                ConfigValue::Boolean(b) => u8::from(*b).to_string(),
                other => other.to_string(),
            };
            out.push_str(&format!("#define {key} {value}\n"));
        }
        out
    }
}

fn entries<'a>(
    map: Option<&'a BTreeMap<String, ConfigValue>>,
) -> impl Iterator<Item = (&'a String, &'a ConfigValue)> {
    map.into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{board, render, ESP, PICO};

    #[test]
    fn sdkconfig_entries_sorted_with_kconfig_booleans() {
        let out = render(&VendorSdkConfig, &board(ESP));
        assert_eq!(
            out,
            "CONFIG_ESP_CONSOLE_USB_CDC=y\n\
             CONFIG_LWIP_LOCAL_HOSTNAME=espressif-esp32s3\n\
             # CONFIG_SPIRAM is not set\n"
        );
    }

    #[test]
    fn empty_sdkconfig_is_empty() {
        let doc = ESP.split("[sdkconfig]").next().unwrap();
        assert_eq!(render(&VendorSdkConfig, &board(doc)), "");
    }

    #[test]
    fn board_header_defines() {
        let out = render(&VendorBoardHeader, &board(PICO));
        assert!(out.contains("SPDX-License-Identifier: MIT\n\n#pragma once\n\n"));
        assert!(out.ends_with(
            "#define PICO_FLASH_SPI_CLKDIV 2\n\
             #define PICO_RP2040_B0_SUPPORTED 0\n\
             #define PICO_XOSC_STARTUP_DELAY_MULTIPLIER 64\n"
        ));
    }
}
