//! Board documents shared by the generator tests.

use boardgen_family::rules_for;
use boardgen_model::{parse, Configuration};

use crate::context::{EmitOptions, GenContext};
use crate::generator::Generator;

pub(crate) const OPTIONS: EmitOptions = EmitOptions {
    copyright_year: 2025,
};

pub(crate) const FEATHER: &str = r#"
[board]
name = "Feather nRF52840 Express"
mcu = "nRF52840"
family = "nordic"
has_crystal = true
chip_variant = "NRF52840"
directory_name = "Feather_nRF52840_Express"

[usb]
vid = "0x239A"
pid = "0x802A"
product = "Feather nRF52840 Express"
manufacturer = "Adafruit Industries LLC"

[led]
status = "P1_15"
neopixel = "P0_16"

[flash]
kind = "qspi"
data0_port = 0
data0_pin = 17
data1_port = 0
data1_pin = 22
data2_port = 0
data2_pin = 23
data3_port = 0
data3_pin = 21
sck_port = 0
sck_pin = 19
cs_port = 0
cs_pin = 20
devices = ["GD25Q16C"]

[buses.i2c]
scl = "P0_11"
sda = "P0_12"

[buses.uart]
rx = "P0_24"
tx = "P0_25"

[pins]
D13 = "P1_09"
LED = "P1_15"
SCL = "P0_11"
SDA = "P0_12"

[aliases]
RED_LED = "D13"

[features]
usb_midi = true
ulab = false
"#;

pub(crate) const PICO: &str = r#"
[board]
name = "Raspberry Pi Pico"
mcu = "rp2040"
family = "raspberrypi"
has_crystal = false
chip_variant = "RP2040"
chip_family = "rp2"

[usb]
vid = "0x2E8A"
pid = "0x000B"
product = "Pico"
manufacturer = "Raspberry Pi"

[flash]
kind = "device-list"
devices = ["W25Q16JVxQ"]

[buses.i2c]
scl = "GP5"
sda = "GP4"

[pins]
GP0 = "GPIO0"
GP25 = "GPIO25"

[aliases]
LED = "GP25"

[pico_sdk_config]
PICO_FLASH_SPI_CLKDIV = 2
PICO_XOSC_STARTUP_DELAY_MULTIPLIER = 64
PICO_RP2040_B0_SUPPORTED = false
"#;

pub(crate) const ESP: &str = r#"
[board]
name = "ESP32-S3-DevKitC"
mcu = "ESP32S3"
family = "espressif"
idf_target = "esp32s3"

[usb]
vid = "0x303a"
pid = "0x81B5"
product = "ESP32-S3-DevKitC"
manufacturer = "Espressif"

[flash]
size = "8MB"
mode = "qio"
freq = "80m"

[psram]
size = "2MB"
mode = "qio"
freq = "80m"

[features]
camera = false
bitmapfilter = false

[sdkconfig]
CONFIG_ESP_CONSOLE_USB_CDC = true
CONFIG_SPIRAM = false
CONFIG_LWIP_LOCAL_HOSTNAME = "espressif-esp32s3"
"#;

pub(crate) fn board(toml: &str) -> Configuration {
    parse(toml).unwrap()
}

/// Render one generator against a parsed document.
pub(crate) fn render(generator: &dyn Generator, config: &Configuration) -> String {
    let ctx = GenContext {
        config,
        rules: rules_for(config.family()),
        options: &OPTIONS,
    };
    generator.render(&ctx)
}
