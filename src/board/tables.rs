// CLASSIFICATION: COMMUNITY
// Filename: tables.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Header pin tables, indexed by physical pin number (index 0 unused).

use super::pins::{Capabilities, PinMux};

const NONE: Capabilities = Capabilities::empty();
/// Power, ground and other fixed-function pins.
const P: Capabilities = Capabilities::VALID;
const G: Capabilities = P.union(Capabilities::GPIO);
const S: Capabilities = P.union(Capabilities::SPI);
const U: Capabilities = P.union(Capabilities::UART);
const GS: Capabilities = G.union(Capabilities::SPI);
const GU: Capabilities = G.union(Capabilities::UART);

const fn pin(name: &'static str, gpio: u32, caps: Capabilities) -> PinMux {
    PinMux { name, gpio, caps }
}

#[rustfmt::skip]
pub const CARAMBOLA2_PINS: [PinMux; 41] = [
    pin("INVALID",      0, NONE),
    // J12-1
    pin("GPIO17",      17, G),
    pin("GPIO16",      16, G),
    pin("GPIO15",      15, G),
    pin("GPIO14",      14, G),
    pin("GPIO13",      13, G),
    pin("GPIO1",        1, G),
    pin("GPIO0",        0, G),
    pin("GPIO11",      11, G),
    pin("GPIO12",      12, G),
    pin("GPIO18",      18, G),
    // J12-11
    pin("GPIO19",      19, G),
    pin("GPIO20",      20, G),
    pin("GPIO21",      21, G),
    pin("GPIO22",      22, G),
    pin("GPIO23",      23, G),
    pin("3.3VD",        0, P),
    pin("3.3VD",        0, P),
    pin("5VD",          0, P),
    pin("5VD",          0, P),
    pin("GND",          0, P),
    // J13-1
    pin("UART_TX",      9, GU),
    pin("UART_RX",     10, GU),
    pin("UART_TX_C",    0, P),
    pin("UART_RX_C",    0, P),
    pin("GND",          0, P),
    pin("USB+",         0, P),
    pin("USB-",         0, P),
    pin("USB+_C",       0, P),
    pin("USB-_C",       0, P),
    pin("GND",          0, P),
    // J13-11
    pin("SPI_CS0",      2, GS),
    pin("SPI_CLK",      3, GS),
    pin("SPI_MOSI",     4, GS),
    pin("SPI_MISO",     5, GS),
    pin("RESET",        0, P),
    pin("3.3VD",        0, P),
    pin("3.3VD",        0, P),
    pin("5VD",          0, P),
    pin("5VD",          0, P),
    pin("GND",          0, P),
];

#[rustfmt::skip]
pub const CENTIPEDE_PINS: [PinMux; 41] = [
    pin("INVALID",      0, NONE),
    // J1-1
    pin("GND",          0, P),
    pin("USB+",         0, P),
    pin("USB-",         0, P),
    pin("GPIO18",      18, G),
    pin("RESET",        0, P),
    pin("SPI_CLK",      2, S),
    pin("SPI_MISO",     5, S),
    pin("SPI_MOSI",     4, S),
    pin("SPI_CS0",      2, S),
    pin("GPIO20",      20, G),
    // J1-11
    pin("GPIO19",      19, G),
    pin("UART_TX",      9, U),
    pin("UART_RX",     10, U),
    pin("5VD",          0, P),
    pin("GPIO21",      21, G),
    pin("GND",          0, P),
    pin("ETH_PWR_1",    0, P),
    pin("ETH_PWR_1",    0, P),
    pin("ETH_PWR_2",    0, P),
    pin("ETH_PWR_2",    0, P),
    // J2-1
    pin("GPIO13",      13, G),
    pin("GPIO15",      15, G),
    pin("GPIO17",      17, G),
    pin("GPIO0",        0, G),
    pin("GPIO1",        1, G),
    pin("GPIO14",      14, G),
    pin("3.3VD",        0, P),
    pin("GPIO22",      22, G),
    pin("GPIO23",      23, G),
    pin("GPIO24",      24, G),
    // J2-11
    pin("GPIO11",      11, G),
    pin("GPIO7",        7, G),
    pin("GPIO6",        6, G),
    pin("JTAG_TCK",     0, P),
    pin("GPIO8",        8, G),
    pin("GND",          0, P),
    pin("NC",           0, P),
    pin("NC",           0, P),
    pin("NC",           0, P),
    pin("NC",           0, P),
];

#[rustfmt::skip]
pub const LIMA_PINS: [PinMux; 33] = [
    pin("INVALID",      0, NONE),
    // J1-1
    pin("GPIO11",      11, G),
    pin("GPIO12",      12, G),
    pin("GPIO13",      13, G),
    pin("GPIO14",      14, G),
    pin("GPIO15",      15, G),
    pin("GPIO17",      17, G),
    pin("GND",          0, P),
    pin("UART_TX",      9, G),
    pin("UART_RX",     10, G),
    pin("C_UART_TX",    9, G),
    // J1-11
    pin("C_UART_RX",   10, G),
    pin("5V",           0, P),
    pin("5V",           0, P),
    pin("3.3V",         0, P),
    pin("3.3V",         0, P),
    pin("GND",          0, P),
    // J2-1
    pin("C_USB_D_N",    0, P),
    pin("C_USB_D_P",    0, P),
    pin("USB_D_N",      0, P),
    pin("USB_D_P",      0, P),
    pin("SPI_MOSI",     7, G),
    pin("SPI_MISO",     8, G),
    pin("SPI_CLK",      6, G),
    pin("SPI_CS0",      5, G),
    pin("RST",          0, P),
    pin("GPIO0",        0, G),
    // J2-11
    pin("GPIO1",        1, G),
    pin("GPIO2",        2, G),
    pin("GPIO3",        3, G),
    pin("GPIO4",        4, G),
    pin("GND",          0, P),
    pin("GND",          0, P),
];

#[rustfmt::skip]
pub const RAMBUTAN_PINS: [PinMux; 41] = [
    pin("INVALID",      0, NONE),
    // J1-1
    pin("GPIO0",        0, G),
    pin("GPIO1",        1, G),
    pin("GPIO2",        2, G),
    pin("GPIO3",        3, G),
    pin("JTAG_RST",     0, P),
    pin("SYS_RST_L",    0, P),
    pin("GND",          0, P),
    pin("USB2_DM",      0, P),
    pin("USB2_DP",      0, P),
    pin("GND",          0, P),
    // J1-11
    pin("GPIO11",      11, G),
    pin("GPIO12",      12, G),
    pin("GPIO13",      13, G),
    pin("GPIO14",      14, G),
    pin("GPIO15",      15, G),
    pin("GPIO16",      16, G),
    pin("GPIO18",      18, G),
    pin("GPIO21",      21, G),
    pin("GPIO22",      22, G),
    pin("GPIO4",        4, G),
    // J2-1
    pin("GPIO9",        9, G),
    pin("GPIO10",      10, G),
    pin("GND",          0, P),
    pin("NC?",          0, P),
    pin("NC?",          0, P),
    pin("3.3VD",        0, P),
    pin("3.3VD",        0, P),
    pin("GND",          0, P),
    pin("5VD",          0, P),
    pin("5VD",          0, P),
    // J2-11
    pin("GND",          0, P),
    pin("2.5VD_IO",     0, P),
    pin("2.5VD_IO",     0, P),
    pin("PCIE_LED",     0, P),
    pin("GND",          0, P),
    pin("GND",          0, P),
    pin("GPIO6",        6, G),
    pin("GPIO5",        5, G),
    pin("GPIO8",        8, G),
    pin("GPIO7",        7, G),
];
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_zero_is_unused() {
        for table in [&CARAMBOLA2_PINS[..], &CENTIPEDE_PINS[..], &LIMA_PINS[..], &RAMBUTAN_PINS[..]] {
            assert_eq!(table[0].name, "INVALID");
            assert!(table[0].caps.is_empty());
        }
    }

    #[test]
    fn named_gpio_pins_match_their_gpio() {
        for p in RAMBUTAN_PINS.iter().chain(LIMA_PINS.iter()) {
            if let Some(n) = p.name.strip_prefix("GPIO") {
                assert_eq!(n.parse::<u32>().unwrap(), p.gpio, "{}", p.name);
            }
        }
    }
}
