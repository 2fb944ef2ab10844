// CLASSIFICATION: COMMUNITY
// Filename: pins.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Pin records and capability flags.

use bitflags::bitflags;

bitflags! {
    /// What a physical pin can be used for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        const VALID = 1 << 0;
        const GPIO = 1 << 1;
        const PWM = 1 << 2;
        const FAST_GPIO = 1 << 3;
        const SPI = 1 << 4;
        const I2C = 1 << 5;
        const AIO = 1 << 6;
        const UART = 1 << 7;
        const I2C_ALT = 1 << 8;
    }
}

impl Capabilities {
    /// Short lowercase labels for every set flag except `VALID`.
    pub fn labels(self) -> Vec<&'static str> {
        self.iter_names()
            .filter(|(_, flag)| *flag != Capabilities::VALID)
            .map(|(name, _)| match name {
                "GPIO" => "gpio",
                "PWM" => "pwm",
                "FAST_GPIO" => "fast_gpio",
                "SPI" => "spi",
                "I2C" => "i2c",
                "AIO" => "aio",
                "UART" => "uart",
                _ => "i2c_alt",
            })
            .collect()
    }
}

/// Static pin-mux table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMux {
    pub name: &'static str,
    /// SoC gpio number, 0 when the pin is not a gpio.
    pub gpio: u32,
    pub caps: Capabilities,
}

/// Resolved pin on a board descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinInfo {
    pub name: String,
    pub gpio: u32,
    pub caps: Capabilities,
}

impl From<&PinMux> for PinInfo {
    fn from(mux: &PinMux) -> Self {
        Self {
            name: mux.name.to_string(),
            gpio: mux.gpio,
            caps: mux.caps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_skip_valid() {
        let caps = Capabilities::VALID | Capabilities::GPIO | Capabilities::UART;
        assert_eq!(caps.labels(), vec!["gpio", "uart"]);
        assert!(Capabilities::VALID.labels().is_empty());
    }
}
