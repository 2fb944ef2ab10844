// CLASSIFICATION: COMMUNITY
// Filename: soc.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Mux tables for the AR9331 and QCA955x families.
//!
//! Group order matters: the resolver stops at the first asserted group.

use super::{FunctionGroup, FunctionRegister, InputSignal, OutputSignal, SocMux};
use crate::gpio::access::GPIO_IN_FUNC;

const fn group(gpio: u32, name: &'static str, enable: &'static str) -> FunctionGroup {
    FunctionGroup {
        gpio,
        name,
        enable,
        inverted: false,
    }
}

const fn inverted(gpio: u32, name: &'static str, enable: &'static str) -> FunctionGroup {
    FunctionGroup {
        gpio,
        name,
        enable,
        inverted: true,
    }
}

const fn func(name: &'static str, reg: usize, bit: u32) -> FunctionRegister {
    FunctionRegister { name, reg, bit }
}

const AR9331_FUNC_1: usize = 0x28;

#[rustfmt::skip]
const AR9331_FUNCTIONS: &[FunctionRegister] = &[
    func("JTAG_DISABLE",        AR9331_FUNC_1, 0),
    func("UART_EN",             AR9331_FUNC_1, 1),
    func("UART_RTS_CTS_EN",     AR9331_FUNC_1, 2),
    func("ETH_SWITCH_LED0_EN",  AR9331_FUNC_1, 3),
    func("ETH_SWITCH_LED1_EN",  AR9331_FUNC_1, 4),
    func("ETH_SWITCH_LED2_EN",  AR9331_FUNC_1, 5),
    func("ETH_SWITCH_LED3_EN",  AR9331_FUNC_1, 6),
    func("ETH_SWITCH_LED4_EN",  AR9331_FUNC_1, 7),
    func("SPI_CS_EN1",          AR9331_FUNC_1, 13),
    func("SPI_CS_EN2",          AR9331_FUNC_1, 14),
    func("SPI_EN",              AR9331_FUNC_1, 18),
    func("I2SO_EN",             AR9331_FUNC_1, 26),
];

#[rustfmt::skip]
const AR9331_GROUPS: &[FunctionGroup] = &[
    group(2,  "SPI_CS0",   "SPI_EN"),
    group(3,  "SPI_CLK",   "SPI_EN"),
    group(4,  "SPI_MOSI",  "SPI_EN"),
    group(5,  "SPI_MISO",  "SPI_EN"),
    inverted(6, "JTAG_TCK", "JTAG_DISABLE"),
    inverted(7, "JTAG_TDI", "JTAG_DISABLE"),
    inverted(8, "JTAG_TDO", "JTAG_DISABLE"),
    group(9,  "UART_SIN",  "UART_EN"),
    group(9,  "SPI_CS2",   "SPI_CS_EN2"),
    group(10, "UART_SOUT", "UART_EN"),
    group(10, "SPI_CS1",   "SPI_CS_EN1"),
    group(11, "UART_CTS",  "UART_RTS_CTS_EN"),
    group(11, "I2S_CK",    "I2SO_EN"),
    group(12, "UART_RTS",  "UART_RTS_CTS_EN"),
    group(12, "I2S_WS",    "I2SO_EN"),
    group(13, "ETH_LED0",  "ETH_SWITCH_LED0_EN"),
    group(14, "ETH_LED1",  "ETH_SWITCH_LED1_EN"),
    group(15, "ETH_LED2",  "ETH_SWITCH_LED2_EN"),
    group(16, "ETH_LED3",  "ETH_SWITCH_LED3_EN"),
    group(17, "ETH_LED4",  "ETH_SWITCH_LED4_EN"),
];

/// AR9331 boards (Carambola2, Centipede). No signal mux registers.
pub static AR9331_MUX: SocMux = SocMux {
    groups: AR9331_GROUPS,
    functions: AR9331_FUNCTIONS,
    outputs: &[],
    inputs: &[],
};

const QCA_FUNC: usize = 0x6c;

#[rustfmt::skip]
const QCA_FUNCTIONS: &[FunctionRegister] = &[
    func("JTAG_DISABLE",    QCA_FUNC, 1),
    func("CLK_OBS0_EN",     QCA_FUNC, 2),
    func("CLK_OBS1_EN",     QCA_FUNC, 3),
];

#[rustfmt::skip]
const QCA_GROUPS: &[FunctionGroup] = &[
    inverted(0, "JTAG_TCK", "JTAG_DISABLE"),
    inverted(1, "JTAG_TDI", "JTAG_DISABLE"),
    inverted(2, "JTAG_TDO", "JTAG_DISABLE"),
    inverted(3, "JTAG_TMS", "JTAG_DISABLE"),
    group(13, "CLK_OBS0",   "CLK_OBS0_EN"),
    group(14, "CLK_OBS1",   "CLK_OBS1_EN"),
];

#[rustfmt::skip]
const QCA_OUTPUTS: &[OutputSignal] = &[
    OutputSignal { id: 0,  name: "GPIO" },
    OutputSignal { id: 8,  name: "SPI_CLK" },
    OutputSignal { id: 9,  name: "SPI_CS0" },
    OutputSignal { id: 10, name: "SPI_CS1" },
    OutputSignal { id: 11, name: "SPI_CS2" },
    OutputSignal { id: 12, name: "SPI_MOSI" },
    OutputSignal { id: 22, name: "UART0_SOUT" },
    OutputSignal { id: 41, name: "LED_LINK1" },
    OutputSignal { id: 42, name: "LED_LINK2" },
    OutputSignal { id: 43, name: "LED_LINK3" },
    OutputSignal { id: 44, name: "LED_LINK4" },
    OutputSignal { id: 45, name: "LED_LINK5" },
];

#[rustfmt::skip]
const QCA953X_INPUTS: &[InputSignal] = &[
    InputSignal { reg: GPIO_IN_FUNC,        shift: 0, name: "SPI_MISO" },
    InputSignal { reg: GPIO_IN_FUNC,        shift: 8, name: "UART0_SIN" },
];

#[rustfmt::skip]
const QCA955X_INPUTS: &[InputSignal] = &[
    InputSignal { reg: GPIO_IN_FUNC,        shift: 0,  name: "SPI_MISO" },
    InputSignal { reg: GPIO_IN_FUNC,        shift: 8,  name: "UART0_SIN" },
    InputSignal { reg: GPIO_IN_FUNC + 0x04, shift: 16, name: "I2S_MCLK" },
    InputSignal { reg: GPIO_IN_FUNC + 0x24, shift: 0,  name: "UART1_SIN" },
];

/// Lima (QCA9531 in the QCA955x register layout).
pub static LIMA_MUX: SocMux = SocMux {
    groups: QCA_GROUPS,
    functions: QCA_FUNCTIONS,
    outputs: QCA_OUTPUTS,
    inputs: QCA953X_INPUTS,
};

/// Rambutan (QCA9557).
pub static RAMBUTAN_MUX: SocMux = SocMux {
    groups: QCA_GROUPS,
    functions: QCA_FUNCTIONS,
    outputs: QCA_OUTPUTS,
    inputs: QCA955X_INPUTS,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn check(mux: &SocMux, window: usize) {
        for g in mux.groups {
            assert!(
                mux.functions.iter().any(|f| f.name == g.enable),
                "group {} references unknown enable {}",
                g.name,
                g.enable
            );
        }
        for f in mux.functions {
            assert!(f.reg + 4 <= window && f.bit < 32, "{} outside window", f.name);
        }
        for i in mux.inputs {
            assert!(i.reg + 4 <= window && i.shift <= 24, "{} outside window", i.name);
        }
    }

    #[test]
    fn tables_fit_their_register_windows() {
        check(&AR9331_MUX, 0x30);
        check(&LIMA_MUX, 0x70);
        check(&RAMBUTAN_MUX, 0x70);
    }
}
