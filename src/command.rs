//! OLED43 register map
//!
//! Registers are written with a single (index, value) transfer; see
//! [`PanelInterface::write_register`](crate::interface::PanelInterface::write_register).
//! The panel is write-only from the driver's point of view.
//!
//! ## Power-on Register Sequence
//!
//! The datasheet fixes the order:
//! 1. Display mode and driver capability ([`INIT_SEQUENCE`])
//! 2. Gamma level ([`VGAM1_LEVEL`])
//! 3. Backlight level ([`BRIGHTNESS`])
//! 4. Display on ([`POWER_CTRL1`])
//!
//! Reordering these writes leaves the panel in an undefined state.

use crate::backlight::BacklightLevel;

/// Display mode 2 register (0x04)
pub const DISPLAY_MODE2: u8 = 0x04;

/// Display mode 3 register (0x05)
pub const DISPLAY_MODE3: u8 = 0x05;

/// Power control 1 register (0x06)
///
/// Writing [`POWER_CTRL1_DISPLAY_ON`] turns display output on.
pub const POWER_CTRL1: u8 = 0x06;

/// Driver capability register (0x07)
pub const DRIVER_CAPABILITY: u8 = 0x07;

/// VGAM1 gamma level register (0x03)
pub const VGAM1_LEVEL: u8 = 0x03;

/// Backlight level register (0x3A)
///
/// Accepts 0x00 (off) to 0x20 (200 nits).
pub const BRIGHTNESS: u8 = 0x3A;

/// Value for [`POWER_CTRL1`] that enables display output
pub const POWER_CTRL1_DISPLAY_ON: u8 = 0x03;

/// Value for [`VGAM1_LEVEL`]
pub const VGAM1_LEVEL_DEFAULT: u8 = 35;

/// One register write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Register index (7 bits used; shifted left on the wire)
    pub index: u8,
    /// Register value
    pub value: u8,
}

impl RegisterWrite {
    /// Create a register write
    pub const fn new(index: u8, value: u8) -> Self {
        Self { index, value }
    }

    /// First byte on the wire: index shifted left, low bit reserved as 0
    pub const fn address_byte(self) -> u8 {
        self.index << 1
    }
}

/// Mode, capability and tuning writes issued first at power-on
pub const INIT_SEQUENCE: [RegisterWrite; 7] = [
    RegisterWrite::new(DISPLAY_MODE2, 0x23),
    RegisterWrite::new(DISPLAY_MODE3, 0x82),
    RegisterWrite::new(DRIVER_CAPABILITY, 0x0F),
    RegisterWrite::new(0x34, 0x18),
    RegisterWrite::new(0x35, 0x28),
    RegisterWrite::new(0x36, 0x16),
    RegisterWrite::new(0x37, 0x01),
];

/// Number of register writes in a full power-on sequence
pub const POWER_ON_WRITES: usize = INIT_SEQUENCE.len() + 3;

/// Complete power-on register sequence for a given backlight level
pub const fn power_on_sequence(level: BacklightLevel) -> [RegisterWrite; POWER_ON_WRITES] {
    let mut writes = [RegisterWrite::new(0, 0); POWER_ON_WRITES];
    let mut i = 0;
    while i < INIT_SEQUENCE.len() {
        writes[i] = INIT_SEQUENCE[i];
        i += 1;
    }
    writes[i] = RegisterWrite::new(VGAM1_LEVEL, VGAM1_LEVEL_DEFAULT);
    writes[i + 1] = RegisterWrite::new(BRIGHTNESS, level.value());
    writes[i + 2] = RegisterWrite::new(POWER_CTRL1, POWER_CTRL1_DISPLAY_ON);
    writes
}
