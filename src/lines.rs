//! Signal lines
//!
//! The five output lines the driver owns for its whole lifetime, with one
//! named operation per meaningful level so protocol code never passes raw
//! booleans around.
//!
//! | Signal       | Idle | Active |
//! |--------------|------|--------|
//! | Chip-select  | high | low    |
//! | Data-out     | high | bit    |
//! | Clock        | high | pulse  |
//! | Reset        | high | low    |
//! | Power-enable | low  | high   |
//!
//! Lines are either handed over as individual [`OutputPin`]s with
//! [`Lines::new`], or reserved from the host with [`Lines::acquire`].

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{LineId, PinAssignment, Signal};
use crate::error::AcquireError;

/// Host primitive for reserving output lines
///
/// Implemented by the platform; a reserved line stays owned by the caller
/// until it is handed back with [`LineProvider::release_line`].
pub trait LineProvider {
    /// Output line handed out by the host
    type Line: OutputPin;
    /// Error returned when a line cannot be reserved
    type Error: core::fmt::Debug;

    /// Reserve line `id` under `label`
    fn acquire_line(&mut self, id: LineId, label: &'static str) -> Result<Self::Line, Self::Error>;

    /// Return a previously reserved line
    fn release_line(&mut self, id: LineId, line: Self::Line);
}

/// The panel's five output lines
///
/// ## Type Parameters
///
/// * `CS` - Chip-select pin implementing [`OutputPin`]
/// * `SDO` - Serial data-out pin implementing [`OutputPin`]
/// * `CLK` - Serial clock pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `PWR` - Power-enable pin implementing [`OutputPin`]
#[derive(Debug)]
pub struct Lines<CS, SDO, CLK, RST, PWR> {
    /// Chip-select (active low)
    cs: CS,
    /// Serial data out
    sdo: SDO,
    /// Serial clock
    clk: CLK,
    /// Reset (active low)
    rst: RST,
    /// Power-enable (active high)
    pwr: PWR,
}

impl<CS, SDO, CLK, RST, PWR> Lines<CS, SDO, CLK, RST, PWR> {
    /// Take ownership of five already-configured output pins
    pub fn new(cs: CS, sdo: SDO, clk: CLK, rst: RST, pwr: PWR) -> Self {
        Self {
            cs,
            sdo,
            clk,
            rst,
            pwr,
        }
    }

    /// Give the pins back in `(cs, sdo, clk, rst, pwr)` order
    pub fn release(self) -> (CS, SDO, CLK, RST, PWR) {
        (self.cs, self.sdo, self.clk, self.rst, self.pwr)
    }
}

impl<CS, SDO, CLK, RST, PWR, PinErr> Lines<CS, SDO, CLK, RST, PWR>
where
    CS: OutputPin<Error = PinErr>,
    SDO: OutputPin<Error = PinErr>,
    CLK: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PWR: OutputPin<Error = PinErr>,
{
    /// Drive chip-select low
    pub fn select_chip(&mut self) -> Result<(), PinErr> {
        self.cs.set_low()
    }

    /// Drive chip-select high
    pub fn deselect_chip(&mut self) -> Result<(), PinErr> {
        self.cs.set_high()
    }

    /// Put one bit on the data line
    pub fn set_data(&mut self, bit: bool) -> Result<(), PinErr> {
        self.sdo.set_state(PinState::from(bit))
    }

    /// Drive the clock low
    pub fn clock_low(&mut self) -> Result<(), PinErr> {
        self.clk.set_low()
    }

    /// Drive the clock high
    pub fn clock_high(&mut self) -> Result<(), PinErr> {
        self.clk.set_high()
    }

    /// Hold the panel in reset
    pub fn assert_reset(&mut self) -> Result<(), PinErr> {
        self.rst.set_low()
    }

    /// Release the panel from reset
    pub fn release_reset(&mut self) -> Result<(), PinErr> {
        self.rst.set_high()
    }

    /// Energize the power rail
    pub fn power_on(&mut self) -> Result<(), PinErr> {
        self.pwr.set_high()
    }

    /// Switch the power rail off
    pub fn power_off(&mut self) -> Result<(), PinErr> {
        self.pwr.set_low()
    }

    /// Put chip-select, data and clock at their idle-high level
    pub fn idle_bus(&mut self) -> Result<(), PinErr> {
        self.cs.set_high()?;
        self.sdo.set_high()?;
        self.clk.set_high()
    }
}

impl<L: OutputPin> Lines<L, L, L, L, L> {
    /// Reserve all five lines from the host
    ///
    /// Lines are reserved in [`Signal::ALL`] order. If any reservation fails,
    /// the lines already reserved are released before returning. On success
    /// the power rail is forced off so the panel stays unpowered until
    /// enabled.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError`] naming the first line the host refused.
    pub fn acquire<P>(provider: &mut P, pins: &PinAssignment) -> Result<Self, AcquireError<P::Error>>
    where
        P: LineProvider<Line = L>,
    {
        let cs = reserve(provider, pins, Signal::ChipSelect)?;
        let sdo = match reserve(provider, pins, Signal::DataOut) {
            Ok(line) => line,
            Err(e) => {
                provider.release_line(pins.chip_select, cs);
                return Err(e);
            }
        };
        let clk = match reserve(provider, pins, Signal::Clock) {
            Ok(line) => line,
            Err(e) => {
                provider.release_line(pins.data_out, sdo);
                provider.release_line(pins.chip_select, cs);
                return Err(e);
            }
        };
        let rst = match reserve(provider, pins, Signal::Reset) {
            Ok(line) => line,
            Err(e) => {
                provider.release_line(pins.clock, clk);
                provider.release_line(pins.data_out, sdo);
                provider.release_line(pins.chip_select, cs);
                return Err(e);
            }
        };
        let mut pwr = match reserve(provider, pins, Signal::PowerEnable) {
            Ok(line) => line,
            Err(e) => {
                provider.release_line(pins.reset, rst);
                provider.release_line(pins.clock, clk);
                provider.release_line(pins.data_out, sdo);
                provider.release_line(pins.chip_select, cs);
                return Err(e);
            }
        };

        // Hold the power supply off until enabled
        if pwr.set_low().is_err() {
            log::warn!("oled43: unable to force power rail off after reservation");
        }

        Ok(Self::new(cs, sdo, clk, rst, pwr))
    }

    /// Hand all five lines back to the host
    pub fn release_to<P>(self, provider: &mut P, pins: &PinAssignment)
    where
        P: LineProvider<Line = L>,
    {
        provider.release_line(pins.power_enable, self.pwr);
        provider.release_line(pins.reset, self.rst);
        provider.release_line(pins.clock, self.clk);
        provider.release_line(pins.data_out, self.sdo);
        provider.release_line(pins.chip_select, self.cs);
    }
}

fn reserve<P: LineProvider>(
    provider: &mut P,
    pins: &PinAssignment,
    signal: Signal,
) -> Result<P::Line, AcquireError<P::Error>> {
    let line = pins.line(signal);
    log::debug!("oled43: requesting line {} as {}", line.0, signal.label());
    provider
        .acquire_line(line, signal.label())
        .map_err(|source| AcquireError {
            signal,
            line,
            source,
        })
}
