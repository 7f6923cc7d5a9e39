//! Hardware interface abstraction
//!
//! This module provides the [`PanelInterface`] trait and the
//! [`BitBangInterface`] struct for talking to the OLED43 over a software
//! serial bus.
//!
//! ## Hardware Requirements
//!
//! The OLED43 requires 5 GPIO output pins:
//! - **CS**: Chip select (active low)
//! - **SDO**: Serial data out
//! - **CLK**: Serial clock
//! - **RST**: Reset (active low)
//! - **PWR**: Power rail enable (active high)
//!
//! ## Wire Format
//!
//! A register write is one chip-select frame carrying two bytes, most
//! significant bit first:
//!
//! ```text
//! CS   ‾‾\___________________________________/‾‾
//! SDO      | i6 .. i0 0 | v7 .. v0 |
//! CLK  ‾‾‾‾‾\_/‾\_/‾ ... ‾\_/‾\_/‾‾‾‾‾‾‾‾‾‾‾‾‾‾
//! ```
//!
//! The panel samples on each low-then-high clock pulse. There is no
//! acknowledgement: a corrupted transfer cannot be detected.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use oled43::{BitBangInterface, Lines, PanelInterface};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! let lines = Lines::new(MockPin, MockPin, MockPin, MockPin, MockPin);
//! let mut interface = BitBangInterface::new(lines, MockDelay, 500);
//!
//! let _ = interface.init_bus();
//! // Display on
//! let _ = interface.write_register(0x06, 0x03);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::lines::Lines;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to the OLED43 panel
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Panel`](crate::panel::Panel) to work with any
/// line implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`BitBangInterface`]. Implement this
/// trait yourself to route register writes through something else, such as
/// a hardware serial controller or a recording test double.
pub trait PanelInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Put the serial bus in its idle state
    ///
    /// Chip-select, data and clock all go high.
    fn init_bus(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Write one panel register
    ///
    /// The implementation must:
    /// 1. Drive chip-select low
    /// 2. Send `index << 1`
    /// 3. Send `value`
    /// 4. Drive chip-select high
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven. A panel that ignores the
    /// transfer is not an error; the bus has no acknowledgement.
    fn write_register(&mut self, index: u8, value: u8) -> InterfaceResult<(), Self::Error>;

    /// Hold the panel in reset
    fn assert_reset(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Release the panel from reset
    fn release_reset(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Energize the panel power rail
    fn power_on(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Switch the panel power rail off
    fn power_off(&mut self) -> InterfaceResult<(), Self::Error>;
}

/// Bit-banged serial interface for the OLED43
///
/// Implements [`PanelInterface`] on top of five embedded-hal v1.0 output
/// pins and a [`DelayNs`] used to hold each line transition for at least
/// `bit_hold_ns`.
///
/// ## Type Parameters
///
/// * `CS`, `SDO`, `CLK`, `RST`, `PWR` - Output pins, see [`Lines`]
/// * `D` - Delay implementing [`DelayNs`]
#[derive(Debug)]
pub struct BitBangInterface<CS, SDO, CLK, RST, PWR, D> {
    /// Owned signal lines
    lines: Lines<CS, SDO, CLK, RST, PWR>,
    /// Delay used between transitions
    delay: D,
    /// Minimum hold per transition in nanoseconds
    bit_hold_ns: u32,
}

impl<CS, SDO, CLK, RST, PWR, D, PinErr> BitBangInterface<CS, SDO, CLK, RST, PWR, D>
where
    CS: OutputPin<Error = PinErr>,
    SDO: OutputPin<Error = PinErr>,
    CLK: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PWR: OutputPin<Error = PinErr>,
    D: DelayNs,
{
    /// Create a new BitBangInterface
    ///
    /// # Arguments
    ///
    /// * `lines` - The five panel lines
    /// * `delay` - Delay used to hold each transition
    /// * `bit_hold_ns` - Minimum hold in nanoseconds, 0 for none
    pub fn new(lines: Lines<CS, SDO, CLK, RST, PWR>, delay: D, bit_hold_ns: u32) -> Self {
        Self {
            lines,
            delay,
            bit_hold_ns,
        }
    }

    /// Set the minimum hold per transition in nanoseconds
    pub fn set_bit_hold(&mut self, ns: u32) -> &mut Self {
        self.bit_hold_ns = ns;
        self
    }

    /// Get the minimum hold per transition in nanoseconds
    pub fn bit_hold(&self) -> u32 {
        self.bit_hold_ns
    }

    /// Shift one byte out, most significant bit first
    ///
    /// For each bit the data line is set, then the clock goes low and back
    /// high.
    pub fn write_byte(&mut self, value: u8) -> InterfaceResult<(), PinErr> {
        for shift in (0..8).rev() {
            self.lines.set_data((value >> shift) & 1 != 0)?;
            self.hold();
            self.lines.clock_low()?;
            self.hold();
            self.lines.clock_high()?;
            self.hold();
        }
        Ok(())
    }

    /// Give back the lines and the delay
    pub fn release(self) -> (Lines<CS, SDO, CLK, RST, PWR>, D) {
        (self.lines, self.delay)
    }

    fn hold(&mut self) {
        if self.bit_hold_ns > 0 {
            self.delay.delay_ns(self.bit_hold_ns);
        }
    }
}

impl<CS, SDO, CLK, RST, PWR, D, PinErr> PanelInterface
    for BitBangInterface<CS, SDO, CLK, RST, PWR, D>
where
    CS: OutputPin<Error = PinErr>,
    SDO: OutputPin<Error = PinErr>,
    CLK: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PWR: OutputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    type Error = PinErr;

    fn init_bus(&mut self) -> InterfaceResult<(), Self::Error> {
        self.lines.idle_bus()
    }

    fn write_register(&mut self, index: u8, value: u8) -> InterfaceResult<(), Self::Error> {
        self.lines.select_chip()?;
        self.write_byte(index << 1)?;
        self.write_byte(value)?;
        self.lines.deselect_chip()
    }

    fn assert_reset(&mut self) -> InterfaceResult<(), Self::Error> {
        self.lines.assert_reset()
    }

    fn release_reset(&mut self) -> InterfaceResult<(), Self::Error> {
        self.lines.release_reset()
    }

    fn power_on(&mut self) -> InterfaceResult<(), Self::Error> {
        self.lines.power_on()
    }

    fn power_off(&mut self) -> InterfaceResult<(), Self::Error> {
        self.lines.power_off()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Signal;
    use crate::testing::{Level, MockDelay, MockError, MockPin, Trace, mock_lines};
    use std::vec::Vec;

    fn bits(byte: u8) -> Vec<bool> {
        (0..8).rev().map(|shift| (byte >> shift) & 1 != 0).collect()
    }

    #[test]
    fn test_write_byte_msb_first() {
        let trace = Trace::new();
        let mut interface = BitBangInterface::new(mock_lines(&trace), MockDelay::default(), 0);
        interface.write_byte(0xA5).unwrap();
        assert_eq!(
            trace.clocked_bits(),
            [true, false, true, false, false, true, false, true]
        );
    }

    #[test]
    fn test_write_byte_pulses_clock_low_then_high() {
        let trace = Trace::new();
        let mut interface = BitBangInterface::new(mock_lines(&trace), MockDelay::default(), 0);
        interface.write_byte(0x80).unwrap();
        let events = trace.events();
        assert_eq!(events.len(), 24);
        assert_eq!(
            &events[..3],
            [
                (Signal::DataOut, Level::High),
                (Signal::Clock, Level::Low),
                (Signal::Clock, Level::High),
            ]
        );
        for chunk in events[3..].chunks(3) {
            assert_eq!(chunk[0], (Signal::DataOut, Level::Low));
            assert_eq!(chunk[1], (Signal::Clock, Level::Low));
            assert_eq!(chunk[2], (Signal::Clock, Level::High));
        }
    }

    #[test]
    fn test_write_register_frame() {
        let trace = Trace::new();
        let mut interface = BitBangInterface::new(mock_lines(&trace), MockDelay::default(), 0);
        interface.write_register(0x3A, 0x14).unwrap();

        let events = trace.events();
        assert_eq!(events.first(), Some(&(Signal::ChipSelect, Level::Low)));
        assert_eq!(events.last(), Some(&(Signal::ChipSelect, Level::High)));
        // Nothing but data and clock between the chip-select edges
        let inner = &events[1..events.len() - 1];
        assert_eq!(inner.len(), 48);
        assert!(
            inner
                .iter()
                .all(|(signal, _)| matches!(signal, Signal::DataOut | Signal::Clock))
        );

        let mut expected = bits(0x3A << 1);
        expected.extend(bits(0x14));
        assert_eq!(trace.clocked_bits(), expected);
    }

    #[test]
    fn test_write_register_low_address_bit_is_zero() {
        let trace = Trace::new();
        let mut interface = BitBangInterface::new(mock_lines(&trace), MockDelay::default(), 0);
        interface.write_register(0x7F, 0xFF).unwrap();
        let clocked = trace.clocked_bits();
        assert!(!clocked[7]);
        assert!(clocked[..7].iter().all(|bit| *bit));
    }

    #[test]
    fn test_init_bus_idles_high() {
        let trace = Trace::new();
        let mut interface = BitBangInterface::new(mock_lines(&trace), MockDelay::default(), 0);
        interface.init_bus().unwrap();
        assert_eq!(
            trace.events(),
            [
                (Signal::ChipSelect, Level::High),
                (Signal::DataOut, Level::High),
                (Signal::Clock, Level::High),
            ]
        );
    }

    #[test]
    fn test_bit_hold_applied_per_transition() {
        let trace = Trace::new();
        let mut interface = BitBangInterface::new(mock_lines(&trace), MockDelay::default(), 250);
        interface.write_byte(0x00).unwrap();
        let (_, delay) = interface.release();
        assert_eq!(delay.calls, 24);
        assert_eq!(delay.total_ns, 24 * 250);
    }

    #[test]
    fn test_zero_bit_hold_skips_delay() {
        let trace = Trace::new();
        let mut interface = BitBangInterface::new(mock_lines(&trace), MockDelay::default(), 0);
        interface.write_register(0x06, 0x03).unwrap();
        let (_, delay) = interface.release();
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn test_set_bit_hold() {
        let trace = Trace::new();
        let mut interface = BitBangInterface::new(mock_lines(&trace), MockDelay::default(), 500);
        assert_eq!(interface.bit_hold(), 500);
        interface.set_bit_hold(0);
        assert_eq!(interface.bit_hold(), 0);
    }

    #[test]
    fn test_pin_error_propagates() {
        let trace = Trace::new();
        let lines = Lines::new(
            MockPin::new(Signal::ChipSelect, &trace),
            MockPin::failing(Signal::DataOut, &trace),
            MockPin::new(Signal::Clock, &trace),
            MockPin::new(Signal::Reset, &trace),
            MockPin::new(Signal::PowerEnable, &trace),
        );
        let mut interface = BitBangInterface::new(lines, MockDelay::default(), 0);
        assert_eq!(interface.write_register(0x06, 0x03), Err(MockError));
        // Frame was opened but no clock edge was produced
        assert_eq!(trace.events(), [(Signal::ChipSelect, Level::Low)]);
    }

    #[test]
    fn test_power_and_reset_lines() {
        let trace = Trace::new();
        let mut interface = BitBangInterface::new(mock_lines(&trace), MockDelay::default(), 0);
        interface.power_off().unwrap();
        interface.assert_reset().unwrap();
        interface.release_reset().unwrap();
        interface.power_on().unwrap();
        assert_eq!(
            trace.events(),
            [
                (Signal::PowerEnable, Level::Low),
                (Signal::Reset, Level::Low),
                (Signal::Reset, Level::High),
                (Signal::PowerEnable, Level::High),
            ]
        );
    }
}
