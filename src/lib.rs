//! CMEL OLED43 Panel Driver
//!
//! A driver for the CMEL OLED43 480x272 OLED panel, configured over a
//! bit-banged serial bus on five GPIO lines.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Configurable per-transition bus hold time
//! - Power sequencing with an explicit panel state machine
//! - Backlight brightness mapping
//! - Per-instance bus lock via `embassy-sync`
//! - `embedded-graphics` geometry (with `graphics` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use oled43::{
//!     Backlight, BacklightInfo, BitBangInterface, Builder, DisplayHost, Lines, Panel,
//!     PanelDriver, VideoTimings,
//! };
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # struct Host;
//! # impl DisplayHost for Host {
//! #     type Error = Infallible;
//! #     fn set_timings(&mut self, _timings: &VideoTimings) {}
//! #     fn register_backlight(&mut self, _info: &BacklightInfo) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # let (cs, sdo, clk, rst, pwr) = (MockPin, MockPin, MockPin, MockPin, MockPin);
//! # let mut host = Host;
//! let config = match Builder::new().bit_hold_ns(500).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let lines = Lines::new(cs, sdo, clk, rst, pwr);
//! let interface = BitBangInterface::new(lines, MockDelay, config.bit_hold_ns);
//!
//! let mut panel = Panel::new(interface, config);
//! let _ = panel.probe(&mut host);
//! let _ = panel.enable();
//! let _ = panel.set_brightness(200);
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

/// Brightness policy
pub mod backlight;
/// OLED43 register map
pub mod command;
/// Panel configuration types and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Signal lines and line reservation
pub mod lines;
/// Panel power state machine
pub mod panel;
/// Bus-locked panel handle
pub mod shared;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod testing;

pub use backlight::{BacklightInfo, BacklightLevel, to_backlight_level};
pub use command::RegisterWrite;
pub use config::{Builder, Config, DEFAULT_BIT_HOLD_NS, LineId, PinAssignment, Signal, VideoTimings};
pub use error::{AcquireError, BuilderError, Error, TimingError};
pub use interface::{BitBangInterface, PanelInterface};
pub use lines::{LineProvider, Lines};
pub use panel::{Backlight, DisplayHost, Operation, Panel, PanelDriver, PanelState};
pub use shared::SharedPanel;
