//! Bus-locked panel handle
//!
//! The backlight callback and the lifecycle operations arrive from different
//! execution contexts but drive the same five lines. [`SharedPanel`] puts the
//! whole [`Panel`] behind one per-instance lock; every register write and
//! every lifecycle operation runs to completion inside a single lock
//! acquisition, so two transfers can never interleave on the wire.
//!
//! The raw mutex is chosen by the integrator:
//! - `CriticalSectionRawMutex` when the panel is shared with interrupt
//!   handlers or other threads
//! - `NoopRawMutex` when every caller runs in the same context
//!
//! ## Example
//!
//! ```rust,no_run
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use oled43::{BitBangInterface, Builder, Lines, Panel, SharedPanel};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let lines = Lines::new(MockPin, MockPin, MockPin, MockPin, MockPin);
//! let interface = BitBangInterface::new(lines, MockDelay, config.bit_hold_ns);
//! let panel: SharedPanel<CriticalSectionRawMutex, _> =
//!     SharedPanel::new(Panel::new(interface, config));
//!
//! // From the backlight callback
//! let _ = panel.set_brightness(200);
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::backlight::BacklightLevel;
use crate::error::Error;
use crate::interface::PanelInterface;
use crate::panel::{Backlight, DisplayHost, Panel, PanelDriver, PanelState};

/// [`Panel`] behind a per-instance bus lock
pub struct SharedPanel<M, I>
where
    M: RawMutex,
    I: PanelInterface,
{
    inner: Mutex<M, RefCell<Panel<I>>>,
}

impl<M, I> SharedPanel<M, I>
where
    M: RawMutex,
    I: PanelInterface,
{
    /// Wrap a panel
    pub fn new(panel: Panel<I>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(panel)),
        }
    }

    /// Run `f` with exclusive access to the panel and its bus
    pub fn with<R>(&self, f: impl FnOnce(&mut Panel<I>) -> R) -> R {
        self.inner.lock(|panel| f(&mut panel.borrow_mut()))
    }

    /// Write one panel register under the bus lock
    pub fn write_register(&self, index: u8, value: u8) -> Result<(), Error<I>> {
        self.with(|panel| panel.write_register(index, value))
    }

    /// Apply a brightness request under the bus lock
    pub fn set_brightness(&self, request: u8) -> Result<BacklightLevel, Error<I>> {
        self.with(|panel| panel.set_brightness(request))
    }

    /// Last brightness request
    pub fn brightness(&self) -> u8 {
        self.with(|panel| panel.brightness())
    }

    /// See [`PanelDriver::probe`]
    pub fn probe<H: DisplayHost>(&self, host: &mut H) -> Result<(), Error<I>> {
        self.with(|panel| panel.probe(host))
    }

    /// See [`PanelDriver::enable`]
    pub fn enable(&self) -> Result<(), Error<I>> {
        self.with(|panel| panel.enable())
    }

    /// See [`PanelDriver::disable`]
    pub fn disable(&self) -> Result<(), Error<I>> {
        self.with(|panel| panel.disable())
    }

    /// See [`PanelDriver::suspend`]
    pub fn suspend(&self) -> Result<(), Error<I>> {
        self.with(|panel| panel.suspend())
    }

    /// See [`PanelDriver::resume`]
    pub fn resume(&self) -> Result<(), Error<I>> {
        self.with(|panel| panel.resume())
    }

    /// Current power state
    pub fn state(&self) -> PanelState {
        self.with(|panel| panel.state())
    }

    /// Switch the panel off and hand back the interface
    pub fn remove(self) -> I {
        self.inner.into_inner().into_inner().remove()
    }
}
