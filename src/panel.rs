//! Panel power state machine
//!
//! [`Panel`] is the driver instance the host display subsystem talks to
//! through [`PanelDriver`], and the backlight subsystem through
//! [`Backlight`].
//!
//! ```text
//!                probe           enable
//! Uninitialized ──────▶ Disabled ◀──────▶ Active ──suspend──▶ Suspended
//!                                 disable    ▲                    │
//!                                            └──────resume────────┘
//! ```
//!
//! The power rail is energized if and only if the panel is `Active`.
//! `remove` is accepted from any state; it switches the rail off and hands
//! back the interface, so no further operation is possible.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use oled43::{
//!     BacklightInfo, BitBangInterface, Builder, DisplayHost, Lines, Panel, PanelDriver,
//!     VideoTimings,
//! };
//! # use core::convert::Infallible;
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
//! # let mut host = Host;
//! let config = match Builder::new().build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let lines = Lines::new(MockPin, MockPin, MockPin, MockPin, MockPin);
//! let interface = BitBangInterface::new(lines, MockDelay, config.bit_hold_ns);
//!
//! let mut panel = Panel::new(interface, config);
//! let _ = panel.probe(&mut host);
//! let _ = panel.enable();
//! ```

use crate::backlight::{BacklightInfo, BacklightLevel, DEVICE_NAME, to_backlight_level};
use crate::command::{BRIGHTNESS, power_on_sequence};
use crate::config::{Config, VideoTimings};
use crate::error::Error;
use crate::interface::PanelInterface;

type PanelResult<I> = core::result::Result<(), Error<I>>;

/// Power state of the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// Created but not yet probed
    #[default]
    Uninitialized,
    /// Configured and displaying, power rail on
    Active,
    /// Probed or disabled, power rail off
    Disabled,
    /// Put to sleep by the host, power rail off, leaves only via resume
    Suspended,
}

impl core::fmt::Display for PanelState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::Disabled => "disabled",
            Self::Suspended => "suspended",
        };
        f.write_str(name)
    }
}

/// Lifecycle operation requested by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Bind the driver to the panel
    Probe,
    /// Power on and configure
    Enable,
    /// Power off
    Disable,
    /// Power off for system sleep
    Suspend,
    /// Power back on after system sleep
    Resume,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Probe => "probe",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Suspend => "suspend",
            Self::Resume => "resume",
        };
        f.write_str(name)
    }
}

/// Host display subsystem, as seen by the panel at probe
pub trait DisplayHost {
    /// Error returned by backlight registration
    type Error: core::fmt::Debug;

    /// Publish the panel's TFT video timings
    fn set_timings(&mut self, timings: &VideoTimings);

    /// Register the panel backlight with the host's backlight subsystem
    fn register_backlight(&mut self, info: &BacklightInfo) -> Result<(), Self::Error>;
}

/// Lifecycle entry points called by the host display subsystem
pub trait PanelDriver {
    /// Error returned by lifecycle operations
    type Error;
    /// What the driver gives back once removed
    type Resources;

    /// Bind to the panel and publish its configuration
    fn probe<H: DisplayHost>(&mut self, host: &mut H) -> Result<(), Self::Error>;

    /// Run the power-on sequence
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Switch the panel off
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Switch the panel off for system sleep
    fn suspend(&mut self) -> Result<(), Self::Error>;

    /// Run the power-on sequence after system sleep
    fn resume(&mut self) -> Result<(), Self::Error>;

    /// Switch the panel off and release its resources
    fn remove(self) -> Self::Resources;

    /// Current power state
    fn state(&self) -> PanelState;
}

/// Brightness entry point called by the host backlight subsystem
pub trait Backlight {
    /// Error returned when the level cannot be written
    type Error;

    /// Apply a brightness request in `0..=255`
    fn set_brightness(&mut self, request: u8) -> Result<BacklightLevel, Self::Error>;

    /// Last brightness request
    fn brightness(&self) -> u8;

    /// Largest accepted brightness request
    fn max_brightness(&self) -> u8;
}

/// OLED43 panel driver
///
/// Owns the interface (and through it all five signal lines) from
/// construction until [`PanelDriver::remove`].
pub struct Panel<I>
where
    I: PanelInterface,
{
    /// Hardware interface
    interface: I,
    /// Panel configuration
    config: Config,
    /// Power state
    state: PanelState,
    /// Last brightness request from the host
    brightness: u8,
    /// Whether the host accepted the backlight device at probe
    backlight_registered: bool,
}

impl<I> Panel<I>
where
    I: PanelInterface,
{
    /// Create a new Panel instance
    pub fn new(interface: I, config: Config) -> Self {
        let brightness = config.default_brightness;
        Self {
            interface,
            config,
            state: PanelState::Uninitialized,
            brightness,
            backlight_registered: false,
        }
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get video timings
    pub fn timings(&self) -> &VideoTimings {
        &self.config.timings
    }

    /// Whether the host accepted the backlight device at probe
    pub fn backlight_registered(&self) -> bool {
        self.backlight_registered
    }

    /// Backlight device description handed to the host
    pub fn backlight_info(&self) -> BacklightInfo {
        BacklightInfo {
            name: DEVICE_NAME,
            default_brightness: self.config.default_brightness,
            max_brightness: self.config.max_brightness(),
        }
    }

    /// Write one panel register
    pub fn write_register(&mut self, index: u8, value: u8) -> PanelResult<I> {
        log::debug!("oled43: reg {:#04x} <- {:#04x}", index, value);
        self.interface
            .write_register(index, value)
            .map_err(Error::Interface)
    }

    /// Bring the panel from reset to displaying output
    ///
    /// Power is forced off, the panel is held in reset while the bus idles,
    /// released, configured register by register, and only then powered.
    /// Nothing from a previous activation is reused.
    pub fn run_power_on_sequence(&mut self) -> PanelResult<I> {
        self.power_off()?;
        self.interface.assert_reset().map_err(Error::Interface)?;
        self.interface.init_bus().map_err(Error::Interface)?;
        self.interface.release_reset().map_err(Error::Interface)?;

        let level = to_backlight_level(self.config.power_on_brightness);
        log::info!(
            "oled43: setting brightness to {} percent",
            level.percent()
        );
        for write in power_on_sequence(level) {
            self.write_register(write.index, write.value)?;
        }

        self.interface.power_on().map_err(Error::Interface)
    }

    /// Switch the power rail off
    ///
    /// No register traffic.
    pub fn run_power_off_sequence(&mut self) -> PanelResult<I> {
        self.power_off()
    }

    fn power_off(&mut self) -> PanelResult<I> {
        self.interface.power_off().map_err(Error::Interface)
    }

    /// Power on, entering `Active` only on success
    fn activate(&mut self) -> PanelResult<I> {
        if let Err(e) = self.run_power_on_sequence() {
            // Keep the rail off while not Active
            let _ = self.interface.power_off();
            return Err(e);
        }
        self.state = PanelState::Active;
        Ok(())
    }

    fn reject(&self, operation: Operation) -> Error<I> {
        log::warn!("oled43: {} rejected while {}", operation, self.state);
        Error::InvalidTransition {
            from: self.state,
            operation,
        }
    }
}

impl<I> PanelDriver for Panel<I>
where
    I: PanelInterface,
{
    type Error = Error<I>;
    type Resources = I;

    fn probe<H: DisplayHost>(&mut self, host: &mut H) -> PanelResult<I> {
        if self.state != PanelState::Uninitialized {
            return Err(self.reject(Operation::Probe));
        }
        self.power_off()?;

        host.set_timings(&self.config.timings);

        let info = self.backlight_info();
        match host.register_backlight(&info) {
            Ok(()) => self.backlight_registered = true,
            Err(e) => log::warn!("oled43: unable to register {}: {:?}", info.name, e),
        }

        self.state = PanelState::Disabled;
        Ok(())
    }

    fn enable(&mut self) -> PanelResult<I> {
        if self.state != PanelState::Disabled {
            return Err(self.reject(Operation::Enable));
        }
        log::info!("oled43: panel enable begin");
        self.activate()?;
        log::info!("oled43: panel enable end");
        Ok(())
    }

    fn disable(&mut self) -> PanelResult<I> {
        if self.state == PanelState::Uninitialized {
            return Err(self.reject(Operation::Disable));
        }
        self.run_power_off_sequence()?;
        self.state = PanelState::Disabled;
        Ok(())
    }

    fn suspend(&mut self) -> PanelResult<I> {
        if self.state != PanelState::Active {
            return Err(self.reject(Operation::Suspend));
        }
        self.run_power_off_sequence()?;
        self.state = PanelState::Suspended;
        log::info!("oled43: panel suspend");
        Ok(())
    }

    fn resume(&mut self) -> PanelResult<I> {
        if self.state != PanelState::Suspended {
            return Err(self.reject(Operation::Resume));
        }
        log::info!("oled43: panel resume");
        self.activate()
    }

    fn remove(mut self) -> I {
        if let Err(e) = self.interface.power_off() {
            log::error!("oled43: power off during remove failed: {:?}", e);
        }
        self.interface
    }

    fn state(&self) -> PanelState {
        self.state
    }
}

impl<I> Backlight for Panel<I>
where
    I: PanelInterface,
{
    type Error = Error<I>;

    fn set_brightness(&mut self, request: u8) -> Result<BacklightLevel, Error<I>> {
        let level = to_backlight_level(request);
        if level.is_off() {
            log::info!("oled43: brightness set at or below threshold, turning off");
        }
        self.write_register(BRIGHTNESS, level.value())?;
        self.brightness = request;
        Ok(level)
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn max_brightness(&self) -> u8 {
        self.config.max_brightness()
    }
}
