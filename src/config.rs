//! Panel configuration types and builder

use crate::backlight::{DEFAULT_BRIGHTNESS, MAX_BRIGHTNESS};
pub use crate::error::{
    BuilderError, MIN_HFP_EXCLUSIVE, MIN_VFP_EXCLUSIVE, REQUIRED_HBP, REQUIRED_VBP, TimingError,
};

/// Default minimum hold time for each clock/data transition in nanoseconds
pub const DEFAULT_BIT_HOLD_NS: u32 = 500;

/// Physical line identifier as understood by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineId(pub u32);

/// Logical signals driven by the panel driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Chip-select, active low, frames one register write
    ChipSelect,
    /// Serial data out to the panel
    DataOut,
    /// Serial clock
    Clock,
    /// Panel reset, active low
    Reset,
    /// Power rail enable, active high
    PowerEnable,
}

impl Signal {
    /// All signals in reservation order
    pub const ALL: [Self; 5] = [
        Self::ChipSelect,
        Self::DataOut,
        Self::Clock,
        Self::Reset,
        Self::PowerEnable,
    ];

    /// Label used when reserving the line from the host
    pub const fn label(self) -> &'static str {
        match self {
            Self::ChipSelect => "OLED43_CS_PIN",
            Self::DataOut => "OLED43_MOSI_PIN",
            Self::Clock => "OLED43_CLK_PIN",
            Self::Reset => "OLED43_RESET_PIN",
            Self::PowerEnable => "OLED43_PANEL_PWR_PIN",
        }
    }
}

/// Mapping from logical signal to physical line
///
/// Fixed at construction. The default matches the reference board wiring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinAssignment {
    /// Chip-select line
    pub chip_select: LineId,
    /// Data-out line
    pub data_out: LineId,
    /// Clock line
    pub clock: LineId,
    /// Reset line
    pub reset: LineId,
    /// Power-enable line
    pub power_enable: LineId,
}

impl PinAssignment {
    /// Line wired to `signal`
    pub const fn line(&self, signal: Signal) -> LineId {
        match signal {
            Signal::ChipSelect => self.chip_select,
            Signal::DataOut => self.data_out,
            Signal::Clock => self.clock,
            Signal::Reset => self.reset,
            Signal::PowerEnable => self.power_enable,
        }
    }
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self {
            chip_select: LineId(139),
            data_out: LineId(144),
            clock: LineId(138),
            reset: LineId(137),
            power_enable: LineId(143),
        }
    }
}

/// Panel geometry and video timings
///
/// Frame rate = pixel_clock / ((vbp + vfp + y_res) * (hbp + hfp + x_res)).
///
/// The panel requires hfp > 30, hbp = 102, vfp > 10 and vbp = 20.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoTimings {
    /// Horizontal resolution in pixels
    pub x_res: u16,
    /// Vertical resolution in lines
    pub y_res: u16,
    /// Pixel clock in kHz
    pub pixel_clock: u32,
    /// Horizontal sync width
    pub hsw: u16,
    /// Horizontal front porch
    pub hfp: u16,
    /// Horizontal back porch
    pub hbp: u16,
    /// Vertical sync width
    pub vsw: u16,
    /// Vertical front porch
    pub vfp: u16,
    /// Vertical back porch
    pub vbp: u16,
}

impl VideoTimings {
    /// Timings for the OLED43 480x272 panel (about 66 Hz)
    pub const OLED43: Self = Self {
        x_res: 480,
        y_res: 272,
        pixel_clock: 12342,
        hsw: 30,
        hfp: 31,
        hbp: 102,
        vsw: 3,
        vfp: 11,
        vbp: 20,
    };

    /// Check the timings against the panel datasheet bounds
    ///
    /// # Errors
    ///
    /// Returns the first [`TimingError`] found, checking resolution, pixel
    /// clock, then horizontal and vertical porches.
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.x_res == 0 || self.y_res == 0 {
            return Err(TimingError::ZeroResolution {
                x_res: self.x_res,
                y_res: self.y_res,
            });
        }
        if self.pixel_clock == 0 {
            return Err(TimingError::ZeroPixelClock);
        }
        if self.hfp <= MIN_HFP_EXCLUSIVE {
            return Err(TimingError::HorizontalFrontPorch { hfp: self.hfp });
        }
        if self.hbp != REQUIRED_HBP {
            return Err(TimingError::HorizontalBackPorch { hbp: self.hbp });
        }
        if self.vfp <= MIN_VFP_EXCLUSIVE {
            return Err(TimingError::VerticalFrontPorch { vfp: self.vfp });
        }
        if self.vbp != REQUIRED_VBP {
            return Err(TimingError::VerticalBackPorch { vbp: self.vbp });
        }
        Ok(())
    }

    /// Pixel clocks per line, sync width excluded
    pub fn line_clocks(&self) -> u32 {
        u32::from(self.hbp) + u32::from(self.hfp) + u32::from(self.x_res)
    }

    /// Lines per frame, sync width excluded
    pub fn frame_lines(&self) -> u32 {
        u32::from(self.vbp) + u32::from(self.vfp) + u32::from(self.y_res)
    }

    /// Frame rate in Hz, rounded down
    pub fn frame_rate_hz(&self) -> u32 {
        let clocks_per_frame = u64::from(self.line_clocks()) * u64::from(self.frame_lines());
        if clocks_per_frame == 0 {
            return 0;
        }
        (u64::from(self.pixel_clock) * 1000 / clocks_per_frame) as u32
    }
}

impl Default for VideoTimings {
    fn default() -> Self {
        Self::OLED43
    }
}

/// Panel configuration
///
/// This struct holds all configurable parameters for the OLED43 driver.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Video timings published to the host at probe
    pub timings: VideoTimings,
    /// Signal to line mapping
    pub pins: PinAssignment,
    /// Minimum hold time for each clock/data transition in nanoseconds
    pub bit_hold_ns: u32,
    /// Brightness request applied by every power-on sequence
    pub power_on_brightness: u8,
    /// Brightness advertised to the backlight host at registration
    pub default_brightness: u8,
}

impl Config {
    /// Maximum brightness advertised to the backlight host
    pub const fn max_brightness(&self) -> u8 {
        MAX_BRIGHTNESS
    }
}

/// Builder for constructing panel configuration
///
/// # Example
///
/// ```rust,no_run
/// use oled43::{Builder, VideoTimings};
///
/// let config = match Builder::new()
///     .timings(VideoTimings::OLED43)
///     .bit_hold_ns(1_000)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Video timings
    timings: VideoTimings,
    /// Signal to line mapping
    pins: PinAssignment,
    /// Minimum hold per transition
    bit_hold_ns: u32,
    /// Brightness request used at power-on
    power_on_brightness: u8,
    /// Brightness advertised to the host
    default_brightness: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            timings: VideoTimings::OLED43,
            pins: PinAssignment::default(),
            bit_hold_ns: DEFAULT_BIT_HOLD_NS,
            // Maps to level 0x14 (70 nits)
            power_on_brightness: DEFAULT_BRIGHTNESS,
            default_brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set video timings
    pub fn timings(mut self, timings: VideoTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the signal to line mapping
    pub fn pins(mut self, pins: PinAssignment) -> Self {
        self.pins = pins;
        self
    }

    /// Set minimum hold time per clock/data transition
    ///
    /// Zero disables the delay entirely; the bus then runs as fast as the
    /// lines can toggle.
    pub fn bit_hold_ns(mut self, ns: u32) -> Self {
        self.bit_hold_ns = ns;
        self
    }

    /// Set the brightness request written by every power-on sequence
    pub fn power_on_brightness(mut self, value: u8) -> Self {
        self.power_on_brightness = value;
        self
    }

    /// Set the brightness advertised to the backlight host
    pub fn default_brightness(mut self, value: u8) -> Self {
        self.default_brightness = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidTimings` if the timings violate the
    /// panel datasheet bounds
    pub fn build(self) -> Result<Config, BuilderError> {
        self.timings.validate()?;
        Ok(Config {
            timings: self.timings,
            pins: self.pins,
            bit_hold_ns: self.bit_hold_ns,
            power_on_brightness: self.power_on_brightness,
            default_brightness: self.default_brightness,
        })
    }
}
