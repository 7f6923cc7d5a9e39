//! Brightness policy
//!
//! Maps a host brightness request (0-255) onto the panel's backlight register
//! (0x00-0x20). Requests at or below [`OFF_THRESHOLD`] turn the backlight
//! fully off; the panel cannot render those low levels distinguishably.
//!
//! ## Luminance
//!
//! | Level  | Luminance |
//! |--------|-----------|
//! | `0x20` | 200 nits  |
//! | `0x1E` | 175 nits  |
//! | `0x1C` | 150 nits  |
//! | `0x17` | 100 nits  |
//! | `0x14` |  70 nits  |
//! | `0x11` |  50 nits  |
//!
//! ## Example
//!
//! ```
//! use oled43::backlight::to_backlight_level;
//!
//! assert_eq!(to_backlight_level(20).value(), 0);
//! assert_eq!(to_backlight_level(21).value(), 2);
//! assert_eq!(to_backlight_level(255).value(), 31);
//! ```

/// Name under which the backlight device is registered
pub const DEVICE_NAME: &str = "lcd-backlight";

/// Maximum brightness request accepted from the host
pub const MAX_BRIGHTNESS: u8 = 255;

/// Default brightness request (level 0x14, 70 nits)
pub const DEFAULT_BRIGHTNESS: u8 = 160;

/// Requests at or below this value switch the backlight off
pub const OFF_THRESHOLD: u8 = 20;

/// Full scale of the backlight register
pub const MAX_LEVEL: u8 = 0x20;

/// Level for 200 nits
pub const LEVEL_200_NITS: BacklightLevel = BacklightLevel(0x20);
/// Level for 175 nits
pub const LEVEL_175_NITS: BacklightLevel = BacklightLevel(0x1E);
/// Level for 150 nits
pub const LEVEL_150_NITS: BacklightLevel = BacklightLevel(0x1C);
/// Level for 100 nits
pub const LEVEL_100_NITS: BacklightLevel = BacklightLevel(0x17);
/// Level for 70 nits
pub const LEVEL_70_NITS: BacklightLevel = BacklightLevel(0x14);
/// Level for 50 nits
pub const LEVEL_50_NITS: BacklightLevel = BacklightLevel(0x11);

/// Value of the panel's backlight register, 0 to [`MAX_LEVEL`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct BacklightLevel(u8);

impl BacklightLevel {
    /// Backlight fully off
    pub const OFF: Self = Self(0);

    /// Create a level, saturating at [`MAX_LEVEL`]
    pub const fn new(value: u8) -> Self {
        if value > MAX_LEVEL {
            Self(MAX_LEVEL)
        } else {
            Self(value)
        }
    }

    /// Raw register value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether the backlight is switched off
    pub const fn is_off(self) -> bool {
        self.0 == 0
    }

    /// Level as a percentage of full scale, rounded down
    pub const fn percent(self) -> u8 {
        (self.0 as u16 * 100 / MAX_LEVEL as u16) as u8
    }
}

/// Map a brightness request onto the backlight register
///
/// Returns [`BacklightLevel::OFF`] for requests at or below
/// [`OFF_THRESHOLD`], otherwise `request / 8`.
pub const fn to_backlight_level(request: u8) -> BacklightLevel {
    if request <= OFF_THRESHOLD {
        BacklightLevel::OFF
    } else {
        BacklightLevel(request / 8)
    }
}

/// Backlight device description handed to the host at probe
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BacklightInfo {
    /// Device name
    pub name: &'static str,
    /// Brightness the host should report initially
    pub default_brightness: u8,
    /// Largest brightness the host may request
    pub max_brightness: u8,
}
