//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`],
//! [`TimingError`]), startup line reservation ([`AcquireError`]) and panel
//! operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`TimingError`] - Video timings outside the panel datasheet bounds
//! - [`AcquireError`] - A signal line could not be reserved at startup
//! - [`Error`] - Runtime errors during lifecycle and backlight operations
//!
//! Bus transmission errors do not appear here: the serial bus has no
//! acknowledgement channel, so a byte the panel failed to latch cannot be
//! observed. Only failures of the output lines themselves are reported.
//!
//! ## Example
//!
//! ```
//! use oled43::{Builder, BuilderError, TimingError, VideoTimings};
//!
//! let timings = VideoTimings {
//!     hbp: 100,
//!     ..VideoTimings::OLED43
//! };
//! let result = Builder::new().timings(timings).build();
//! assert!(matches!(
//!     result,
//!     Err(BuilderError::InvalidTimings(TimingError::HorizontalBackPorch { hbp: 100 }))
//! ));
//! ```

use crate::config::{LineId, Signal};
use crate::interface::PanelInterface;
use crate::panel::{Operation, PanelState};

/// Horizontal front porch must be strictly greater than this many pixel clocks
pub const MIN_HFP_EXCLUSIVE: u16 = 30;
/// Required horizontal back porch in pixel clocks
pub const REQUIRED_HBP: u16 = 102;
/// Vertical front porch must be strictly greater than this many lines
pub const MIN_VFP_EXCLUSIVE: u16 = 10;
/// Required vertical back porch in lines
pub const REQUIRED_VBP: u16 = 20;

/// Errors that can occur when driving the panel
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying line error.
#[derive(Debug)]
pub enum Error<I: PanelInterface> {
    /// Interface error (signal line could not be driven)
    ///
    /// Wraps the underlying error from the [`PanelInterface`] implementation.
    Interface(I::Error),
    /// Lifecycle operation is not valid from the current state
    ///
    /// The panel state is left unchanged.
    InvalidTransition {
        /// State the panel was in when the operation was requested
        from: PanelState,
        /// Operation that was rejected
        operation: Operation,
    },
}

impl<I: PanelInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::InvalidTransition { from, operation } => {
                write!(f, "Cannot {operation} panel while {from}")
            }
        }
    }
}

impl<I: PanelInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Video timings that violate the panel datasheet
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimingError {
    /// Horizontal or vertical resolution is zero
    ZeroResolution {
        /// Horizontal resolution requested
        x_res: u16,
        /// Vertical resolution requested
        y_res: u16,
    },
    /// Pixel clock is zero
    ZeroPixelClock,
    /// Horizontal front porch must be greater than 30
    HorizontalFrontPorch {
        /// Front porch requested
        hfp: u16,
    },
    /// Horizontal back porch must be exactly 102
    HorizontalBackPorch {
        /// Back porch requested
        hbp: u16,
    },
    /// Vertical front porch must be greater than 10
    VerticalFrontPorch {
        /// Front porch requested
        vfp: u16,
    },
    /// Vertical back porch must be exactly 20
    VerticalBackPorch {
        /// Back porch requested
        vbp: u16,
    },
}

impl core::fmt::Display for TimingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroResolution { x_res, y_res } => {
                write!(f, "Invalid resolution: {x_res}x{y_res}")
            }
            Self::ZeroPixelClock => write!(f, "Pixel clock must be non-zero"),
            Self::HorizontalFrontPorch { hfp } => write!(
                f,
                "Horizontal front porch {hfp} must be greater than {MIN_HFP_EXCLUSIVE}"
            ),
            Self::HorizontalBackPorch { hbp } => {
                write!(f, "Horizontal back porch {hbp} must be {REQUIRED_HBP}")
            }
            Self::VerticalFrontPorch { vfp } => write!(
                f,
                "Vertical front porch {vfp} must be greater than {MIN_VFP_EXCLUSIVE}"
            ),
            Self::VerticalBackPorch { vbp } => {
                write!(f, "Vertical back porch {vbp} must be {REQUIRED_VBP}")
            }
        }
    }
}

impl core::error::Error for TimingError {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the panel is created.
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Video timings rejected by [`VideoTimings::validate()`](crate::config::VideoTimings::validate)
    InvalidTimings(TimingError),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidTimings(e) => write!(f, "Invalid video timings: {e}"),
        }
    }
}

impl core::error::Error for BuilderError {}

impl From<TimingError> for BuilderError {
    fn from(e: TimingError) -> Self {
        Self::InvalidTimings(e)
    }
}

/// A signal line could not be reserved from the host
///
/// Fatal at startup: lines reserved before the failure have already been
/// handed back to the provider when this is returned.
#[derive(Debug)]
pub struct AcquireError<E> {
    /// Logical signal whose line was refused
    pub signal: Signal,
    /// Physical line identifier that was requested
    pub line: LineId,
    /// Error reported by the host
    pub source: E,
}

impl<E: core::fmt::Debug> core::fmt::Display for AcquireError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Unable to reserve line {} for {}: {:?}",
            self.line.0,
            self.signal.label(),
            self.source
        )
    }
}

impl<E: core::fmt::Debug> core::error::Error for AcquireError<E> {}
