//! embedded-graphics integration
//!
//! The panel is fed pixels by the host display controller, not through this
//! driver, so only the panel geometry is exposed. Layout code can size itself
//! from a [`Panel`] without hard-coding the resolution.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics_core::geometry::OriginDimensions;
//! use oled43::{Panel, PanelInterface};
//!
//! fn columns<I: PanelInterface>(panel: &Panel<I>) -> u32 {
//!     panel.size().width
//! }
//! ```

use embedded_graphics_core::geometry::{OriginDimensions, Size};

use crate::interface::PanelInterface;
use crate::panel::Panel;

impl<I> OriginDimensions for Panel<I>
where
    I: PanelInterface,
{
    fn size(&self) -> Size {
        let timings = self.timings();
        Size::new(u32::from(timings.x_res), u32::from(timings.y_res))
    }
}
