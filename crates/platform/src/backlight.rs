//! Display backlight abstraction
//!
//! Any user input wakes the backlight; the dimming timeout itself belongs to
//! the display driver.

/// Backlight control.
pub trait Backlight {
    /// Turn the backlight on (or keep it on) and restart its idle timeout.
    fn wake(&mut self);
}
