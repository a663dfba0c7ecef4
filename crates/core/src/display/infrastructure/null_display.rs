use crate::display::domain::display_surface::DisplaySurface;
use crate::shared::frame::Frame;

/// Headless display for tests and environments without a window
/// system. Drops frames and never requests cancellation.
#[derive(Default)]
pub struct NullDisplay;

impl NullDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl DisplaySurface for NullDisplay {
    fn present(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    fn cancel_requested(&self) -> bool {
        false
    }
}
