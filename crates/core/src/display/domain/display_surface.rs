use crate::shared::frame::Frame;

/// Port for the live preview window.
pub trait DisplaySurface: Send {
    /// Shows the frame and pumps window events.
    fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// True once the user has requested cancellation ('q' or closing
    /// the window). Stays true afterwards.
    fn cancel_requested(&self) -> bool;
}
