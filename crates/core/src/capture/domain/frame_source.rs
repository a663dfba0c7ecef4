use crate::shared::capture_metadata::CaptureMetadata;
use crate::shared::frame::Frame;

/// Abstracts the live capture device.
///
/// A source is opened before the pipeline starts and stays open for the
/// whole session. `next_frame` blocks until the next frame is
/// available; any error it returns is fatal to the session (a live feed
/// has no useful retry).
pub trait FrameSource: Send {
    /// Dimensions and frame rate of the source, fixed for the session.
    fn metadata(&self) -> CaptureMetadata;

    fn next_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>>;

    fn close(&mut self);
}
