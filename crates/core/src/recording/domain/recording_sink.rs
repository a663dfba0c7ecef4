use std::path::Path;

use crate::shared::capture_metadata::CaptureMetadata;
use crate::shared::frame::Frame;

/// Abstracts video encoding so the pipeline can persist output without
/// depending on a specific codec library.
pub trait RecordingSink: Send {
    fn open(
        &mut self,
        path: &Path,
        metadata: &CaptureMetadata,
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
