use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// Returns the empty vec when no face is found; never errors for a
/// well-formed frame. The order of results is detector-defined and
/// carries no meaning — boxes have no identity across frames.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>>;
}
