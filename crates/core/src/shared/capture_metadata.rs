/// Properties of the capture source, fixed for the whole session.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureMetadata {
    pub width: u32,
    pub height: u32,
    /// Frames per second as reported by the source; 0.0 when unknown.
    pub fps: f64,
}

impl CaptureMetadata {
    /// Frame rate to encode the session at.
    ///
    /// Sources that cannot report a rate (common for webcams) yield 0;
    /// the recording falls back to [`DEFAULT_FPS`](crate::shared::constants::DEFAULT_FPS)
    /// rather than producing a zero-rate file.
    pub fn session_fps(&self) -> f64 {
        if self.fps > 0.0 {
            self.fps
        } else {
            crate::shared::constants::DEFAULT_FPS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn meta(fps: f64) -> CaptureMetadata {
        CaptureMetadata {
            width: 640,
            height: 480,
            fps,
        }
    }

    #[test]
    fn test_session_fps_passes_through_known_rate() {
        assert_relative_eq!(meta(30.0).session_fps(), 30.0);
    }

    #[test]
    fn test_session_fps_defaults_when_unknown() {
        assert_relative_eq!(meta(0.0).session_fps(), 24.0);
    }

    #[test]
    fn test_session_fps_defaults_for_negative_rate() {
        assert_relative_eq!(meta(-1.0).session_fps(), 24.0);
    }
}
