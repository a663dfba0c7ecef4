use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::capture_metadata::CaptureMetadata;
use crate::shared::constants::{CAPTURE_FPS, CAPTURE_HEIGHT, CAPTURE_WIDTH};
use crate::shared::frame::Frame;

/// Webcam source backed by nokhwa.
///
/// Frames are decoded to RGB24 at the capture boundary so the rest of
/// the pipeline never sees the device's native pixel format.
pub struct NokhwaCamera {
    camera: Camera,
    frame_index: usize,
}

// Safety: NokhwaCamera is only used from the single pipeline thread.
unsafe impl Send for NokhwaCamera {}

impl NokhwaCamera {
    /// Opens the camera at `index` and starts its stream.
    ///
    /// Open failure is fatal at startup; a first frame is pulled here
    /// so a camera that enumerates but cannot deliver fails before the
    /// session starts instead of on iteration one.
    pub fn open(index: u32) -> Result<Self, Box<dyn std::error::Error>> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(CAPTURE_WIDTH, CAPTURE_HEIGHT),
                FrameFormat::YUYV,
                CAPTURE_FPS,
            ),
        ));

        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| format!("could not open camera {index}: {e}"))?;
        camera
            .open_stream()
            .map_err(|e| format!("could not start camera {index} stream: {e}"))?;
        camera
            .frame()
            .map_err(|e| format!("camera {index} stream delivers no frames: {e}"))?;

        Ok(Self {
            camera,
            frame_index: 0,
        })
    }
}

impl FrameSource for NokhwaCamera {
    fn metadata(&self) -> CaptureMetadata {
        let res = self.camera.resolution();
        CaptureMetadata {
            width: res.width(),
            height: res.height(),
            fps: f64::from(self.camera.frame_rate()),
        }
    }

    fn next_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| format!("frame read failed: {e}"))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| format!("frame decode failed: {e}"))?;

        let (width, height) = (decoded.width(), decoded.height());
        let frame = Frame::new(decoded.into_raw(), width, height, 3, self.frame_index);
        self.frame_index += 1;
        Ok(frame)
    }

    fn close(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("error stopping camera stream: {e}");
        }
    }
}
