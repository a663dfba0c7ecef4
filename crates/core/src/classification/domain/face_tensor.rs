use ndarray::Array4;

use crate::shared::constants::FACE_TENSOR_SIZE;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// A face crop normalized for the emotion classifier: grayscale,
/// 48×48, intensities scaled to `[0, 1]`, NCHW layout `[1, 1, 48, 48]`.
///
/// Ephemeral — built per face, consumed by one classify call.
#[derive(Clone, Debug)]
pub struct FaceTensor {
    data: Array4<f32>,
}

impl FaceTensor {
    /// Builds the tensor from the face region of an RGB frame.
    ///
    /// The box is clamped to frame bounds first; a detection with no
    /// visible area yields `None` and the face is skipped. Grayscale
    /// conversion uses BT.601 luma; the resize is nearest-neighbour and
    /// fully deterministic.
    pub fn from_region(frame: &Frame, face: &FaceBox) -> Option<FaceTensor> {
        let clamped = face.clamp_to(frame.width(), frame.height())?;

        let src = frame.as_ndarray();
        let (bx, by) = (clamped.x as usize, clamped.y as usize);
        let (bw, bh) = (clamped.width as usize, clamped.height as usize);
        let channels = frame.channels() as usize;

        let size = FACE_TENSOR_SIZE;
        let mut data = Array4::<f32>::zeros((1, 1, size, size));

        for ty in 0..size {
            let sy = by + (ty * bh) / size;
            for tx in 0..size {
                let sx = bx + (tx * bw) / size;
                let luma = if channels >= 3 {
                    // BT.601 integer luma
                    let r = src[[sy, sx, 0]] as u32;
                    let g = src[[sy, sx, 1]] as u32;
                    let b = src[[sy, sx, 2]] as u32;
                    ((299 * r + 587 * g + 114 * b) / 1000) as f32
                } else {
                    src[[sy, sx, 0]] as f32
                };
                data[[0, 0, ty, tx]] = luma / 255.0;
            }
        }

        Some(FaceTensor { data })
    }

    pub fn as_array(&self) -> &Array4<f32> {
        &self.data
    }
}
