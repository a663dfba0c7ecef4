use ndarray::ArrayView3;

/// A single camera frame: contiguous RGB bytes in row-major order.
///
/// Pixel-format conversion happens at I/O boundaries only; everything
/// between the camera and the encoder treats the data as an RGB grid.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Position of this frame in the capture sequence, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One row of pixels, `width * channels` bytes.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width as usize * self.channels as usize;
        &self.data[y * stride..(y + 1) * stride]
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 2 * 3 * 3];
        let frame = Frame::new(data.clone(), 3, 2, 3, 7);
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 7);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_row_returns_correct_slice() {
        // 2x2 RGB, second row filled with 9s
        let mut data = vec![0u8; 12];
        data[6..].fill(9);
        let frame = Frame::new(data, 2, 2, 3, 0);
        assert_eq!(frame.row(0), &[0, 0, 0, 0, 0, 0]);
        assert_eq!(frame.row(1), &[9, 9, 9, 9, 9, 9]);
    }

    #[test]
    fn test_data_mut_allows_annotation_in_place() {
        let data = vec![0u8; 6];
        let mut frame = Frame::new(data, 2, 1, 3, 0);
        frame.data_mut()[3] = 255;
        assert_eq!(frame.data()[3], 255);
    }

    #[test]
    fn test_as_ndarray_shape_is_hwc() {
        let data = vec![0u8; 24]; // 2 rows, 4 cols, 3 channels
        let frame = Frame::new(data, 4, 2, 3, 0);
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 3]);
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        let mut data = vec![0u8; 12];
        data[7] = 200; // row 1, col 0, G channel
        let frame = Frame::new(data, 2, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr[[1, 0, 1]], 200);
        assert_eq!(arr[[1, 0, 0]], 0);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }
}
