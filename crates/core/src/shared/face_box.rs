/// A rectangular pixel region believed to contain a face.
///
/// Produced fresh by the detector on every frame; there is no identity
/// across frames. Coordinates may fall outside the frame (detector
/// artifact), so consumers clamp before touching pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersects the box with the frame rectangle.
    ///
    /// Returns `None` when nothing of the box is visible (degenerate or
    /// fully out-of-bounds detections are skipped, not fatal).
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Option<FaceBox> {
        let fw = frame_width as i32;
        let fh = frame_height as i32;

        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x + self.width).min(fw);
        let y2 = (self.y + self.height).min(fh);

        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        Some(FaceBox {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_clamp_inside_is_identity() {
        let b = FaceBox::new(10, 20, 30, 40);
        assert_eq!(b.clamp_to(100, 100), Some(b));
    }

    #[rstest]
    #[case::one_px_right(FaceBox::new(70, 10, 31, 20), FaceBox::new(70, 10, 30, 20))]
    #[case::one_px_bottom(FaceBox::new(10, 70, 20, 31), FaceBox::new(10, 70, 20, 30))]
    #[case::full_width_overshoot(FaceBox::new(50, 10, 150, 20), FaceBox::new(50, 10, 50, 20))]
    #[case::negative_origin(FaceBox::new(-10, -5, 30, 25), FaceBox::new(0, 0, 20, 20))]
    fn test_clamp_out_of_bounds(#[case] input: FaceBox, #[case] expected: FaceBox) {
        assert_eq!(input.clamp_to(100, 100), Some(expected));
    }

    #[rstest]
    #[case::fully_right(FaceBox::new(100, 10, 20, 20))]
    #[case::fully_below(FaceBox::new(10, 100, 20, 20))]
    #[case::fully_negative(FaceBox::new(-30, -30, 20, 20))]
    #[case::zero_width(FaceBox::new(10, 10, 0, 20))]
    #[case::zero_height(FaceBox::new(10, 10, 20, 0))]
    #[case::negative_size(FaceBox::new(10, 10, -5, -5))]
    fn test_clamp_invisible_returns_none(#[case] input: FaceBox) {
        assert_eq!(input.clamp_to(100, 100), None);
    }
}
