use crate::shared::emotion::EmotionLabel;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

const BOX_COLOR: [u8; 3] = [0, 255, 0];
const TEXT_COLOR: [u8; 3] = [255, 255, 255];
const BORDER_THICKNESS: i32 = 2;

/// Rendered glyph scale: the 5×7 font cells become 10×14 pixels.
const TEXT_SCALE: usize = 2;
const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
/// One blank column between glyphs.
const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;
/// Pixels between the text baseline and the box's top edge.
const LABEL_GAP: i32 = 4;

/// Draws face boxes and emotion labels directly onto a frame.
///
/// Pure with respect to program state: the only effect is mutating the
/// frame's pixels.
#[derive(Default)]
pub struct FrameAnnotator;

impl FrameAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Draws a rectangle at the (clamped) box and the label text above
    /// its top edge, shifted down when it would leave the frame top.
    pub fn annotate(&self, frame: &mut Frame, face: &FaceBox, label: EmotionLabel) {
        let Some(clamped) = face.clamp_to(frame.width(), frame.height()) else {
            return;
        };

        draw_rect(frame, &clamped);

        let text_height = (GLYPH_HEIGHT * TEXT_SCALE) as i32;
        let text_y = (clamped.y - LABEL_GAP - text_height).max(0);
        draw_text(frame, label.as_str(), clamped.x, text_y);
    }
}

fn draw_rect(frame: &mut Frame, b: &FaceBox) {
    for t in 0..BORDER_THICKNESS {
        let x1 = b.x + t;
        let y1 = b.y + t;
        let x2 = b.x + b.width - 1 - t;
        let y2 = b.y + b.height - 1 - t;
        if x2 <= x1 || y2 <= y1 {
            break;
        }
        for x in x1..=x2 {
            put_pixel(frame, x, y1, BOX_COLOR);
            put_pixel(frame, x, y2, BOX_COLOR);
        }
        for y in y1..=y2 {
            put_pixel(frame, x1, y, BOX_COLOR);
            put_pixel(frame, x2, y, BOX_COLOR);
        }
    }
}

fn draw_text(frame: &mut Frame, text: &str, origin_x: i32, origin_y: i32) {
    for (i, ch) in text.chars().enumerate() {
        let glyph = glyph_for(ch);
        let gx = origin_x + (i * GLYPH_ADVANCE * TEXT_SCALE) as i32;
        for (col, &bits) in glyph.iter().enumerate() {
            for row in 0..GLYPH_HEIGHT {
                if bits >> row & 1 == 0 {
                    continue;
                }
                // Scale each font pixel to a TEXT_SCALE × TEXT_SCALE block
                for dy in 0..TEXT_SCALE {
                    for dx in 0..TEXT_SCALE {
                        put_pixel(
                            frame,
                            gx + (col * TEXT_SCALE + dx) as i32,
                            origin_y + (row * TEXT_SCALE + dy) as i32,
                            TEXT_COLOR,
                        );
                    }
                }
            }
        }
    }
}

fn put_pixel(frame: &mut Frame, x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x >= frame.width() as i32 || y >= frame.height() as i32 {
        return;
    }
    let channels = frame.channels() as usize;
    let offset = (y as usize * frame.width() as usize + x as usize) * channels;
    let data = frame.data_mut();
    for (c, &v) in color.iter().enumerate().take(channels) {
        data[offset + c] = v;
    }
}

/// Column-major 5×7 glyphs (bit 0 = top row) for the lowercase letters
/// the label vocabulary uses. Unknown characters render as a space.
fn glyph_for(ch: char) -> [u8; GLYPH_WIDTH] {
    match ch {
        'a' => [0x20, 0x54, 0x54, 0x54, 0x78],
        'b' => [0x7f, 0x48, 0x44, 0x44, 0x38],
        'c' => [0x38, 0x44, 0x44, 0x44, 0x20],
        'd' => [0x38, 0x44, 0x44, 0x48, 0x7f],
        'e' => [0x38, 0x54, 0x54, 0x54, 0x18],
        'f' => [0x08, 0x7e, 0x09, 0x01, 0x02],
        'g' => [0x0c, 0x52, 0x52, 0x52, 0x3e],
        'h' => [0x7f, 0x08, 0x04, 0x04, 0x78],
        'i' => [0x00, 0x44, 0x7d, 0x40, 0x00],
        'j' => [0x20, 0x40, 0x44, 0x3d, 0x00],
        'k' => [0x7f, 0x10, 0x28, 0x44, 0x00],
        'l' => [0x00, 0x41, 0x7f, 0x40, 0x00],
        'm' => [0x7c, 0x04, 0x18, 0x04, 0x78],
        'n' => [0x7c, 0x08, 0x04, 0x04, 0x78],
        'o' => [0x38, 0x44, 0x44, 0x44, 0x38],
        'p' => [0x7c, 0x14, 0x14, 0x14, 0x08],
        'q' => [0x08, 0x14, 0x14, 0x18, 0x7c],
        'r' => [0x7c, 0x08, 0x04, 0x04, 0x08],
        's' => [0x48, 0x54, 0x54, 0x54, 0x20],
        't' => [0x04, 0x3f, 0x44, 0x40, 0x20],
        'u' => [0x3c, 0x40, 0x40, 0x20, 0x7c],
        'v' => [0x1c, 0x20, 0x40, 0x20, 0x1c],
        'w' => [0x3c, 0x40, 0x30, 0x40, 0x3c],
        'x' => [0x44, 0x28, 0x10, 0x28, 0x44],
        'y' => [0x0c, 0x50, 0x50, 0x50, 0x3c],
        'z' => [0x44, 0x64, 0x54, 0x4c, 0x44],
        _ => [0x00; GLYPH_WIDTH],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_frame(width: u32, height: u32) -> Frame {
        Frame::new(vec![0u8; (width * height * 3) as usize], width, height, 3, 0)
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let off = (y * frame.width() as usize + x) * 3;
        let d = frame.data();
        [d[off], d[off + 1], d[off + 2]]
    }

    #[test]
    fn test_rectangle_edges_are_green() {
        let mut frame = black_frame(100, 100);
        FrameAnnotator::new().annotate(&mut frame, &FaceBox::new(20, 40, 30, 30), EmotionLabel::Happy);

        assert_eq!(pixel(&frame, 20, 40), BOX_COLOR); // top-left corner
        assert_eq!(pixel(&frame, 49, 69), BOX_COLOR); // bottom-right corner
        assert_eq!(pixel(&frame, 35, 40), BOX_COLOR); // top edge
        assert_eq!(pixel(&frame, 35, 41), BOX_COLOR); // 2px border
        assert_eq!(pixel(&frame, 20, 55), BOX_COLOR); // left edge
    }

    #[test]
    fn test_box_interior_is_untouched() {
        let mut frame = black_frame(100, 100);
        FrameAnnotator::new().annotate(&mut frame, &FaceBox::new(20, 40, 30, 30), EmotionLabel::Happy);
        assert_eq!(pixel(&frame, 35, 55), [0, 0, 0]);
    }

    #[test]
    fn test_label_renders_above_box() {
        let mut frame = black_frame(200, 200);
        FrameAnnotator::new().annotate(&mut frame, &FaceBox::new(50, 100, 60, 60), EmotionLabel::Sad);

        // Some white text pixel exists in the band above the box
        let found = (82..100).any(|y| (50..140).any(|x| pixel(&frame, x, y) == TEXT_COLOR));
        assert!(found, "expected label pixels above the box");
    }

    #[test]
    fn test_label_clamped_when_box_touches_frame_top() {
        let mut frame = black_frame(200, 200);
        FrameAnnotator::new().annotate(&mut frame, &FaceBox::new(50, 2, 60, 60), EmotionLabel::Fear);

        // Nothing may be drawn off-frame; text lands at y=0 downward
        let found = (0..14).any(|y| (50..140).any(|x| pixel(&frame, x, y) == TEXT_COLOR));
        assert!(found, "expected label pixels clamped to frame top");
    }

    #[test]
    fn test_out_of_bounds_box_does_not_panic() {
        let mut frame = black_frame(100, 100);
        let annotator = FrameAnnotator::new();
        annotator.annotate(&mut frame, &FaceBox::new(80, 80, 50, 50), EmotionLabel::Angry);
        annotator.annotate(&mut frame, &FaceBox::new(-20, -20, 30, 30), EmotionLabel::Angry);
        annotator.annotate(&mut frame, &FaceBox::new(300, 300, 30, 30), EmotionLabel::Angry);
    }

    #[test]
    fn test_annotate_mutates_in_place() {
        let mut frame = black_frame(100, 100);
        let before = frame.data().to_vec();
        FrameAnnotator::new().annotate(&mut frame, &FaceBox::new(10, 30, 40, 40), EmotionLabel::Neutral);
        assert_ne!(frame.data(), &before[..]);
    }
}
