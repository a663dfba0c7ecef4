use minifb::{Key, Window, WindowOptions};

use crate::display::domain::display_surface::DisplaySurface;
use crate::shared::frame::Frame;

/// Preview window backed by minifb.
///
/// The window is created lazily on the first frame, once the capture
/// resolution is known. Pressing 'q' or closing the window latches the
/// cancellation flag.
pub struct MinifbDisplay {
    title: String,
    window: Option<Window>,
    buffer: Vec<u32>,
    cancelled: bool,
}

// Safety: MinifbDisplay is only used from the single pipeline thread.
unsafe impl Send for MinifbDisplay {}

impl MinifbDisplay {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            window: None,
            buffer: Vec::new(),
            cancelled: false,
        }
    }
}

impl DisplaySurface for MinifbDisplay {
    fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;

        if self.window.is_none() {
            let mut window = Window::new(&self.title, width, height, WindowOptions::default())?;
            // Let the capture loop pace us instead of the window.
            window.set_target_fps(0);
            self.window = Some(window);
            self.buffer = vec![0u32; width * height];
        }

        let window = self.window.as_mut().ok_or("window not created")?;

        // Pack RGB bytes into minifb's 0RGB u32 layout
        let channels = frame.channels() as usize;
        let src = frame.data();
        for (i, px) in self.buffer.iter_mut().enumerate() {
            let off = i * channels;
            let (r, g, b) = (src[off] as u32, src[off + 1] as u32, src[off + 2] as u32);
            *px = (r << 16) | (g << 8) | b;
        }

        window.update_with_buffer(&self.buffer, width, height)?;

        if !window.is_open() || window.is_key_down(Key::Q) {
            self.cancelled = true;
        }

        Ok(())
    }

    fn cancel_requested(&self) -> bool {
        self.cancelled
    }
}
