use std::path::Path;

use crate::recording::domain::recording_sink::RecordingSink;
use crate::shared::capture_metadata::CaptureMetadata;
use crate::shared::frame::Frame;

/// Encodes annotated frames to a video file via ffmpeg-next.
///
/// Uses MPEG4/yuv420p as a widely compatible combination. The session
/// frame rate falls back to a default when the camera does not report
/// one, so timestamps stay sane.
pub struct FfmpegRecorder {
    octx: Option<ffmpeg_next::format::context::Output>,
    encoder: Option<ffmpeg_next::codec::encoder::video::Encoder>,
    scaler: Option<ffmpeg_next::software::scaling::Context>,
    width: u32,
    height: u32,
    fps_i: i32,
    frame_count: usize,
    video_stream_index: usize,
}

// Safety: FfmpegRecorder is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegRecorder {}

impl FfmpegRecorder {
    pub fn new() -> Self {
        Self {
            octx: None,
            encoder: None,
            scaler: None,
            width: 0,
            height: 0,
            fps_i: 0,
            frame_count: 0,
            video_stream_index: 0,
        }
    }
}

impl Default for FfmpegRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSink for FfmpegRecorder {
    fn open(
        &mut self,
        path: &Path,
        metadata: &CaptureMetadata,
    ) -> Result<(), Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        if metadata.width == 0 || metadata.height == 0 {
            return Err(format!(
                "cannot record {}x{} video",
                metadata.width, metadata.height
            )
            .into());
        }

        self.width = metadata.width;
        self.height = metadata.height;
        self.fps_i = metadata.session_fps().round().max(1.0) as i32;

        let mut octx = ffmpeg_next::format::output(path)?;

        let global_header = octx
            .format()
            .flags()
            .contains(ffmpeg_next::format::Flags::GLOBAL_HEADER);

        // Use MPEG4 as a widely compatible encoder
        let codec = ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::MPEG4)
            .ok_or("MPEG4 encoder not found")?;

        let mut ost = octx.add_stream(Some(codec))?;

        let mut encoder_ctx = ffmpeg_next::codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()?;

        encoder_ctx.set_width(metadata.width);
        encoder_ctx.set_height(metadata.height);
        encoder_ctx.set_format(ffmpeg_next::format::Pixel::YUV420P);
        encoder_ctx.set_time_base(ffmpeg_next::Rational(1, self.fps_i));
        encoder_ctx.set_frame_rate(Some(ffmpeg_next::Rational(self.fps_i, 1)));

        if global_header {
            encoder_ctx.set_flags(ffmpeg_next::codec::Flags::GLOBAL_HEADER);
        }

        let encoder = encoder_ctx.open_with(ffmpeg_next::Dictionary::new())?;
        ost.set_parameters(&encoder);

        self.video_stream_index = 0; // first stream

        octx.write_header()?;

        // Set up RGB -> YUV scaler
        let scaler = ffmpeg_next::software::scaling::Context::get(
            ffmpeg_next::format::Pixel::RGB24,
            metadata.width,
            metadata.height,
            ffmpeg_next::format::Pixel::YUV420P,
            metadata.width,
            metadata.height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        self.octx = Some(octx);
        self.encoder = Some(encoder);
        self.scaler = Some(scaler);
        self.frame_count = 0;

        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let encoder = self.encoder.as_mut().ok_or("FfmpegRecorder: not opened")?;
        let scaler = self.scaler.as_mut().ok_or("FfmpegRecorder: not opened")?;
        let octx = self.octx.as_mut().ok_or("FfmpegRecorder: not opened")?;

        if frame.width() != self.width || frame.height() != self.height {
            return Err(format!(
                "frame is {}x{}, recorder expects {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )
            .into());
        }

        let mut rgb_frame = ffmpeg_next::util::frame::video::Video::new(
            ffmpeg_next::format::Pixel::RGB24,
            self.width,
            self.height,
        );

        let stride = rgb_frame.stride(0);
        let data = rgb_frame.data_mut(0);

        // Copy pixel data, respecting stride
        for y in 0..self.height as usize {
            let src_row = frame.row(y);
            let dst_start = y * stride;
            data[dst_start..dst_start + src_row.len()].copy_from_slice(src_row);
        }

        // Convert RGB -> YUV
        let mut yuv_frame = ffmpeg_next::util::frame::video::Video::empty();
        scaler.run(&rgb_frame, &mut yuv_frame)?;
        yuv_frame.set_pts(Some(self.frame_count as i64));

        encoder.send_frame(&yuv_frame)?;

        let ost_time_base = octx
            .stream(self.video_stream_index)
            .ok_or("output stream missing")?
            .time_base();

        let mut encoded = ffmpeg_next::Packet::empty();
        while encoder.receive_packet(&mut encoded).is_ok() {
            encoded.set_stream(self.video_stream_index);
            encoded.rescale_ts(ffmpeg_next::Rational(1, self.fps_i), ost_time_base);
            encoded.write_interleaved(octx)?;
        }

        self.frame_count += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref mut encoder) = self.encoder {
            let octx = self.octx.as_mut().ok_or("output context missing")?;
            let ost_time_base = octx
                .stream(self.video_stream_index)
                .ok_or("output stream missing")?
                .time_base();

            // Flush encoder
            encoder.send_eof()?;
            let mut encoded = ffmpeg_next::Packet::empty();
            while encoder.receive_packet(&mut encoded).is_ok() {
                encoded.set_stream(self.video_stream_index);
                encoded.rescale_ts(ffmpeg_next::Rational(1, self.fps_i), ost_time_base);
                encoded.write_interleaved(octx)?;
            }

            octx.write_trailer()?;
        }

        self.octx = None;
        self.encoder = None;
        self.scaler = None;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(w: u32, h: u32, fps: f64) -> CaptureMetadata {
        CaptureMetadata {
            width: w,
            height: h,
            fps,
        }
    }

    fn solid_frame(index: usize, w: u32, h: u32, value: u8) -> Frame {
        let data = vec![value; (w * h * 3) as usize];
        Frame::new(data, w, h, 3, index)
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");

        let mut recorder = FfmpegRecorder::new();
        recorder.open(&path, &metadata(160, 120, 30.0)).unwrap();
        for i in 0..3 {
            recorder.write(&solid_frame(i, 160, 120, 128)).unwrap();
        }
        recorder.close().unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_written_video_has_correct_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");

        let mut recorder = FfmpegRecorder::new();
        recorder.open(&path, &metadata(160, 120, 30.0)).unwrap();
        recorder.write(&solid_frame(0, 160, 120, 128)).unwrap();
        recorder.close().unwrap();

        // Read back and verify
        ffmpeg_next::init().unwrap();
        let ictx = ffmpeg_next::format::input(&path).unwrap();
        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .unwrap();
        let codec_ctx =
            ffmpeg_next::codec::context::Context::from_parameters(stream.parameters()).unwrap();
        let decoder = codec_ctx.decoder().video().unwrap();
        assert_eq!(decoder.width(), 160);
        assert_eq!(decoder.height(), 120);
    }

    #[test]
    fn test_unreported_fps_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");

        let mut recorder = FfmpegRecorder::new();
        recorder.open(&path, &metadata(160, 120, 0.0)).unwrap();
        recorder.write(&solid_frame(0, 160, 120, 64)).unwrap();
        recorder.close().unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_zero_dimensions_rejected_at_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");

        let mut recorder = FfmpegRecorder::new();
        assert!(recorder.open(&path, &metadata(0, 120, 30.0)).is_err());
    }

    #[test]
    fn test_write_without_open_returns_error() {
        let mut recorder = FfmpegRecorder::new();
        assert!(recorder.write(&solid_frame(0, 160, 120, 128)).is_err());
    }

    #[test]
    fn test_mismatched_frame_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");

        let mut recorder = FfmpegRecorder::new();
        recorder.open(&path, &metadata(160, 120, 30.0)).unwrap();
        assert!(recorder.write(&solid_frame(0, 320, 240, 128)).is_err());
        recorder.close().unwrap();
    }

    #[test]
    fn test_close_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");

        let mut recorder = FfmpegRecorder::new();
        recorder.open(&path, &metadata(160, 120, 30.0)).unwrap();
        recorder.write(&solid_frame(0, 160, 120, 128)).unwrap();
        recorder.close().unwrap();
        // Second close should not panic
        let _ = recorder.close();
    }
}
