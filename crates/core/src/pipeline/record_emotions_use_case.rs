use std::path::Path;
use std::time::Instant;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::announce::domain::announcement_gate::AnnouncementGate;
use crate::announce::domain::announcer::Announcer;
use crate::capture::domain::frame_source::FrameSource;
use crate::classification::domain::emotion_classifier::EmotionClassifier;
use crate::classification::domain::face_tensor::FaceTensor;
use crate::detection::domain::face_detector::FaceDetector;
use crate::display::domain::display_surface::DisplaySurface;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::recording::domain::recording_sink::RecordingSink;
use crate::shared::emotion::EmotionLabel;
use crate::shared::face_box::FaceBox;

/// What happened during one capture session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub frames_processed: u64,
    pub announcements: u64,
    pub cancelled: bool,
}

/// Orchestrates the live capture loop: read a frame, detect faces,
/// classify and label each one, maybe announce, record, preview.
///
/// Camera read, detection, and encoding errors are fatal and end the
/// session; per-face classification problems and speech failures only
/// skip the affected face or utterance. The sink and source are closed
/// on every exit path so a partial recording stays playable.
pub struct RecordEmotionsUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn FaceDetector>,
    classifier: Box<dyn EmotionClassifier>,
    annotator: FrameAnnotator,
    gate: AnnouncementGate,
    announcer: Box<dyn Announcer>,
    sink: Box<dyn RecordingSink>,
    display: Box<dyn DisplaySurface>,
    logger: Box<dyn PipelineLogger>,
    max_frames: Option<u64>,
}

impl RecordEmotionsUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
        classifier: Box<dyn EmotionClassifier>,
        annotator: FrameAnnotator,
        gate: AnnouncementGate,
        announcer: Box<dyn Announcer>,
        sink: Box<dyn RecordingSink>,
        display: Box<dyn DisplaySurface>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            detector,
            classifier,
            annotator,
            gate,
            announcer,
            sink,
            display,
            logger,
            max_frames: None,
        }
    }

    /// Bounds the session to `max` frames. Mainly for headless runs,
    /// which have no preview window to cancel from.
    pub fn with_max_frames(mut self, max: u64) -> Self {
        self.max_frames = Some(max);
        self
    }

    /// Runs the session until cancellation or a fatal error.
    pub fn run(&mut self, output_path: &Path) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let metadata = self.source.metadata();
        if let Err(e) = self.sink.open(output_path, &metadata) {
            self.source.close();
            return Err(e);
        }
        self.logger
            .info(&format!("Recording to {}", output_path.display()));

        let result = self.capture_loop();

        let close_result = self.sink.close();
        self.source.close();
        self.logger.summary();

        match result {
            Ok(summary) => {
                close_result?;
                Ok(summary)
            }
            Err(e) => {
                if let Err(close_err) = close_result {
                    log::warn!("Failed to finalize recording: {close_err}");
                }
                Err(e)
            }
        }
    }

    fn capture_loop(&mut self) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let mut summary = SessionSummary::default();

        loop {
            if self.display.cancel_requested() {
                summary.cancelled = true;
                self.logger.info("Cancellation requested, stopping capture");
                break;
            }
            if self.max_frames == Some(summary.frames_processed) {
                self.logger.info("Frame limit reached, stopping capture");
                break;
            }

            let mut frame = self.source.next_frame()?;

            let started = Instant::now();
            let faces = self.detector.detect(&frame)?;
            self.logger.timing("detect", elapsed_ms(started));
            self.logger.metric("faces", faces.len() as f64);

            let started = Instant::now();
            let mut labeled: Vec<(FaceBox, EmotionLabel)> = Vec::with_capacity(faces.len());
            for face in &faces {
                // Boxes that fall entirely outside the frame have no
                // pixels to classify.
                let Some(tensor) = FaceTensor::from_region(&frame, face) else {
                    continue;
                };

                let scores = match self.classifier.classify(&tensor) {
                    Ok(scores) => scores,
                    Err(e) => {
                        log::warn!("Skipping face on frame {}: {e}", frame.index());
                        continue;
                    }
                };
                let Some(emotion) = EmotionLabel::from_scores(&scores) else {
                    continue;
                };
                labeled.push((*face, emotion));
            }
            self.logger.timing("classify", elapsed_ms(started));

            let started = Instant::now();
            for (face, emotion) in &labeled {
                self.annotator.annotate(&mut frame, face, *emotion);
            }
            self.logger.timing("annotate", elapsed_ms(started));

            for (_, emotion) in &labeled {
                if self.gate.maybe_announce(frame.index() as u64, *emotion) {
                    summary.announcements += 1;
                    if let Err(e) = self.announcer.speak(&emotion.announcement()) {
                        log::warn!("Announcement failed: {e}");
                    }
                }
            }

            let started = Instant::now();
            self.sink.write(&frame)?;
            self.logger.timing("encode", elapsed_ms(started));

            if let Err(e) = self.display.present(&frame) {
                log::warn!("Preview update failed: {e}");
            }

            summary.frames_processed += 1;
            self.logger.progress(summary.frames_processed as usize);
        }

        Ok(summary)
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
