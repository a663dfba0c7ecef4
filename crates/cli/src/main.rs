use std::path::PathBuf;
use std::process;

use clap::Parser;

use moodcam_core::announce::domain::announcement_gate::AnnouncementGate;
use moodcam_core::announce::domain::announcer::Announcer;
use moodcam_core::announce::infrastructure::process_announcer::ProcessAnnouncer;
use moodcam_core::annotation::domain::frame_annotator::FrameAnnotator;
use moodcam_core::capture::domain::frame_source::FrameSource;
use moodcam_core::capture::infrastructure::nokhwa_camera::NokhwaCamera;
use moodcam_core::classification::domain::emotion_classifier::EmotionClassifier;
use moodcam_core::classification::infrastructure::onnx_emotion_classifier::OnnxEmotionClassifier;
use moodcam_core::detection::domain::face_detector::FaceDetector;
use moodcam_core::detection::infrastructure::onnx_face_detector::OnnxFaceDetector;
use moodcam_core::display::domain::display_surface::DisplaySurface;
use moodcam_core::display::infrastructure::minifb_display::MinifbDisplay;
use moodcam_core::display::infrastructure::null_display::NullDisplay;
use moodcam_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use moodcam_core::pipeline::record_emotions_use_case::RecordEmotionsUseCase;
use moodcam_core::recording::domain::recording_sink::RecordingSink;
use moodcam_core::recording::domain::session_file::session_output_path;
use moodcam_core::recording::infrastructure::ffmpeg_recorder::FfmpegRecorder;
use moodcam_core::shared::constants::{
    DEFAULT_CONFIDENCE, DEFAULT_COOLDOWN_FRAMES, EMOTION_MODEL_NAME, FACE_MODEL_NAME,
};
use moodcam_core::shared::model_resolver;

/// Live webcam emotion detection with spoken announcements and
/// recording to a timestamped video file.
#[derive(Parser)]
#[command(name = "moodcam")]
struct Cli {
    /// Camera device index.
    #[arg(long, default_value = "0")]
    camera: u32,

    /// Directory for the recorded video.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Frames between announcement opportunities.
    #[arg(long, default_value_t = DEFAULT_COOLDOWN_FRAMES)]
    cooldown: u64,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Path to the face detection ONNX model (overrides the cache).
    #[arg(long)]
    face_model: Option<PathBuf>,

    /// Download URL for the face detection model.
    #[arg(long)]
    face_model_url: Option<String>,

    /// Path to the emotion classification ONNX model (overrides the cache).
    #[arg(long)]
    emotion_model: Option<PathBuf>,

    /// Download URL for the emotion classification model.
    #[arg(long)]
    emotion_model_url: Option<String>,

    /// Text-to-speech program to run for announcements.
    #[arg(long)]
    speech_command: Option<String>,

    /// Disable spoken announcements.
    #[arg(long)]
    mute: bool,

    /// Run without a preview window (stop with Ctrl-C).
    #[arg(long)]
    headless: bool,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let detector = build_detector(&cli)?;
    let classifier = build_classifier(&cli)?;
    let announcer = build_announcer(&cli);
    let display = build_display(&cli);

    log::info!("Opening camera {}", cli.camera);
    let source: Box<dyn FrameSource> = Box::new(NokhwaCamera::open(cli.camera)?);
    let metadata = source.metadata();
    log::info!(
        "Capturing {}x{} at {:.0} fps",
        metadata.width,
        metadata.height,
        metadata.session_fps()
    );

    let sink: Box<dyn RecordingSink> = Box::new(FfmpegRecorder::new());
    let output_path = session_output_path(&cli.output_dir, chrono::Local::now());

    let mut use_case = RecordEmotionsUseCase::new(
        source,
        detector,
        classifier,
        FrameAnnotator::new(),
        AnnouncementGate::new(cli.cooldown),
        announcer,
        sink,
        display,
        Box::new(StdoutPipelineLogger::default()),
    );
    if let Some(max) = cli.max_frames {
        use_case = use_case.with_max_frames(max);
    }

    if !cli.headless {
        eprintln!("Press 'q' in the preview window to stop.");
    }

    let summary = use_case.run(&output_path)?;
    log::info!(
        "Recorded {} frames ({} announcements) to {}",
        summary.frames_processed,
        summary.announcements,
        output_path.display()
    );

    Ok(())
}

fn build_detector(cli: &Cli) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    let model_path = match &cli.face_model {
        Some(path) => path.clone(),
        None => {
            log::info!("Resolving model: {FACE_MODEL_NAME}");
            let path = model_resolver::resolve(
                FACE_MODEL_NAME,
                cli.face_model_url.as_deref(),
                None,
                Some(Box::new(download_progress)),
            )?;
            eprintln!();
            path
        }
    };
    Ok(Box::new(OnnxFaceDetector::new(&model_path, cli.confidence)?))
}

fn build_classifier(cli: &Cli) -> Result<Box<dyn EmotionClassifier>, Box<dyn std::error::Error>> {
    let model_path = match &cli.emotion_model {
        Some(path) => path.clone(),
        None => {
            log::info!("Resolving model: {EMOTION_MODEL_NAME}");
            let path = model_resolver::resolve(
                EMOTION_MODEL_NAME,
                cli.emotion_model_url.as_deref(),
                None,
                Some(Box::new(download_progress)),
            )?;
            eprintln!();
            path
        }
    };
    Ok(Box::new(OnnxEmotionClassifier::new(&model_path)?))
}

fn build_announcer(cli: &Cli) -> Box<dyn Announcer> {
    if cli.mute {
        return Box::new(MuteAnnouncer);
    }
    match &cli.speech_command {
        Some(program) => Box::new(ProcessAnnouncer::with_command(program, &[])),
        None => Box::new(ProcessAnnouncer::new()),
    }
}

fn build_display(cli: &Cli) -> Box<dyn DisplaySurface> {
    if cli.headless {
        Box::new(NullDisplay::new())
    } else {
        Box::new(MinifbDisplay::new("moodcam"))
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.output_dir.is_dir() {
        return Err(format!("Output directory not found: {}", cli.output_dir.display()).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err("--confidence must be between 0.0 and 1.0".into());
    }
    if let Some(path) = &cli.face_model {
        if !path.exists() {
            return Err(format!("Face model not found: {}", path.display()).into());
        }
    }
    if let Some(path) = &cli.emotion_model {
        if !path.exists() {
            return Err(format!("Emotion model not found: {}", path.display()).into());
        }
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = downloaded as f64 / total as f64 * 100.0;
        eprint!("\rDownloading model: {pct:.0}%");
    } else {
        eprint!("\rDownloading model: {} MB", downloaded / (1024 * 1024));
    }
}

/// Announcer used with --mute: accepts every utterance and stays quiet.
struct MuteAnnouncer;

impl Announcer for MuteAnnouncer {
    fn speak(&mut self, _text: &str) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
