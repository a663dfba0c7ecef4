/// File name of the face-detection ONNX model looked up by the resolver.
pub const FACE_MODEL_NAME: &str = "yolo-face.onnx";

/// File name of the emotion-classification ONNX model.
pub const EMOTION_MODEL_NAME: &str = "emotion-fer.onnx";

/// Square input edge expected by the emotion classifier.
pub const FACE_TENSOR_SIZE: usize = 48;

/// Frames between announcement opportunities.
pub const DEFAULT_COOLDOWN_FRAMES: u64 = 30;

/// Encoding frame rate used when the capture source reports 0/unknown.
pub const DEFAULT_FPS: f64 = 24.0;

/// Default detector confidence threshold.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Resolution requested from the camera at startup.
pub const CAPTURE_WIDTH: u32 = 640;
pub const CAPTURE_HEIGHT: u32 = 480;
pub const CAPTURE_FPS: u32 = 30;
