pub mod emotion_classifier;
pub mod face_tensor;
