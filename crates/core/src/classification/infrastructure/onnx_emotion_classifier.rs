use std::path::Path;

use crate::classification::domain::emotion_classifier::EmotionClassifier;
use crate::classification::domain::face_tensor::FaceTensor;
use crate::shared::emotion::EmotionLabel;

/// Emotion classifier backed by an ONNX Runtime session.
///
/// Expects a `[1, 1, 48, 48]` grayscale input and a 7-wide output, one
/// logit per label in [`EmotionLabel::ALL`] order. Softmax is applied
/// here so callers always see a probability distribution.
pub struct OnnxEmotionClassifier {
    session: ort::session::Session,
}

impl OnnxEmotionClassifier {
    /// Load the emotion model and validate its output cardinality.
    ///
    /// A model whose last output dimension is static and differs from
    /// the label-set size is rejected at load time — silently
    /// mislabeled inference is worse than failing to start.
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;

        if let Some(output) = session.outputs().first() {
            if let ort::value::ValueType::Tensor { ref shape, .. } = output.dtype() {
                if let Some(&last) = shape.last() {
                    if last > 0 && last as usize != EmotionLabel::COUNT {
                        return Err(format!(
                            "emotion model declares {last} output classes, expected {}",
                            EmotionLabel::COUNT
                        )
                        .into());
                    }
                }
            }
        }

        Ok(Self { session })
    }
}

impl EmotionClassifier for OnnxEmotionClassifier {
    fn classify(&mut self, face: &FaceTensor) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let input_value = ort::value::Tensor::from_array(face.as_array().clone())?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("emotion model produced no outputs".into());
        }

        let tensor = outputs[0].try_extract_array::<f32>()?;
        let logits = tensor.as_slice().ok_or("cannot get tensor slice")?;
        if logits.len() != EmotionLabel::COUNT {
            return Err(format!(
                "emotion model returned {} scores, expected {}",
                logits.len(),
                EmotionLabel::COUNT
            )
            .into());
        }

        Ok(softmax(logits))
    }
}

/// Numerically-stable softmax.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exp: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exp.iter().sum();
    exp.iter().map(|&e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0, 0.5, -1.0, 0.0, 2.5]);
        assert_relative_eq!(probs.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_softmax_preserves_argmax() {
        let logits = [0.1, 4.0, 0.2, 0.3, 0.0, -2.0, 1.0];
        let probs = softmax(&logits);
        let best = probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i);
        assert_eq!(best, Some(1));
    }

    #[test]
    fn test_softmax_stable_for_large_logits() {
        let probs = softmax(&[1000.0, 999.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!(probs[0] > probs[1]);
    }
}
