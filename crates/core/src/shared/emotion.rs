use std::fmt;

/// The seven emotion classes, in the exact order of the classifier's
/// output vector.
///
/// The discriminant values are load-bearing: `from_index` and
/// `from_scores` map model output positions onto labels by this order,
/// and the classifier adapter refuses to load a model whose output
/// cardinality differs from [`EmotionLabel::COUNT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmotionLabel {
    Angry = 0,
    Disgust = 1,
    Fear = 2,
    Happy = 3,
    Sad = 4,
    Surprise = 5,
    Neutral = 6,
}

impl EmotionLabel {
    pub const COUNT: usize = 7;

    pub const ALL: [EmotionLabel; Self::COUNT] = [
        EmotionLabel::Angry,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Surprise,
        EmotionLabel::Neutral,
    ];

    pub fn from_index(index: usize) -> Option<EmotionLabel> {
        Self::ALL.get(index).copied()
    }

    /// Picks the label with the highest score.
    ///
    /// Ties break toward the lowest index. Returns `None` when the
    /// score vector is empty or its length does not match the label set
    /// (a malformed classifier output is a per-face skip, not a crash).
    pub fn from_scores(scores: &[f32]) -> Option<EmotionLabel> {
        if scores.len() != Self::COUNT {
            return None;
        }
        let mut best = 0usize;
        for (i, &s) in scores.iter().enumerate().skip(1) {
            if s > scores[best] {
                best = i;
            }
        }
        Self::from_index(best)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Angry => "angry",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Happy => "happy",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::Neutral => "neutral",
        }
    }

    /// Sentence spoken when this emotion is announced.
    pub fn announcement(&self) -> String {
        format!("You look {}", self.as_str())
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
