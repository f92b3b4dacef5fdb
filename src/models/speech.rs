use serde::{Deserialize, Serialize};

/// Settings handed to the speech backend when it is prepared.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechSettings {
    pub locale: String,
    pub tts_voice: String,
    pub asr_no_input_timeout_ms: u64,
    pub asr_complete_timeout_ms: u64,
    #[serde(skip_serializing)]
    pub endpoint: String,
    #[serde(skip_serializing)]
    pub key: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListenOptions {
    pub complete_timeout_secs: u32,
}

impl Default for ListenOptions {
    fn default() -> Self {
        Self {
            complete_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hypothesis {
    pub utterance: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// Recognizer output, n-best ordered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecognitionResult {
    pub utterances: Vec<Hypothesis>,
}

impl RecognitionResult {
    pub fn single(utterance: &str) -> Self {
        Self {
            utterances: vec![Hypothesis {
                utterance: utterance.to_string(),
                confidence: None,
            }],
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The first hypothesis, or `""` when nothing was recognized.
    pub fn best(&self) -> &str {
        self.utterances
            .first()
            .map(|h| h.utterance.as_str())
            .unwrap_or("")
    }
}
