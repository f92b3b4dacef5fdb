pub mod console;
pub mod remote;

use async_trait::async_trait;

use crate::models::{ListenOptions, RecognitionResult, SpeechSettings};

/// Speech synthesis and recognition backend.
///
/// `speak` resolves once the audio has finished playing, `listen` once the
/// recognizer has a result (possibly with no hypotheses).
#[async_trait]
pub trait SpeechAdapter: Send + Sync {
    async fn prepare(&self, settings: &SpeechSettings) -> anyhow::Result<()>;
    async fn speak(&self, text: &str) -> anyhow::Result<()>;
    async fn listen(&self, options: &ListenOptions) -> anyhow::Result<RecognitionResult>;
}
