use anyhow::Context;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use super::SpeechAdapter;
use crate::models::{ListenOptions, RecognitionResult, SpeechSettings};

/// Terminal stand-in for a speech backend: prompts go to stdout, each stdin
/// line is one recognized utterance. An empty line recognizes nothing.
pub struct ConsoleSpeech {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleSpeech {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for ConsoleSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechAdapter for ConsoleSpeech {
    async fn prepare(&self, settings: &SpeechSettings) -> anyhow::Result<()> {
        tracing::info!(
            locale = %settings.locale,
            voice = %settings.tts_voice,
            "console speech ready"
        );
        Ok(())
    }

    async fn speak(&self, text: &str) -> anyhow::Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("> {text}\n").as_bytes())
            .await
            .context("failed to write prompt")?;
        stdout.flush().await.context("failed to flush stdout")?;
        Ok(())
    }

    async fn listen(&self, _options: &ListenOptions) -> anyhow::Result<RecognitionResult> {
        let line = self
            .lines
            .lock()
            .await
            .next_line()
            .await
            .context("failed to read from stdin")?
            .ok_or_else(|| anyhow::anyhow!("stdin closed"))?;

        let utterance = line.trim();
        if utterance.is_empty() {
            return Ok(RecognitionResult::empty());
        }
        Ok(RecognitionResult::single(utterance))
    }
}
