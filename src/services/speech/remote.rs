use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use super::SpeechAdapter;
use crate::models::{ListenOptions, RecognitionResult, SpeechSettings};

/// Speech gateway reached over HTTP. `prepare` opens a gateway session with the
/// configured locale and voice; `speak` and `listen` run inside it.
pub struct RemoteSpeech {
    endpoint: String,
    key: String,
    client: reqwest::Client,
    session: Mutex<Option<GatewaySession>>,
}

#[derive(Debug, Clone)]
struct GatewaySession {
    id: String,
    locale: String,
    voice: String,
    no_input_timeout_ms: u64,
}

#[derive(Deserialize)]
struct SessionResponse {
    session_id: String,
}

impl RemoteSpeech {
    pub fn new(endpoint: String, key: String) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            key,
            client: reqwest::Client::new(),
            session: Mutex::new(None),
        }
    }

    async fn current(&self) -> anyhow::Result<GatewaySession> {
        self.session
            .lock()
            .await
            .clone()
            .ok_or_else(|| anyhow::anyhow!("speech gateway not prepared"))
    }
}

#[async_trait]
impl SpeechAdapter for RemoteSpeech {
    async fn prepare(&self, settings: &SpeechSettings) -> anyhow::Result<()> {
        let resp: SessionResponse = self
            .client
            .post(format!("{}/sessions", self.endpoint))
            .bearer_auth(&self.key)
            .json(settings)
            .send()
            .await
            .context("failed to reach speech gateway")?
            .error_for_status()
            .context("speech gateway rejected session")?
            .json()
            .await
            .context("failed to parse speech gateway session")?;

        tracing::info!(session = %resp.session_id, locale = %settings.locale, "speech gateway ready");

        *self.session.lock().await = Some(GatewaySession {
            id: resp.session_id,
            locale: settings.locale.clone(),
            voice: settings.tts_voice.clone(),
            no_input_timeout_ms: settings.asr_no_input_timeout_ms,
        });
        Ok(())
    }

    async fn speak(&self, text: &str) -> anyhow::Result<()> {
        let session = self.current().await?;

        self.client
            .post(format!("{}/sessions/{}/speak", self.endpoint, session.id))
            .bearer_auth(&self.key)
            .json(&json!({
                "text": text,
                "voice": session.voice,
            }))
            .send()
            .await
            .context("failed to call speak")?
            .error_for_status()
            .context("speech gateway returned error on speak")?;

        Ok(())
    }

    async fn listen(&self, options: &ListenOptions) -> anyhow::Result<RecognitionResult> {
        let session = self.current().await?;

        let body = self
            .client
            .post(format!("{}/sessions/{}/listen", self.endpoint, session.id))
            .bearer_auth(&self.key)
            .json(&json!({
                "locale": session.locale,
                "complete_timeout_secs": options.complete_timeout_secs,
                "no_input_timeout_ms": session.no_input_timeout_ms,
            }))
            .send()
            .await
            .context("failed to call listen")?
            .error_for_status()
            .context("speech gateway returned error on listen")?
            .text()
            .await
            .context("failed to read listen response")?;

        parse_recognition(&body)
    }
}

fn parse_recognition(body: &str) -> anyhow::Result<RecognitionResult> {
    // Gateways answer `{}` or `null` utterances when nothing was heard
    let data: serde_json::Value =
        serde_json::from_str(body).context("listen response is not JSON")?;
    if data["utterances"].is_null() {
        return Ok(RecognitionResult::empty());
    }
    serde_json::from_value(data).context("unexpected listen response shape")
}
