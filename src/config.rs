use std::env;

use crate::models::{ListenOptions, SpeechSettings};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub speech_provider: String,
    pub speech_endpoint: String,
    pub speech_key: String,
    pub locale: String,
    pub tts_voice: String,
    pub asr_no_input_timeout_ms: u64,
    pub asr_complete_timeout_ms: u64,
    pub listen_complete_timeout_secs: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: parse_env("PORT").unwrap_or(3000),
            speech_provider: env::var("SPEECH_PROVIDER").unwrap_or_else(|_| "console".to_string()),
            speech_endpoint: env::var("SPEECH_ENDPOINT").unwrap_or_default(),
            speech_key: env::var("SPEECH_KEY").unwrap_or_default(),
            locale: env::var("LOCALE").unwrap_or_else(|_| "en-US".to_string()),
            tts_voice: env::var("TTS_VOICE").unwrap_or_else(|_| "en-US-DavisNeural".to_string()),
            asr_no_input_timeout_ms: parse_env("ASR_NO_INPUT_TIMEOUT_MS").unwrap_or(5000),
            asr_complete_timeout_ms: parse_env("ASR_COMPLETE_TIMEOUT_MS").unwrap_or(0),
            listen_complete_timeout_secs: parse_env("LISTEN_COMPLETE_TIMEOUT_SECS").unwrap_or(5),
        }
    }

    pub fn speech_settings(&self) -> SpeechSettings {
        SpeechSettings {
            locale: self.locale.clone(),
            tts_voice: self.tts_voice.clone(),
            asr_no_input_timeout_ms: self.asr_no_input_timeout_ms,
            asr_complete_timeout_ms: self.asr_complete_timeout_ms,
            endpoint: self.speech_endpoint.clone(),
            key: self.speech_key.clone(),
        }
    }

    pub fn listen_options(&self) -> ListenOptions {
        ListenOptions {
            complete_timeout_secs: self.listen_complete_timeout_secs,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
