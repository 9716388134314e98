//! Speech-to-text configuration handed to the conversation pipeline.
//!
//! The lifecycle manager never interprets these values; it only stores them
//! alongside the call so the pipeline can build its transcriber on connect.

use crate::audio::AudioEncoding;
use serde::{Deserialize, Serialize};

/// Decides when the caller has finished an utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EndpointingConfig {
    /// End of utterance after a pause once punctuation has been seen.
    PunctuationBased { time_cutoff_seconds: f32 },
    /// End of utterance after a fixed pause.
    TimeBased { time_cutoff_seconds: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepgramTranscriberConfig {
    pub sampling_rate: u32,
    pub audio_encoding: AudioEncoding,
    pub chunk_size: u32,
    pub model: Option<String>,
    pub tier: Option<String>,
    pub language: Option<String>,
    pub endpointing_config: Option<EndpointingConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TranscriberConfig {
    #[serde(rename = "transcriber_deepgram")]
    Deepgram(DeepgramTranscriberConfig),
}

impl TranscriberConfig {
    pub fn sampling_rate(&self) -> u32 {
        match self {
            TranscriberConfig::Deepgram(c) => c.sampling_rate,
        }
    }

    pub fn audio_encoding(&self) -> AudioEncoding {
        match self {
            TranscriberConfig::Deepgram(c) => c.audio_encoding,
        }
    }
}
