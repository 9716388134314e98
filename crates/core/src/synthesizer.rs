//! Text-to-speech configuration handed to the conversation pipeline.

use crate::audio::AudioEncoding;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AzureSynthesizerConfig {
    pub sampling_rate: u32,
    pub audio_encoding: AudioEncoding,
    pub voice_name: String,
    pub pitch: i32,
    pub rate: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SynthesizerConfig {
    #[serde(rename = "synthesizer_azure")]
    Azure(AzureSynthesizerConfig),
}

impl SynthesizerConfig {
    pub fn sampling_rate(&self) -> u32 {
        match self {
            SynthesizerConfig::Azure(c) => c.sampling_rate,
        }
    }

    pub fn audio_encoding(&self) -> AudioEncoding {
        match self {
            SynthesizerConfig::Azure(c) => c.audio_encoding,
        }
    }
}
