//! Fallback transcriber and synthesizer settings for phone audio.
//!
//! Each call gets its own freshly built value; nothing here is shared state.

use crate::constants::*;
use crate::synthesizer::{AzureSynthesizerConfig, SynthesizerConfig};
use crate::transcriber::{DeepgramTranscriberConfig, EndpointingConfig, TranscriberConfig};

/// Deepgram tuned for 8 kHz mu-law phone audio.
pub fn default_transcriber_config() -> TranscriberConfig {
    TranscriberConfig::Deepgram(DeepgramTranscriberConfig {
        sampling_rate: DEFAULT_SAMPLING_RATE,
        audio_encoding: DEFAULT_AUDIO_ENCODING,
        chunk_size: DEFAULT_CHUNK_SIZE,
        model: Some(DEFAULT_DEEPGRAM_MODEL.to_string()),
        tier: Some(DEFAULT_DEEPGRAM_TIER.to_string()),
        language: None,
        endpointing_config: Some(EndpointingConfig::PunctuationBased {
            time_cutoff_seconds: DEFAULT_ENDPOINTING_CUTOFF_SECONDS,
        }),
    })
}

/// Azure speech at the same rate and encoding as the phone line.
pub fn default_synthesizer_config() -> SynthesizerConfig {
    SynthesizerConfig::Azure(AzureSynthesizerConfig {
        sampling_rate: DEFAULT_SAMPLING_RATE,
        audio_encoding: DEFAULT_AUDIO_ENCODING,
        voice_name: DEFAULT_AZURE_VOICE_NAME.to_string(),
        pitch: DEFAULT_AZURE_PITCH,
        rate: DEFAULT_AZURE_RATE,
    })
}

pub fn resolve_transcriber_config(config: Option<TranscriberConfig>) -> TranscriberConfig {
    config.unwrap_or_else(default_transcriber_config)
}

pub fn resolve_synthesizer_config(config: Option<SynthesizerConfig>) -> SynthesizerConfig {
    config.unwrap_or_else(default_synthesizer_config)
}
