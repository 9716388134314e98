//! Telephony audio defaults shared by the transcriber and synthesizer factories.

use crate::audio::AudioEncoding;

/// Phone audio arrives from the provider as 8 kHz mu-law.
pub const DEFAULT_SAMPLING_RATE: u32 = 8000;
pub const DEFAULT_AUDIO_ENCODING: AudioEncoding = AudioEncoding::Mulaw;
/// 20 media frames of 160 bytes each.
pub const DEFAULT_CHUNK_SIZE: u32 = 20 * 160;

pub const DEFAULT_DEEPGRAM_MODEL: &str = "phonecall";
pub const DEFAULT_DEEPGRAM_TIER: &str = "nova";
pub const DEFAULT_ENDPOINTING_CUTOFF_SECONDS: f32 = 0.4;

pub const DEFAULT_AZURE_VOICE_NAME: &str = "en-US-SteffanNeural";
pub const DEFAULT_AZURE_PITCH: i32 = 0;
pub const DEFAULT_AZURE_RATE: i32 = 15;

/// Shortest destination number accepted before any provider lookup.
pub const MIN_PHONE_NUMBER_LEN: usize = 8;
/// Line type the provider lookup must report when calls are restricted to mobiles.
pub const MOBILE_LINE_TYPE: &str = "mobile";
/// Status requested from, and expected back from, the provider when hanging up.
pub const COMPLETED_CALL_STATUS: &str = "completed";
