use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire encoding of the audio exchanged with the telephony provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioEncoding {
    Linear16,
    Mulaw,
}

impl fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioEncoding::Linear16 => write!(f, "linear16"),
            AudioEncoding::Mulaw => write!(f, "mulaw"),
        }
    }
}
