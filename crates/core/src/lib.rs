//! Outbound call lifecycle for the ringout voice agent.
//!
//! Places a phone call through the telephony provider, stores the session
//! configuration the real-time conversation pipeline needs, and ends the call
//! again on request. See [`outbound_call::OutboundCall`] for the entry point.

pub mod agent;
pub mod audio;
pub mod config_manager;
pub mod constants;
pub mod defaults;
pub mod error;
pub mod outbound_call;
pub mod session;
pub mod synthesizer;
pub mod telephony;
pub mod templater;
pub mod transcriber;
