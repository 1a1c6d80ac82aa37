//! Upload local audio samples to the ElevenLabs instant voice cloning
//! API, with file-system paths confined to an approved set of roots.

pub mod client;
pub mod errors;
pub mod logging;
pub mod pathguard;
pub mod samples;

pub use client::{
    clone_voice, CloneClientConfig, VoiceCloneRequest, VoiceCloneResponse, VoiceCloner,
    VoiceLabels,
};
pub use errors::{CloneError, CloneResult};
pub use pathguard::confine;
