pub mod client;
pub mod error;
pub mod types;

pub use client::SynthesisClient;
pub use error::SynthesisError;
pub use types::{Emotion, Language, SynthesisRequest, VoiceGender};
