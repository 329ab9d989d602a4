pub mod negotiate;
pub mod probe;
pub mod store;

pub use negotiate::{FormatNegotiator, MediaFamily, RawMedia, AUDIO_SYNTHESIS_MIME};
pub use probe::{CapabilityProber, PlaybackConfidence, StaticProber};
pub use store::{MediaStore, PlayableHandle};
