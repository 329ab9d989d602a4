use std::sync::Arc;

use tracing::debug;

use crate::media::probe::CapabilityProber;
use crate::media::store::{MediaStore, PlayableHandle};

/// Fixed output type of the synthesis producer. The service emits one known
/// format, so the audio family carries a single candidate.
pub const AUDIO_SYNTHESIS_MIME: &str = "audio/wav";

/// Media family a caller wants a playable representation for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFamily {
    Audio,
    Video,
}

impl MediaFamily {
    /// Substring that identifies the family inside a declared MIME type
    fn marker(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// Ordered candidate tags to try when the declared type is unusable
    fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Audio => &[AUDIO_SYNTHESIS_MIME],
            Self::Video => &["video/mp4", "video/webm"],
        }
    }
}

/// Arbitrary media bytes with an optional declared MIME type
#[derive(Debug, Clone)]
pub struct RawMedia {
    pub bytes: Vec<u8>,
    pub declared_mime: Option<String>,
}

impl RawMedia {
    pub fn untyped(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            declared_mime: None,
        }
    }

    pub fn with_mime(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            declared_mime: Some(mime_type.into()),
        }
    }
}

/// Picks a playable container tag for media bytes the declared type of which
/// may be wrong or missing. Re-tags only - the payload is never inspected
/// and never re-encoded. Total: every input produces a handle.
pub struct FormatNegotiator {
    prober: Arc<dyn CapabilityProber>,
    store: MediaStore,
}

impl FormatNegotiator {
    pub fn new(prober: Arc<dyn CapabilityProber>, store: MediaStore) -> Self {
        Self { prober, store }
    }

    /// Negotiate a playable representation and register it as a handle. The
    /// caller owns the handle and releases it through the media store.
    pub fn negotiate(&self, media: RawMedia, family: MediaFamily) -> PlayableHandle {
        let mime_type = self.choose_mime(media.declared_mime.as_deref(), family);
        self.store.create(media.bytes, mime_type)
    }

    fn choose_mime(&self, declared: Option<&str>, family: MediaFamily) -> String {
        if let Some(declared) = declared {
            if declared.contains(family.marker()) && self.prober.can_play(declared).at_least_maybe()
            {
                debug!(mime_type = declared, "declared type accepted");
                return declared.to_string();
            }
        }

        for candidate in family.candidates() {
            if self.prober.can_play(candidate).at_least_maybe() {
                debug!(mime_type = candidate, "candidate accepted");
                return candidate.to_string();
            }
        }

        // Nothing probed as playable. Tag with the first candidate anyway:
        // a wrong-but-present tag lets the playback surface raise its own
        // specific decode error instead of this layer raising a generic one.
        let fallback = family.candidates()[0];
        debug!(mime_type = fallback, "no candidate accepted, best-effort tag");
        fallback.to_string()
    }
}
