use std::collections::HashMap;

use strum::Display;

/// Confidence the runtime reports for decoding a MIME/codec string. Ordered:
/// `Probably > Maybe > No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PlaybackConfidence {
    No,
    Maybe,
    Probably,
}

impl PlaybackConfidence {
    /// Negotiation accepts anything the runtime does not outright reject
    pub fn at_least_maybe(self) -> bool {
        self >= Self::Maybe
    }
}

/// Capability query surface provided by the hosting runtime. Must be pure:
/// no caching (availability can change between calls, e.g. after a codec
/// pack loads) and no observable side effects. This core only consumes it.
pub trait CapabilityProber: Send + Sync {
    fn can_play(&self, mime_type: &str) -> PlaybackConfidence;
}

/// Fixed-table prober. `with_defaults` mirrors what the bundled playback
/// stack decodes; arbitrary tables make deterministic test stubs.
pub struct StaticProber {
    table: HashMap<String, PlaybackConfidence>,
}

impl StaticProber {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PlaybackConfidence)>,
        S: Into<String>,
    {
        Self {
            table: entries
                .into_iter()
                .map(|(mime, confidence)| (mime.into(), confidence))
                .collect(),
        }
    }

    /// Stock support table of the bundled decoder stack
    pub fn with_defaults() -> Self {
        Self::new([
            ("audio/wav", PlaybackConfidence::Probably),
            ("audio/mpeg", PlaybackConfidence::Probably),
            ("audio/ogg", PlaybackConfidence::Maybe),
            ("video/mp4", PlaybackConfidence::Maybe),
            ("video/webm", PlaybackConfidence::Maybe),
        ])
    }

    /// A prober that rejects everything
    pub fn rejecting() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl CapabilityProber for StaticProber {
    fn can_play(&self, mime_type: &str) -> PlaybackConfidence {
        if let Some(&confidence) = self.table.get(mime_type) {
            return confidence;
        }

        // Fall back to the bare type with codec parameters stripped, so
        // `video/mp4; codecs="avc1"` answers like `video/mp4`.
        let bare = mime_type.split(';').next().unwrap_or("").trim();
        self.table
            .get(bare)
            .copied()
            .unwrap_or(PlaybackConfidence::No)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_ordering() {
        assert!(PlaybackConfidence::Probably > PlaybackConfidence::Maybe);
        assert!(PlaybackConfidence::Maybe > PlaybackConfidence::No);
        assert!(PlaybackConfidence::Maybe.at_least_maybe());
        assert!(!PlaybackConfidence::No.at_least_maybe());
    }

    #[test]
    fn test_unknown_type_probes_no() {
        let prober = StaticProber::with_defaults();
        assert_eq!(
            prober.can_play("application/x-mystery"),
            PlaybackConfidence::No
        );
    }

    #[test]
    fn test_codec_parameters_are_stripped_for_lookup() {
        let prober = StaticProber::new([("video/mp4", PlaybackConfidence::Probably)]);
        assert_eq!(
            prober.can_play(r#"video/mp4; codecs="avc1.42E01E""#),
            PlaybackConfidence::Probably
        );
    }

    #[test]
    fn test_exact_entry_wins_over_bare_type() {
        let prober = StaticProber::new([
            ("video/mp4", PlaybackConfidence::Maybe),
            (r#"video/mp4; codecs="avc1""#, PlaybackConfidence::Probably),
        ]);
        assert_eq!(
            prober.can_play(r#"video/mp4; codecs="avc1""#),
            PlaybackConfidence::Probably
        );
        assert_eq!(prober.can_play("video/mp4"), PlaybackConfidence::Maybe);
    }
}
