use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Locale tags the synthesis service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Language {
    #[serde(rename = "en-US")]
    #[strum(serialize = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    #[strum(serialize = "en-GB")]
    EnGb,
    #[serde(rename = "zh-CN")]
    #[strum(serialize = "zh-CN")]
    ZhCn,
    #[serde(rename = "ja-JP")]
    #[strum(serialize = "ja-JP")]
    JaJp,
    #[serde(rename = "ko-KR")]
    #[strum(serialize = "ko-KR")]
    KoKr,
    #[serde(rename = "fr-FR")]
    #[strum(serialize = "fr-FR")]
    FrFr,
    #[serde(rename = "de-DE")]
    #[strum(serialize = "de-DE")]
    DeDe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoiceGender {
    Female,
    Male,
}

/// Emotion tags the synthesis service supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Emotion {
    Neutral,
    Happy,
    Sad,
    Angry,
}

/// One synthesis call. Immutable once submitted; the closed enums make an
/// out-of-range locale, gender or emotion unrepresentable, so the client
/// only has to validate the text itself.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: Language,
    pub voice_gender: VoiceGender,
    pub emotion: Emotion,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: Language::EnUs,
            voice_gender: VoiceGender::Female,
            emotion: Emotion::Neutral,
        }
    }
}

/// Wire body for POST {base}/synthesize
#[derive(Serialize)]
pub(crate) struct SynthesizeBody<'a> {
    pub text: &'a str,
    pub language: Language,
    pub gender: VoiceGender,
    pub emotion: Emotion,
}
