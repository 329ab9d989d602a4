use tracing::{debug, info};

use crate::http::interceptor::{InterceptionOutcome, InterceptorPipeline};
use crate::http::transport::HttpRequest;
use crate::media::negotiate::AUDIO_SYNTHESIS_MIME;
use crate::media::store::{MediaStore, PlayableHandle};
use crate::synthesis::error::SynthesisError;
use crate::synthesis::types::{SynthesisRequest, SynthesizeBody};

/// Client for the remote synthesis endpoint. Builds the request, submits it
/// through the interceptor pipeline, and wraps the binary response as a
/// playable handle tagged with the producer's fixed output type - the source
/// format is known, so no negotiation runs on this path.
pub struct SynthesisClient {
    pipeline: InterceptorPipeline,
    store: MediaStore,
    base_url: String,
}

impl SynthesisClient {
    pub fn new(
        pipeline: InterceptorPipeline,
        store: MediaStore,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            pipeline,
            store,
            base_url,
        }
    }

    /// Synthesize speech for the request and return a playable handle. Each
    /// call registers one media entry; the caller owns the handle and must
    /// release it through the media store when done with it.
    pub async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<PlayableHandle, SynthesisError> {
        if request.text.trim().is_empty() {
            return Err(SynthesisError::InvalidRequest(
                "text must not be empty".to_string(),
            ));
        }

        let body = SynthesizeBody {
            text: &request.text,
            language: request.language,
            gender: request.voice_gender,
            emotion: request.emotion,
        };
        let body = serde_json::to_value(&body).expect("SynthesizeBody should serialize");

        debug!(
            language = %request.language,
            gender = %request.voice_gender,
            emotion = %request.emotion,
            chars = request.text.len(),
            "submitting synthesis request"
        );

        let http_request = HttpRequest::post(format!("{}/synthesize", self.base_url), body);

        match self.pipeline.send(http_request).await {
            InterceptionOutcome::Success(response) => {
                let handle = self.store.create(response.body, AUDIO_SYNTHESIS_MIME);
                info!(uri = %handle.uri, "synthesis complete");
                Ok(handle)
            }
            outcome => Err(SynthesisError::Failed(outcome)),
        }
    }
}
