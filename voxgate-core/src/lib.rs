pub mod auth;
pub mod http;
pub mod media;
pub mod synthesis;

// Public library API - the hosting application wires these together once and
// passes them around; nothing in here is a process-wide singleton.
pub use auth::{Credential, CredentialStore, SessionClient};
pub use http::{HttpTransport, InterceptionOutcome, InterceptorPipeline, NavigationPort};
pub use media::{
    CapabilityProber, FormatNegotiator, MediaFamily, MediaStore, PlayableHandle,
    PlaybackConfidence, RawMedia, StaticProber,
};
pub use synthesis::{SynthesisClient, SynthesisError, SynthesisRequest};
