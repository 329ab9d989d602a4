pub mod interceptor;
pub mod mock;
pub mod navigation;
pub mod transport;

pub use interceptor::{InterceptionOutcome, InterceptorPipeline};
pub use navigation::{NavigationPort, RecordingNavigator, TracingNavigator};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
