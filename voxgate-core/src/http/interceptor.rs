use std::sync::Arc;

use tracing::{debug, warn};

use crate::auth::store::CredentialStore;
use crate::http::navigation::NavigationPort;
use crate::http::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Path substrings marking authentication surfaces. A 401 received while the
/// application is already on one of these must not redirect again, otherwise
/// a failed login would bounce the user back onto the login page forever.
const AUTH_PAGE_MARKERS: &[&str] = &["/login", "/register"];

const LOGIN_PATH: &str = "/login";

/// Classified result of one intercepted send
#[derive(Debug)]
pub enum InterceptionOutcome {
    /// 2xx response, body untouched
    Success(HttpResponse),
    /// 401: the session credential was cleared and a login redirect may have
    /// been issued; the caller's own error handling still runs
    AuthExpired,
    /// Transport-level failure, no response reached
    NetworkError(String),
    /// Any other non-2xx status
    ServerError(u16),
}

impl InterceptionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Wraps a transport so every call pair goes through the same two stages:
/// the stored bearer token is attached on the way out, and failures are
/// classified uniformly on the way back.
///
/// This layer never retries. A blind retry after an auth failure would loop;
/// callers that want retry own that policy and get a classified outcome to
/// base it on.
#[derive(Clone)]
pub struct InterceptorPipeline {
    transport: Arc<dyn HttpTransport>,
    store: CredentialStore,
    navigator: Arc<dyn NavigationPort>,
}

impl InterceptorPipeline {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: CredentialStore,
        navigator: Arc<dyn NavigationPort>,
    ) -> Self {
        Self {
            transport,
            store,
            navigator,
        }
    }

    /// Send one request through both interception stages
    pub async fn send(&self, request: HttpRequest) -> InterceptionOutcome {
        let request = self.attach_credential(request);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(error) => {
                debug!(%error, "transport failure");
                return InterceptionOutcome::NetworkError(error.message);
            }
        };

        self.classify(response)
    }

    /// Request stage: attach the bearer token if one is stored. Absence of a
    /// credential is a valid state, so this stage never fails.
    fn attach_credential(&self, request: HttpRequest) -> HttpRequest {
        match self.store.credential().token {
            Some(token) => {
                debug!(url = %request.url, "attaching bearer credential");
                request.header("Authorization", format!("Bearer {token}"))
            }
            None => request,
        }
    }

    /// Response stage: classify the outcome, recovering exactly once on
    /// auth expiry.
    fn classify(&self, response: HttpResponse) -> InterceptionOutcome {
        if response.is_success() {
            return InterceptionOutcome::Success(response);
        }

        if response.status == 401 {
            self.handle_auth_expiry();
            return InterceptionOutcome::AuthExpired;
        }

        debug!(status = response.status, "server error response");
        InterceptionOutcome::ServerError(response.status)
    }

    /// Clear the stored session as one unit, then redirect to the login
    /// surface unless the application is already on an auth page. The
    /// redirect is fire-and-forget; the AuthExpired outcome is returned to
    /// the caller regardless.
    fn handle_auth_expiry(&self) {
        warn!("session expired, clearing stored credential");

        if let Err(error) = self.store.clear() {
            // The in-memory session is already wiped; only the durable copy
            // failed to update.
            warn!(?error, "failed to persist credential clear");
        }

        let path = self.navigator.current_path();
        if AUTH_PAGE_MARKERS.iter().any(|marker| path.contains(marker)) {
            debug!(%path, "already on an auth surface, skipping login redirect");
            return;
        }

        self.navigator.navigate_to(LOGIN_PATH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::{MockBehavior, MockTransport};
    use crate::http::navigation::RecordingNavigator;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        store: CredentialStore,
        transport: MockTransport,
        navigator: RecordingNavigator,
        pipeline: InterceptorPipeline,
    }

    fn fixture(behavior: MockBehavior, current_path: &str) -> Fixture {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::from_path(dir.path().join("credentials.toml")).unwrap();
        let transport = MockTransport::new(behavior);
        let navigator = RecordingNavigator::new(current_path);
        let pipeline = InterceptorPipeline::new(
            Arc::new(transport.clone()),
            store.clone(),
            Arc::new(navigator.clone()),
        );
        Fixture {
            _dir: dir,
            store,
            transport,
            navigator,
            pipeline,
        }
    }

    #[tokio::test]
    async fn test_no_credential_sends_no_authorization_header() {
        let f = fixture(MockBehavior::ok(vec![]), "/studio");

        f.pipeline.send(HttpRequest::get("http://svc/ping")).await;

        let sent = f.transport.last_captured_request().unwrap();
        assert_eq!(sent.header_value("authorization"), None);
    }

    #[tokio::test]
    async fn test_stored_credential_becomes_exact_bearer_header() {
        let f = fixture(MockBehavior::ok(vec![]), "/studio");
        f.store
            .store_session("secret-token".to_string(), "ada".to_string())
            .unwrap();

        f.pipeline.send(HttpRequest::get("http://svc/ping")).await;

        let sent = f.transport.last_captured_request().unwrap();
        assert_eq!(
            sent.header_value("authorization"),
            Some("Bearer secret-token")
        );
    }

    #[tokio::test]
    async fn test_success_passes_body_through() {
        let f = fixture(MockBehavior::ok(vec![0x01, 0x02]), "/studio");

        let outcome = f.pipeline.send(HttpRequest::get("http://svc/ping")).await;

        match outcome {
            InterceptionOutcome::Success(response) => assert_eq!(response.body, vec![0x01, 0x02]),
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_401_clears_store_and_redirects_once() {
        let f = fixture(MockBehavior::status(401), "/studio");
        f.store
            .store_session("stale".to_string(), "ada".to_string())
            .unwrap();

        let outcome = f.pipeline.send(HttpRequest::get("http://svc/ping")).await;

        assert!(matches!(outcome, InterceptionOutcome::AuthExpired));
        assert!(!f.store.credential().is_present());
        assert!(!f.store.is_authenticated());
        assert_eq!(f.store.identity(), None);
        assert_eq!(f.navigator.navigations(), vec!["/login"]);
    }

    #[tokio::test]
    async fn test_401_on_login_page_does_not_redirect() {
        let f = fixture(MockBehavior::status(401), "/login");

        let outcome = f.pipeline.send(HttpRequest::get("http://svc/ping")).await;

        assert!(matches!(outcome, InterceptionOutcome::AuthExpired));
        assert!(f.navigator.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_401_on_register_page_does_not_redirect() {
        let f = fixture(MockBehavior::status(401), "/register");

        f.pipeline.send(HttpRequest::get("http://svc/ping")).await;

        assert!(f.navigator.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_cleared_credential_is_never_attached_again() {
        let f = fixture(
            MockBehavior::BehaviorQueue {
                behaviors: vec![MockBehavior::status(401), MockBehavior::ok(vec![])],
            },
            "/studio",
        );
        f.store
            .store_session("stale".to_string(), "ada".to_string())
            .unwrap();

        f.pipeline.send(HttpRequest::get("http://svc/ping")).await;
        f.pipeline.send(HttpRequest::get("http://svc/ping")).await;

        let second = f.transport.captured_requests().remove(1);
        assert_eq!(second.header_value("authorization"), None);
    }

    #[tokio::test]
    async fn test_second_401_after_redirect_does_not_redirect_again() {
        // The first redirect moves the surface to /login; the loop guard
        // must then suppress the second one.
        let f = fixture(
            MockBehavior::BehaviorQueue {
                behaviors: vec![MockBehavior::status(401), MockBehavior::status(401)],
            },
            "/studio",
        );

        f.pipeline.send(HttpRequest::get("http://svc/ping")).await;
        f.pipeline.send(HttpRequest::get("http://svc/ping")).await;

        assert_eq!(f.navigator.navigations(), vec!["/login"]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let f = fixture(
            MockBehavior::TransportFailure {
                message: "connection refused".to_string(),
            },
            "/studio",
        );

        let outcome = f.pipeline.send(HttpRequest::get("http://svc/ping")).await;

        match outcome {
            InterceptionOutcome::NetworkError(message) => {
                assert_eq!(message, "connection refused")
            }
            other => panic!("expected NetworkError, got {other:?}"),
        }
        assert!(f.navigator.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_other_status_is_server_error() {
        let f = fixture(MockBehavior::status(503), "/studio");

        let outcome = f.pipeline.send(HttpRequest::get("http://svc/ping")).await;

        assert!(matches!(outcome, InterceptionOutcome::ServerError(503)));
        assert!(f.navigator.navigations().is_empty());
    }
}
