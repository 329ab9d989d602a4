use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::http::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Scripted behavior for the mock transport
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Respond with a fixed status and body
    Respond {
        status: u16,
        content_type: Option<String>,
        body: Vec<u8>,
    },
    /// Fail at the transport level (no response reached)
    TransportFailure { message: String },
    /// Pop behaviors one per call; an exhausted queue answers 200/empty
    BehaviorQueue { behaviors: Vec<MockBehavior> },
}

impl MockBehavior {
    /// 200 with the given bytes
    pub fn ok(body: Vec<u8>) -> Self {
        Self::Respond {
            status: 200,
            content_type: None,
            body,
        }
    }

    /// A bodyless response with the given status
    pub fn status(status: u16) -> Self {
        Self::Respond {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }
}

/// Mock transport for tests: scripted responses, call counts, captured
/// requests for asserting on what the pipeline actually sent.
#[derive(Clone)]
pub struct MockTransport {
    behavior: Arc<Mutex<MockBehavior>>,
    call_count: Arc<Mutex<usize>>,
    captured_requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            call_count: Arc::new(Mutex::new(0)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn pop_behavior_from_queue(behavior: &mut MockBehavior) -> MockBehavior {
        if let MockBehavior::BehaviorQueue { behaviors } = behavior {
            if behaviors.is_empty() {
                return MockBehavior::ok(Vec::new());
            }
            return behaviors.remove(0);
        }
        behavior.clone()
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.captured_requests.lock().unwrap().clone()
    }

    pub fn last_captured_request(&self) -> Option<HttpRequest> {
        self.captured_requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        {
            let mut requests = self.captured_requests.lock().unwrap();
            requests.push(request);
        }

        {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
        }

        let effective = {
            let mut behavior = self.behavior.lock().unwrap();
            Self::pop_behavior_from_queue(&mut behavior)
        };

        match effective {
            MockBehavior::Respond {
                status,
                content_type,
                body,
            } => Ok(HttpResponse {
                status,
                content_type,
                body,
            }),
            MockBehavior::TransportFailure { message } => Err(TransportError::new(message)),
            MockBehavior::BehaviorQueue { .. } => {
                panic!("Bug: nested BehaviorQueue detected. Test setup error - BehaviorQueues cannot contain other BehaviorQueues")
            }
        }
    }
}
