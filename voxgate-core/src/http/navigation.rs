use std::sync::{Arc, Mutex};

use tracing::info;

/// Where the surrounding application currently is, and how to move it. The
/// pipeline issues its login redirect through this port and nowhere else, so
/// hosts decide what "navigating" means (a page change, a screen switch, a
/// log line) and tests substitute a recorder.
pub trait NavigationPort: Send + Sync {
    fn current_path(&self) -> String;

    fn navigate_to(&self, path: &str);
}

/// Recording navigator for tests: captures every navigation and lets the
/// test place the surface on an arbitrary path first.
#[derive(Clone)]
pub struct RecordingNavigator {
    current: Arc<Mutex<String>>,
    navigations: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new(initial_path: &str) -> Self {
        Self {
            current: Arc::new(Mutex::new(initial_path.to_string())),
            navigations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_current_path(&self, path: &str) {
        *self.current.lock().unwrap() = path.to_string();
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl NavigationPort for RecordingNavigator {
    fn current_path(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    fn navigate_to(&self, path: &str) {
        self.navigations.lock().unwrap().push(path.to_string());
        *self.current.lock().unwrap() = path.to_string();
    }
}

/// Navigator for hosts without a real navigation surface (the CLI): tracks
/// the current path and logs transitions.
pub struct TracingNavigator {
    current: Mutex<String>,
}

impl TracingNavigator {
    pub fn new(initial_path: &str) -> Self {
        Self {
            current: Mutex::new(initial_path.to_string()),
        }
    }

    pub fn set_current_path(&self, path: &str) {
        *self.current.lock().unwrap() = path.to_string();
    }
}

impl NavigationPort for TracingNavigator {
    fn current_path(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    fn navigate_to(&self, path: &str) {
        let mut current = self.current.lock().unwrap();
        info!(from = %current, to = %path, "navigation requested");
        *current = path.to_string();
    }
}
