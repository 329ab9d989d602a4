use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;
use uuid::Uuid;

/// A reference a playback surface can attempt to render. Plain data; the
/// backing bytes stay in the `MediaStore` until the handle is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableHandle {
    pub uri: String,
    pub mime_type: String,
}

/// In-process registry backing playable handles, keyed by `mem://media/...`
/// URIs. Entries are not reference counted: ownership of a handle is single,
/// release is manual, and an unreleased entry lives for the process
/// lifetime. Handle lifetime in the surrounding application is bounded by
/// its view lifetime, which is what keeps that acceptable.
#[derive(Clone, Default)]
pub struct MediaStore {
    entries: Arc<Mutex<HashMap<String, Arc<Vec<u8>>>>>,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes under a fresh URI and hand back the reference
    pub fn create(&self, bytes: Vec<u8>, mime_type: impl Into<String>) -> PlayableHandle {
        let uri = format!("mem://media/{}", Uuid::new_v4());
        let mime_type = mime_type.into();

        debug!(%uri, %mime_type, len = bytes.len(), "registered media entry");
        self.entries
            .lock()
            .unwrap()
            .insert(uri.clone(), Arc::new(bytes));

        PlayableHandle { uri, mime_type }
    }

    /// Backing bytes for a handle URI, if the entry is still live
    pub fn resolve(&self, uri: &str) -> Option<Arc<Vec<u8>>> {
        self.entries.lock().unwrap().get(uri).cloned()
    }

    /// Free the backing entry. Idempotent; returns false when the entry was
    /// already released.
    pub fn release(&self, handle: &PlayableHandle) -> bool {
        let removed = self.entries.lock().unwrap().remove(&handle.uri).is_some();
        if removed {
            debug!(uri = %handle.uri, "released media entry");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_resolve_returns_same_bytes() {
        let store = MediaStore::new();

        let handle = store.create(vec![1, 2, 3], "audio/wav");

        assert_eq!(handle.mime_type, "audio/wav");
        assert!(handle.uri.starts_with("mem://media/"));
        assert_eq!(*store.resolve(&handle.uri).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_length_entry_is_valid() {
        let store = MediaStore::new();

        let handle = store.create(Vec::new(), "audio/wav");

        assert!(store.resolve(&handle.uri).unwrap().is_empty());
    }

    #[test]
    fn test_release_is_idempotent() {
        let store = MediaStore::new();
        let handle = store.create(vec![1], "audio/wav");

        assert!(store.release(&handle));
        assert!(!store.release(&handle));
        assert!(store.resolve(&handle.uri).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_entries_are_independent() {
        let store = MediaStore::new();
        let first = store.create(vec![1], "audio/wav");
        let second = store.create(vec![2], "video/mp4");

        store.release(&first);

        assert!(store.resolve(&first.uri).is_none());
        assert_eq!(*store.resolve(&second.uri).unwrap(), vec![2]);
        assert_eq!(store.len(), 1);
    }
}
