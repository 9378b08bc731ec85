//! Mock media host for testing
//!
//! Keeps created elements and pending readiness senders in memory so tests
//! can fire (or withhold) readiness per element.

use super::{readiness_pair, AudioElement, MediaHost, MediaKind, PageMedia, ReadySender};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MockHostState {
    supported: HashSet<String>,
    page: Vec<(String, MediaKind)>,
    attached: Vec<AudioElement>,
    // Ids may repeat: pages can hold several elements with the same id
    pending: Vec<(String, ReadySender)>,
    auto_ready: bool,
}

/// In-memory page for tests and demos
///
/// Clones share state, so one clone can be handed to the preloader while
/// another fires readiness.
#[derive(Clone, Debug, Default)]
pub struct MockHost {
    state: Arc<Mutex<MockHostState>>,
}

impl MockHost {
    /// Create an empty page that can play every audio type
    pub fn new() -> Self {
        let host = Self::default();
        host.support("audio/mpeg");
        host.support("audio/ogg");
        host
    }

    /// Create an empty page that reports no codec support at all
    pub fn without_codecs() -> Self {
        Self::default()
    }

    /// Mark a MIME type as playable
    pub fn support(&self, mime_type: &str) {
        self.state.lock().supported.insert(mime_type.to_string());
    }

    /// Mark a MIME type as not playable
    pub fn unsupport(&self, mime_type: &str) {
        self.state.lock().supported.remove(mime_type);
    }

    /// Add an image element to the page
    pub fn add_image(&self, id: &str) {
        self.state.lock().page.push((id.to_string(), MediaKind::Image));
    }

    /// Add an inline video element to the page
    pub fn add_video(&self, id: &str) {
        self.state.lock().page.push((id.to_string(), MediaKind::Video));
    }

    /// Fire readiness for every element as soon as it is tracked
    pub fn set_auto_ready(&self, auto_ready: bool) {
        self.state.lock().auto_ready = auto_ready;
    }

    /// Audio elements attached so far
    pub fn attached(&self) -> Vec<AudioElement> {
        self.state.lock().attached.clone()
    }

    /// Ids of tracked elements that have not fired yet, sorted. An id appears
    /// once per element carrying it.
    pub fn pending_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .state
            .lock()
            .pending
            .iter()
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Fire readiness for the earliest tracked element with this id. Returns
    /// false if no element with the id is still pending.
    pub fn signal_ready(&self, id: &str) -> bool {
        let sender = self.take_pending(id);
        match sender {
            Some(sender) => {
                sender.signal();
                true
            }
            None => false,
        }
    }

    /// Fire readiness for every pending element
    pub fn signal_all(&self) -> usize {
        let senders: Vec<ReadySender> = self
            .state
            .lock()
            .pending
            .drain(..)
            .map(|(_, sender)| sender)
            .collect();
        let count = senders.len();
        for sender in senders {
            sender.signal();
        }
        count
    }

    /// Drop an element's sender without firing, as if it failed to load
    pub fn fail(&self, id: &str) -> bool {
        self.take_pending(id).is_some()
    }

    fn take_pending(&self, id: &str) -> Option<ReadySender> {
        let mut state = self.state.lock();
        let index = state.pending.iter().position(|(pending, _)| pending == id)?;
        Some(state.pending.remove(index).1)
    }

    fn track(&self, id: String, sender: ReadySender) {
        let mut state = self.state.lock();
        if state.auto_ready {
            drop(state);
            sender.signal();
        } else {
            state.pending.push((id, sender));
        }
    }
}

impl MediaHost for MockHost {
    fn can_play_type(&self, mime_type: &str) -> bool {
        self.state.lock().supported.contains(mime_type)
    }

    fn attach_audio(&mut self, element: AudioElement, ready: ReadySender) {
        let id = element.id.clone();
        self.state.lock().attached.push(element);
        self.track(id, ready);
    }

    fn page_media(&mut self) -> Vec<PageMedia> {
        let page = self.state.lock().page.clone();
        page.into_iter()
            .map(|(id, kind)| {
                let (tx, rx) = readiness_pair();
                self.track(id.clone(), tx);
                PageMedia { id, kind, ready: rx }
            })
            .collect()
    }
}
