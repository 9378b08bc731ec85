//! Media host abstraction
//!
//! The preloader never touches real media. It describes the audio elements it
//! wants created and asks a [`MediaHost`] (the page) for the image and video
//! elements already present. Each tracked element hands back a one-shot
//! readiness signal.

pub mod mock;

pub use mock::MockHost;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use crate::codec::CapabilityProbe;

/// Kind of media element being tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Lowercase label used in item keys and logs
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Description of an audio element the host should create and buffer in
/// full before reporting readiness
#[derive(Debug, Clone, PartialEq)]
pub struct AudioElement {
    /// Element id; equal to the asset name
    pub id: String,
    /// Full source path including the chosen extension
    pub src: String,
    pub looping: bool,
    /// Initial output level in `[0, 1]`
    pub volume: f32,
    /// Kept out of the visible layout
    pub hidden: bool,
}

/// An image or inline video already present on the page
pub struct PageMedia {
    pub id: String,
    pub kind: MediaKind,
    pub ready: ReadySignal,
}

impl fmt::Debug for PageMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageMedia")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Sending half of a readiness signal.
///
/// `signal` consumes the sender, so an element can report readiness at most
/// once.
#[derive(Debug)]
pub struct ReadySender {
    tx: oneshot::Sender<()>,
}

impl ReadySender {
    /// Report the element as ready. Returns false if nobody is listening anymore.
    pub fn signal(self) -> bool {
        self.tx.send(()).is_ok()
    }

    /// Whether the receiving side has been dropped
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_canceled()
    }
}

/// Receiving half of a readiness signal.
///
/// Resolves to `true` when the element became ready and `false` when the
/// sender was dropped without signaling.
#[derive(Debug)]
pub struct ReadySignal {
    rx: oneshot::Receiver<()>,
}

impl Future for ReadySignal {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|res| res.is_ok())
    }
}

/// Create a connected readiness sender/signal pair
pub fn readiness_pair() -> (ReadySender, ReadySignal) {
    let (tx, rx) = oneshot::channel();
    (ReadySender { tx }, ReadySignal { rx })
}

/// The page the preloader runs against
pub trait MediaHost {
    /// Whether the host can decode the given MIME type
    fn can_play_type(&self, mime_type: &str) -> bool;

    /// Create and start buffering an audio element. The host fires `ready` once
    /// the element can play through without stalling.
    fn attach_audio(&mut self, element: AudioElement, ready: ReadySender);

    /// Image and video elements present right now, each with its own
    /// load/can-play signal
    fn page_media(&mut self) -> Vec<PageMedia>;
}

/// Adapter exposing a host's codec support as a [`CapabilityProbe`]
pub struct HostProbe<'a, H: MediaHost + ?Sized>(pub &'a H);

impl<H: MediaHost + ?Sized> CapabilityProbe for HostProbe<'_, H> {
    fn can_play_type(&self, mime_type: &str) -> bool {
        self.0.can_play_type(mime_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_resolves_true() {
        let (tx, rx) = readiness_pair();
        assert!(tx.signal());
        assert!(futures::executor::block_on(rx));
    }

    #[test]
    fn test_dropped_sender_resolves_false() {
        let (tx, rx) = readiness_pair();
        drop(tx);
        assert!(!futures::executor::block_on(rx));
    }

    #[test]
    fn test_signal_without_listener() {
        let (tx, rx) = readiness_pair();
        drop(rx);
        assert!(tx.is_abandoned());
        assert!(!tx.signal());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(MediaKind::Image.to_string(), "image");
        assert_eq!(MediaKind::Video.label(), "video");
    }
}
