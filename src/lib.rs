//! slideshow_assets - Media preloading and audio mixing for timed slideshows
//!
//! # Features
//! - Preload named audio assets plus page images/videos with progress text
//! - Completion callback that fires exactly once, or synchronously when
//!   nothing needs loading
//! - Optional deadline instead of waiting forever
//! - Ordered audio format preference with injectable capability probe
//! - Explicit mixer context for crossfades and hover-triggered ambience
//!
//! # Quick Start
//!
//! ```ignore
//! use slideshow_assets::{AssetPreloader, LogDisplay, MockHost, TokioSpawner};
//!
//! let mut host = MockHost::new();
//! let preloader = AssetPreloader::new(TokioSpawner::new());
//! let handle = preloader.preload(
//!     &mut host,
//!     [("intro", "audio/intro"), ("river", "audio/river")],
//!     LogDisplay,
//!     || println!("ready"),
//! )?;
//! ```
//!
//! # Feature Flags
//!
//! - `runtime-tokio` (default): Enable the Tokio spawner and timers

// Core modules
pub mod codec;
pub mod media;
pub mod mixer;
pub mod preloader;
pub mod progress;
pub mod runtime;

// Support modules
pub mod metrics;

// Error types
mod error;
pub use error::{PreloadError, Result};

// Re-export preloader types
pub use preloader::{
    AssetPreloader, AssetRequest, ItemKey, PreloadConfig, PreloadHandle, PreloadReport,
    PreloadSession,
};

// Re-export progress types
pub use progress::{LoadCounter, LogDisplay, NullDisplay, Progress, ProgressDisplay};

// Re-export media types
pub use media::{
    readiness_pair, AudioElement, MediaHost, MediaKind, MockHost, PageMedia, ReadySender,
    ReadySignal,
};

// Re-export codec types
pub use codec::{preferred_format, select_format, AudioFormat, CapabilityProbe};

// Re-export mixer types
pub use mixer::{AudioMixerContext, FocusLevels, HoverAudio, MixerEvent, SoundHandle, TrackKind};

// Re-export runtime types
pub use runtime::mock::MockSpawner;
#[cfg(feature = "runtime-tokio")]
pub use runtime::tokio_impl::TokioSpawner;
pub use runtime::{AsyncSpawner, JoinHandle};

pub use metrics::{PreloadMetrics, PreloadMetricsHandle};

// Version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
