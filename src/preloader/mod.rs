//! Asset preloading with progress reporting
//!
//! The preloader registers one looping, silent audio element per named asset,
//! adds every image and video already on the page, and fires a completion
//! callback once all of them have reported ready. Progress is shown as
//! `"{percent}% loaded..."` after each readiness and cleared on completion.

pub mod config;
pub mod session;

pub use config::PreloadConfig;
pub use session::{ItemKey, PreloadHandle, PreloadReport, PreloadSession, TrackedItem};

use std::collections::HashSet;

use futures::channel::oneshot;

use crate::codec::select_format;
use crate::error::{PreloadError, Result};
use crate::media::{readiness_pair, AudioElement, HostProbe, MediaHost};
use crate::metrics::PreloadMetricsHandle;
use crate::progress::ProgressDisplay;
use crate::runtime::AsyncSpawner;

/// One named audio asset to preload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRequest {
    pub name: String,
    /// Base path without extension
    pub path: String,
}

impl AssetRequest {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl<N: Into<String>, P: Into<String>> From<(N, P)> for AssetRequest {
    fn from((name, path): (N, P)) -> Self {
        Self::new(name, path)
    }
}

/// Preloads named audio assets and page media, reporting progress
///
/// Generic over the runtime used to drive sessions in the background.
#[derive(Debug, Clone)]
pub struct AssetPreloader<S: AsyncSpawner> {
    spawner: S,
    config: PreloadConfig,
    metrics: PreloadMetricsHandle,
}

impl<S: AsyncSpawner> AssetPreloader<S> {
    /// Create a preloader with the default configuration
    pub fn new(spawner: S) -> Self {
        Self {
            spawner,
            config: PreloadConfig::default(),
            metrics: PreloadMetricsHandle::new(),
        }
    }

    /// Create a preloader with a custom configuration
    pub fn with_config(spawner: S, config: PreloadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            spawner,
            config,
            metrics: PreloadMetricsHandle::new(),
        })
    }

    pub fn config(&self) -> &PreloadConfig {
        &self.config
    }

    /// Metrics shared by every session this preloader starts
    pub fn metrics(&self) -> &PreloadMetricsHandle {
        &self.metrics
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Register assets and page media without waiting.
    ///
    /// Names are checked for duplicates before the host sees any element.
    pub fn begin<H, I, R>(&self, host: &mut H, assets: I) -> Result<PreloadSession<S>>
    where
        H: MediaHost + ?Sized,
        I: IntoIterator<Item = R>,
        R: Into<AssetRequest>,
    {
        let requests: Vec<AssetRequest> = assets.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(requests.len());
        for request in &requests {
            if !seen.insert(request.name.as_str()) {
                return Err(PreloadError::DuplicateAssetName(request.name.clone()));
            }
        }

        let mut session =
            PreloadSession::new(self.spawner.clone(), self.config.timeout, self.metrics.clone());

        if !requests.is_empty() {
            let format = select_format(&self.config.formats, &HostProbe(&*host))
                .ok_or(PreloadError::NoAudioFormats)?;
            log::debug!("Using {format} for {} audio assets", requests.len());

            for AssetRequest { name, path } in requests {
                let (tx, rx) = readiness_pair();
                let element = AudioElement {
                    id: name.clone(),
                    src: format.source_for(&path),
                    looping: self.config.looping,
                    volume: self.config.initial_volume,
                    hidden: true,
                };
                host.attach_audio(element, tx);
                session.track(TrackedItem {
                    key: ItemKey::Asset(name),
                    ready: rx,
                });
            }
        }

        if self.config.include_page_media {
            for media in host.page_media() {
                session.track(TrackedItem {
                    key: ItemKey::Page {
                        kind: media.kind,
                        id: media.id,
                    },
                    ready: media.ready,
                });
            }
        }

        self.metrics.record_registered(session.total());
        Ok(session)
    }

    /// Register assets and wait for them in the background.
    ///
    /// When nothing is tracked, `on_complete` runs before this returns and
    /// nothing is spawned. Otherwise the session runs on the spawner and the
    /// returned handle reports its outcome.
    pub fn preload<H, I, R, D, F>(
        &self,
        host: &mut H,
        assets: I,
        display: D,
        on_complete: F,
    ) -> Result<PreloadHandle>
    where
        H: MediaHost + ?Sized,
        I: IntoIterator<Item = R>,
        R: Into<AssetRequest>,
        D: ProgressDisplay + 'static,
        F: FnOnce() + Send + 'static,
    {
        let session = self.begin(host, assets)?;
        if session.total() == 0 {
            return Ok(PreloadHandle::finished(session.finish_empty(on_complete)));
        }

        let id = session.id();
        let total = session.total();
        let (tx, rx) = oneshot::channel();
        let task = self.spawner.spawn(async move {
            let outcome = session.run(&display, on_complete).await;
            if let Err(err) = &outcome {
                log::error!("Preload session {id} failed: {err}");
            }
            let _ = tx.send(outcome);
        });
        Ok(PreloadHandle::running(id, total, rx, task))
    }
}
