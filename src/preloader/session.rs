//! A single preload run
//!
//! A [`PreloadSession`] owns the readiness signals registered by one call to
//! [`AssetPreloader::begin`](super::AssetPreloader::begin) and joins them as a
//! wait-for-N barrier. Running the session consumes it, so the completion
//! callback can fire at most once.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::channel::oneshot;
use futures::future::{self, Either};
use futures::stream::{FuturesUnordered, StreamExt};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::{PreloadError, Result};
use crate::media::{MediaKind, ReadySignal};
use crate::metrics::PreloadMetricsHandle;
use crate::progress::{LoadCounter, ProgressDisplay};
use crate::runtime::{AsyncSpawner, JoinHandle};

/// Identifies one tracked item within a session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    /// A named audio asset created by the preloader
    Asset(String),
    /// An image or video that was already on the page
    Page { kind: MediaKind, id: String },
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Asset(name) => write!(f, "asset:{name}"),
            ItemKey::Page { kind, id } => write!(f, "{kind}:{id}"),
        }
    }
}

/// An item the session waits on
#[derive(Debug)]
pub struct TrackedItem {
    pub key: ItemKey,
    pub ready: ReadySignal,
}

#[derive(Debug, Default)]
struct SessionState {
    counter: LoadCounter,
    // Vec rather than a set: page media ids are not guaranteed unique
    outstanding: Vec<ItemKey>,
}

impl SessionState {
    fn resolve(&mut self, key: &ItemKey) {
        if let Some(pos) = self.outstanding.iter().position(|k| k == key) {
            self.outstanding.swap_remove(pos);
        }
    }

    fn pending_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.outstanding.iter().map(ToString::to_string).collect();
        names.sort();
        names
    }
}

/// Summary of a completed preload
#[derive(Debug, Clone, PartialEq)]
pub struct PreloadReport {
    pub session: Uuid,
    pub total: usize,
    pub elapsed: Duration,
}

/// Registered items waiting to be joined
pub struct PreloadSession<S: AsyncSpawner> {
    id: Uuid,
    state: Arc<Mutex<SessionState>>,
    items: Vec<TrackedItem>,
    timeout: Option<Duration>,
    spawner: S,
    metrics: PreloadMetricsHandle,
}

impl<S: AsyncSpawner> fmt::Debug for PreloadSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreloadSession")
            .field("id", &self.id)
            .field("total", &self.total())
            .field("timeout", &self.timeout)
            .field("runtime", &self.spawner.runtime_name())
            .finish()
    }
}

impl<S: AsyncSpawner> PreloadSession<S> {
    pub(crate) fn new(
        spawner: S,
        timeout: Option<Duration>,
        metrics: PreloadMetricsHandle,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: Arc::new(Mutex::new(SessionState::default())),
            items: Vec::new(),
            timeout,
            spawner,
            metrics,
        }
    }

    pub(crate) fn track(&mut self, item: TrackedItem) {
        let mut state = self.state.lock();
        state.counter.register();
        state.outstanding.push(item.key.clone());
        drop(state);
        self.items.push(item);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of items the session waits for
    pub fn total(&self) -> usize {
        self.state.lock().counter.total()
    }

    /// Keys of items that have not reported ready, sorted
    pub fn outstanding(&self) -> Vec<String> {
        self.state.lock().pending_names()
    }

    /// Complete a session with nothing to wait for. Runs `on_complete` before
    /// returning.
    pub(crate) fn finish_empty<F: FnOnce()>(self, on_complete: F) -> PreloadReport {
        debug_assert_eq!(self.total(), 0);
        log::debug!("Preload session {} has nothing to wait for", self.id);
        on_complete();
        self.metrics.record_session_completed();
        PreloadReport {
            session: self.id,
            total: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Wait for every tracked item, reporting progress to `display`, then run
    /// `on_complete` once.
    ///
    /// On error `on_complete` is not called and the display is cleared.
    pub async fn run<D, F>(self, display: &D, on_complete: F) -> Result<PreloadReport>
    where
        D: ProgressDisplay + ?Sized,
        F: FnOnce(),
    {
        let total = self.total();
        if total == 0 {
            return Ok(self.finish_empty(on_complete));
        }

        let PreloadSession {
            id,
            state,
            items,
            timeout,
            spawner,
            metrics,
        } = self;
        let started = Instant::now();
        log::info!("Preloading {total} items (session {id})");

        let join = drive(&state, items, display, &metrics, started);
        let outcome = match timeout {
            None => join.await,
            Some(waited) => {
                let timer = spawner.sleep(waited);
                futures::pin_mut!(join);
                match future::select(join, timer).await {
                    Either::Left((outcome, _)) => outcome,
                    Either::Right(((), _)) => {
                        metrics.record_session_timed_out();
                        let state = state.lock();
                        Err(PreloadError::Timeout {
                            waited,
                            loaded: state.counter.loaded(),
                            total,
                            pending: state.pending_names(),
                        })
                    }
                }
            }
        };

        if let Err(err) = outcome {
            log::warn!("Preload session {id} stopped: {err}");
            display.clear();
            return Err(err);
        }

        on_complete();
        metrics.record_session_completed();
        let elapsed = started.elapsed();
        log::info!("Preload session {id} finished in {elapsed:?}");
        Ok(PreloadReport {
            session: id,
            total,
            elapsed,
        })
    }
}

async fn drive<D>(
    state: &Mutex<SessionState>,
    items: Vec<TrackedItem>,
    display: &D,
    metrics: &PreloadMetricsHandle,
    started: Instant,
) -> Result<()>
where
    D: ProgressDisplay + ?Sized,
{
    let mut pending: FuturesUnordered<_> = items
        .into_iter()
        .map(|TrackedItem { key, ready }| async move { (key, ready.await) })
        .collect();

    while let Some((key, fired)) = pending.next().await {
        if !fired {
            metrics.record_dropped();
            return Err(PreloadError::SignalDropped(key.to_string()));
        }
        metrics.record_ready(key.to_string(), started.elapsed());

        let progress = {
            let mut state = state.lock();
            state.resolve(&key);
            state.counter.mark_ready()
        };
        match progress {
            Some(progress) => {
                log::debug!("{key} ready: {progress:?}");
                display.show(&progress);
            }
            None => log::warn!("{key} reported ready after the session completed"),
        }
    }
    Ok(())
}

enum HandleState {
    Running {
        rx: oneshot::Receiver<Result<PreloadReport>>,
        _task: JoinHandle,
    },
    Finished(Result<PreloadReport>),
}

/// Observes a preload started with
/// [`AssetPreloader::preload`](super::AssetPreloader::preload)
pub struct PreloadHandle {
    session: Uuid,
    total: usize,
    state: HandleState,
}

impl fmt::Debug for PreloadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreloadHandle")
            .field("session", &self.session)
            .field("total", &self.total)
            .field("finished", &matches!(self.state, HandleState::Finished(_)))
            .finish()
    }
}

impl PreloadHandle {
    pub(crate) fn finished(report: PreloadReport) -> Self {
        Self {
            session: report.session,
            total: report.total,
            state: HandleState::Finished(Ok(report)),
        }
    }

    pub(crate) fn running(
        session: Uuid,
        total: usize,
        rx: oneshot::Receiver<Result<PreloadReport>>,
        task: JoinHandle,
    ) -> Self {
        Self {
            session,
            total,
            state: HandleState::Running { rx, _task: task },
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Non-blocking check for the outcome
    pub fn try_result(&mut self) -> Option<Result<PreloadReport>> {
        if let HandleState::Running { rx, .. } = &mut self.state {
            let outcome = match rx.try_recv() {
                Ok(Some(outcome)) => outcome,
                Ok(None) => return None,
                Err(oneshot::Canceled) => Err(PreloadError::Abandoned),
            };
            self.state = HandleState::Finished(outcome);
        }
        match &self.state {
            HandleState::Finished(outcome) => Some(outcome.clone()),
            HandleState::Running { .. } => None,
        }
    }

    pub fn is_finished(&mut self) -> bool {
        self.try_result().is_some()
    }

    /// Wait for the outcome
    pub async fn wait(self) -> Result<PreloadReport> {
        match self.state {
            HandleState::Finished(outcome) => outcome,
            HandleState::Running { rx, _task } => rx.await.unwrap_or(Err(PreloadError::Abandoned)),
        }
    }
}
