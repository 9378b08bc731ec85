//! Integration tests for the runtime abstraction behind preload sessions

use slideshow_assets::runtime::mock::MockSpawnBehavior;
use slideshow_assets::{
    AssetPreloader, AsyncSpawner, MockHost, MockSpawner, NullDisplay, PreloadError, PreloadReport,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[test]
fn test_mock_spawner_integration() {
    let spawner = MockSpawner::blocking();

    let executed = Arc::new(AtomicBool::new(false));
    let executed_clone = Arc::clone(&executed);

    spawner.spawn(async move {
        executed_clone.store(true, Ordering::SeqCst);
    });

    // In blocking mode, should execute immediately
    assert!(executed.load(Ordering::SeqCst));
}

#[test]
fn test_spawner_trait_bound() {
    fn preload_with<S: AsyncSpawner>(spawner: S) -> Option<Result<PreloadReport, PreloadError>> {
        let mut host = MockHost::new();
        host.set_auto_ready(true);
        let preloader = AssetPreloader::new(spawner);
        let mut handle = preloader
            .preload(&mut host, [("a", "audio/a")], NullDisplay, || {})
            .unwrap();
        handle.try_result()
    }

    let report = preload_with(MockSpawner::blocking())
        .expect("blocking spawner runs the session inline")
        .unwrap();
    assert_eq!(report.total, 1);

    // A dropped task never reports back
    assert_eq!(
        preload_with(MockSpawner::with_behavior(MockSpawnBehavior::Drop)),
        Some(Err(PreloadError::Abandoned))
    );
}

#[cfg(feature = "runtime-tokio")]
#[test]
fn test_tokio_block_on_drives_preload() {
    use slideshow_assets::TokioSpawner;

    let spawner = TokioSpawner::new();
    let mut host = MockHost::new();
    host.add_image("hero");
    let preloader = AssetPreloader::new(spawner);
    let session = preloader.begin(&mut host, [("a", "audio/a")]).unwrap();
    host.signal_all();

    let report = spawner
        .block_on(session.run(&NullDisplay, || {}))
        .expect("tokio can block outside a runtime")
        .unwrap();
    assert_eq!(report.total, 2);
}
