//! Preload progress example for slideshow_assets

#[cfg(feature = "runtime-tokio")]
use slideshow_assets::{AssetPreloader, MockHost, PreloadConfig, TokioSpawner};

#[cfg(feature = "runtime-tokio")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::time::Duration;

    println!("slideshow_assets Preload Demo");
    println!("=============================\n");

    // A page with a title image and a background video
    let mut host = MockHost::new();
    host.add_image("title");
    host.add_video("valley-timelapse");

    let config = PreloadConfig::new().with_timeout(Duration::from_secs(10));
    let preloader = AssetPreloader::with_config(TokioSpawner::new(), config)?;

    let handle = preloader.preload(
        &mut host,
        [
            ("intro", "audio/intro"),
            ("river", "audio/river"),
            ("birds", "audio/birds"),
        ],
        |text: &str| {
            if !text.is_empty() {
                println!("{text}");
            }
        },
        || println!("All media ready, starting the show"),
    )?;

    for element in host.attached() {
        println!("Buffering {} -> {}", element.id, element.src);
    }

    // Pretend the media arrives over time
    for id in host.pending_ids() {
        tokio::time::sleep(Duration::from_millis(200)).await;
        host.signal_ready(&id);
    }

    let report = handle.wait().await?;
    println!(
        "\nLoaded {} items in {:?} (session {})",
        report.total, report.elapsed, report.session
    );
    if let Some((slowest, latency)) = preloader.metrics().slowest() {
        println!("Slowest item: {slowest} ({latency:?})");
    }

    Ok(())
}

#[cfg(not(feature = "runtime-tokio"))]
fn main() {
    println!("This example requires the runtime-tokio feature.");
    println!("Run with: cargo run --example preload_progress --features runtime-tokio");
}
