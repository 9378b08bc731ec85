//! Hover ambience example for slideshow_assets
//!
//! Steps the mixer by hand to show how fades play out over time.

use slideshow_assets::{AudioMixerContext, FocusLevels, HoverAudio, MixerEvent};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let mut mixer = AudioMixerContext::new();
    mixer.set_master_volume(0.7);

    let scenes = ["valley", "falls", "meadow"];
    let hovers: Vec<HoverAudio> = scenes.iter().map(|s| HoverAudio::new(*s)).collect();
    for hover in &hovers {
        hover.register(&mut mixer);
        println!("{} -> {}", hover.map_selector(), hover.audio_selector());
    }

    let step = Duration::from_millis(250);
    let report = |mixer: &AudioMixerContext| {
        let levels: Vec<String> = mixer
            .track_names()
            .map(|name| format!("{name}={:.2}", mixer.volume(name).unwrap_or(0.0)))
            .collect();
        println!("  {}", levels.join("  "));
    };

    println!("\nPointer enters the valley");
    hovers[0].enter(&mut mixer)?;
    for _ in 0..4 {
        mixer.advance(step);
        report(&mixer);
    }

    println!("\nPointer moves to the falls");
    hovers[0].leave(&mut mixer)?;
    hovers[1].enter(&mut mixer)?;
    for _ in 0..4 {
        for event in mixer.advance(step) {
            if let MixerEvent::Paused { track } = event {
                println!("  paused {track}");
            }
        }
        report(&mixer);
    }

    println!("\nScene change focuses the meadow");
    mixer.focus(&["audio_meadow"], FocusLevels::default())?;
    for _ in 0..4 {
        mixer.advance(step);
        report(&mixer);
    }

    Ok(())
}
