//! Integration tests for crossfading preloaded tracks

use slideshow_assets::mixer::hover::{HOVER_FADE_IN, HOVER_FADE_OUT};
use slideshow_assets::mixer::FOCUS_FADE;
use slideshow_assets::{
    AssetPreloader, AudioMixerContext, FocusLevels, HoverAudio, MixerEvent, MockHost,
    MockSpawner, TrackKind,
};
use std::time::Duration;

fn preloaded_mixer() -> AudioMixerContext {
    let mut host = MockHost::new();
    let preloader = AssetPreloader::new(MockSpawner::blocking());
    preloader
        .begin(
            &mut host,
            [("audio_valley", "audio/valley"), ("audio_falls", "audio/falls")],
        )
        .unwrap();

    let mut mixer = AudioMixerContext::new();
    for element in host.attached() {
        mixer.register_element(&element);
    }
    mixer.register("timelapse", TrackKind::Video, 0.0);
    mixer
}

#[test]
fn test_scene_change_crossfade() {
    let mut mixer = preloaded_mixer();
    mixer.set_master_volume(0.8);

    mixer
        .focus(&["audio_valley", "timelapse"], FocusLevels { audio: 1.0, video: 0.5 })
        .unwrap();
    mixer.advance(FOCUS_FADE);

    assert!((mixer.volume("audio_valley").unwrap() - 0.8).abs() < 1e-6);
    assert!((mixer.volume("timelapse").unwrap() - 0.4).abs() < 1e-6);
    assert_eq!(mixer.volume("audio_falls").unwrap(), 0.0);

    // Next scene: the falls take over
    mixer.focus(&["audio_falls"], FocusLevels::default()).unwrap();
    mixer.advance(FOCUS_FADE / 2);
    let valley = mixer.volume("audio_valley").unwrap();
    let falls = mixer.volume("audio_falls").unwrap();
    assert!(valley > 0.0 && valley < 0.8);
    assert!(falls > 0.0 && falls < 0.8);

    mixer.advance(FOCUS_FADE / 2);
    assert_eq!(mixer.volume("audio_valley").unwrap(), 0.0);
    assert!((mixer.volume("audio_falls").unwrap() - 0.8).abs() < 1e-6);
}

#[test]
fn test_hover_over_preloaded_scene() {
    let mut mixer = preloaded_mixer();
    let hover = HoverAudio::new("valley");

    hover.enter(&mut mixer).unwrap();
    mixer.advance(HOVER_FADE_IN);
    assert!(mixer.track("audio_valley").unwrap().playing);

    hover.leave(&mut mixer).unwrap();
    let events = mixer.advance(HOVER_FADE_OUT + Duration::from_millis(10));
    assert_eq!(
        events,
        vec![
            MixerEvent::FadeFinished {
                track: "audio_valley".into(),
                volume: 0.0
            },
            MixerEvent::Paused {
                track: "audio_valley".into()
            },
        ]
    );
}

#[test]
fn test_rehover_replaces_running_fade() {
    let mut mixer = preloaded_mixer();
    let hover = HoverAudio::new("falls");

    hover.enter(&mut mixer).unwrap();
    mixer.advance(HOVER_FADE_IN);
    hover.leave(&mut mixer).unwrap();
    mixer.advance(Duration::from_millis(375));
    let mid = mixer.volume("audio_falls").unwrap();
    assert!(mid > 0.0 && mid < 1.0);

    hover.enter(&mut mixer).unwrap();
    let track = mixer.track("audio_falls").unwrap();
    assert_eq!(track.fade_target(), Some(1.0));
    assert!(track.playing);
    assert_eq!(track.volume, mid);
}
