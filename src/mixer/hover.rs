//! Ambient audio that plays while the pointer is over a map area
//!
//! Each scene has a map region `map_{scene}` and an audio track
//! `audio_{scene}`. Entering the region starts the track and fades it in;
//! leaving fades it out and pauses it.

use std::time::Duration;

use super::{AudioMixerContext, FadeEnd, TrackKind};
use crate::error::Result;

pub const HOVER_FADE_IN: Duration = Duration::from_millis(1000);
pub const HOVER_FADE_OUT: Duration = Duration::from_millis(750);

/// Hover-triggered audio for one scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverAudio {
    scene: String,
}

impl HoverAudio {
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
        }
    }

    pub fn scene(&self) -> &str {
        &self.scene
    }

    /// Id of the map region that triggers playback
    pub fn map_id(&self) -> String {
        format!("map_{}", self.scene)
    }

    /// Id of the audio track, which is also its mixer name
    pub fn audio_id(&self) -> String {
        format!("audio_{}", self.scene)
    }

    pub fn map_selector(&self) -> String {
        format!("#{}", self.map_id())
    }

    pub fn audio_selector(&self) -> String {
        format!("#{}", self.audio_id())
    }

    /// Register this scene's track with the mixer, silent and stopped
    pub fn register(&self, mixer: &mut AudioMixerContext) {
        mixer.register(self.audio_id(), TrackKind::Audio, 0.0);
    }

    /// Pointer entered the map region
    pub fn enter(&self, mixer: &mut AudioMixerContext) -> Result<()> {
        let id = self.audio_id();
        let target = mixer.scaled(1.0);
        mixer.fade_to(&id, target, HOVER_FADE_IN, FadeEnd::Continue)?;
        mixer.play(&id)
    }

    /// Pointer left the map region
    pub fn leave(&self, mixer: &mut AudioMixerContext) -> Result<()> {
        mixer.fade_to(&self.audio_id(), 0.0, HOVER_FADE_OUT, FadeEnd::Pause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreloadError;
    use crate::mixer::MixerEvent;

    #[test]
    fn test_ids_and_selectors() {
        let hover = HoverAudio::new("tuolumne");
        assert_eq!(hover.map_id(), "map_tuolumne");
        assert_eq!(hover.audio_id(), "audio_tuolumne");
        assert_eq!(hover.map_selector(), "#map_tuolumne");
        assert_eq!(hover.audio_selector(), "#audio_tuolumne");
    }

    #[test]
    fn test_enter_plays_and_fades_in() {
        let mut mixer = AudioMixerContext::new();
        let hover = HoverAudio::new("valley");
        hover.register(&mut mixer);

        hover.enter(&mut mixer).unwrap();
        let track = mixer.track("audio_valley").unwrap();
        assert!(track.playing);
        assert_eq!(track.fade_target(), Some(1.0));

        mixer.advance(HOVER_FADE_IN);
        assert_eq!(mixer.volume("audio_valley").unwrap(), 1.0);
    }

    #[test]
    fn test_leave_pauses_after_fade_out() {
        let mut mixer = AudioMixerContext::new();
        let hover = HoverAudio::new("valley");
        hover.register(&mut mixer);
        hover.enter(&mut mixer).unwrap();
        mixer.advance(HOVER_FADE_IN);

        hover.leave(&mut mixer).unwrap();
        assert!(mixer.advance(Duration::from_millis(500)).is_empty());
        assert!(mixer.track("audio_valley").unwrap().playing);

        let events = mixer.advance(Duration::from_millis(250));
        assert!(events.contains(&MixerEvent::Paused {
            track: "audio_valley".into()
        }));
        assert!(!mixer.track("audio_valley").unwrap().playing);
    }

    #[test]
    fn test_enter_respects_master_volume() {
        let mut mixer = AudioMixerContext::new();
        mixer.set_master_volume(0.5);
        let hover = HoverAudio::new("dome");
        hover.register(&mut mixer);

        hover.enter(&mut mixer).unwrap();
        assert_eq!(mixer.track("audio_dome").unwrap().fade_target(), Some(0.5));
    }

    #[test]
    fn test_unregistered_scene() {
        let mut mixer = AudioMixerContext::new();
        let err = HoverAudio::new("ghost").enter(&mut mixer).unwrap_err();
        assert_eq!(err, PreloadError::UnknownTrack("audio_ghost".into()));
    }
}
