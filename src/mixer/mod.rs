//! Audio mixing for slideshow scenes
//!
//! [`AudioMixerContext`] owns the master volume and the table of active
//! tracks for one page session. It is passed explicitly to whatever needs to
//! change volumes; there is no process-wide mixer.

pub mod fade;
pub mod hover;

pub use fade::{swing, Fade, FadeEnd};
pub use hover::HoverAudio;

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{PreloadError, Result};
use crate::media::AudioElement;

/// Fade length used when switching the focused tracks
pub const FOCUS_FADE: Duration = Duration::from_millis(1000);

/// Audio or the soundtrack of a video element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

/// Playback state of one track
#[derive(Debug, Clone, PartialEq)]
pub struct SoundHandle {
    pub kind: TrackKind,
    pub volume: f32,
    pub playing: bool,
    fade: Option<Fade>,
}

impl SoundHandle {
    pub fn new(kind: TrackKind, volume: f32) -> Self {
        Self {
            kind,
            volume: volume.clamp(0.0, 1.0),
            playing: false,
            fade: None,
        }
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Target of the running fade, if any
    pub fn fade_target(&self) -> Option<f32> {
        self.fade.as_ref().map(Fade::target)
    }
}

/// Per-kind levels used by [`AudioMixerContext::focus`], before master volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusLevels {
    pub audio: f32,
    pub video: f32,
}

impl Default for FocusLevels {
    fn default() -> Self {
        Self {
            audio: 1.0,
            video: 1.0,
        }
    }
}

impl FocusLevels {
    fn for_kind(&self, kind: TrackKind) -> f32 {
        match kind {
            TrackKind::Audio => self.audio,
            TrackKind::Video => self.video,
        }
    }
}

/// Emitted by [`AudioMixerContext::advance`]
#[derive(Debug, Clone, PartialEq)]
pub enum MixerEvent {
    FadeFinished { track: String, volume: f32 },
    Paused { track: String },
}

/// Master volume plus every track the page knows about
#[derive(Debug, Clone, PartialEq)]
pub struct AudioMixerContext {
    master_volume: f32,
    tracks: BTreeMap<String, SoundHandle>,
}

impl Default for AudioMixerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioMixerContext {
    pub fn new() -> Self {
        Self {
            master_volume: 1.0,
            tracks: BTreeMap::new(),
        }
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Set the user multiplier. Affects fades started afterwards, not running ones.
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// `level` scaled by the master volume
    pub fn scaled(&self, level: f32) -> f32 {
        (level * self.master_volume).clamp(0.0, 1.0)
    }

    /// Add (or replace) a track
    pub fn register(&mut self, name: impl Into<String>, kind: TrackKind, volume: f32) {
        self.tracks.insert(name.into(), SoundHandle::new(kind, volume));
    }

    /// Add an audio element created by the preloader
    pub fn register_element(&mut self, element: &AudioElement) {
        self.register(element.id.clone(), TrackKind::Audio, element.volume);
    }

    pub fn remove(&mut self, name: &str) -> Option<SoundHandle> {
        self.tracks.remove(name)
    }

    pub fn track(&self, name: &str) -> Option<&SoundHandle> {
        self.tracks.get(name)
    }

    pub fn track_names(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn track_mut(&mut self, name: &str) -> Result<&mut SoundHandle> {
        self.tracks
            .get_mut(name)
            .ok_or_else(|| PreloadError::UnknownTrack(name.to_string()))
    }

    pub fn volume(&self, name: &str) -> Result<f32> {
        self.tracks
            .get(name)
            .map(|track| track.volume)
            .ok_or_else(|| PreloadError::UnknownTrack(name.to_string()))
    }

    pub fn play(&mut self, name: &str) -> Result<()> {
        self.track_mut(name)?.playing = true;
        Ok(())
    }

    pub fn pause(&mut self, name: &str) -> Result<()> {
        self.track_mut(name)?.playing = false;
        Ok(())
    }

    /// Start fading a track toward `target`, replacing any running fade.
    /// The new fade starts from the track's current volume.
    pub fn fade_to(
        &mut self,
        name: &str,
        target: f32,
        duration: Duration,
        on_end: FadeEnd,
    ) -> Result<()> {
        let track = self.track_mut(name)?;
        track.fade = Some(Fade::new(track.volume, target, duration).with_end(on_end));
        log::trace!("Fading {name} from {} to {target} over {duration:?}", track.volume);
        Ok(())
    }

    /// Crossfade to the given tracks.
    ///
    /// Tracks in `to_unmute` fade to their kind's level times the master
    /// volume; every other track fades to silence.
    pub fn focus(&mut self, to_unmute: &[&str], levels: FocusLevels) -> Result<()> {
        if let Some(missing) = to_unmute.iter().find(|name| !self.tracks.contains_key(**name)) {
            return Err(PreloadError::UnknownTrack(missing.to_string()));
        }

        let master = self.master_volume;
        for (name, track) in self.tracks.iter_mut() {
            let target = if to_unmute.iter().any(|n| *n == name.as_str()) {
                (levels.for_kind(track.kind) * master).clamp(0.0, 1.0)
            } else {
                0.0
            };
            track.fade = Some(Fade::new(track.volume, target, FOCUS_FADE));
        }
        log::debug!("Focused {to_unmute:?} at {levels:?} (master {master})");
        Ok(())
    }

    /// Step every running fade by `dt`
    pub fn advance(&mut self, dt: Duration) -> Vec<MixerEvent> {
        let mut events = Vec::new();
        for (name, track) in self.tracks.iter_mut() {
            let Some(fade) = track.fade.as_mut() else {
                continue;
            };
            track.volume = fade.advance(dt);
            if !fade.is_finished() {
                continue;
            }

            let on_end = fade.on_end();
            track.fade = None;
            events.push(MixerEvent::FadeFinished {
                track: name.clone(),
                volume: track.volume,
            });
            if on_end == FadeEnd::Pause && track.playing {
                track.playing = false;
                events.push(MixerEvent::Paused {
                    track: name.clone(),
                });
            }
        }
        events
    }
}
