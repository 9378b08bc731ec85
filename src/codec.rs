//! Audio container selection
//!
//! Picks the first audio format the playback host reports it can decode,
//! from an ordered list of preferences.

use std::fmt;

/// Audio container formats an asset may be published in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    /// MPEG-1 Layer III
    Mp3,
    /// Ogg Vorbis
    Ogg,
}

impl AudioFormat {
    /// MIME type used when probing the host
    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Ogg => "audio/ogg",
        }
    }

    /// File extension appended to the base path, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
        }
    }

    /// Build the full source path for an extension-less base path
    pub fn source_for(self, base_path: &str) -> String {
        format!("{base_path}.{}", self.extension())
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Default preference order: MP3 first, OGG as fallback
pub fn default_preferences() -> Vec<AudioFormat> {
    vec![AudioFormat::Mp3, AudioFormat::Ogg]
}

/// Something that can answer "can this MIME type be played?"
pub trait CapabilityProbe {
    fn can_play_type(&self, mime_type: &str) -> bool;
}

impl<F> CapabilityProbe for F
where
    F: Fn(&str) -> bool,
{
    fn can_play_type(&self, mime_type: &str) -> bool {
        self(mime_type)
    }
}

/// Return the first preference the probe accepts
pub fn preferred_format(
    preferences: &[AudioFormat],
    probe: &(impl CapabilityProbe + ?Sized),
) -> Option<AudioFormat> {
    preferences
        .iter()
        .copied()
        .find(|format| probe.can_play_type(format.mime_type()))
}

/// Like [`preferred_format`], but falls back to the last preference when the
/// probe accepts nothing. Returns `None` only for an empty preference list.
pub fn select_format(
    preferences: &[AudioFormat],
    probe: &(impl CapabilityProbe + ?Sized),
) -> Option<AudioFormat> {
    preferred_format(preferences, probe).or_else(|| {
        let fallback = preferences.last().copied();
        if let Some(format) = fallback {
            log::warn!("No supported audio format reported, falling back to {format}");
        }
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_mp3_when_supported() {
        let probe = |_: &str| true;
        assert_eq!(
            preferred_format(&default_preferences(), &probe),
            Some(AudioFormat::Mp3)
        );
    }

    #[test]
    fn test_skips_unsupported_preference() {
        let probe = |mime: &str| mime == "audio/ogg";
        assert_eq!(
            preferred_format(&default_preferences(), &probe),
            Some(AudioFormat::Ogg)
        );
    }

    #[test]
    fn test_select_falls_back_to_last() {
        let probe = |_: &str| false;
        assert_eq!(preferred_format(&default_preferences(), &probe), None);
        assert_eq!(
            select_format(&default_preferences(), &probe),
            Some(AudioFormat::Ogg)
        );
    }

    #[test]
    fn test_empty_preferences() {
        let probe = |_: &str| true;
        assert_eq!(select_format(&[], &probe), None);
    }

    #[test]
    fn test_source_for() {
        assert_eq!(AudioFormat::Mp3.source_for("audio/intro"), "audio/intro.mp3");
        assert_eq!(AudioFormat::Ogg.source_for("audio/intro"), "audio/intro.ogg");
    }
}
