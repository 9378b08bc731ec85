//! Preloader configuration

use std::time::Duration;

use crate::codec::{default_preferences, AudioFormat};
use crate::error::{PreloadError, Result};

/// Settings for an [`AssetPreloader`](super::AssetPreloader)
#[derive(Debug, Clone, PartialEq)]
pub struct PreloadConfig {
    /// Audio containers in preference order. The last entry is used when the
    /// host supports none of them.
    pub formats: Vec<AudioFormat>,
    /// Give up waiting after this long. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Also wait for images and videos already on the page
    pub include_page_media: bool,
    /// Starting volume of created audio elements
    pub initial_volume: f32,
    pub looping: bool,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            formats: default_preferences(),
            timeout: None,
            include_page_media: true,
            initial_volume: 0.0,
            looping: true,
        }
    }
}

impl PreloadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the format preference list
    pub fn with_formats(mut self, formats: impl Into<Vec<AudioFormat>>) -> Self {
        self.formats = formats.into();
        self
    }

    /// Fail with [`PreloadError::Timeout`] instead of waiting forever
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_page_media(mut self, include: bool) -> Self {
        self.include_page_media = include;
        self
    }

    /// Clamped to `[0, 1]`
    pub fn with_initial_volume(mut self, volume: f32) -> Self {
        self.initial_volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Check the configuration can be used to register assets
    pub fn validate(&self) -> Result<()> {
        if self.formats.is_empty() {
            return Err(PreloadError::NoAudioFormats);
        }
        Ok(())
    }
}
