//! Volume fades

use std::f32::consts::PI;
use std::time::Duration;

/// Map linear progress `p` in `[0, 1]` onto a slow-start, slow-end curve:
/// `0.5 - cos(p * PI) / 2`
pub fn swing(p: f32) -> f32 {
    0.5 - (p.clamp(0.0, 1.0) * PI).cos() / 2.0
}

/// What happens to playback once a fade reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeEnd {
    #[default]
    Continue,
    Pause,
}

/// A running volume ramp from one level to another
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    on_end: FadeEnd,
}

impl Fade {
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from: from.clamp(0.0, 1.0),
            to: to.clamp(0.0, 1.0),
            duration,
            elapsed: Duration::ZERO,
            on_end: FadeEnd::Continue,
        }
    }

    pub fn with_end(mut self, on_end: FadeEnd) -> Self {
        self.on_end = on_end;
        self
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn on_end(&self) -> FadeEnd {
        self.on_end
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Volume at the current position
    pub fn volume(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let p = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * swing(p)
    }

    /// Move the fade forward and return the new volume
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.volume()
    }
}
