//! Playback clock with a fixed logical step

/// Default timeline length in seconds
pub const DEFAULT_DURATION: f64 = 30.0;

/// Advances timeline time by a fixed step scaled by the playback speed,
/// independent of wall-clock frame timing
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    /// Current timeline time in seconds
    pub current_time: f64,
    /// Timeline length in seconds
    pub duration: f64,
    /// Playback speed multiplier
    pub speed: f64,
    /// Logical step per tick (default: 1/60 second)
    pub step: f64,
    playing: bool,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: DEFAULT_DURATION,
            speed: 1.0,
            step: 1.0 / 60.0,
            playing: false,
        }
    }
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock stepping at `hz` ticks per timeline second
    pub fn with_step_hz(hz: f64) -> Self {
        Self {
            step: 1.0 / hz,
            ..Self::default()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance one tick. Returns the new time while playing.
    ///
    /// Reaching or passing the duration stops playback and rewinds to 0;
    /// that tick yields no time.
    pub fn advance(&mut self) -> Option<f64> {
        if !self.playing {
            return None;
        }
        let next = self.current_time + self.step * self.speed;
        if next >= self.duration {
            self.playing = false;
            self.current_time = 0.0;
            return None;
        }
        self.current_time = next;
        Some(next)
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Stop and rewind to 0
    pub fn stop(&mut self) {
        self.playing = false;
        self.current_time = 0.0;
    }

    pub fn seek(&mut self, time: f64) {
        self.current_time = time.clamp(0.0, self.duration);
    }

    pub fn seek_start(&mut self) {
        self.current_time = 0.0;
    }

    pub fn seek_end(&mut self) {
        self.current_time = self.duration;
    }

    /// Set the speed multiplier. Non-positive or non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
            true
        } else {
            false
        }
    }

    /// Set the timeline length, pulling the current time back inside it.
    /// Non-positive or non-finite values are ignored.
    pub fn set_duration(&mut self, duration: f64) -> bool {
        if !(duration.is_finite() && duration > 0.0) {
            return false;
        }
        self.duration = duration;
        self.current_time = self.current_time.min(duration);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = PlaybackClock::new();
        assert!((clock.step - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(clock.current_time, 0.0);
        assert_eq!(clock.duration, 30.0);
        assert_eq!(clock.speed, 1.0);
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_custom_step() {
        let clock = PlaybackClock::with_step_hz(30.0);
        assert!((clock.step - 1.0 / 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_paused_clock_does_not_advance() {
        let mut clock = PlaybackClock::new();
        assert_eq!(clock.advance(), None);
        assert_eq!(clock.current_time, 0.0);
    }

    #[test]
    fn test_advance_scales_by_speed() {
        let mut clock = PlaybackClock::new();
        clock.set_speed(2.0);
        clock.play();
        let t = clock.advance().unwrap();
        assert!((t - 2.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_loop_boundary_stops_and_rewinds() {
        let mut clock = PlaybackClock::new();
        clock.current_time = clock.duration - 0.001;
        clock.play();

        assert_eq!(clock.advance(), None);
        assert!(!clock.is_playing());
        assert_eq!(clock.current_time, 0.0);
    }

    #[test]
    fn test_stop_rewinds_but_pause_holds() {
        let mut clock = PlaybackClock::new();
        clock.play();
        for _ in 0..30 {
            clock.advance();
        }
        clock.pause();
        assert!((clock.current_time - 0.5).abs() < 1e-9);

        clock.toggle();
        assert!(clock.is_playing());
        clock.stop();
        assert!(!clock.is_playing());
        assert_eq!(clock.current_time, 0.0);
    }

    #[test]
    fn test_seek_and_duration() {
        let mut clock = PlaybackClock::new();
        clock.seek_end();
        assert_eq!(clock.current_time, 30.0);
        assert!(clock.set_duration(10.0));
        assert_eq!(clock.current_time, 10.0);
        clock.seek_start();
        assert_eq!(clock.current_time, 0.0);
        clock.seek(42.0);
        assert_eq!(clock.current_time, 10.0);

        assert!(!clock.set_duration(0.0));
        assert!(!clock.set_speed(-1.0));
        assert!(!clock.set_speed(f64::NAN));
        assert_eq!(clock.duration, 10.0);
        assert_eq!(clock.speed, 1.0);
    }
}
