//! Frame pacing and the game clock

use macroquad::prelude::get_time;

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpsLimit {
    /// Fixed target rate in frames per second
    Fixed(u32),
    /// As fast as possible (vsync permitting)
    Unlocked,
}

impl Default for FpsLimit {
    fn default() -> Self {
        FpsLimit::Fixed(20)
    }
}

impl FpsLimit {
    /// `0` means unlocked
    pub fn from_fps(fps: u32) -> Self {
        if fps == 0 {
            FpsLimit::Unlocked
        } else {
            FpsLimit::Fixed(fps)
        }
    }

    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fixed(fps) => Some(1.0 / *fps as f64),
            FpsLimit::Unlocked => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            FpsLimit::Fixed(fps) => fps.to_string(),
            FpsLimit::Unlocked => "Unlocked".to_string(),
        }
    }

    /// Block until the frame that began at `frame_start` (macroquad time,
    /// seconds) has used up its budget
    pub fn wait(&self, frame_start: f64) {
        let Some(target_frame_time) = self.frame_time() else { return };
        if get_time() - frame_start >= target_frame_time {
            return;
        }

        // Native: use sleep for bulk, then spin-wait for precision
        #[cfg(not(target_arch = "wasm32"))]
        {
            let spin_margin = 0.002; // 2ms
            while get_time() - frame_start + spin_margin < target_frame_time {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            while get_time() - frame_start < target_frame_time {
                std::hint::spin_loop();
            }
        }
        // WASM: just spin-wait (no thread::sleep available)
        #[cfg(target_arch = "wasm32")]
        {
            while get_time() - frame_start < target_frame_time {}
        }
    }
}

/// Monotonic millisecond clock handed to the simulation
///
/// Simulation code never reads time itself; `Level::run` receives the
/// value from here, which keeps cooldowns deterministic in tests.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: f64,
    last_ms: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(get_time())
    }

    fn starting_at(start: f64) -> Self {
        Self { start, last_ms: 0 }
    }

    /// Milliseconds since the clock was created
    pub fn now_ms(&mut self) -> u64 {
        self.sample(get_time())
    }

    /// Never goes backwards, even if the platform timer does
    fn sample(&mut self, time: f64) -> u64 {
        let ms = ((time - self.start).max(0.0) * 1000.0).round() as u64;
        self.last_ms = self.last_ms.max(ms);
        self.last_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_limit_from_settings() {
        assert_eq!(FpsLimit::from_fps(20), FpsLimit::Fixed(20));
        assert_eq!(FpsLimit::from_fps(0), FpsLimit::Unlocked);
        assert_eq!(FpsLimit::Fixed(20).frame_time(), Some(0.05));
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
        assert_eq!(FpsLimit::default().label(), "20");
    }

    #[test]
    fn test_clock_is_monotonic_ms() {
        let mut clock = FrameClock::starting_at(10.0);
        assert_eq!(clock.sample(10.0), 0);
        assert_eq!(clock.sample(10.4), 400);
        assert_eq!(clock.sample(10.3), 400);
        assert_eq!(clock.sample(9.0), 400);
        assert_eq!(clock.sample(11.0), 1000);
    }
}
