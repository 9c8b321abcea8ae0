/// Fixed timestep simulation clock
///
/// The controller and the body are stepped at a constant rate no matter how
/// fast frames arrive. Wall time is accumulated and converted into a whole
/// number of simulation ticks per frame.
use std::time::{Duration, Instant};

/// Simulation rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of ticks per frame to prevent spiral of death
pub const MAX_TICKS_PER_FRAME: u32 = 5;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time not yet consumed by ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the simulation is paused
    paused: bool,

    /// Frames seen so far
    frame_count: u64,

    /// Simulation ticks executed so far
    tick_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Begin a new frame using wall time, returns the number of ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of elapsed time, returns the number of ticks to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        // Paused time is discarded rather than banked
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Whatever is left after hitting the cap is dropped, not replayed later
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!(
                "Frame took too long, dropping {:?} of simulation time",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        if ticks > 1 {
            log::trace!("Running {} ticks this frame", ticks);
        }
        ticks
    }

    /// Duration of one simulation tick in seconds
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent a burst of ticks
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.tick_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_fixed_timestep() {
        let game_loop = GameLoop::new();
        assert!((game_loop.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_short_frame_runs_no_tick() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(Duration::from_millis(5)), 0);
        assert_eq!(game_loop.frame_count(), 1);
        assert!(game_loop.alpha() > 0.0 && game_loop.alpha() < 1.0);
    }

    #[test]
    fn test_time_accumulates_across_frames() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(Duration::from_millis(10)), 0);
        assert_eq!(game_loop.advance(Duration::from_millis(10)), 1);
        assert_eq!(game_loop.tick_count(), 1);
    }

    #[test]
    fn test_two_ticks_for_double_frame() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(FIXED_TIMESTEP_DURATION * 2), 2);
    }

    #[test]
    fn test_ticks_are_capped_and_excess_dropped() {
        let mut game_loop = GameLoop::new();
        assert_eq!(
            game_loop.advance(Duration::from_millis(300)),
            MAX_TICKS_PER_FRAME
        );
        assert_eq!(game_loop.alpha(), 0.0);
        assert_eq!(game_loop.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_paused_no_ticks() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();
        assert_eq!(game_loop.advance(Duration::from_millis(100)), 0);
        assert_eq!(game_loop.frame_count(), 1);
        assert_eq!(game_loop.tick_count(), 0);
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = GameLoop::new();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());
        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_resume_discards_banked_time() {
        let mut game_loop = GameLoop::new();
        game_loop.advance(Duration::from_millis(10));
        game_loop.pause();
        game_loop.resume();
        assert_eq!(game_loop.advance(Duration::from_millis(10)), 0);
    }
}
