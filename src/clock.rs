use std::time::{Duration, Instant};

/// Repeating frame schedule with an explicit start/stop handle.
///
/// Elapsed time only advances while the clock is running and not paused.
#[derive(Clone, Debug)]
pub struct FrameClock {
    interval: Duration,
    started_at: Option<Instant>,
    next_frame: Option<Instant>,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        FrameClock {
            interval: Duration::from_secs(1) / fps.max(1),
            started_at: None,
            next_frame: None,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.next_frame = Some(now);
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
    }

    /// Cancels all future frames
    pub fn stop(&mut self) {
        self.next_frame = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_frame.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.paused_at.take() {
            Some(paused_at) => self.paused_total += now.saturating_duration_since(paused_at),
            None => self.paused_at = Some(now),
        }
    }

    /// Seconds of unpaused running time
    pub fn elapsed(&self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let now = self.paused_at.unwrap_or(now);
        now.saturating_duration_since(started_at)
            .saturating_sub(self.paused_total)
            .as_secs_f64()
    }

    /// How long the caller may wait for input before the next frame is due
    pub fn time_until_next_frame(&self, now: Instant) -> Duration {
        match self.next_frame {
            Some(next_frame) => next_frame.saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    /// Returns true and schedules the following frame when a frame is due.
    /// Frames missed while the caller was busy are dropped, not replayed.
    pub fn take_frame(&mut self, now: Instant) -> bool {
        match self.next_frame {
            Some(next_frame) if now >= next_frame => {
                let mut following = next_frame + self.interval;
                if following <= now {
                    following = now + self.interval;
                }
                self.next_frame = Some(following);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_follow_the_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::new(50);
        assert!(!clock.take_frame(start));

        clock.start(start);
        assert!(clock.take_frame(start));
        assert!(!clock.take_frame(start + Duration::from_millis(5)));
        assert_eq!(
            clock.time_until_next_frame(start + Duration::from_millis(5)),
            Duration::from_millis(15)
        );
        assert!(clock.take_frame(start + Duration::from_millis(20)));
    }

    #[test]
    fn missed_frames_are_not_replayed() {
        let start = Instant::now();
        let mut clock = FrameClock::new(100);
        clock.start(start);
        assert!(clock.take_frame(start));

        let late = start + Duration::from_millis(95);
        assert!(clock.take_frame(late));
        assert!(!clock.take_frame(late));
    }

    #[test]
    fn stop_cancels_future_frames() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60);
        clock.start(start);
        clock.stop();
        assert!(!clock.is_running());
        assert!(!clock.take_frame(start + Duration::from_secs(1)));
    }

    #[test]
    fn pause_freezes_elapsed_time() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.elapsed(start), 0.0);
        clock.start(start);

        clock.toggle_pause(start + Duration::from_secs(2));
        assert!(clock.is_paused());
        assert_eq!(clock.elapsed(start + Duration::from_secs(5)), 2.0);

        clock.toggle_pause(start + Duration::from_secs(5));
        assert_eq!(clock.elapsed(start + Duration::from_secs(6)), 3.0);
    }
}
