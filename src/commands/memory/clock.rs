use std::time::Duration;
use tokio::time::Instant;

/// Session stopwatch. Elapsed time is always derived from the captured start
/// instant so periodic sampling never accumulates drift.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clock {
    started_at: Option<Instant>,
    frozen: Option<Duration>,
}

impl Clock {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.frozen = None;
    }

    pub fn stop(&mut self, now: Instant) {
        if self.frozen.is_none() {
            self.frozen = Some(self.elapsed(now));
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.frozen.is_none()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        if let Some(frozen) = self.frozen {
            return frozen;
        }

        self.started_at
            .map(|started_at| now.saturating_duration_since(started_at))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_before_start() {
        let clock = Clock::default();
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn elapsed_follows_the_start_instant_and_freezes_on_stop() {
        let start = Instant::now();
        let mut clock = Clock::default();
        clock.start(start);
        assert!(clock.is_running());
        assert_eq!(
            clock.elapsed(start + Duration::from_millis(1_250)),
            Duration::from_millis(1_250)
        );

        clock.stop(start + Duration::from_secs(3));
        clock.stop(start + Duration::from_secs(9));
        assert!(!clock.is_running());
        assert_eq!(
            clock.elapsed(start + Duration::from_secs(60)),
            Duration::from_secs(3)
        );

        clock.reset();
        assert_eq!(clock.elapsed(start + Duration::from_secs(60)), Duration::ZERO);
    }
}
