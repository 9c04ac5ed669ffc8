use std::future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Cancellable auto-advance timer for the explanation player.
///
/// Stopping drops the interval; a stopped timer's `tick` never resolves, so it
/// can sit in a `select!` next to user input without firing.
#[derive(Debug)]
pub struct PlaybackTimer {
    period: Duration,
    interval: Option<Interval>,
}

impl PlaybackTimer {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// (Re)starts the timer; the first tick fires one period from now.
    pub fn start(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }

    /// Waits for the next tick; pending forever while stopped.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut timer = PlaybackTimer::new(Duration::from_millis(2_500));
        let started = Instant::now();
        timer.start();

        timer.tick().await;
        assert_eq!(started.elapsed(), Duration::from_millis(2_500));
        timer.tick().await;
        assert_eq!(started.elapsed(), Duration::from_millis(5_000));
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_timer_never_fires() {
        let mut timer = PlaybackTimer::new(Duration::from_millis(10));
        timer.start();
        timer.stop();
        assert!(!timer.is_running());

        let waited = timeout(Duration::from_secs(60), timer.tick()).await;
        assert!(waited.is_err());
    }
}
