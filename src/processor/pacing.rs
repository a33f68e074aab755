use async_trait::async_trait;
use std::time::Duration;

/// Delay between consecutive translation requests.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

/// Rate-limiting policy applied after every attempted row.
#[async_trait]
pub trait Pacer: Send {
    async fn pause(&mut self);
}

/// Sleeps a fixed interval after each attempt, success or failure.
#[derive(Debug, Clone, Copy)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedInterval {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl Pacer for FixedInterval {
    async fn pause(&mut self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

/// No delay at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced;

#[async_trait]
impl Pacer for Unpaced {
    async fn pause(&mut self) {}
}

/// Picks the pacer for a configured delay; zero means unpaced.
pub fn pacer_for(delay: Duration) -> Box<dyn Pacer> {
    if delay.is_zero() {
        Box::new(Unpaced)
    } else {
        Box::new(FixedInterval::new(delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_interval_sleeps_for_interval() {
        let mut pacer = FixedInterval::default();
        let started = Instant::now();

        pacer.pause().await;

        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unpaced_does_not_sleep() {
        let mut pacer = Unpaced;
        let started = Instant::now();

        pacer.pause().await;

        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacer_for_zero_delay_is_unpaced() {
        let mut pacer = pacer_for(Duration::ZERO);
        let started = Instant::now();

        pacer.pause().await;

        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
