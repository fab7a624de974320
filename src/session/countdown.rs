use std::future;
use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Owned handle to the one-second round tick. Dropping it cancels the tick.
pub struct Countdown {
    interval: Interval,
}

impl Countdown {
    pub const PERIOD: Duration = Duration::from_secs(1);

    pub fn start(period: Duration) -> Self {
        // The first tick comes one full period after the round starts
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Countdown { interval }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Resolves on the next tick, or never when there is no running countdown.
pub async fn next_tick(countdown: &mut Option<Countdown>) {
    match countdown {
        Some(countdown) => countdown.tick().await,
        None => future::pending().await,
    }
}
