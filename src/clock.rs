use embassy_time::{Duration, Instant, Timer};

/// Monotonic time source plus suspension primitive used by every wait loop
/// of the driver.
///
/// Deadlines are computed as `now() + timeout` and waited on with `delay`.
#[allow(async_fn_in_trait)]
pub trait Clock: Clone {
    fn now(&self) -> Instant;

    async fn delay(&self, duration: Duration);

    fn deadline(&self, timeout: Duration) -> Instant {
        self.now() + timeout
    }

    fn expired(&self, deadline: Instant) -> bool {
        self.now() >= deadline
    }
}

/// [`Clock`] backed by the global `embassy-time` driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn delay(&self, duration: Duration) {
        Timer::after(duration).await
    }
}
