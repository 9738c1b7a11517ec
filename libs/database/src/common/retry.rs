use std::future::Future;
use std::hash::{BuildHasher, RandomState};
use std::time::Duration;
use tracing::{debug, warn};

/// Exponential backoff schedule for startup connection attempts.
///
/// `retries` counts the attempts made after the first one, so an operation
/// runs at most `retries + 1` times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    pub retries: u32,
    pub initial: Duration,
    pub max: Duration,
    pub factor: f64,
    /// Scale each delay to 50-100% of its value
    pub jitter: bool,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            retries: 3,
            initial: Duration::from_millis(100),
            max: Duration::from_secs(5),
            factor: 2.0,
            jitter: true,
        }
    }
}

impl Backoff {
    pub fn new(retries: u32, initial: Duration) -> Self {
        Self {
            retries,
            initial,
            ..Self::default()
        }
    }

    /// Same schedule without jitter, mostly useful in tests
    pub fn exact(self) -> Self {
        Self {
            jitter: false,
            ..self
        }
    }

    /// Delays slept between attempts, one per retry.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.retries).map(move |n| {
            let scaled = self.initial.mul_f64(self.factor.powi(n as i32));
            let capped = scaled.min(self.max);
            if self.jitter { jittered(capped) } else { capped }
        })
    }
}

fn jittered(delay: Duration) -> Duration {
    let seed = RandomState::new().hash_one(std::time::SystemTime::now());
    delay.mul_f64(0.5 + (seed % 51) as f64 / 100.0)
}

/// Run `operation` until it succeeds or the schedule runs out.
///
/// The last error is returned when every attempt failed.
pub async fn retry<F, Fut, T, E>(backoff: &Backoff, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delays = backoff.delays();
    let mut attempt = 1u32;

    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "Succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        let Some(delay) = delays.next() else {
            warn!(attempts = attempt, error = %err, "Giving up");
            return Err(err);
        };

        debug!(attempt, delay_ms = delay.as_millis() as u64, error = %err, "Attempt failed, retrying");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
