//! Startup readiness check against the store.
//!
//! The gateway must not accept tool calls until Neo4j answers a trivial
//! query. The probe is retried a bounded number of times with a growing
//! delay; exhausting the attempts is fatal to startup.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use cyphergate_core::config::HealthSettings;
use cyphergate_core::GraphStore;

/// Retry policy for the startup probe.
#[derive(Debug, Clone)]
pub struct ConnectivityGuard {
    attempts: u32,
    initial_wait: Duration,
    backoff_unit: Duration,
}

impl ConnectivityGuard {
    pub fn new(attempts: u32, initial_wait: Duration, backoff_unit: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            initial_wait,
            backoff_unit,
        }
    }

    pub fn from_settings(settings: &HealthSettings) -> Self {
        Self::new(
            settings.attempts,
            settings.initial_wait(),
            settings.backoff_unit(),
        )
    }

    /// Delay after the `failures`-th consecutive failure (1-based).
    pub fn backoff(&self, failures: u32) -> Duration {
        self.backoff_unit * (1 + failures)
    }

    /// Run `probe` until it succeeds or the attempts are used up.
    ///
    /// Returns the number of attempts made on success, or the last error.
    pub async fn run<F, Fut, E>(&self, mut probe: F) -> Result<u32, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        tracing::info!("Waiting for Neo4j to start");
        tokio::time::sleep(self.initial_wait).await;

        let mut attempt = 0;
        loop {
            attempt += 1;
            match probe().await {
                Ok(()) => {
                    tracing::info!(attempt, "Neo4j is reachable");
                    return Ok(attempt);
                }
                Err(e) if attempt >= self.attempts => {
                    tracing::error!(attempt, error = %e, "Neo4j unreachable, giving up");
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.backoff(attempt);
                    tracing::error!(
                        attempt,
                        error = %e,
                        wait_secs = delay.as_secs_f64(),
                        "Failed Neo4j connection attempt"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

impl Default for ConnectivityGuard {
    fn default() -> Self {
        Self::from_settings(&HealthSettings::default())
    }
}

/// Block until `store` answers its ping, per `settings`.
pub async fn wait_until_ready(
    store: &dyn GraphStore,
    settings: &HealthSettings,
) -> cyphergate_core::Result<u32> {
    ConnectivityGuard::from_settings(settings)
        .run(|| store.ping())
        .await
}
