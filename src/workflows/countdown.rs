//! Voting countdown
//!
//! A periodic task recomputes the time left on every tick of the refresh
//! interval and publishes it through a watch channel. The task belongs to the
//! voting screen's scope and stops when the scope closes or the election ends.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use super::vote::TimeRemaining;
use crate::state::scope::ScreenScope;
use crate::utils::helpers::Clock;

/// Receiving side of a running countdown
#[derive(Debug, Clone)]
pub struct Countdown {
    receiver: watch::Receiver<TimeRemaining>,
}

impl Countdown {
    /// Start the refresh task inside `scope`.
    ///
    /// Without a tokio runtime no task runs: the countdown holds its initial value
    /// and reports itself stopped.
    pub fn start(
        scope: &mut ScreenScope,
        clock: Arc<dyn Clock>,
        end_date: DateTime<Utc>,
        refresh: Duration,
    ) -> Self {
        let initial = TimeRemaining::compute(clock.now(), end_date);
        let (sender, receiver) = watch::channel(initial);

        scope.spawn(async move {
            let mut interval = tokio::time::interval(refresh);
            // The first tick completes immediately and the initial value is already published.
            interval.tick().await;

            loop {
                interval.tick().await;

                let remaining = TimeRemaining::compute(clock.now(), end_date);
                if sender.send(remaining).is_err() {
                    break;
                }
                if remaining.is_ended() {
                    debug!(end_date = %end_date, "Countdown reached the end of voting");
                    break;
                }
            }
        });

        Self { receiver }
    }

    /// Latest published value
    pub fn current(&self) -> TimeRemaining {
        *self.receiver.borrow()
    }

    /// Wait for the next refresh. `None` once the countdown task has stopped.
    pub async fn changed(&mut self) -> Option<TimeRemaining> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }

    /// Whether the refresh task is still publishing
    pub fn is_running(&self) -> bool {
        self.receiver.has_changed().is_ok()
    }
}
