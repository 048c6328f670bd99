use std::sync::mpsc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Emits `EngineEvent::PollTick` immediately and then once per `interval`
/// until `cancel` fires or nobody is listening.
pub(crate) async fn run_poll_timer(
    interval: Duration,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
    // Missed ticks shift the schedule instead of firing in a burst.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if event_tx.send(EngineEvent::PollTick).is_err() {
                    break;
                }
            }
        }
    }
}
