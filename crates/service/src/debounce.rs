//! Trailing-edge debouncing over tokio timers.
//!
//! Leading edge ignored, trailing edge fires: a value is delivered only after
//! `delay` has passed without another trigger, and only the latest value of a
//! burst is delivered.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

/// Wraps a callback so that rapid triggers collapse into one call.
///
/// Must be created inside a tokio runtime. Dropping the debouncer does not
/// discard a pending value: it still fires once its quiet period elapses.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    delay: Duration,
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer").field("delay", &self.delay).finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, on_fire: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(delay, rx, on_fire));
        Self { tx, delay }
    }

    /// Cancels any pending call and reschedules with `value`.
    pub fn trigger(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::warn!("debounce worker stopped, input dropped");
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

async fn run<T, F>(delay: Duration, mut rx: mpsc::UnboundedReceiver<T>, mut on_fire: F)
where
    F: FnMut(T),
{
    while let Some(first) = rx.recv().await {
        let mut pending = first;
        let deadline = sleep_until(Instant::now() + delay);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                () = &mut deadline => {
                    on_fire(pending);
                    break;
                }
                next = rx.recv() => match next {
                    Some(value) => {
                        pending = value;
                        deadline.as_mut().reset(Instant::now() + delay);
                    },
                    None => {
                        deadline.as_mut().await;
                        on_fire(pending);
                        return;
                    },
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::time::sleep;

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(String) + Send + 'static) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        (fired, move |v| sink.lock().unwrap().push(v))
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_trigger_fires_after_delay() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(600), on_fire);

        debouncer.trigger("rose".to_owned());
        sleep(Duration::from_millis(599)).await;
        assert!(fired.lock().unwrap().is_empty());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["rose"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_value() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(600), on_fire);

        for query in ["r", "ro", "ros", "rose"] {
            debouncer.trigger(query.to_owned());
            sleep(Duration::from_millis(100)).await;
        }
        // 100ms since the last trigger: nothing yet
        assert!(fired.lock().unwrap().is_empty());

        sleep(Duration::from_millis(600)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["rose"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_quiet_periods_fire_separately() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300), on_fire);

        debouncer.trigger("fir".to_owned());
        sleep(Duration::from_millis(400)).await;
        debouncer.trigger("oak".to_owned());
        sleep(Duration::from_millis(400)).await;

        assert_eq!(*fired.lock().unwrap(), vec!["fir", "oak"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_value_survives_drop() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(200), on_fire);

        debouncer.trigger("ivy".to_owned());
        drop(debouncer);
        sleep(Duration::from_millis(250)).await;

        assert_eq!(*fired.lock().unwrap(), vec!["ivy"]);
    }
}
