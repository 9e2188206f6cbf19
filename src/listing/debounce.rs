//! Search-input debouncing.
//!
//! A single delay-then-fire timer, restarted by every input. Only the term
//! standing when the timer runs out is emitted.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct SearchDebouncer {
    input_tx: mpsc::UnboundedSender<String>,
    handle: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Start the timer task. Settled terms arrive on the returned receiver.
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            let mut last_emitted = String::new();

            while let Some(mut pending) = input_rx.recv().await {
                loop {
                    tokio::select! {
                        next = input_rx.recv() => match next {
                            Some(term) => pending = term,
                            // owner gone: a pending term is dropped, not flushed
                            None => return,
                        },
                        _ = tokio::time::sleep(delay) => break,
                    }
                }

                if pending == last_emitted {
                    continue;
                }
                tracing::debug!(term = %pending, "Search term settled");
                if settled_tx.send(pending.clone()).is_err() {
                    return;
                }
                last_emitted = pending;
            }
        });

        (Self { input_tx, handle }, settled_rx)
    }

    pub fn input(&self, term: impl Into<String>) {
        if self.input_tx.send(term.into()).is_err() {
            tracing::warn!("Search debouncer stopped; input ignored");
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(400);

    #[tokio::test(start_paused = true)]
    async fn rapid_typing_fires_once_with_final_term() {
        let (debouncer, mut settled) = SearchDebouncer::spawn(DELAY);

        debouncer.input("a");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.input("al");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.input("ali");

        assert_eq!(settled.recv().await.as_deref(), Some("ali"));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(settled.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_longer_than_delay_fire_separately() {
        let (debouncer, mut settled) = SearchDebouncer::spawn(DELAY);

        debouncer.input("al");
        tokio::time::sleep(Duration::from_millis(500)).await;
        debouncer.input("ali");

        assert_eq!(settled.recv().await.as_deref(), Some("al"));
        assert_eq!(settled.recv().await.as_deref(), Some("ali"));
    }

    #[tokio::test(start_paused = true)]
    async fn returning_to_same_term_does_not_refire() {
        let (debouncer, mut settled) = SearchDebouncer::spawn(DELAY);

        debouncer.input("ali");
        assert_eq!(settled.recv().await.as_deref(), Some("ali"));

        debouncer.input("alix");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.input("ali");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(settled.try_recv().is_err());
    }
}
