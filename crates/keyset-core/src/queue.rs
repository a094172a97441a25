//! Bounded key queue connecting one producer to one reducer.
//!
//! The channel payload is only ever a key. A producer's terminal status
//! travels beside it on a oneshot, so a reducer can tell "input exhausted"
//! apart from "input failed" after the channel closes:
//!
//! - [`KeySender::finish`] publishes the status, then closes the channel
//! - [`KeyReceiver::recv`] yields keys in FIFO order until the channel closes
//! - [`KeyReceiver::completion`] resolves the producer's status
//!
//! # Example
//!
//! ```
//! use keyset_core::queue;
//!
//! # #[tokio::main]
//! # async fn main() -> keyset_core::Result<()> {
//! let (tx, mut rx) = queue::bounded("inline", 4)?;
//!
//! tokio::spawn(async move {
//!     let result = tx.send("a").await;
//!     tx.finish(result);
//! });
//!
//! assert_eq!(rx.recv().await.as_deref(), Some(&b"a"[..]));
//! assert_eq!(rx.recv().await, None);
//! rx.completion().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{IntersectError, Result};
use crate::types::Key;
use tokio::sync::{mpsc, oneshot};

/// Create a queue holding at most `capacity` keys in flight.
///
/// `label` names the source in logs and in producer failures.
pub fn bounded(label: impl Into<String>, capacity: usize) -> Result<(KeySender, KeyReceiver)> {
    if capacity == 0 {
        return Err(IntersectError::invalid_input(
            "key queue capacity must be greater than zero",
        ));
    }

    let label = label.into();
    let (tx, rx) = mpsc::channel(capacity);
    let (status_tx, status_rx) = oneshot::channel();

    Ok((
        KeySender {
            label: label.clone(),
            tx,
            status: status_tx,
        },
        KeyReceiver {
            label,
            rx,
            status: status_rx,
        },
    ))
}

/// Writer half, owned by exactly one producer.
#[derive(Debug)]
pub struct KeySender {
    label: String,
    tx: mpsc::Sender<Key>,
    status: oneshot::Sender<Result<()>>,
}

impl KeySender {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Push a key, waiting while the queue is full.
    pub async fn send(&self, key: impl Into<Key>) -> Result<()> {
        self.tx
            .send(key.into())
            .await
            .map_err(|_| self.consumer_gone())
    }

    /// Blocking variant of [`send`](Self::send) for producers running off the
    /// async runtime. Panics if called from within an async context.
    pub fn blocking_send(&self, key: impl Into<Key>) -> Result<()> {
        self.tx
            .blocking_send(key.into())
            .map_err(|_| self.consumer_gone())
    }

    /// Report the producer's terminal status and close the queue.
    pub fn finish(self, result: Result<()>) {
        let KeySender { tx, status, .. } = self;
        // Receiver may already be gone; nothing left to tell it.
        let _ = status.send(result);
        drop(tx);
    }

    fn consumer_gone(&self) -> IntersectError {
        IntersectError::reduction(format!("consumer of {} stopped draining", self.label))
    }
}

/// Reader half, owned by exactly one reducer.
#[derive(Debug)]
pub struct KeyReceiver {
    label: String,
    rx: mpsc::Receiver<Key>,
    status: oneshot::Receiver<Result<()>>,
}

impl KeyReceiver {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Next key, or `None` once the producer has closed the queue.
    pub async fn recv(&mut self) -> Option<Key> {
        self.rx.recv().await
    }

    /// Resolve how the producer terminated. Call after [`recv`](Self::recv)
    /// has returned `None`.
    pub async fn completion(self) -> Result<()> {
        match self.status.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(IntersectError::producer(self.label, source)),
            Err(_) => Err(IntersectError::reduction(format!(
                "producer of {} vanished without signalling completion",
                self.label
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        let err = bounded("zero", 0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_fifo_then_clean_completion() {
        let (tx, mut rx) = bounded("fifo", 8).unwrap();
        for key in ["c", "a", "b"] {
            tx.send(key).await.unwrap();
        }
        tx.finish(Ok(()));

        let mut seen = Vec::new();
        while let Some(key) = rx.recv().await {
            seen.push(key);
        }
        assert_eq!(seen, vec![b"c".to_vec(), b"a".to_vec(), b"b".to_vec()]);
        assert!(rx.completion().await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_producer_is_reported_after_drain() {
        let (tx, mut rx) = bounded("broken.csv", 8).unwrap();
        tx.send("a").await.unwrap();
        tx.finish(Err(IntersectError::missing_column("id")));

        assert_eq!(rx.recv().await.as_deref(), Some(&b"a"[..]));
        assert_eq!(rx.recv().await, None);

        let err = rx.completion().await.unwrap_err();
        assert!(err.is_producer_failure());
        assert!(err.to_string().contains("broken.csv"));
    }

    #[tokio::test]
    async fn test_dropped_sender_is_a_reduction_failure() {
        let (tx, mut rx) = bounded("dropped", 1).unwrap();
        drop(tx);

        assert_eq!(rx.recv().await, None);
        assert!(rx.completion().await.unwrap_err().is_reduction_failure());
    }

    #[tokio::test]
    async fn test_send_fails_once_receiver_is_gone() {
        let (tx, rx) = bounded("orphan", 1).unwrap();
        drop(rx);

        let err = tx.send("a").await.unwrap_err();
        assert!(err.is_reduction_failure());
    }
}
