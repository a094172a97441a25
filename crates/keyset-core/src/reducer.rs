//! Frequency reducer: folds one key queue into a [`KeyFrequencies`].

use crate::error::Result;
use crate::queue::KeyReceiver;
use crate::types::KeyFrequencies;
use tracing::debug;

/// Drain `receiver` until its producer closes it and count every key.
///
/// The queue is always drained to the end, even when the producer later
/// turns out to have failed, so a producer can never stay parked on a full
/// queue. A producer failure is returned instead of the partial counts.
pub async fn reduce(mut receiver: KeyReceiver) -> Result<KeyFrequencies> {
    debug!("Reducing keys from {}", receiver.label());

    let mut frequencies = KeyFrequencies::new();
    while let Some(key) = receiver.recv().await {
        frequencies.observe(key);
    }

    let label = receiver.label().to_string();
    receiver.completion().await?;

    debug!(
        "Reduced {} keys ({} distinct) from {}",
        frequencies.record_count(),
        frequencies.distinct_count(),
        label
    );

    Ok(frequencies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntersectError;
    use crate::queue;

    #[tokio::test]
    async fn test_reduce_counts_every_key() {
        let (tx, rx) = queue::bounded("letters", 2).unwrap();

        let producer = tokio::spawn(async move {
            let mut result = Ok(());
            for key in ["a", "b", "a", "c", "a"] {
                result = tx.send(key.to_string()).await;
                if result.is_err() {
                    break;
                }
            }
            tx.finish(result);
        });

        let frequencies = reduce(rx).await.unwrap();
        producer.await.unwrap();

        assert_eq!(frequencies.record_count(), 5);
        assert_eq!(frequencies.distinct_count(), 3);
        assert_eq!(frequencies.count("a"), 3);
    }

    #[tokio::test]
    async fn test_reduce_empty_queue() {
        let (tx, rx) = queue::bounded("empty", 1).unwrap();
        tx.finish(Ok(()));

        let frequencies = reduce(rx).await.unwrap();
        assert!(frequencies.is_empty());
        assert_eq!(frequencies.record_count(), 0);
    }

    #[tokio::test]
    async fn test_reduce_surfaces_producer_error() {
        let (tx, rx) = queue::bounded("bad.csv", 4).unwrap();
        tx.send("a".to_string()).await.unwrap();
        tx.finish(Err(IntersectError::invalid_input("unreadable")));

        let err = reduce(rx).await.unwrap_err();
        assert!(err.is_producer_failure());
    }
}
