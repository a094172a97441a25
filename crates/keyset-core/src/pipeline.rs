//! End-to-end run over two CSV files: two producers, two reducers, one
//! reconciliation.

use crate::config::IntersectConfig;
use crate::error::Result;
use crate::intersect::compute_intersection;
use crate::queue;
use crate::source::{CsvKeySource, spawn_source_with};
use crate::types::IntersectionResult;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Reported once per source after it has been read to the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProgress {
    pub label: String,
    pub keys: u64,
}

/// Intersect the key column of the two files named in `config`.
pub async fn intersect_files(config: &IntersectConfig) -> Result<IntersectionResult> {
    intersect_files_with_progress(config, |_| {}).await
}

/// Like [`intersect_files`], calling `on_source_read` as each file finishes.
pub async fn intersect_files_with_progress<F>(
    config: &IntersectConfig,
    on_source_read: F,
) -> Result<IntersectionResult>
where
    F: Fn(SourceProgress) + Send + Sync + 'static,
{
    config.validate()?;

    let started = Instant::now();
    let notify = Arc::new(on_source_read);

    let mut receivers = Vec::with_capacity(2);
    let mut producers = Vec::with_capacity(2);
    for path in [&config.first_source, &config.second_source] {
        let label = path.display().to_string();
        let (tx, rx) = queue::bounded(label.clone(), config.buffer_size)?;

        let path = path.clone();
        let key = config.key.clone();
        let notify = Arc::clone(&notify);
        producers.push(spawn_source_with(
            move || CsvKeySource::open(path, key),
            tx,
            move |keys| notify(SourceProgress { label, keys }),
        ));
        receivers.push(rx);
    }

    let second = receivers.pop();
    let first = receivers.pop();
    let result = compute_intersection(first, second).await;

    for producer in producers {
        if let Err(e) = producer.await {
            warn!("Key source task ended abnormally: {}", e);
        }
    }

    let result = result?;
    info!(
        "Intersected {} and {} on '{}' in {:?}",
        config.first_source.display(),
        config.second_source.display(),
        config.key,
        started.elapsed()
    );
    Ok(result)
}
