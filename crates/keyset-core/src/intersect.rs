//! Intersection orchestrator.
//!
//! Runs one reducer task per queue, joins both, then reconciles the two
//! frequency maps. Producers are started by the caller; this module only
//! drains their queues.

use crate::error::{IntersectError, Result};
use crate::overlap::compute_overlap;
use crate::queue::KeyReceiver;
use crate::reducer::reduce;
use crate::types::{IntersectionResult, KeyFrequencies};
use std::time::Instant;
use tokio::task::JoinError;
use tracing::{debug, warn};

/// Reduce both queues concurrently and compute their overlap statistics.
///
/// Both reducers always run to completion before anything is reported, so
/// neither queue is left full and abandoned when the other side fails. If a
/// side failed its error is returned and no overlap is computed.
pub async fn compute_intersection(
    first: Option<KeyReceiver>,
    second: Option<KeyReceiver>,
) -> Result<IntersectionResult> {
    let first = first.ok_or_else(|| IntersectError::invalid_input("first key queue is missing"))?;
    let second =
        second.ok_or_else(|| IntersectError::invalid_input("second key queue is missing"))?;

    let started = Instant::now();
    let first_task = tokio::spawn(reduce(first));
    let second_task = tokio::spawn(reduce(second));

    let (first, second) = tokio::join!(first_task, second_task);
    let (first, second) = (settle("first", first), settle("second", second));
    let (first, second) = (first?, second?);

    let overlap = compute_overlap(&first, &second);
    debug!(
        "Computed overlap of {} distinct / {} total keys in {:?}",
        overlap.distinct,
        overlap.total,
        started.elapsed()
    );

    Ok(IntersectionResult::new(
        first.statistics(),
        second.statistics(),
        overlap,
    ))
}

fn settle(
    side: &str,
    joined: std::result::Result<Result<KeyFrequencies>, JoinError>,
) -> Result<KeyFrequencies> {
    let result = joined.unwrap_or_else(|e| {
        Err(IntersectError::reduction(format!(
            "{} reducer task aborted: {}",
            side, e
        )))
    });

    if let Err(e) = &result {
        warn!("Reduction of {} source failed: {}", side, e);
    }

    result
}
