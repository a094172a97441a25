//! Command implementations for the keyset CLI.

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use keyset_core::{
    IntersectConfig, IntersectionResult, SourceProgress, intersect_files_with_progress,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::info;

/// Intersect the two configured files and print the result to stdout.
pub async fn intersect(
    config: IntersectConfig,
    format: OutputFormat,
) -> Result<IntersectionResult> {
    config.validate().context("invalid application configs")?;

    let started = Instant::now();
    let spinner = output::spinner(format!(
        "Reading files {} and {} using key: {}",
        config.first_source.display(),
        config.second_source.display(),
        config.key
    ));

    let finished = Arc::new(AtomicUsize::new(0));
    let progress_spinner = spinner.clone();
    let on_source_read = move |progress: SourceProgress| {
        info!("Processed {} ({} keys)", progress.label, progress.keys);
        if finished.fetch_add(1, Ordering::SeqCst) == 0 {
            progress_spinner.set_message(format!(
                "Completed reading {}. Still reading the other file...",
                progress.label
            ));
        } else {
            progress_spinner.set_message("Finding intersections...");
        }
    };

    let result = match intersect_files_with_progress(&config, on_source_read).await {
        Ok(result) => {
            spinner.finish_with_message(format!(
                "Process completed. Elapsed: {}",
                output::format_duration(started.elapsed())
            ));
            result
        }
        Err(e) => {
            spinner.abandon_with_message("Process crashed");
            return Err(e).context("while running application");
        }
    };

    println!("{}", output::render_result(&result, format)?);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_intersect_command() {
        let first = write_csv("key\na\nb\nc\nd\nd\ne\nf\nf\n");
        let second = write_csv("key\na\nc\nc\nd\nf\nf\nf\nx\ny\n");

        let config = IntersectConfig::new(first.path(), second.path(), "key");
        let result = intersect(config, OutputFormat::Plain).await.unwrap();

        assert_eq!(result.first.record_count, 8);
        assert_eq!(result.second.record_count, 9);
        assert_eq!(result.distinct_overlap, 4);
        assert_eq!(result.total_overlap, 5);
    }

    #[tokio::test]
    async fn test_intersect_command_wraps_errors() {
        let first = write_csv("key\na\n");
        let config = IntersectConfig::new(first.path(), first.path(), "missing");

        let err = intersect(config, OutputFormat::Plain).await.unwrap_err();
        assert_eq!(err.to_string(), "while running application");
        assert!(format!("{:#}", err).contains("header: missing does not exist"));
    }

    #[tokio::test]
    async fn test_intersect_command_rejects_bad_config() {
        let config = IntersectConfig::new("a.csv", "b.csv", "key").with_buffer_size(0);

        let err = intersect(config, OutputFormat::Plain).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid application configs");
    }
}
