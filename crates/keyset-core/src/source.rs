//! Key sources: producers that fill a key queue from tabular input.

use crate::error::{IntersectError, Result};
use crate::queue::KeySender;
use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A blocking producer of keys.
pub trait KeySource: Send {
    /// Name used in logs and error messages
    fn label(&self) -> String;

    /// Push every key into `sender`, returning how many were emitted.
    fn pump(&mut self, sender: &KeySender) -> Result<u64>;
}

/// Emits one column of a CSV stream, located by its header name.
///
/// Records are read as raw bytes: key values are passed through untouched
/// and need not be valid UTF-8.
pub struct CsvKeySource<R> {
    label: String,
    column: String,
    reader: csv::Reader<R>,
}

impl<R: Read> CsvKeySource<R> {
    pub fn from_reader(label: impl Into<String>, column: impl Into<String>, reader: R) -> Self {
        // The header row is read by hand so that an empty stream is not an error
        let reader = ReaderBuilder::new().has_headers(false).from_reader(reader);
        Self {
            label: label.into(),
            column: column.into(),
            reader,
        }
    }

    fn column_index(&self, header: &ByteRecord) -> Result<usize> {
        header
            .iter()
            .position(|name| name == self.column.as_bytes())
            .ok_or_else(|| IntersectError::missing_column(&self.column))
    }
}

impl CsvKeySource<File> {
    /// Open a CSV file on disk.
    pub fn open(path: impl AsRef<Path>, column: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self::from_reader(path.display().to_string(), column, file))
    }
}

impl<R: Read + Send> KeySource for CsvKeySource<R> {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn pump(&mut self, sender: &KeySender) -> Result<u64> {
        let mut record = ByteRecord::new();
        if !self.reader.read_byte_record(&mut record)? {
            debug!("{} has no header row", self.label);
            return Ok(0);
        }
        let index = self.column_index(&record)?;

        let mut emitted = 0;
        while self.reader.read_byte_record(&mut record)? {
            let key = record.get(index).ok_or_else(|| {
                IntersectError::invalid_input(format!(
                    "record {} of {} has no {} field",
                    emitted + 1,
                    self.label,
                    self.column
                ))
            })?;
            sender.blocking_send(key)?;
            emitted += 1;
        }

        Ok(emitted)
    }
}

/// Run a key source on the blocking pool, feeding `sender`.
///
/// `open` runs on the blocking pool too, so opening a file counts as part of
/// the producer: its failure reaches the reducer like any other. The queue is
/// always closed with the producer's status when the task ends.
pub fn spawn_source<S, F>(open: F, sender: KeySender) -> JoinHandle<()>
where
    S: KeySource,
    F: FnOnce() -> Result<S> + Send + 'static,
{
    spawn_source_with(open, sender, |_| {})
}

pub(crate) fn spawn_source_with<S, F, N>(open: F, sender: KeySender, notify: N) -> JoinHandle<()>
where
    S: KeySource,
    F: FnOnce() -> Result<S> + Send + 'static,
    N: FnOnce(u64) + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let result = open().and_then(|mut source| {
            debug!("Reading keys from {}", source.label());
            source.pump(&sender)
        });
        match result {
            Ok(keys) => {
                debug!("Read {} keys from {}", keys, sender.label());
                notify(keys);
                sender.finish(Ok(()));
            }
            Err(e) => {
                warn!("Reading {} failed: {}", sender.label(), e);
                sender.finish(Err(e));
            }
        }
    })
}
