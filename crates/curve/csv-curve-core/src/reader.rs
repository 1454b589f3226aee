//! Typed reader: a [`RowSource`] driven through a shared [`ColumnSet`].

use std::sync::Arc;

use crate::columns::{ColumnSet, ConvertFailed, CsvRecord};
use crate::config::ReaderConfig;
use crate::source::{ResourceLoader, RowSource};
use crate::Result;

type FailureHook = Box<dyn FnMut(&ConvertFailed)>;

/// Records produced by a full read along with every field that fell back to
/// its default.
#[derive(Clone, Debug, Default)]
pub struct ReadOutcome<T> {
    pub records: Vec<T>,
    pub failures: Vec<ConvertFailed>,
}

/// Lazily yields one `T` per remaining line of its source.
pub struct CsvReader<T> {
    source: RowSource,
    columns: Arc<ColumnSet<T>>,
    delimiter: char,
    on_failure: Option<FailureHook>,
    failures: Vec<ConvertFailed>,
}

impl<T: CsvRecord> CsvReader<T> {
    /// Open `id` and build a fresh column table from [`CsvRecord::columns`].
    pub fn open<L>(loader: &L, id: &str, cfg: &ReaderConfig) -> Result<Self>
    where
        L: ResourceLoader + ?Sized,
    {
        let source = RowSource::open(loader, id, cfg.skip_header, cfg.encoding)?;
        Ok(Self::with_columns(source, Arc::new(T::columns()), cfg.delimiter))
    }
}

impl<T: Default> CsvReader<T> {
    /// Reuse an already built column table.
    pub fn with_columns(source: RowSource, columns: Arc<ColumnSet<T>>, delimiter: char) -> Self {
        Self {
            source,
            columns,
            delimiter,
            on_failure: None,
            failures: Vec::new(),
        }
    }

    /// Install a callback invoked once per field that fell back to its default.
    pub fn on_convert_failed<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&ConvertFailed) + 'static,
    {
        self.on_failure = Some(Box::new(hook));
        self
    }

    pub fn columns(&self) -> &Arc<ColumnSet<T>> {
        &self.columns
    }

    /// Failures collected so far; the internal list is emptied.
    pub fn take_failures(&mut self) -> Vec<ConvertFailed> {
        std::mem::take(&mut self.failures)
    }

    /// Release the underlying source early. Idempotent.
    pub fn close(&mut self) -> bool {
        self.source.close()
    }

    pub fn is_open(&self) -> bool {
        self.source.is_open()
    }

    /// Drain the remaining lines.
    pub fn read_all(mut self) -> ReadOutcome<T> {
        let records: Vec<T> = self.by_ref().collect();
        log::debug!(
            "read {} records from '{}' ({} conversion failures)",
            records.len(),
            self.source.id(),
            self.failures.len()
        );
        ReadOutcome {
            records,
            failures: self.take_failures(),
        }
    }
}

impl<T: Default> Iterator for CsvReader<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let line = self.source.next()?;
        let row = self.source.line_number();
        let failures = &mut self.failures;
        let hook = &mut self.on_failure;
        let record = self.columns.map_row(&line, self.delimiter, row, |failed| {
            log::warn!("{failed}");
            if let Some(hook) = hook.as_mut() {
                hook(&failed);
            }
            failures.push(failed);
        });
        Some(record)
    }
}
