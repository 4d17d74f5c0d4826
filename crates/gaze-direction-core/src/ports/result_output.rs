//! Result output port for writing classified records.

use crate::domain::ClassifiedRecord;

/// Port for outputting classification results.
pub trait ResultOutput: Send + Sync {
    /// Writes a single record.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, record: &ClassifiedRecord) -> anyhow::Result<()>;

    /// Writes a whole batch at once.
    ///
    /// Adapters with an array representation override this; the default
    /// writes record by record.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_array(&self, records: &[ClassifiedRecord], pretty: bool) -> anyhow::Result<()> {
        let _ = pretty;
        records.iter().try_for_each(|record| self.write(record))
    }

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
