//! Record sinks
//!
//! A sink receives whole pages of records. A page is only handed to the sink
//! after every record of it was assembled, so a sink never sees a partial page.

use crate::domain::{ExportRecord, FeedError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Destination of exported records
pub trait RecordSink: Send {
    /// Write one complete page
    fn write_page(&mut self, records: &[ExportRecord]) -> Result<()>;

    /// Flush buffered output
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write + Send> {
    writer: BufWriter<W>,
    written: usize,
}

impl JsonLinesSink<File> {
    /// Create (or truncate) the output file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                FeedError::Io(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = File::create(path).map_err(|e| {
            FeedError::Io(format!("Failed to create output file {}: {}", path.display(), e))
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the inner writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| FeedError::Io(format!("Failed to flush output: {}", e.error())))
    }
}

impl<W: Write + Send> RecordSink for JsonLinesSink<W> {
    fn write_page(&mut self, records: &[ExportRecord]) -> Result<()> {
        for record in records {
            serde_json::to_writer(&mut self.writer, record)?;
            self.writer.write_all(b"\n")?;
        }
        self.written += records.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct VecSink {
    pub records: Vec<ExportRecord>,
    pub pages: usize,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for VecSink {
    fn write_page(&mut self, records: &[ExportRecord]) -> Result<()> {
        self.records.extend_from_slice(records);
        self.pages += 1;
        Ok(())
    }
}

/// Drops every record, used for dry runs
#[derive(Debug, Default)]
pub struct DiscardSink;

impl RecordSink for DiscardSink {
    fn write_page(&mut self, _records: &[ExportRecord]) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::ProductId;
    use crate::domain::Price;

    fn record(id: u64) -> ExportRecord {
        ExportRecord::builder()
            .id(ProductId::new(id))
            .product_no(format!("cat-{id}"))
            .name("product name")
            .url(format!("https://example.com/p/{id}"))
            .price(Price::zero())
            .high_product_price(Price::zero())
            .currency_code("EUR")
            .build()
            .unwrap()
    }

    #[test]
    fn test_json_lines_one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write_page(&[record(1), record(2)]).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.written(), 2);

        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(first["availability"], "out of stock");
    }

    #[test]
    fn test_json_lines_create_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out").join("feed.jsonl");

        let mut sink = JsonLinesSink::create(&path).unwrap();
        sink.write_page(&[record(1)]).unwrap();
        sink.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_vec_sink_counts_pages() {
        let mut sink = VecSink::new();
        sink.write_page(&[record(1)]).unwrap();
        sink.write_page(&[record(2), record(3)]).unwrap();
        assert_eq!(sink.pages, 2);
        assert_eq!(sink.records.len(), 3);
    }
}
