//! Output sinks for result rows
//!
//! A sink receives all rows of one name at a time and writes them out before
//! returning, so a reader of the file never sees half a batch.

use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use lineage_common::{OutputRow, Rank};
use serde_jsonlines::JsonLinesWriter;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Destination for output rows
pub trait RowSink: Send {
    /// Write one batch of rows
    fn write_rows(&mut self, rows: &[OutputRow]) -> Result<()>;
}

impl<T: RowSink + ?Sized> RowSink for Box<T> {
    fn write_rows(&mut self, rows: &[OutputRow]) -> Result<()> {
        (**self).write_rows(rows)
    }
}

/// Collects rows in memory
impl RowSink for Vec<OutputRow> {
    fn write_rows(&mut self, rows: &[OutputRow]) -> Result<()> {
        self.extend_from_slice(rows);
        Ok(())
    }
}

/// Delimited text (CSV or TSV) with a fixed column order
pub struct DelimitedSink<W: Write> {
    writer: csv::Writer<W>,
    columns: Vec<Rank>,
}

impl<W: Write> DelimitedSink<W> {
    pub fn new(writer: W, delimiter: u8, columns: Vec<Rank>) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_writer(writer);
        Self { writer, columns }
    }

    /// Write the header line: capitalized rank labels
    pub fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(self.columns.iter().map(|rank| rank.label()))?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| CliError::Io(std::io::Error::new(e.error().kind(), e.to_string())))
    }
}

impl<W: Write + Send> RowSink for DelimitedSink<W> {
    fn write_rows(&mut self, rows: &[OutputRow]) -> Result<()> {
        for row in rows {
            self.writer
                .write_record(self.columns.iter().map(|&rank| row.get(rank).unwrap_or("")))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// One JSON object per row, one row per line
pub struct JsonLinesSink<W: Write> {
    writer: JsonLinesWriter<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: JsonLinesWriter::new(writer),
        }
    }
}

impl<W: Write + Send> RowSink for JsonLinesSink<W> {
    fn write_rows(&mut self, rows: &[OutputRow]) -> Result<()> {
        for row in rows {
            self.writer.write(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Open the output file for appending and wrap it in a sink for `format`
///
/// Delimited formats get a header line, but only when the file is created by
/// this call.
pub fn open_sink(path: &Path, format: OutputFormat, columns: &[Rank]) -> Result<Box<dyn RowSink>> {
    let existed = path.is_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            CliError::config(format!(
                "Cannot open output file '{}' for writing: {}",
                path.display(),
                e
            ))
        })?;

    debug!(path = %path.display(), existed = existed, format = ?format, "Opened output file");

    let sink: Box<dyn RowSink> = match format {
        OutputFormat::Json => Box::new(JsonLinesSink::new(file)),
        OutputFormat::Csv => delimited(file, b',', columns, !existed)?,
        OutputFormat::Txt => delimited(file, b'\t', columns, !existed)?,
    };

    Ok(sink)
}

fn delimited(file: File, delimiter: u8, columns: &[Rank], header: bool) -> Result<Box<dyn RowSink>> {
    let mut sink = DelimitedSink::new(file, delimiter, columns.to_vec());
    if header {
        sink.write_header()?;
    }
    Ok(Box::new(sink))
}
