use std::io::{self, Write};
use std::path::PathBuf;

use harvest_logging::harvest_info;
use linkharvest_core::{ExportReceipt, ExportTarget};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

pub const DEFAULT_EXPORT_FILENAME: &str = "jdownloader-links.txt";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
}

/// Destination for newline-joined URL text.
pub trait ExportSink {
    fn emit(&mut self, text: &str, count: usize) -> Result<ExportReceipt, ExportError>;
}

/// Writes the export as a text file, replacing any previous export.
#[derive(Debug, Clone)]
pub struct FileExportSink {
    writer: AtomicFileWriter,
    filename: String,
}

impl FileExportSink {
    pub fn new(dir: PathBuf, filename: impl Into<String>) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
            filename: filename.into(),
        }
    }
}

impl ExportSink for FileExportSink {
    fn emit(&mut self, text: &str, count: usize) -> Result<ExportReceipt, ExportError> {
        let path = self.writer.write(&self.filename, text)?;
        harvest_info!("Exported {} links to {:?}", count, path);
        Ok(ExportReceipt {
            target: ExportTarget::File,
            destination: path.display().to_string(),
            count,
        })
    }
}

/// Writes the export to any byte stream, followed by a newline.
pub struct WriterExportSink<W: Write> {
    writer: W,
    target: ExportTarget,
    destination: String,
}

impl<W: Write> WriterExportSink<W> {
    pub fn new(writer: W, target: ExportTarget, destination: impl Into<String>) -> Self {
        Self {
            writer,
            target,
            destination: destination.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ExportSink for WriterExportSink<W> {
    fn emit(&mut self, text: &str, count: usize) -> Result<ExportReceipt, ExportError> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(ExportReceipt {
            target: self.target,
            destination: self.destination.clone(),
            count,
        })
    }
}
