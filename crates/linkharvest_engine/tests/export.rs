use std::fs;

use linkharvest_core::ExportTarget;
use linkharvest_engine::{ExportSink, FileExportSink, WriterExportSink, DEFAULT_EXPORT_FILENAME};
use tempfile::TempDir;

#[test]
fn file_sink_writes_text_verbatim() {
    let temp = TempDir::new().unwrap();
    let mut sink = FileExportSink::new(temp.path().to_path_buf(), DEFAULT_EXPORT_FILENAME);

    let receipt = sink.emit("u1\nu2", 2).unwrap();

    let path = temp.path().join(DEFAULT_EXPORT_FILENAME);
    assert_eq!(fs::read_to_string(&path).unwrap(), "u1\nu2");
    assert_eq!(receipt.target, ExportTarget::File);
    assert_eq!(receipt.count, 2);
    assert_eq!(receipt.destination, path.display().to_string());
}

#[test]
fn file_sink_reports_unwritable_destination() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    let mut sink = FileExportSink::new(blocker, "links.txt");
    assert!(sink.emit("u1", 1).is_err());
}

#[test]
fn writer_sink_appends_newline() {
    let mut sink = WriterExportSink::new(Vec::new(), ExportTarget::Clipboard, "stdout");
    let receipt = sink.emit("u1\nu2", 2).unwrap();

    assert_eq!(receipt.destination, "stdout");
    assert_eq!(receipt.target, ExportTarget::Clipboard);
    assert_eq!(sink.into_inner(), b"u1\nu2\n");
}
