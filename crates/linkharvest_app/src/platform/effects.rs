use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use harvest_logging::{harvest_info, harvest_warn};
use linkharvest_core::{Effect, ExportTarget, FetchedPage, Msg, PatternCatalog, RecordId};
use linkharvest_engine::{
    ensure_dir, EngineEvent, EngineHandle, ExportSink, FileExportSink, RowExtractor,
    WriterExportSink,
};

use super::config::AppConfig;
use super::persistence::SelectionFile;

/// Slack on top of the request timeout before a fetch is given up on.
const FETCH_GRACE: Duration = Duration::from_secs(5);

/// Executes effects emitted by `update` and turns their outcomes back into
/// messages. The console loop is synchronous, so fetches block until their
/// event arrives.
pub struct EffectRunner {
    extractor: RowExtractor,
    engine: EngineHandle,
    selection_file: SelectionFile,
    file_sink: FileExportSink,
    fetch_wait: Duration,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, catalog: Arc<PatternCatalog>) -> anyhow::Result<Self> {
        Self::with_engine(
            config,
            catalog,
            EngineHandle::new(config.fetch_settings(), config.rate_limit_per_minute),
        )
    }

    pub fn with_engine(
        config: &AppConfig,
        catalog: Arc<PatternCatalog>,
        engine: EngineHandle,
    ) -> anyhow::Result<Self> {
        ensure_dir(&config.state_dir).context("preparing state directory")?;
        ensure_dir(&config.export_dir).context("preparing export directory")?;
        let extractor = RowExtractor::new(catalog).context("building row extractor")?;

        Ok(Self {
            extractor,
            engine,
            selection_file: SelectionFile::new(config.state_dir.clone()),
            file_sink: FileExportSink::new(
                config.export_dir.clone(),
                config.export_filename.clone(),
            ),
            fetch_wait: config.fetch_settings().request_timeout + FETCH_GRACE,
        })
    }

    pub fn load_selection(&self) -> Vec<RecordId> {
        self.selection_file.load()
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::ExtractRows { html, base_url } => {
                    let result = self
                        .extractor
                        .extract(&html, base_url.as_deref())
                        .map_err(|err| err.to_string());
                    follow_ups.push(Msg::RowsExtracted(result));
                }
                Effect::FetchPage { url } => {
                    harvest_info!("FetchPage url={}", url);
                    follow_ups.push(Msg::PageFetched(self.fetch_blocking(url)));
                }
                Effect::PersistSelection { ids } => {
                    self.selection_file.save(&ids);
                }
                Effect::EmitExport {
                    target,
                    text,
                    count,
                } => {
                    let result = match target {
                        ExportTarget::File => self.file_sink.emit(&text, count),
                        ExportTarget::Clipboard => {
                            WriterExportSink::new(io::stdout().lock(), target, "the console")
                                .emit(&text, count)
                        }
                    };
                    follow_ups.push(Msg::ExportFinished(result.map_err(|err| err.to_string())));
                }
            }
        }
        follow_ups
    }

    fn fetch_blocking(&mut self, url: String) -> Result<FetchedPage, String> {
        let wanted = self.engine.fetch(url.clone());
        loop {
            match self.engine.recv_timeout(self.fetch_wait) {
                Some(EngineEvent::PageFetched { request_id, result }) if request_id == wanted => {
                    return result.map_err(|err| err.message);
                }
                Some(EngineEvent::PageFetched { request_id, .. }) => {
                    harvest_warn!("Dropping stale fetch result {}", request_id);
                }
                None => {
                    harvest_warn!("Fetch {} produced no result in {:?}", url, self.fetch_wait);
                    return Err(format!("Failed to fetch URL: no response from {url}"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkharvest_engine::{FailureKind, FetchError, FixedWindowLimiter, PageFetcher};
    use tempfile::TempDir;

    struct CannedFetcher;

    #[async_trait::async_trait]
    impl PageFetcher for CannedFetcher {
        async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
            if url.contains("missing") {
                return Err(FetchError::new(
                    FailureKind::HttpStatus(404),
                    "HTTP 404: Not Found",
                ));
            }
            Ok(FetchedPage {
                html: "<table><tr><td><a href=\"a.zip\">A</a></td></tr></table>".to_string(),
                url: url.to_string(),
                fetched_utc: "2024-01-01T00:00:00Z".to_string(),
            })
        }
    }

    fn runner(temp: &TempDir) -> EffectRunner {
        let config = AppConfig {
            state_dir: temp.path().join("state"),
            export_dir: temp.path().join("out"),
            ..AppConfig::default()
        };
        let engine = EngineHandle::with_fetcher(
            Arc::new(CannedFetcher),
            FixedWindowLimiter::per_minute(10),
        );
        EffectRunner::with_engine(&config, PatternCatalog::builtin(), engine).unwrap()
    }

    #[test]
    fn extract_rows_reports_records() {
        let temp = TempDir::new().unwrap();
        let mut runner = runner(&temp);
        let msgs = runner.run(vec![Effect::ExtractRows {
            html: "<table><tr><td><a href=\"x.zip\">X (USA)</a></td></tr></table>".to_string(),
            base_url: Some("https://example.com/files/".to_string()),
        }]);

        match msgs.as_slice() {
            [Msg::RowsExtracted(Ok(records))] => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].full_url, "https://example.com/files/x.zip");
            }
            other => panic!("unexpected messages: {other:?}"),
        }
    }

    #[test]
    fn extract_errors_become_strings() {
        let temp = TempDir::new().unwrap();
        let mut runner = runner(&temp);
        let msgs = runner.run(vec![Effect::ExtractRows {
            html: "   ".to_string(),
            base_url: None,
        }]);
        assert!(matches!(msgs.as_slice(), [Msg::RowsExtracted(Err(_))]));
    }

    #[test]
    fn fetch_waits_for_its_result() {
        let temp = TempDir::new().unwrap();
        let mut runner = runner(&temp);

        let msgs = runner.run(vec![Effect::FetchPage {
            url: "https://example.com/files/".to_string(),
        }]);
        match msgs.as_slice() {
            [Msg::PageFetched(Ok(page))] => assert_eq!(page.url, "https://example.com/files/"),
            other => panic!("unexpected messages: {other:?}"),
        }

        let msgs = runner.run(vec![Effect::FetchPage {
            url: "https://example.com/missing".to_string(),
        }]);
        assert_eq!(
            msgs,
            vec![Msg::PageFetched(Err("HTTP 404: Not Found".to_string()))]
        );
    }

    #[test]
    fn persisted_selection_is_loaded_back() {
        let temp = TempDir::new().unwrap();
        let mut runner = runner(&temp);
        let ids = vec![RecordId::from_raw(4), RecordId::from_raw(7)];

        assert!(runner
            .run(vec![Effect::PersistSelection { ids: ids.clone() }])
            .is_empty());
        assert_eq!(runner.load_selection(), ids);
    }

    #[test]
    fn file_export_writes_the_configured_file() {
        let temp = TempDir::new().unwrap();
        let mut runner = runner(&temp);
        let msgs = runner.run(vec![Effect::EmitExport {
            target: ExportTarget::File,
            text: "https://a/1\nhttps://a/2".to_string(),
            count: 2,
        }]);

        match msgs.as_slice() {
            [Msg::ExportFinished(Ok(receipt))] => {
                assert_eq!(receipt.count, 2);
                assert_eq!(receipt.target, ExportTarget::File);
            }
            other => panic!("unexpected messages: {other:?}"),
        }
        let written =
            std::fs::read_to_string(temp.path().join("out").join("jdownloader-links.txt")).unwrap();
        assert_eq!(written, "https://a/1\nhttps://a/2");
    }
}
