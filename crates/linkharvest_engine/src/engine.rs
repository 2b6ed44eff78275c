use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use harvest_logging::{harvest_error, harvest_warn};
use url::Url;

use crate::fetch::{FetchSettings, PageFetcher, ReqwestFetcher};
use crate::rate_limit::FixedWindowLimiter;
use crate::{EngineEvent, FailureKind, FetchError, RequestId};

enum EngineCommand {
    Fetch { request_id: RequestId, url: String },
}

/// Runs page fetches on a background tokio runtime and reports results over
/// a channel. Requests are rate limited per host before they reach the
/// network.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    next_request: RequestId,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, requests_per_minute: u32) -> Self {
        Self::with_fetcher(
            Arc::new(ReqwestFetcher::new(settings)),
            FixedWindowLimiter::per_minute(requests_per_minute),
        )
    }

    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, mut limiter: FixedWindowLimiter) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    harvest_error!("Failed to start fetch runtime: {}", err);
                    while let Ok(EngineCommand::Fetch { request_id, .. }) = cmd_rx.recv() {
                        let _ = event_tx.send(EngineEvent::PageFetched {
                            request_id,
                            result: Err(FetchError::new(
                                FailureKind::Network,
                                format!("Failed to fetch URL: runtime unavailable ({err})"),
                            )),
                        });
                    }
                    return;
                }
            };

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Fetch { request_id, url } => {
                        let now = Instant::now();
                        limiter.prune(now);
                        if let Err(retry_after) = limiter.check(&rate_key(&url), now) {
                            harvest_warn!("Rate limit exceeded for {}", url);
                            let _ = event_tx.send(EngineEvent::PageFetched {
                                request_id,
                                result: Err(rate_limited(retry_after)),
                            });
                            continue;
                        }

                        let fetcher = Arc::clone(&fetcher);
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = fetcher.fetch_page(&url).await;
                            if let Err(err) = &result {
                                harvest_warn!("Fetch {} failed ({}): {}", url, err.kind, err.message);
                            }
                            let _ = event_tx.send(EngineEvent::PageFetched { request_id, result });
                        });
                    }
                }
            }
        });

        Self {
            cmd_tx,
            event_rx,
            next_request: 1,
        }
    }

    /// Queues a fetch and returns the id its event will carry.
    pub fn fetch(&mut self, url: impl Into<String>) -> RequestId {
        let request_id = self.next_request;
        self.next_request += 1;
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            request_id,
            url: url.into(),
        });
        request_id
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Host of the URL, or the whole string when it does not parse.
fn rate_key(url: &str) -> String {
    Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase))
        .unwrap_or_else(|| url.trim().to_string())
}

fn rate_limited(retry_after: Duration) -> FetchError {
    FetchError::new(
        FailureKind::RateLimited {
            retry_after_secs: retry_after.as_secs(),
        },
        "Rate limit exceeded. Please try again later.",
    )
}
