//! Main scanner: fetches each target and fills the result store.

use crate::config::ScanConfig;
use crate::engine::{self, PatternSet};
use crate::fetch::{Fetch, HttpFetcher};
use crate::report::ConsoleOutput;
use crate::types::{Result, ScanOutcome, ScanResultStore, TargetOutcome};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

/// Orchestrates fetching and scanning of targets.
pub struct Scanner<F = HttpFetcher> {
    fetcher: F,
    patterns: PatternSet,
    include_all: bool,
    parallel: usize,
    console: ConsoleOutput,
}

impl Scanner<HttpFetcher> {
    /// Create a scanner that fetches over HTTP.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http_config())?;
        Ok(Self::with_fetcher(fetcher, config.pattern_set())
            .include_all(config.all)
            .parallel(config.parallel)
            .with_console(ConsoleOutput::new(config.json, config.quiet)))
    }
}

impl<F: Fetch> Scanner<F> {
    /// Create a scanner around any body source.
    pub fn with_fetcher(fetcher: F, patterns: PatternSet) -> Self {
        Self {
            fetcher,
            patterns,
            include_all: false,
            parallel: 1,
            console: ConsoleOutput::silent(),
        }
    }

    /// Keep every occurrence instead of the first distinct snippets.
    pub fn include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    /// Number of targets fetched concurrently.
    pub fn parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel.max(1);
        self
    }

    pub fn with_console(mut self, console: ConsoleOutput) -> Self {
        self.console = console;
        self
    }

    /// Fetch and scan one target.
    pub async fn scan_target(&self, target: &str) -> ScanOutcome {
        match self.fetcher.fetch(target).await {
            Ok(body) => {
                let findings = engine::scan(&body, &self.patterns, self.include_all);
                debug!("{}: {} patterns matched", target, findings.len());
                ScanOutcome::Findings { findings }
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", target, e);
                ScanOutcome::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Scan every target. The store follows input order, not completion order.
    pub async fn scan_all(&self, targets: &[String]) -> ScanResultStore {
        let pb = self
            .console
            .create_progress_bar(targets.len() as u64, "Scanning");

        let store = stream::iter(targets)
            .map(|target| async move {
                let outcome = self.scan_target(target).await;
                TargetOutcome {
                    target: target.clone(),
                    outcome,
                }
            })
            .buffered(self.parallel)
            .inspect(|_| {
                if let Some(ref pb) = pb {
                    pb.inc(1);
                }
            })
            .collect::<ScanResultStore>()
            .await;

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::patterns::BASE_PATTERNS;
    use crate::types::BanditError;
    use std::collections::HashMap;
    use std::future::{ready, Future};
    use std::time::Duration;

    /// In-memory body source.
    struct MapFetcher {
        bodies: HashMap<String, std::result::Result<String, u16>>,
    }

    impl MapFetcher {
        fn new(entries: &[(&str, std::result::Result<&str, u16>)]) -> Self {
            let bodies = entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect();
            Self { bodies }
        }
    }

    impl Fetch for MapFetcher {
        fn fetch(&self, target: &str) -> impl Future<Output = Result<String>> + Send {
            let result = match self.bodies.get(target) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(code)) => Err(BanditError::Status(*code)),
                None => Err(BanditError::ConfigError(format!("no body for {target}"))),
            };
            ready(result)
        }
    }

    /// Delays the first target so it completes last.
    struct SlowFirstFetcher;

    impl Fetch for SlowFirstFetcher {
        fn fetch(&self, target: &str) -> impl Future<Output = Result<String>> + Send {
            let delay = if target.ends_with("/0") { 50 } else { 1 };
            let body = format!("token {target}");
            async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Ok(body)
            }
        }
    }

    fn targets(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_status_error_becomes_outcome() {
        let fetcher = MapFetcher::new(&[("https://a", Err(500))]);
        let scanner = Scanner::with_fetcher(fetcher, PatternSet::defaults(false));

        let outcome = scanner.scan_target("https://a").await;
        assert_eq!(
            outcome,
            ScanOutcome::Error {
                message: "status 500".to_string()
            }
        );
        assert!(outcome.findings().is_none());
    }

    #[tokio::test]
    async fn test_clean_body_is_empty_findings_not_error() {
        let fetcher = MapFetcher::new(&[("https://clean", Ok("<html>hello</html>"))]);
        let scanner = Scanner::with_fetcher(fetcher, PatternSet::defaults(true));

        let outcome = scanner.scan_target("https://clean").await;
        assert!(!outcome.is_error());
        assert!(outcome.findings().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_isolated() {
        let body = "var password = 'hunter22';";
        let fetcher = MapFetcher::new(&[
            ("https://ok-1", Ok(body)),
            ("https://down", Err(404)),
            ("https://ok-2", Ok(body)),
        ]);
        let scanner = Scanner::with_fetcher(fetcher, PatternSet::defaults(false));

        let store = scanner
            .scan_all(&targets(&["https://ok-1", "https://down", "https://ok-2"]))
            .await;

        assert_eq!(store.len(), 3);
        let first = store.outcome_for("https://ok-1").unwrap();
        let last = store.outcome_for("https://ok-2").unwrap();
        assert_eq!(first, last);
        assert!(first.findings().unwrap().get(BASE_PATTERNS[0]).is_some());
        assert!(store.outcome_for("https://down").unwrap().is_error());
    }

    #[tokio::test]
    async fn test_empty_target_list() {
        let scanner = Scanner::with_fetcher(MapFetcher::new(&[]), PatternSet::defaults(false));
        let store = scanner.scan_all(&[]).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_parallel_scan_keeps_input_order() {
        let scanner = Scanner::with_fetcher(
            SlowFirstFetcher,
            PatternSet::new(["token"], Vec::<String>::new(), false),
        )
        .parallel(4);

        let input = targets(&["https://t/0", "https://t/1", "https://t/2", "https://t/3"]);
        let store = scanner.scan_all(&input).await;

        let order: Vec<_> = store.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(order, input.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(store.iter().all(|e| !e.outcome.is_error()));
    }

    #[tokio::test]
    async fn test_include_all_applies_to_every_target() {
        let body = "token token token";
        let fetcher = MapFetcher::new(&[("https://a", Ok(body))]);
        let scanner = Scanner::with_fetcher(
            fetcher,
            PatternSet::new(["token"], Vec::<String>::new(), false),
        )
        .include_all(true);

        let store = scanner.scan_all(&targets(&["https://a"])).await;
        let findings = store.get(0).unwrap().outcome.findings().unwrap();
        assert_eq!(findings.get("token").unwrap().len(), 3);
    }
}
