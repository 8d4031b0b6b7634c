//! End-to-end dispatch over the built-in catalog with stubbed collaborators.

use anyhow::Result;
use async_trait::async_trait;
use automation_toolkit::clients::{FetchedPage, PageFetcher};
use automation_toolkit::config::ToolkitConfig;
use automation_toolkit::dispatch::{Dispatcher, ExecutionLog, LogStatus, LOG_CAPACITY};
use automation_toolkit::error::ToolkitError;
use automation_toolkit::launcher::{CommandLine, Launcher, Platform, Spawner};
use automation_toolkit::registry::Registry;
use automation_toolkit::tools::array_vec::ArrayVsVec;
use automation_toolkit::tools::website::WebsiteDownloader;
use automation_toolkit::tools::HandlerSet;
use serde_json::json;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<CommandLine>>,
}

impl Spawner for Recorder {
    fn spawn(&self, cmd: &CommandLine) -> std::io::Result<u32> {
        self.calls.lock().unwrap().push(cmd.clone());
        Ok(7)
    }
}

#[derive(Default)]
struct CannedPage {
    requested: Mutex<Vec<String>>,
}

#[async_trait]
impl PageFetcher for CannedPage {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(FetchedPage {
            url: url.to_string(),
            status: 200,
            body: "<html><title>Example Domain</title></html>".into(),
        })
    }
}

struct Harness {
    dispatcher: Dispatcher,
    spawner: Arc<Recorder>,
    fetcher: Arc<CannedPage>,
}

fn harness(dir: &Path) -> Harness {
    let config = ToolkitConfig {
        programs_dir: dir.display().to_string(),
        output_dir: dir.display().to_string(),
        ..ToolkitConfig::default()
    };
    let spawner = Arc::new(Recorder::default());
    let fetcher = Arc::new(CannedPage::default());

    let mut handlers = HandlerSet::new();
    handlers.register(Arc::new(WebsiteDownloader::new(&config, fetcher.clone())));
    handlers.register(Arc::new(ArrayVsVec));

    let dispatcher = Dispatcher::new(
        Registry::with_builtins(&config.tools).unwrap(),
        handlers,
        Launcher::new(&config, Platform::Linux, spawner.clone()),
        ExecutionLog::new(),
    );
    Harness {
        dispatcher,
        spawner,
        fetcher,
    }
}

#[test]
fn every_builtin_name_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness(dir.path());
    let registry = h.dispatcher.registry();
    for tool in registry.iter() {
        let resolved = h.dispatcher.resolve(&tool.name).unwrap();
        assert!(!resolved.entrypoint.is_empty());
    }
    assert!(matches!(
        h.dispatcher.resolve("Missing"),
        Err(ToolkitError::NotFound(_))
    ));
}

#[test]
fn read_ram_launch_without_program_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path());
    let tool = h.dispatcher.resolve("Read RAM").unwrap().clone();
    assert_eq!(tool.entrypoint, "ram_monitor");
    assert_eq!(tool.category, "System Tools");

    assert!(h.dispatcher.launch_external(&tool).is_err());
    assert!(h.spawner.calls.lock().unwrap().is_empty());

    let entry = h.dispatcher.log().latest().unwrap();
    assert_eq!(entry.status, LogStatus::Error);
    assert_eq!(
        entry.message,
        format!("File {} not found", dir.path().join("ram_monitor").display())
    );
}

#[test]
fn read_ram_launch_with_program_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ram_monitor"), "").unwrap();
    let mut h = harness(dir.path());
    let tool = h.dispatcher.resolve("Read RAM").unwrap().clone();

    let handle = h.dispatcher.launch_external(&tool).unwrap();
    assert_eq!(handle.pid, 7);
    assert_eq!(h.spawner.calls.lock().unwrap()[0].program, "gnome-terminal");
    assert_eq!(
        h.dispatcher.log().latest().unwrap().message,
        "Program launched in new terminal"
    );
}

#[tokio::test]
async fn website_download_normalizes_the_url() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path());
    let tool = h.dispatcher.resolve("Download Website Data").unwrap().clone();

    let out = h
        .dispatcher
        .invoke_inline(&tool, json!({"url": "example.com"}))
        .await
        .unwrap();

    assert_eq!(
        *h.fetcher.requested.lock().unwrap(),
        vec!["https://example.com".to_string()]
    );
    assert!(out.headline.contains("Example Domain"));
    assert_eq!(
        h.dispatcher.log().latest().unwrap().message,
        "https://example.com"
    );
}

#[tokio::test]
async fn log_stays_bounded_across_mixed_actions() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path());
    let compare = h.dispatcher.resolve("Array vs Vec Difference").unwrap().clone();
    let ram = h.dispatcher.resolve("Read RAM").unwrap().clone();

    for i in 0..60 {
        if i % 2 == 0 {
            h.dispatcher.invoke_inline(&compare, json!({})).await.unwrap();
        } else {
            let _ = h.dispatcher.launch_external(&ram);
        }
    }

    let log = h.dispatcher.log();
    assert_eq!(log.len(), LOG_CAPACITY);
    // Last action (i = 59) was the failed launch.
    assert_eq!(log.latest().unwrap().status, LogStatus::Error);
}
