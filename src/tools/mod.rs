pub mod array_vec;
pub mod email;
pub mod image;
pub mod ram;
pub mod search;
pub mod traits;
pub mod twilio;
pub mod twitter;
pub mod website;
pub mod whatsapp;

pub use traits::ToolHandler;

use crate::clients::{HttpSettings, ReqwestFetcher};
use crate::config::ToolkitConfig;
use crate::launcher::UrlOpener;
use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Inline handlers keyed by entrypoint.
#[derive(Default, Clone)]
pub struct HandlerSet {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its entrypoint, replacing any previous one.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) {
        self.handlers
            .insert(handler.entrypoint().to_string(), handler);
    }

    pub fn get(&self, entrypoint: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.get(entrypoint).cloned()
    }

    pub fn contains(&self, entrypoint: &str) -> bool {
        self.handlers.contains_key(entrypoint)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Handlers for every built-in tool, wired to real collaborators.
pub fn builtin_handlers(config: &ToolkitConfig) -> HandlerSet {
    let http = HttpSettings::from_config(config);
    let fetcher = Arc::new(ReqwestFetcher::new(http.clone()));
    let opener = UrlOpener::system();

    let mut set = HandlerSet::new();
    set.register(Arc::new(ram::RamMonitor));
    set.register(Arc::new(whatsapp::WhatsAppSender::new(opener.clone())));
    set.register(Arc::new(email::EmailSender::new(config)));
    set.register(Arc::new(whatsapp::WhatsAppWebOpener::new(opener)));
    set.register(Arc::new(twilio::SmsSender::new(config, http.clone())));
    set.register(Arc::new(twilio::PhoneCaller::new(config, http.clone())));
    set.register(Arc::new(email::AnonymousEmail::new(config, http.clone())));
    set.register(Arc::new(search::GoogleSearch::new(config, fetcher.clone())));
    set.register(Arc::new(twitter::TwitterPoster::new(config, http)));
    set.register(Arc::new(website::WebsiteDownloader::new(config, fetcher)));
    set.register(Arc::new(array_vec::ArrayVsVec));
    set.register(Arc::new(image::ImageCreator::new(config)));
    set
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

pub(crate) fn str_arg<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args[key]
        .as_str()
        .ok_or_else(|| anyhow!("Missing '{}' argument", key))
}

/// A string argument that is present and not blank.
pub(crate) fn opt_str_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args[key].as_str().filter(|s| !s.trim().is_empty())
}

pub(crate) fn int_arg(args: &Value, key: &str) -> Result<i64> {
    match &args[key] {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| anyhow!("'{}' must be a whole number", key)),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| anyhow!("'{}' must be a whole number", key)),
        _ => Err(anyhow!("Missing '{}' argument", key)),
    }
}

pub(crate) fn bool_arg(args: &Value, key: &str) -> bool {
    match &args[key] {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "y" | "yes"),
        _ => false,
    }
}
