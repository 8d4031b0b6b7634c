//! Automation Toolkit: a registry of single-call automation tools.
//!
//! Each tool either runs in-process through an inline handler (one
//! external call per action) or is launched as its own program in a new
//! terminal window.

pub mod cli;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod dispatch;
pub mod error;
pub mod launcher;
pub mod monitor;
pub mod registry;
pub mod setup;
pub mod tools;
pub mod types;
