//! Automation Toolkit command line.
//!
//! Usage:
//!   toolkit list              Catalog grouped by category
//!   toolkit show <name>       Usage card for one tool
//!   toolkit run <name>        Prompt for inputs and run the tool once
//!   toolkit launch <name>     Start the tool's program in a new terminal
//!   toolkit status            RAM and CPU usage
//!   toolkit init              Write a default config
//!   toolkit dashboard         Interactive menu

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use automation_toolkit::cli::{self, TerminalPrompter};
use automation_toolkit::config::{self, ToolkitConfig};
use automation_toolkit::dashboard::Dashboard;
use automation_toolkit::dispatch::{Dispatcher, ExecutionLog};
use automation_toolkit::launcher::Launcher;
use automation_toolkit::monitor::SystemSnapshot;
use automation_toolkit::registry::Registry;
use automation_toolkit::setup;
use automation_toolkit::tools::{builtin_handlers, ram};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "toolkit")]
#[command(version)]
#[command(about = "Automation toolkit: messaging, web and system tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Toolkit home directory (holds toolkit.toml). Defaults to ~/.toolkit.
    #[arg(long, global = true)]
    home: Option<String>,

    /// Log level (debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every tool grouped by category.
    List,

    /// Show a tool's description and dependencies.
    Show {
        /// Tool name, e.g. "Read RAM".
        name: String,
    },

    /// Prompt for a tool's inputs and perform its call once.
    Run {
        name: String,
    },

    /// Launch a tool's program in a new terminal window.
    Launch {
        name: String,
    },

    /// Show RAM and CPU usage.
    Status,

    /// Write toolkit.toml and create the programs directory.
    Init,

    /// Interactive dashboard.
    Dashboard,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let home_dir = match &cli.home {
        Some(home) => PathBuf::from(shellexpand::tilde(home).into_owned()),
        None => config::default_home_dir(),
    };
    let cfg = config::load_config(&config::config_path(&home_dir))?;

    // Initialize logging (stderr keeps prompts clean)
    let level = cli.log_level.clone().unwrap_or_else(|| cfg.log_level.clone());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init => cmd_init(&home_dir),
        Commands::Status => cmd_status().await,
        Commands::List => cmd_list(cfg),
        Commands::Show { name } => cmd_show(cfg, &name),
        Commands::Run { name } => cmd_run(cfg, &name).await,
        Commands::Launch { name } => cmd_launch(cfg, &name),
        Commands::Dashboard => cmd_dashboard(cfg).await,
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_init(home_dir: &Path) -> Result<()> {
    setup::run_setup_wizard(home_dir)?;
    Ok(())
}

async fn cmd_status() -> Result<()> {
    let snapshot = SystemSnapshot::sample().await;

    println!();
    println!("{}", "=== System Status ===".bold());
    println!();
    println!("  {}", colorize_usage(snapshot.summary(), snapshot.memory.percent_used()));
    println!();
    for line in ram::report(&snapshot.memory).details {
        println!("  {}", line);
    }
    println!();
    Ok(())
}

fn cmd_list(cfg: ToolkitConfig) -> Result<()> {
    let dispatcher = bootstrap(cfg)?;
    println!();
    for line in cli::catalog(dispatcher.registry(), dispatcher.launcher()) {
        println!("{}", line);
    }
    println!();
    println!(
        "{}",
        cli::file_status(dispatcher.registry(), dispatcher.launcher()).dimmed()
    );
    Ok(())
}

fn cmd_show(cfg: ToolkitConfig, name: &str) -> Result<()> {
    let dispatcher = bootstrap(cfg)?;
    let tool = dispatcher.resolve(name)?;
    let handler = dispatcher.handlers().get(&tool.entrypoint);
    for line in cli::usage_card(tool, handler.as_deref()) {
        println!("{}", line);
    }
    Ok(())
}

/// Standalone surface for one tool. Call failures are printed, never fatal.
async fn cmd_run(cfg: ToolkitConfig, name: &str) -> Result<()> {
    let mut dispatcher = bootstrap(cfg)?;
    let tool = dispatcher.resolve(name)?.clone();
    let Some(handler) = dispatcher.handlers().get(&tool.entrypoint) else {
        println!(
            "{} '{}' has no inline handler; try `toolkit launch`.",
            "❌".red(),
            tool.name
        );
        return Ok(());
    };

    println!("{}", cli::banner(handler.title()));
    for note in handler.notes() {
        println!("{}", note.dimmed());
    }

    let mut prompter = TerminalPrompter;
    let params = cli::collect_params(&handler.fields(), &mut prompter)?;
    let result = dispatcher.invoke_inline(&tool, params).await;
    println!("{}", cli::render_result(&result));
    Ok(())
}

fn cmd_launch(cfg: ToolkitConfig, name: &str) -> Result<()> {
    let mut dispatcher = bootstrap(cfg)?;
    let tool = dispatcher.resolve(name)?.clone();
    match dispatcher.launch_external(&tool) {
        Ok(handle) => println!(
            "{} Launched {} (pid {}) from {}",
            ">>>".green().bold(),
            tool.name,
            handle.pid,
            handle.program.display()
        ),
        Err(e) => println!("{} {}", "❌".red(), e.to_string().red()),
    }
    Ok(())
}

async fn cmd_dashboard(cfg: ToolkitConfig) -> Result<()> {
    let mut dispatcher = bootstrap(cfg)?;
    let mut prompter = TerminalPrompter;
    Dashboard::new(&mut dispatcher, &mut prompter).run().await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the registry, handlers and launcher from config.
fn bootstrap(cfg: ToolkitConfig) -> Result<Dispatcher> {
    let registry = Registry::with_builtins(&cfg.tools).context("Invalid tool catalog")?;
    let handlers = builtin_handlers(&cfg);
    let launcher = Launcher::system(&cfg);
    Ok(Dispatcher::new(registry, handlers, launcher, ExecutionLog::new()))
}

fn colorize_usage(text: String, percent: f64) -> String {
    match percent {
        p if p >= 90.0 => text.red().bold().to_string(),
        p if p >= 75.0 => text.yellow().to_string(),
        _ => text.green().to_string(),
    }
}
