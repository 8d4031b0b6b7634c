//! First-run setup: writes toolkit.toml and creates the programs directory.
//!
//! Steps:
//! 1. Display banner
//! 2. Collect where tool programs live and how to start them
//! 3. Collect where generated files go
//! 4. Write config and create directories

use crate::config::{self, ToolkitConfig, CONFIG_FILE};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;

const BANNER: &str = r#"
     _       _                        _   _
    / \  _  | |_ ___  _ __ ___   __ _| |_(_) ___  _ __
   / _ \| | | __/ _ \| '_ ` _ \ / _` | __| |/ _ \| '_ \
  / ___ \ |_| || (_) | | | | | | (_| | |_| | (_) | | | |
 /_/   \_\__,\__\___/|_| |_| |_|\__,_|\__|_|\___/|_| |_|

                  Automation Toolkit
"#;

/// Run the interactive setup against stdin.
pub fn run_setup_wizard(home_dir: &Path) -> Result<ToolkitConfig> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    run_setup(home_dir, &mut reader)
}

/// Setup driven by any line reader; existing values become the defaults.
pub fn run_setup(home_dir: &Path, reader: &mut impl BufRead) -> Result<ToolkitConfig> {
    println!("{}", BANNER);
    println!("Welcome to Automation Toolkit setup.\n");

    let config_path = config::config_path(home_dir);
    let current = config::load_config(&config_path)?;

    // Step 1: Programs
    println!("[1/3] Tool programs");
    let programs_dir = prompt_with_default(reader, "  Programs directory", &current.programs_dir)?;
    let interpreter = prompt_with_default(
        reader,
        "  Interpreter (blank to run programs directly)",
        &current.interpreter,
    )?;
    let program_extension = prompt_with_default(
        reader,
        "  Program file extension (e.g. .py, blank for none)",
        &current.program_extension,
    )?;

    // Step 2: Output
    println!("\n[2/3] Output");
    let output_dir = prompt_with_default(
        reader,
        "  Directory for images and downloads",
        &current.output_dir,
    )?;

    // Step 3: Write files
    println!("\n[3/3] Writing configuration...");
    let config = ToolkitConfig {
        programs_dir,
        interpreter,
        program_extension,
        output_dir,
        ..current
    };

    std::fs::create_dir_all(home_dir)
        .with_context(|| format!("Failed to create {}", home_dir.display()))?;
    config::save_config(&config, &config_path)?;
    println!("  Written: {}", CONFIG_FILE);

    let programs = config.resolved_programs_dir();
    std::fs::create_dir_all(&programs)
        .with_context(|| format!("Failed to create programs directory {}", programs))?;
    println!("  Created: {}", programs);

    println!("\nSetup complete! Run `toolkit dashboard` to start.\n");
    Ok(config)
}

/// Prompt with a default value; blank input keeps the default.
fn prompt_with_default(reader: &mut impl BufRead, label: &str, default: &str) -> Result<String> {
    if default.is_empty() {
        print!("{}: ", label);
    } else {
        print!("{} [{}]: ", label, default);
    }
    io::stdout().flush()?;
    let mut input = String::new();
    reader.read_line(&mut input)?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
