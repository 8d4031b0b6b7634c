//! Terminal prompts that turn a handler's declared fields into parameters.

use crate::types::{FieldKind, InputField};
use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Password, Select};
use serde_json::{Map, Value};
use std::io::{self, BufRead, Write};

/// One question at a time; implemented over dialoguer for the terminal.
pub trait Prompter {
    fn text(&mut self, label: &str, default: Option<&str>, required: bool) -> Result<String>;
    fn secret(&mut self, label: &str) -> Result<String>;
    /// Lines until the first empty one, joined with `\n`.
    fn multiline(&mut self, label: &str) -> Result<String>;
    fn number(&mut self, label: &str, min: i64, max: i64, default: i64) -> Result<i64>;
    fn confirm(&mut self, label: &str, default: bool) -> Result<bool>;
    /// Index of the picked option.
    fn select(&mut self, label: &str, options: &[&str], default: usize) -> Result<usize>;
}

/// Ask for every visible field in declaration order.
///
/// Visibility is evaluated against the answers collected so far, so a
/// field may depend on any field declared before it.
pub fn collect_params(fields: &[InputField], prompter: &mut dyn Prompter) -> Result<Value> {
    let mut answers = Value::Object(Map::new());

    for field in fields {
        if !field.is_visible(&answers) {
            continue;
        }
        let value = ask(field, prompter)?;
        if let Value::Object(map) = &mut answers {
            map.insert(field.key.to_string(), value);
        }
    }

    Ok(answers)
}

fn ask(field: &InputField, prompter: &mut dyn Prompter) -> Result<Value> {
    let label = field.label;
    let value = match &field.kind {
        FieldKind::Text { default } => prompter.text(label, *default, field.required)?.into(),
        FieldKind::Secret => prompter.secret(label)?.into(),
        FieldKind::Multiline => prompter.multiline(label)?.into(),
        FieldKind::Number { min, max, default } => {
            let label = format!("{} ({}-{})", label, min, max);
            prompter.number(&label, *min, *max, *default)?.into()
        }
        FieldKind::Color { default } => prompter.text(label, Some(*default), true)?.into(),
        FieldKind::Checkbox { default } => prompter.confirm(label, *default)?.into(),
        FieldKind::Choice { options } => {
            let idx = prompter.select(label, options, 0)?;
            options.get(idx).copied().unwrap_or_default().into()
        }
    };
    Ok(value)
}

/// Prompts on the real terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn text(&mut self, label: &str, default: Option<&str>, required: bool) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(label)
            .allow_empty(!required);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn secret(&mut self, label: &str) -> Result<String> {
        Ok(Password::new().with_prompt(label).interact()?)
    }

    fn multiline(&mut self, label: &str) -> Result<String> {
        println!("{} (finish with an empty line):", label);
        io::stdout().flush()?;
        let stdin = io::stdin();
        read_multiline(&mut stdin.lock())
    }

    fn number(&mut self, label: &str, min: i64, max: i64, default: i64) -> Result<i64> {
        let value = Input::<i64>::new()
            .with_prompt(label)
            .default(default)
            .validate_with(move |n: &i64| -> std::result::Result<(), String> {
                if (min..=max).contains(n) {
                    Ok(())
                } else {
                    Err(format!("Enter a number between {} and {}", min, max))
                }
            })
            .interact_text()?;
        Ok(value)
    }

    fn confirm(&mut self, label: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(label)
            .default(default)
            .interact()?)
    }

    fn select(&mut self, label: &str, options: &[&str], default: usize) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(label)
            .items(options)
            .default(default)
            .interact()?)
    }
}

/// Read lines until an empty line or end of input.
pub fn read_multiline(reader: &mut impl BufRead) -> Result<String> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .context("Failed to read input")?;
        let line = line.trim_end_matches(['\n', '\r']);
        if read == 0 || line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines.join("\n"))
}
