//! User confirmation prompts for overriding existing entries

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{theme::ColorfulTheme, Input};
use log::debug;

use crate::kubeconfig::{EntryKind, OverridePrompt};

/// Prompts on the terminal, reading a free-text answer.
///
/// Only "y" or "yes" (any case) confirm; anything else, including a failed
/// read, declines.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl OverridePrompt for StdinPrompt {
    fn confirm_override(&mut self, kind: EntryKind, name: &str) -> bool {
        let question = override_question(kind, name);

        if io::stdin().is_terminal() {
            let answer = Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("{} [y/N]", question))
                .allow_empty(true)
                .interact_text();
            return match answer {
                Ok(answer) => is_affirmative(&answer),
                Err(e) => {
                    debug!("Prompt failed: {}", e);
                    false
                }
            };
        }

        eprint!("{} [y/N]: ", question);
        let _ = io::stderr().flush();
        read_answer(&mut io::stdin().lock())
    }
}

/// Confirms every override (`--yes`)
#[derive(Debug, Default)]
pub struct AssumeYes;

impl OverridePrompt for AssumeYes {
    fn confirm_override(&mut self, kind: EntryKind, name: &str) -> bool {
        debug!("Auto-confirming override of {} '{}'", kind, name);
        true
    }
}

fn override_question(kind: EntryKind, name: &str) -> String {
    format!("A {} named '{}' already exists. Override?", kind, name)
}

/// Read one line and check it for a confirmation
pub fn read_answer<R: BufRead>(reader: &mut R) -> bool {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(_) => is_affirmative(&input),
        Err(_) => false,
    }
}

/// Case-insensitive "y" / "yes"
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    matches!(answer.as_str(), "y" | "yes")
}
