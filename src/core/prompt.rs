//! Terminal I/O.
//!
//! Interactive prompts go through the [`Prompter`] trait so workflows can be
//! driven by a script in tests. On a terminal, [`Terminal`] uses dialoguer;
//! with piped stdin it reads one line per answer.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Confirm, Input, Password};

use crate::core::constants;
use crate::error::Result;

/// Asks the operator for input.
pub trait Prompter {
    /// Read one answer. `masked` hides what is typed.
    fn prompt(&self, label: &str, masked: bool) -> Result<String>;

    /// Ask a yes/no question, defaulting to no.
    fn confirm(&self, label: &str) -> Result<bool>;
}

/// Does this key name look like it holds a credential?
///
/// Matches any of the sensitive words, case-insensitively.
pub fn is_sensitive(key: &str) -> bool {
    let key = key.to_lowercase();
    constants::SENSITIVE_WORDS
        .iter()
        .any(|word| key.contains(word))
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct Terminal;

impl Terminal {
    fn interactive() -> bool {
        io::stdin().is_terminal()
    }

    /// Read a line from piped stdin, echoing the label so transcripts stay
    /// readable. End of input reads as an empty answer.
    fn read_line(label: &str) -> Result<String> {
        print!("{}: ", label);
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        println!();
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Prompter for Terminal {
    fn prompt(&self, label: &str, masked: bool) -> Result<String> {
        if !Self::interactive() {
            return Self::read_line(label);
        }

        let answer = if masked {
            Password::new()
                .with_prompt(label)
                .allow_empty_password(true)
                .interact()?
        } else {
            Input::<String>::new()
                .with_prompt(label)
                .allow_empty(true)
                .interact_text()?
        };
        Ok(answer)
    }

    fn confirm(&self, label: &str) -> Result<bool> {
        if !Self::interactive() {
            let answer = Self::read_line(&format!("{} [y/N]", label))?;
            return Ok(answer.trim().to_lowercase().starts_with('y'));
        }

        Ok(Confirm::new()
            .with_prompt(label)
            .default(false)
            .interact()?)
    }
}
