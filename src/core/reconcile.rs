//! Key reconciliation.
//!
//! Merges operator input with the data a secret already holds. Two modes:
//! adding new pairs on top of the baseline, or re-entering values for keys
//! picked with a selection expression such as `1,3`, `2-4` or `all`.

use std::collections::BTreeSet;
use std::num::IntErrorKind;

use tracing::debug;

use crate::core::manifest::SecretData;
use crate::core::prompt::{is_sensitive, Prompter};
use crate::error::{InputError, Result};

/// How an update changes the existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Enter new pairs; they win over existing keys.
    Add,
    /// Re-enter values for selected existing keys.
    UpdateSelected,
}

impl Mode {
    /// Menu entries, numbered from 1.
    pub const MENU: [&'static str; 2] = ["Add new keys", "Update existing keys"];

    /// Parse a menu answer (`1` or `2`).
    pub fn from_choice(choice: &str) -> std::result::Result<Self, InputError> {
        match choice.trim() {
            "1" => Ok(Mode::Add),
            "2" => Ok(Mode::UpdateSelected),
            other => Err(InputError::InvalidChoice(other.to_string())),
        }
    }
}

/// Prompt label for a value, marking hidden input.
fn value_label(prefix: &str, key: &str) -> String {
    if is_sensitive(key) {
        format!("{} '{}' (hidden)", prefix, key)
    } else {
        format!("{} '{}'", prefix, key)
    }
}

/// Collect key/value pairs until an empty key is entered.
///
/// Values of sensitive keys are read masked. A repeated key keeps its first
/// position and takes the latest value.
pub fn collect_pairs(prompter: &dyn Prompter) -> Result<SecretData> {
    let mut data = SecretData::new();
    loop {
        let key = prompter.prompt("Key", false)?;
        let key = key.trim();
        if key.is_empty() {
            break;
        }
        let value = prompter.prompt(&value_label("Value for", key), is_sensitive(key))?;
        data.insert(key.to_string(), value);
    }
    debug!(keys = data.len(), "collected secret data");
    Ok(data)
}

/// Resolve a selection expression against `count` keys.
///
/// Tokens are comma separated; each is a 1-based index or an inclusive range
/// `a-b`. `all` (any case) selects everything. Indices outside the key list
/// are dropped; duplicates collapse. The result is sorted and 0-based.
///
/// # Errors
///
/// `InvalidSelection` for any malformed token (including inverted ranges),
/// `NoValidKeys` when nothing in range remains.
pub fn parse_selection(expr: &str, count: usize) -> std::result::Result<Vec<usize>, InputError> {
    let expr = expr.trim();
    if expr.eq_ignore_ascii_case("all") {
        if count == 0 {
            return Err(InputError::NoValidKeys);
        }
        return Ok((0..count).collect());
    }

    let invalid = || InputError::InvalidSelection(expr.to_string());
    // Numbers too large for usize are out of range, not malformed.
    let number = |s: &str| match s.trim().parse::<usize>() {
        Ok(n) => Ok(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(usize::MAX),
        Err(_) => Err(invalid()),
    };

    let mut selected = BTreeSet::new();
    for token in expr.split(',') {
        let token = token.trim();
        let (start, end) = match token.split_once('-') {
            Some((a, b)) => (number(a)?, number(b)?),
            None => {
                let n = number(token)?;
                (n, n)
            }
        };
        if start > end {
            return Err(invalid());
        }
        // 1-based to 0-based, clamped to the key list.
        let first = start.max(1) - 1;
        let last = end.min(count);
        selected.extend(first..last);
    }

    if selected.is_empty() {
        return Err(InputError::NoValidKeys);
    }
    Ok(selected.into_iter().collect())
}

/// Add mode: baseline overlaid with newly entered pairs.
pub fn add(baseline: &SecretData, prompter: &dyn Prompter) -> Result<SecretData> {
    let entered = collect_pairs(prompter)?;
    let mut merged = baseline.clone();
    merged.extend(entered);
    Ok(merged)
}

/// Update-selected mode: ask for a selection over `keys`, then a new value
/// for each selected key. Keys not selected keep their baseline values.
pub fn update_selected(
    keys: &[String],
    baseline: &SecretData,
    prompter: &dyn Prompter,
) -> Result<SecretData> {
    let expr = prompter.prompt("Selection", false)?;
    let selected = parse_selection(&expr, keys.len())?;
    debug!(selected = selected.len(), "keys selected for update");

    let mut merged = baseline.clone();
    for index in selected {
        let key = &keys[index];
        let value = prompter.prompt(&value_label("New value for", key), is_sensitive(key))?;
        merged.insert(key.clone(), value);
    }
    Ok(merged)
}

/// Run one reconciliation in the given mode.
pub fn reconcile(
    mode: Mode,
    keys: &[String],
    baseline: &SecretData,
    prompter: &dyn Prompter,
) -> Result<SecretData> {
    match mode {
        Mode::Add => add(baseline, prompter),
        Mode::UpdateSelected => update_selected(keys, baseline, prompter),
    }
}
