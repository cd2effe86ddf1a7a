//! Line-oriented text formats for the config and macro resources.
//!
//! Config resource, one `key=value` per line:
//!
//! ```text
//! default_delay_ms=50
//! ```
//!
//! Macro resource, repeated blocks:
//!
//! ```text
//! macro Greet
//! key 72
//! move 10 -5
//! click right
//! delay 200
//! end
//! ```
//!
//! Decoding never fails. Malformed step lines are dropped, lines outside a
//! block are ignored, a new `macro` line or the end of input closes an open
//! block, and an unparsable config value falls back to the default. Only
//! writing a resource can report an error.

use crate::{config::DEFAULT_DELAY_MS, Action, Config, Macro, MacroError, MouseButton, Result};
use std::{fs, io, path::Path};
use tracing::{debug, info, warn};

const DEFAULT_DELAY_KEY: &str = "default_delay_ms";

/// Parse a leading decimal integer the way stream extraction does: leading
/// whitespace and one sign are accepted, the longest run of digits is taken
/// and anything after it is left unread. Returns the value and the number of
/// bytes consumed, or `None` when there are no digits or the value overflows.
fn leading_int(input: &str) -> Option<(i64, usize)> {
    let bytes = input.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    let sign_start = pos;
    if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        pos += 1;
    }
    let digits_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos == digits_start {
        return None;
    }
    let value = input[sign_start..pos].parse::<i64>().ok()?;
    Some((value, pos))
}

/// Parse the leading integer of a free-text entry
pub fn parse_int(input: &str) -> Option<i32> {
    leading_int(input).and_then(|(value, _)| i32::try_from(value).ok())
}

/// Whitespace-separated reader over the remainder of one line
struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn word(&mut self) -> Option<&'a str> {
        let trimmed = self.rest.trim_start();
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }
        let end = trimmed
            .find(|c: char| c.is_whitespace())
            .unwrap_or(trimmed.len());
        let (word, rest) = trimmed.split_at(end);
        self.rest = rest;
        Some(word)
    }

    fn int(&mut self) -> Option<i32> {
        let (value, consumed) = leading_int(self.rest)?;
        self.rest = &self.rest[consumed..];
        i32::try_from(value).ok()
    }

    fn remainder(&self) -> &'a str {
        self.rest
    }
}

/// Decode a config resource. Unknown keys are ignored, the last
/// `default_delay_ms` line wins, and a value that is not a non-negative
/// integer resets the field to its default.
pub fn decode_config(text: &str) -> Config {
    let mut config = Config::default();
    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key != DEFAULT_DELAY_KEY {
            continue;
        }
        config.default_delay_ms = match leading_int(value).map(|(ms, _)| u32::try_from(ms)) {
            Some(Ok(ms)) => ms,
            _ => {
                warn!(value, "Invalid {}, using {}", DEFAULT_DELAY_KEY, DEFAULT_DELAY_MS);
                DEFAULT_DELAY_MS
            }
        };
    }
    config
}

pub fn encode_config(config: &Config) -> String {
    format!("{}={}\n", DEFAULT_DELAY_KEY, config.default_delay_ms)
}

/// Decode one step line, `None` when the step is unknown or malformed
fn decode_step(kind: &str, tokens: &mut Tokens<'_>) -> Option<Action> {
    match kind {
        "move" => {
            let dx = tokens.int()?;
            let dy = tokens.int()?;
            Some(Action::Move { dx, dy })
        }
        "click" => tokens.word().map(|button| Action::Click {
            button: MouseButton::from_token(button),
        }),
        "key" => tokens.int().map(|vk| Action::Key { vk }),
        "delay" => tokens.int().map(|ms| Action::Delay { ms }),
        _ => None,
    }
}

/// Decode a macro resource. Always succeeds; see the module docs for how
/// malformed input is handled.
pub fn decode_macros(text: &str) -> Vec<Macro> {
    let mut macros = Vec::new();
    let mut current: Option<Macro> = None;

    for (index, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let mut tokens = Tokens::new(line);
        let kind = tokens.word().unwrap_or_default();
        match kind {
            "macro" => {
                if let Some(open) = current.take() {
                    macros.push(open);
                }
                let rest = tokens.remainder();
                let name = rest.strip_prefix(' ').unwrap_or(rest);
                current = Some(Macro::new(name));
            }
            "end" => {
                if let Some(open) = current.take() {
                    macros.push(open);
                }
            }
            _ => match current.as_mut() {
                Some(open) => match decode_step(kind, &mut tokens) {
                    Some(action) => open.push(action),
                    None => warn!(line = index + 1, content = line, "Dropping malformed step"),
                },
                None => debug!(line = index + 1, "Ignoring line outside a macro block"),
            },
        }
    }

    if let Some(open) = current.take() {
        debug!(name = %open.name, "Closing macro block at end of input");
        macros.push(open);
    }
    macros
}

pub fn encode_macros(macros: &[Macro]) -> String {
    let mut out = String::new();
    for mac in macros {
        out.push_str("macro ");
        out.push_str(&mac.name);
        out.push('\n');
        for action in &mac.actions {
            out.push_str(&action.to_string());
            out.push('\n');
        }
        out.push_str("end\n");
    }
    out
}

/// Read a whole resource, `None` when it is absent or unreadable
fn read_resource(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No resource at {:?}", path);
            None
        }
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            None
        }
    }
}

fn write_resource(path: &Path, resource: &'static str, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| MacroError::SaveError { resource, source })?;
    info!("Saved {} to {:?}", resource, path);
    Ok(())
}

pub fn load_config(path: &Path) -> Config {
    read_resource(path)
        .map(|text| decode_config(&text))
        .unwrap_or_default()
}

pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    write_resource(path, "config file", &encode_config(config))
}

pub fn load_macros(path: &Path) -> Vec<Macro> {
    read_resource(path)
        .map(|text| decode_macros(&text))
        .unwrap_or_default()
}

pub fn save_macros(path: &Path, macros: &[Macro]) -> Result<()> {
    write_resource(path, "macros file", &encode_macros(macros))
}
