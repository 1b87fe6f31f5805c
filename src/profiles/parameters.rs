//! User-defined key/value parameters and their `var.cfg` encoding.
//!
//! The file is line oriented: `#` or `!` comment lines, then one `key=value`
//! pair per line. Keys and values are escaped so that separators, line breaks
//! and leading blanks survive a round trip.

use chrono::Utc;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use crate::error::{ProfileError, Result};

/// Ordered string parameters attached to a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: BTreeMap<String, String>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Parses the `var.cfg` format.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut params = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => {
                    ProfileError::parse(format!("line {}: invalid UTF-8", index + 1))
                }
                _ => ProfileError::Io(e),
            })?;
            let trimmed = line.trim_start_matches(is_blank);
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            let (key, value) = parse_line(trimmed)
                .map_err(|reason| ProfileError::parse(format!("line {}: {reason}", index + 1)))?;
            params.entries.insert(key, value);
        }
        Ok(params)
    }

    /// Writes a header comment, a timestamp comment and every pair in key order.
    pub fn write_to<W: Write>(&self, mut writer: W, header: &str) -> Result<()> {
        if !header.is_empty() {
            writeln!(writer, "# {}", header.replace(['\n', '\r'], " "))?;
        }
        writeln!(writer, "# {}", Utc::now().to_rfc3339())?;
        for (key, value) in &self.entries {
            writeln!(writer, "{}={}", escape(key, true), escape(value, false))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn parse_line(line: &str) -> std::result::Result<(String, String), String> {
    let mut chars = line.chars().peekable();
    let mut key = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => key.push(unescape_char(chars.next())?),
            '=' | ':' => break,
            c if is_blank(c) => {
                while chars.peek().is_some_and(|c| is_blank(*c)) {
                    chars.next();
                }
                if matches!(chars.peek(), Some('=') | Some(':')) {
                    chars.next();
                }
                break;
            }
            c => key.push(c),
        }
    }
    while chars.peek().is_some_and(|c| is_blank(*c)) {
        chars.next();
    }
    let mut value = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => value.push(unescape_char(chars.next())?),
            c => value.push(c),
        }
    }
    Ok((key, value))
}

/// Separator blanks: space, tab and form feed. Nothing else ends a key or is
/// skipped before a value.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn unescape_char(next: Option<char>) -> std::result::Result<char, String> {
    match next {
        Some('n') => Ok('\n'),
        Some('r') => Ok('\r'),
        Some('t') => Ok('\t'),
        Some('f') => Ok('\x0c'),
        Some(c) => Ok(c),
        None => Err("dangling escape at end of line".to_string()),
    }
}

fn escape(raw: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, c) in raw.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            c => out.push(c),
        }
    }
    out
}
