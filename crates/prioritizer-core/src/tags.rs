//! Inline tag parsing.
//!
//! Task strings may carry `{key:value}` tags anywhere in the text. One of
//! them, `{pH:MM}`, is the planned duration; the rest are custom tags that
//! are carried through to the output untouched and in order.
//!
//! ```text
//! "{p1:00}{P:Code} write"  ->  description "write", planned 60, tags [P:Code]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SymbolTable;
use crate::error::EngineError;

/// A custom `{key:value}` tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}:{}}}", self.key, self.value)
    }
}

/// Result of parsing a raw task string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedTask {
    /// Task text with tags removed and whitespace collapsed
    pub description: String,
    /// Minutes from the first `{pH:MM}` tag
    pub planned_minutes: Option<u32>,
    /// Custom tags in order of appearance
    pub tags: Vec<Tag>,
}

/// Parse tags out of a raw task string.
pub fn parse_tags(raw: &str) -> Result<ParsedTask, EngineError> {
    let mut parsed = ParsedTask::default();
    let mut text = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            // Unterminated: keep as text
            text.push_str(&rest[open..]);
            rest = "";
            break;
        };

        let body = &after_open[..close];
        if let Some(nested) = body.find('{') {
            // `{a{b:c}`: the outer brace is plain text
            text.push_str(&rest[open..open + 1 + nested]);
            rest = &after_open[nested..];
            continue;
        }

        if is_time_tag(body) && parsed.planned_minutes.is_none() {
            parsed.planned_minutes = Some(parse_time_body(body)?);
            text.push(' ');
        } else if let Some(tag) = split_tag(body) {
            parsed.tags.push(tag);
            text.push(' ');
        } else {
            text.push_str(&rest[open..open + close + 2]);
        }
        rest = &after_open[close + 1..];
    }
    text.push_str(rest);

    parsed.description = text.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(parsed)
}

/// Parse tags after stripping annotation symbols from the start of `raw`.
///
/// Lets an annotated line such as `"⭐️🚨{p0:30} fix"` be scored again.
pub fn parse_tags_with_symbols(raw: &str, symbols: &SymbolTable) -> Result<ParsedTask, EngineError> {
    parse_tags(strip_leading_symbols(raw, symbols))
}

/// Separator older annotated lines put between symbols and tags.
const SYMBOL_SEPARATOR: &str = "--";

/// Remove the annotation prefix from the start of `raw`.
///
/// The prefix is one unbroken run of symbols, possibly with a `--` after a
/// symbol. Stripping stops at the first whitespace, so a description that
/// itself starts with `--` or a symbol survives a second pass.
pub fn strip_leading_symbols<'a>(raw: &'a str, symbols: &SymbolTable) -> &'a str {
    let tokens = symbols.leading_tokens();
    let start = raw.trim_start();
    let mut cleaned = start;
    loop {
        if let Some(rest) = tokens.iter().find_map(|t| cleaned.strip_prefix(t)) {
            cleaned = rest;
        } else if cleaned.len() < start.len() && cleaned.starts_with(SYMBOL_SEPARATOR) {
            cleaned = &cleaned[SYMBOL_SEPARATOR.len()..];
        } else {
            break;
        }
    }
    cleaned.trim_start()
}

/// Render minutes as a planned-time tag, e.g. `90` -> `{p1:30}`.
pub fn format_planned_time(minutes: u32) -> String {
    format!("{{p{}:{:02}}}", minutes / 60, minutes % 60)
}

/// `p` followed by a digit, or a bare `p` key with the hours left out.
fn is_time_tag(body: &str) -> bool {
    let mut chars = body.chars();
    chars.next() == Some('p') && chars.next().is_some_and(|c| c.is_ascii_digit() || c == ':')
}

fn parse_time_body(body: &str) -> Result<u32, EngineError> {
    let clock = &body[1..];
    let (hours, minutes) = clock
        .split_once(':')
        .ok_or_else(|| malformed(body, "missing ':' between hours and minutes"))?;

    if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(body, "hours must be digits"));
    }
    if minutes.len() != 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(body, "minutes must be exactly two digits"));
    }

    let hours: u32 = hours
        .parse()
        .map_err(|_| malformed(body, "hours out of range"))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| malformed(body, "minutes must be exactly two digits"))?;

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| malformed(body, "hours out of range"))
}

fn split_tag(body: &str) -> Option<Tag> {
    let (key, value) = body.split_once(':')?;
    if key.is_empty() {
        return None;
    }
    Some(Tag::new(key, value))
}

fn malformed(body: &str, reason: &str) -> EngineError {
    EngineError::MalformedTimeTag {
        tag: format!("{{{body}}}"),
        reason: reason.to_string(),
    }
}
