//! pi coding agent JSONL parser
//!
//! Parses session logs from ~/.pi/agent/sessions/. Each file opens with a
//! `session` header line that declares the session for the whole file,
//! followed by `message` lines and occasional `model_change` lines.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use tracing::debug;

use crate::core::{Message, Role, Session, Usage};
use crate::source::jsonl::{decode_lines, non_empty, read_log};
use crate::source::{ParsedFile, SourceKind};
use crate::utils::{Timezone, parse_timestamp_ms};

// ============================================================================
// Internal types for JSONL parsing
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum PiLine {
    Session(SessionLine),
    ModelChange(ModelChangeLine),
    Message(MessageLine),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct SessionLine {
    id: String,
    timestamp: Option<Value>,
    cwd: Option<String>,
    provider: Option<String>,
    #[serde(rename = "modelId")]
    model_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelChangeLine {
    provider: Option<String>,
    #[serde(rename = "modelId")]
    model_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageLine {
    timestamp: Option<Value>,
    message: PiMessage,
}

#[derive(Debug, Deserialize)]
struct PiMessage {
    role: String,
    provider: Option<String>,
    model: Option<String>,
    timestamp: Option<Value>,
    usage: Option<PiUsage>,
}

#[derive(Debug, Deserialize)]
struct PiUsage {
    input: Option<i64>,
    output: Option<i64>,
    #[serde(rename = "cacheRead")]
    cache_read: Option<i64>,
    #[serde(rename = "cacheWrite")]
    cache_write: Option<i64>,
    cost: Option<PiCost>,
}

#[derive(Debug, Deserialize)]
struct PiCost {
    total: Option<f64>,
}

impl From<PiUsage> for Usage {
    fn from(usage: PiUsage) -> Self {
        Usage {
            input_tokens: usage.input.unwrap_or(0),
            output_tokens: usage.output.unwrap_or(0),
            cache_read_tokens: usage.cache_read,
            cache_write_tokens: usage.cache_write,
            cost: usage.cost.and_then(|c| c.total),
        }
    }
}

struct Header {
    id: String,
    timestamp_ms: i64,
    cwd: String,
    provider: Option<String>,
    model: Option<String>,
}

fn map_role(role: &str) -> Option<Role> {
    match role {
        "user" => Some(Role::User),
        "assistant" => Some(Role::Assistant),
        "toolResult" | "tool" => Some(Role::Tool),
        _ => None,
    }
}

// ============================================================================
// Parsing
// ============================================================================

pub(crate) fn parse_pi_file(path: &Path, year: Option<i32>, timezone: Timezone) -> ParsedFile {
    match read_log(path) {
        Some(content) => parse_pi_content(&content, path, year, timezone),
        None => ParsedFile::default(),
    }
}

/// Parse one pi session file. A header outside the requested year discards
/// the whole file.
pub(crate) fn parse_pi_content(
    content: &str,
    path: &Path,
    year: Option<i32>,
    timezone: Timezone,
) -> ParsedFile {
    let mut header: Option<Header> = None;
    let mut model_change: Option<(Option<String>, Option<String>)> = None;
    let mut first_assistant: Option<(Option<String>, Option<String>)> = None;
    let mut messages = Vec::new();

    for line in decode_lines::<PiLine>(content, path) {
        match line {
            PiLine::Session(session) => {
                if header.is_some() {
                    continue;
                }
                let Some(ts) = session.timestamp.as_ref().and_then(parse_timestamp_ms) else {
                    debug!(file = %path.display(), "session line without usable timestamp");
                    continue;
                };
                if !timezone.in_year(year, ts) {
                    debug!(file = %path.display(), "session outside requested year, skipping file");
                    return ParsedFile::default();
                }
                header = Some(Header {
                    id: session.id,
                    timestamp_ms: ts,
                    cwd: session.cwd.unwrap_or_default(),
                    provider: non_empty(session.provider),
                    model: non_empty(session.model_id),
                });
            }
            PiLine::ModelChange(change) => {
                if model_change.is_none() {
                    model_change = Some((non_empty(change.provider), non_empty(change.model_id)));
                }
            }
            PiLine::Message(line) => {
                let Some(role) = map_role(&line.message.role) else {
                    continue;
                };
                let Some(ts) = line
                    .timestamp
                    .as_ref()
                    .or(line.message.timestamp.as_ref())
                    .and_then(parse_timestamp_ms)
                else {
                    continue;
                };
                // Without a header there is no file-level filter to rely on
                if header.is_none() && !timezone.in_year(year, ts) {
                    continue;
                }
                let provider = non_empty(line.message.provider);
                let model = non_empty(line.message.model);
                if role == Role::Assistant && first_assistant.is_none() && model.is_some() {
                    first_assistant = Some((provider.clone(), model.clone()));
                }
                messages.push(Message {
                    session_id: header.as_ref().map(|h| h.id.clone()).unwrap_or_default(),
                    role,
                    timestamp_ms: ts,
                    provider_id: provider,
                    model_id: model,
                    usage: line.message.usage.map(Usage::from),
                });
            }
            PiLine::Other => {}
        }
    }

    let sessions = header
        .map(|h| {
            let (change_provider, change_model) = model_change.unwrap_or_default();
            let (first_provider, first_model) = first_assistant.unwrap_or_default();
            Session {
                id: h.id,
                timestamp_ms: h.timestamp_ms,
                cwd: h.cwd,
                provider_id: h
                    .provider
                    .or(change_provider)
                    .or(first_provider)
                    .unwrap_or_default(),
                model_id: h.model.or(change_model).or(first_model).unwrap_or_default(),
                source: SourceKind::Pi,
            }
        })
        .into_iter()
        .collect();

    ParsedFile { sessions, messages }
}
