//! OpenAI Codex CLI JSONL parser
//!
//! Parses JSONL logs from ~/.codex/sessions/ directory. A `session_meta`
//! record declares the session, `response_item` records are the turns, and
//! `token_count` events arrive after the turn they describe.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use tracing::debug;

use crate::core::{Message, Role, Session, Usage};
use crate::source::jsonl::{decode_lines, non_empty, read_log};
use crate::source::{ParsedFile, SourceKind};
use crate::utils::{Timezone, parse_timestamp_ms};

const DEFAULT_PROVIDER: &str = "openai";

// ============================================================================
// Internal types for JSONL parsing
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawJsonEntry {
    timestamp: Option<Value>,
    #[serde(rename = "type")]
    entry_type: Option<String>,
    payload: Option<Payload>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(rename = "type")]
    payload_type: Option<String>,
    id: Option<String>,
    timestamp: Option<Value>,
    cwd: Option<String>,
    model_provider: Option<String>,
    model: Option<String>,
    role: Option<String>,
    info: Option<TokenInfo>,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    total_token_usage: Option<TokenUsage>,
    last_token_usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub(super) struct TokenUsage {
    input_tokens: Option<i64>,
    cached_input_tokens: Option<i64>,
    cache_read_input_tokens: Option<i64>,
    output_tokens: Option<i64>,
    reasoning_output_tokens: Option<i64>,
    total_tokens: Option<i64>,
}

impl TokenUsage {
    fn cached_input(&self) -> i64 {
        self.cached_input_tokens
            .or(self.cache_read_input_tokens)
            .unwrap_or(0)
    }

    pub(super) fn subtract(&self, prev: &TokenUsage) -> TokenUsage {
        TokenUsage {
            input_tokens: Some(
                (self.input_tokens.unwrap_or(0) - prev.input_tokens.unwrap_or(0)).max(0),
            ),
            cached_input_tokens: Some((self.cached_input() - prev.cached_input()).max(0)),
            cache_read_input_tokens: None,
            output_tokens: Some(
                (self.output_tokens.unwrap_or(0) - prev.output_tokens.unwrap_or(0)).max(0),
            ),
            reasoning_output_tokens: Some(
                (self.reasoning_output_tokens.unwrap_or(0)
                    - prev.reasoning_output_tokens.unwrap_or(0))
                .max(0),
            ),
            total_tokens: Some(
                (self.total_tokens.unwrap_or(0) - prev.total_tokens.unwrap_or(0)).max(0),
            ),
        }
    }

    /// Codex's input_tokens INCLUDES cached_input_tokens
    fn to_usage(&self) -> Usage {
        let cached = self.cached_input();
        Usage {
            input_tokens: (self.input_tokens.unwrap_or(0) - cached).max(0),
            output_tokens: self.output_tokens.unwrap_or(0),
            cache_read_tokens: Some(cached),
            cache_write_tokens: None,
            cost: None,
        }
    }
}

struct SessionMeta {
    id: String,
    timestamp_ms: i64,
    cwd: String,
    provider: String,
    model: Option<String>,
}

/// Attach usage to the most recent assistant message that has none yet.
/// Returns false when no message qualifies.
pub(super) fn attach_usage(messages: &mut [Message], usage: Usage) -> bool {
    match messages
        .iter_mut()
        .rev()
        .find(|m| m.role == Role::Assistant && m.usage.is_none())
    {
        Some(message) => {
            message.usage = Some(usage);
            true
        }
        None => false,
    }
}

// ============================================================================
// Parsing
// ============================================================================

pub(crate) fn parse_codex_file(path: &Path, year: Option<i32>, timezone: Timezone) -> ParsedFile {
    match read_log(path) {
        Some(content) => parse_codex_content(&content, path, year, timezone),
        None => ParsedFile::default(),
    }
}

pub(crate) fn parse_codex_content(
    content: &str,
    path: &Path,
    year: Option<i32>,
    timezone: Timezone,
) -> ParsedFile {
    let mut meta: Option<SessionMeta> = None;
    let mut current_model: Option<String> = None;
    let mut first_model: Option<String> = None;
    let mut previous_totals: Option<TokenUsage> = None;
    let mut messages: Vec<Message> = Vec::new();

    for raw_entry in decode_lines::<RawJsonEntry>(content, path) {
        let Some(entry_type) = raw_entry.entry_type.as_deref() else {
            continue;
        };
        let Some(payload) = raw_entry.payload else {
            continue;
        };

        match entry_type {
            "session_meta" => {
                if meta.is_some() {
                    continue;
                }
                let Some(id) = non_empty(payload.id) else {
                    continue;
                };
                let Some(ts) = payload
                    .timestamp
                    .as_ref()
                    .or(raw_entry.timestamp.as_ref())
                    .and_then(parse_timestamp_ms)
                else {
                    continue;
                };
                if !timezone.in_year(year, ts) {
                    debug!(file = %path.display(), "session outside requested year, skipping file");
                    return ParsedFile::default();
                }
                meta = Some(SessionMeta {
                    id,
                    timestamp_ms: ts,
                    cwd: payload.cwd.unwrap_or_default(),
                    provider: non_empty(payload.model_provider)
                        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
                    model: non_empty(payload.model),
                });
            }
            "turn_context" => {
                if let Some(model) = non_empty(payload.model) {
                    if first_model.is_none() {
                        first_model = Some(model.clone());
                    }
                    current_model = Some(model);
                }
            }
            "response_item" => {
                let role = match (payload.payload_type.as_deref(), payload.role.as_deref()) {
                    (Some("message"), Some("user")) => Role::User,
                    (Some("message"), Some("assistant")) => Role::Assistant,
                    (Some("function_call_output"), _) => Role::Tool,
                    _ => continue,
                };
                let Some(ts) = raw_entry.timestamp.as_ref().and_then(parse_timestamp_ms) else {
                    continue;
                };
                if meta.is_none() && !timezone.in_year(year, ts) {
                    continue;
                }
                let (provider, model) = if role == Role::Assistant {
                    (
                        Some(
                            meta.as_ref()
                                .map(|m| m.provider.clone())
                                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
                        ),
                        current_model
                            .clone()
                            .or_else(|| meta.as_ref().and_then(|m| m.model.clone())),
                    )
                } else {
                    (None, None)
                };
                messages.push(Message {
                    session_id: meta.as_ref().map(|m| m.id.clone()).unwrap_or_default(),
                    role,
                    timestamp_ms: ts,
                    provider_id: provider,
                    model_id: model,
                    usage: None,
                });
            }
            "event_msg" => {
                if payload.payload_type.as_deref() != Some("token_count") {
                    continue;
                }
                let Some(info) = payload.info else {
                    continue;
                };

                // Skip if total hasn't changed (duplicate event)
                if let (Some(total), Some(prev)) = (&info.total_token_usage, &previous_totals)
                    && total.total_tokens.is_some()
                    && total.total_tokens == prev.total_tokens
                {
                    continue;
                }

                // Use last_token_usage if available, otherwise compute delta
                let delta = match (&info.last_token_usage, &info.total_token_usage) {
                    (Some(last), _) => last.clone(),
                    (None, Some(total)) => match &previous_totals {
                        Some(prev) => total.subtract(prev),
                        None => total.clone(),
                    },
                    (None, None) => continue,
                };
                if info.total_token_usage.is_some() {
                    previous_totals = info.total_token_usage;
                }

                if !attach_usage(&mut messages, delta.to_usage()) {
                    debug!(file = %path.display(), "token_count without a pending assistant turn");
                }
            }
            _ => {}
        }
    }

    let sessions = meta
        .map(|m| Session {
            id: m.id,
            timestamp_ms: m.timestamp_ms,
            cwd: m.cwd,
            provider_id: m.provider,
            model_id: m.model.or(first_model).unwrap_or_default(),
            source: SourceKind::Codex,
        })
        .into_iter()
        .collect();

    ParsedFile { sessions, messages }
}
