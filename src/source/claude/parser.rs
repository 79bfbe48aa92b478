//! Claude Code JSONL parser
//!
//! Parses JSONL transcripts from ~/.claude/projects/ directory. Every line
//! carries its own session id, so one file can feed several sessions and one
//! session can be spread over several files.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

use crate::core::{Message, Role, Session, Usage};
use crate::source::jsonl::{decode_lines, non_empty, read_log};
use crate::source::{ParsedFile, SourceKind};
use crate::utils::{Timezone, parse_timestamp_ms};

const PROVIDER: &str = "anthropic";
const SYNTHETIC_MODEL: &str = "<synthetic>";

// ============================================================================
// Internal types for JSONL parsing
// ============================================================================

#[derive(Debug, Deserialize)]
struct TranscriptLine {
    #[serde(rename = "type")]
    entry_type: Option<String>,
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
    timestamp: Option<Value>,
    cwd: Option<String>,
    #[serde(rename = "costUSD")]
    cost_usd: Option<f64>,
    message: Option<TranscriptMessage>,
}

#[derive(Debug, Deserialize)]
struct TranscriptMessage {
    model: Option<String>,
    content: Option<Value>,
    usage: Option<TranscriptUsage>,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct TranscriptUsage {
    input_tokens: Option<i64>,
    output_tokens: Option<i64>,
    cache_creation_input_tokens: Option<i64>,
    cache_read_input_tokens: Option<i64>,
}

impl TranscriptUsage {
    fn into_usage(self, cost: Option<f64>) -> Usage {
        Usage {
            input_tokens: self.input_tokens.unwrap_or(0),
            output_tokens: self.output_tokens.unwrap_or(0),
            cache_read_tokens: self.cache_read_input_tokens,
            cache_write_tokens: self.cache_creation_input_tokens,
            cost,
        }
    }
}

/// A user line made only of tool_result blocks is a tool turn
fn is_tool_result(content: Option<&Value>) -> bool {
    let Some(Value::Array(blocks)) = content else {
        return false;
    };
    !blocks.is_empty()
        && blocks
            .iter()
            .all(|b| b.get("type").and_then(Value::as_str) == Some("tool_result"))
}

fn clean_model(model: Option<String>) -> Option<String> {
    non_empty(model).filter(|m| m != SYNTHETIC_MODEL)
}

// ============================================================================
// Parsing
// ============================================================================

pub(crate) fn parse_claude_file(
    path: &Path,
    year: Option<i32>,
    timezone: Timezone,
) -> ParsedFile {
    match read_log(path) {
        Some(content) => parse_claude_content(&content, path, year, timezone),
        None => ParsedFile::default(),
    }
}

pub(crate) fn parse_claude_content(
    content: &str,
    path: &Path,
    year: Option<i32>,
    timezone: Timezone,
) -> ParsedFile {
    let mut registered: HashSet<String> = HashSet::new();
    let mut parsed = ParsedFile::default();

    for line in decode_lines::<TranscriptLine>(content, path) {
        let role = match line.entry_type.as_deref() {
            Some("assistant") => Role::Assistant,
            Some("user") => Role::User,
            _ => continue,
        };
        let Some(session_id) = non_empty(line.session_id) else {
            continue;
        };
        let Some(ts) = line.timestamp.as_ref().and_then(parse_timestamp_ms) else {
            continue;
        };
        if !timezone.in_year(year, ts) {
            continue;
        }

        let (model, content, usage) = match line.message {
            Some(msg) => (clean_model(msg.model), msg.content, msg.usage),
            None => (None, None, None),
        };
        let role = if role == Role::User && is_tool_result(content.as_ref()) {
            Role::Tool
        } else {
            role
        };

        if !registered.contains(&session_id) {
            registered.insert(session_id.clone());
            parsed.sessions.push(Session {
                id: session_id.clone(),
                timestamp_ms: ts,
                cwd: line.cwd.unwrap_or_default(),
                provider_id: PROVIDER.to_string(),
                model_id: model.clone().unwrap_or_default(),
                source: SourceKind::Claude,
            });
        }

        let usage = match (usage, line.cost_usd) {
            (Some(u), cost) => Some(u.into_usage(cost)),
            (None, Some(cost)) => Some(TranscriptUsage::default().into_usage(Some(cost))),
            (None, None) => None,
        };

        parsed.messages.push(Message {
            session_id,
            role,
            timestamp_ms: ts,
            provider_id: Some(PROVIDER.to_string()),
            model_id: model,
            usage,
        });
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str, year: Option<i32>) -> ParsedFile {
        parse_claude_content(
            content,
            Path::new("claude.jsonl"),
            year,
            Timezone::Named(chrono_tz::UTC),
        )
    }

    const FILE: &str = r#"{"type":"summary","summary":"Refactor"}
{"type":"user","sessionId":"a","timestamp":"2025-02-01T09:00:00Z","cwd":"/p/one","message":{"role":"user","content":"hi"}}
{"type":"assistant","sessionId":"a","timestamp":"2025-02-01T09:00:03Z","cwd":"/p/one","message":{"role":"assistant","model":"claude-opus-4-1-20250805","usage":{"input_tokens":12,"output_tokens":30,"cache_read_input_tokens":400,"cache_creation_input_tokens":50}}}
{"type":"user","sessionId":"a","timestamp":"2025-02-01T09:00:04Z","message":{"role":"user","content":[{"type":"tool_result","content":"ok"}]}}
{"type":"user","sessionId":"b","timestamp":"2025-02-02T09:00:00Z","cwd":"/p/two","message":{"role":"user","content":"again"}}
"#;

    #[test]
    fn registers_each_session_once() {
        let parsed = parse(FILE, None);
        let ids: Vec<&str> = parsed.sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(parsed.sessions[0].cwd, "/p/one");
        assert_eq!(parsed.sessions[0].provider_id, "anthropic");
        assert_eq!(parsed.sessions[1].cwd, "/p/two");
        assert_eq!(parsed.messages.len(), 4);
    }

    #[test]
    fn renames_cache_counters() {
        let parsed = parse(FILE, None);
        let assistant = &parsed.messages[1];
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.model_id.as_deref(), Some("claude-opus-4-1-20250805"));
        let usage = assistant.usage.as_ref().unwrap();
        assert_eq!(usage.input_tokens, 12);
        assert_eq!(usage.output_tokens, 30);
        assert_eq!(usage.cache_read_tokens, Some(400));
        assert_eq!(usage.cache_write_tokens, Some(50));
        assert_eq!(usage.cost, None);
    }

    #[test]
    fn tool_result_lines_are_tool_role() {
        let parsed = parse(FILE, None);
        assert_eq!(parsed.messages[2].role, Role::Tool);
        assert_eq!(parsed.messages[0].role, Role::User);
    }

    #[test]
    fn year_filter_is_per_line() {
        let content = r#"{"type":"user","sessionId":"a","timestamp":"2024-12-31T23:00:00Z","message":{"content":"x"}}
{"type":"assistant","sessionId":"a","timestamp":"2025-01-01T00:10:00Z","message":{"model":"claude-sonnet-4-5"}}
"#;
        let parsed = parse(content, Some(2025));
        assert_eq!(parsed.sessions.len(), 1);
        assert_eq!(parsed.sessions[0].timestamp_ms, 1_735_690_200_000);
        assert_eq!(parsed.sessions[0].model_id, "claude-sonnet-4-5");
        assert_eq!(parsed.messages.len(), 1);
    }

    #[test]
    fn synthetic_model_is_dropped() {
        let content = r#"{"type":"assistant","sessionId":"a","timestamp":"2025-01-01T00:10:00Z","message":{"model":"<synthetic>","usage":{"input_tokens":0,"output_tokens":0}}}
"#;
        let parsed = parse(content, None);
        assert_eq!(parsed.messages[0].model_id, None);
        assert_eq!(parsed.sessions[0].model_id, "");
    }

    #[test]
    fn cost_usd_lands_in_usage() {
        let content = r#"{"type":"assistant","sessionId":"a","timestamp":"2025-01-01T00:10:00Z","costUSD":0.5,"message":{"usage":{"input_tokens":3,"output_tokens":4}}}
{"type":"assistant","sessionId":"a","timestamp":"2025-01-01T00:11:00Z","costUSD":0.25}
"#;
        let parsed = parse(content, None);
        assert_eq!(parsed.messages[0].usage.as_ref().unwrap().cost, Some(0.5));
        let second = parsed.messages[1].usage.as_ref().unwrap();
        assert_eq!(second.input_tokens, 0);
        assert_eq!(second.cost, Some(0.25));
    }

    #[test]
    fn lines_without_session_or_timestamp_are_skipped() {
        let content = r#"{"type":"user","timestamp":"2025-01-01T00:10:00Z"}
{"type":"user","sessionId":"a"}
{"type":"user","sessionId":"","timestamp":"2025-01-01T00:10:00Z"}
not json at all
"#;
        assert!(parse(content, None).is_empty());
    }
}
