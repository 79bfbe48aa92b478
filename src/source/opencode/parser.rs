//! OpenCode storage parser
//!
//! OpenCode keeps one JSON document per session under
//! `storage/session/<projectID>/<sessionID>.json` and one per message under
//! `storage/message/<sessionID>/<messageID>.json`. Every document stands on
//! its own and is year-filtered independently.

use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{Message, Role, Session, Usage};
use crate::source::SourceKind;
use crate::source::jsonl::non_empty;
use crate::utils::{Timezone, parse_timestamp_ms};

pub(crate) const SESSION_SUBDIR: &str = "session";
pub(crate) const MESSAGE_SUBDIR: &str = "message";
const DOCUMENT_EXTENSION: &str = "json";

// ============================================================================
// Internal types for document parsing
// ============================================================================

#[derive(Debug, Deserialize)]
struct SessionDocument {
    id: String,
    directory: Option<String>,
    time: TimeData,
}

#[derive(Debug, Deserialize)]
struct TimeData {
    created: Value,
}

#[derive(Debug, Deserialize)]
struct MessageDocument {
    #[serde(rename = "sessionID")]
    session_id: Option<String>,
    role: String,
    #[serde(rename = "providerID")]
    provider_id: Option<String>,
    #[serde(rename = "modelID")]
    model_id: Option<String>,
    model: Option<ModelData>,
    time: TimeData,
    tokens: Option<TokensData>,
    cost: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ModelData {
    #[serde(rename = "providerID")]
    provider_id: Option<String>,
    #[serde(rename = "modelID")]
    model_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokensData {
    input: Option<i64>,
    output: Option<i64>,
    reasoning: Option<i64>,
    cache: Option<CacheData>,
}

#[derive(Debug, Deserialize)]
struct CacheData {
    read: Option<i64>,
    write: Option<i64>,
}

impl TokensData {
    fn into_usage(self, cost: Option<f64>) -> Usage {
        let (cache_read, cache_write) = match self.cache {
            Some(cache) => (cache.read, cache.write),
            None => (None, None),
        };
        Usage {
            input_tokens: self.input.unwrap_or(0),
            output_tokens: self.output.unwrap_or(0) + self.reasoning.unwrap_or(0),
            cache_read_tokens: cache_read,
            cache_write_tokens: cache_write,
            cost,
        }
    }
}

// ============================================================================
// Discovery
// ============================================================================

/// List `<root>/<group>/<doc>.json` documents, walking both levels in parallel
pub(crate) fn list_documents(root: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(root = %root.display(), %err, "document root unreadable");
            return Vec::new();
        }
    };

    // Collect top-level entries first for better parallel distribution
    let groups: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();

    let mut documents: Vec<PathBuf> = groups
        .par_iter()
        .flat_map(|group| match fs::read_dir(group) {
            Ok(sub_entries) => sub_entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().is_some_and(|e| e == DOCUMENT_EXTENSION)
                })
                .collect::<Vec<_>>(),
            Err(err) => {
                debug!(dir = %group.display(), %err, "skipping unreadable directory");
                Vec::new()
            }
        })
        .collect();
    documents.sort();
    documents
}

fn read_document(path: &Path) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            debug!(file = %path.display(), %err, "failed to read document");
            None
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

pub(crate) fn parse_session_file(
    path: &Path,
    year: Option<i32>,
    timezone: Timezone,
) -> Option<Session> {
    let bytes = read_document(path)?;
    let session = parse_session_document(&bytes, year, timezone);
    if session.is_none() {
        debug!(file = %path.display(), "session document skipped");
    }
    session
}

pub(crate) fn parse_message_file(
    path: &Path,
    year: Option<i32>,
    timezone: Timezone,
) -> Option<Message> {
    let bytes = read_document(path)?;
    parse_message_document(&bytes, year, timezone)
}

pub(crate) fn parse_session_document(
    bytes: &[u8],
    year: Option<i32>,
    timezone: Timezone,
) -> Option<Session> {
    let doc: SessionDocument = serde_json::from_slice(bytes).ok()?;
    let id = non_empty(Some(doc.id))?;
    let ts = parse_timestamp_ms(&doc.time.created)?;
    if !timezone.in_year(year, ts) {
        return None;
    }
    Some(Session {
        id,
        timestamp_ms: ts,
        cwd: doc.directory.unwrap_or_default(),
        provider_id: String::new(),
        model_id: String::new(),
        source: SourceKind::OpenCode,
    })
}

pub(crate) fn parse_message_document(
    bytes: &[u8],
    year: Option<i32>,
    timezone: Timezone,
) -> Option<Message> {
    let doc: MessageDocument = serde_json::from_slice(bytes).ok()?;
    let role = match doc.role.as_str() {
        "user" => Role::User,
        "assistant" => Role::Assistant,
        "tool" => Role::Tool,
        _ => return None,
    };
    let ts = parse_timestamp_ms(&doc.time.created)?;
    if !timezone.in_year(year, ts) {
        return None;
    }

    let (nested_provider, nested_model) = match doc.model {
        Some(model) => (model.provider_id, model.model_id),
        None => (None, None),
    };
    let usage = match (doc.tokens, doc.cost) {
        (Some(tokens), cost) => Some(tokens.into_usage(cost)),
        (None, Some(cost)) => Some(Usage {
            cost: Some(cost),
            ..Usage::default()
        }),
        (None, None) => None,
    };

    Some(Message {
        session_id: doc.session_id.unwrap_or_default(),
        role,
        timestamp_ms: ts,
        provider_id: non_empty(doc.provider_id).or_else(|| non_empty(nested_provider)),
        model_id: non_empty(doc.model_id).or_else(|| non_empty(nested_model)),
        usage,
    })
}
