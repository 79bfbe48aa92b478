//! Unified collector for all sources

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::core::{Collected, Message, Session, SessionDedup, aggregate_projects};
use crate::source::jsonl::find_log_files;
use crate::source::opencode::{
    MESSAGE_SUBDIR, SESSION_SUBDIR, list_documents, parse_message_file, parse_session_file,
};
use crate::source::{ParsedFile, SourceKind, SourceRoots, claude, codex, pi};
use crate::utils::Timezone;

type LineParser = fn(&Path, Option<i32>, Timezone) -> ParsedFile;

fn line_parser(kind: SourceKind) -> Option<LineParser> {
    match kind {
        SourceKind::Pi => Some(pi::parse_pi_file),
        SourceKind::Claude => Some(claude::parse_claude_file),
        SourceKind::Codex => Some(codex::parse_codex_file),
        SourceKind::OpenCode => None,
    }
}

/// Collect sessions, messages and projects for one source.
///
/// A missing or unreadable root yields empty collections. Files are parsed
/// in parallel; results are merged afterwards in discovery order.
pub(crate) fn collect(
    kind: SourceKind,
    roots: &SourceRoots,
    year: Option<i32>,
    timezone: Timezone,
) -> Collected {
    let Some(root) = roots.locate(kind) else {
        info!(source = %kind, "no data directory found");
        return Collected::default();
    };

    let start = Instant::now();
    let (sessions, messages) = match line_parser(kind) {
        Some(parser) => collect_lines(kind, &root, parser, year, timezone),
        None => collect_documents(&root, year, timezone),
    };
    let projects = aggregate_projects(&sessions);

    info!(
        source = %kind,
        sessions = sessions.len(),
        messages = messages.len(),
        projects = projects.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "collected"
    );

    Collected {
        sessions,
        messages,
        projects,
    }
}

fn collect_lines(
    kind: SourceKind,
    root: &Path,
    parser: LineParser,
    year: Option<i32>,
    timezone: Timezone,
) -> (Vec<Session>, Vec<Message>) {
    let discovery_start = Instant::now();
    let files = find_log_files(root);
    debug!(
        source = %kind,
        files = files.len(),
        elapsed_ms = discovery_start.elapsed().as_secs_f64() * 1000.0,
        "discovered log files"
    );

    let parsed: Vec<ParsedFile> = files
        .par_iter()
        .map(|path| parser(path, year, timezone))
        .collect();

    let mut messages = Vec::new();
    if kind.needs_dedup() {
        let mut dedup = SessionDedup::new();
        for file in parsed {
            dedup.extend(file.sessions);
            messages.extend(file.messages);
        }
        let (sessions, duplicates) = dedup.finalize();
        if duplicates > 0 {
            debug!(source = %kind, duplicates, "dropped duplicate sessions");
        }
        (sessions, messages)
    } else {
        let mut sessions = Vec::new();
        for file in parsed.into_iter().filter(|f| !f.is_empty()) {
            sessions.extend(file.sessions);
            messages.extend(file.messages);
        }
        (sessions, messages)
    }
}

fn collect_documents(
    root: &Path,
    year: Option<i32>,
    timezone: Timezone,
) -> (Vec<Session>, Vec<Message>) {
    let session_root = root.join(SESSION_SUBDIR);
    let message_root = root.join(MESSAGE_SUBDIR);

    let (sessions, messages) = rayon::join(
        || parse_documents(&session_root, |p| parse_session_file(p, year, timezone)),
        || parse_documents(&message_root, |p| parse_message_file(p, year, timezone)),
    );

    let mut dedup = SessionDedup::new();
    dedup.extend(sessions);
    let (sessions, duplicates) = dedup.finalize();
    if duplicates > 0 {
        debug!(source = %SourceKind::OpenCode, duplicates, "dropped duplicate sessions");
    }
    (sessions, messages)
}

fn parse_documents<T, F>(root: &Path, parse: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Path) -> Option<T> + Send + Sync,
{
    let documents: Vec<PathBuf> = list_documents(root);
    debug!(root = %root.display(), documents = documents.len(), "discovered documents");
    documents
        .par_iter()
        .filter_map(|path| parse(path))
        .collect()
}
