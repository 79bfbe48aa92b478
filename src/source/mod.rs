//! Data source layer
//!
//! Each supported AI coding assistant has its own on-disk log layout. The
//! `SourceKind` tag selects the parser; the collector dispatches on it and
//! folds the per-file results into one session/message/project set.

pub(crate) mod claude;
pub(crate) mod codex;
pub(crate) mod jsonl;
pub(crate) mod loader;
pub(crate) mod locator;
pub(crate) mod opencode;
pub(crate) mod pi;
pub(crate) mod registry;

use serde::Serialize;

use crate::core::{Message, Session};

/// Supported data sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SourceKind {
    /// pi coding agent: session header line followed by message lines
    Pi,
    /// Claude Code: role-tagged transcript, session id on every line
    Claude,
    /// OpenAI Codex CLI: event log with out-of-band token counts
    Codex,
    /// OpenCode: one JSON document per session and per message
    #[serde(rename = "opencode")]
    OpenCode,
}

impl SourceKind {
    pub(crate) const ALL: [SourceKind; 4] = [
        SourceKind::Pi,
        SourceKind::Claude,
        SourceKind::Codex,
        SourceKind::OpenCode,
    ];

    /// Unique name for this source (used on the command line)
    pub(crate) fn name(self) -> &'static str {
        match self {
            SourceKind::Pi => "pi",
            SourceKind::Claude => "claude",
            SourceKind::Codex => "codex",
            SourceKind::OpenCode => "opencode",
        }
    }

    /// Display name for output
    pub(crate) fn display_name(self) -> &'static str {
        match self {
            SourceKind::Pi => "pi",
            SourceKind::Claude => "Claude Code",
            SourceKind::Codex => "Codex",
            SourceKind::OpenCode => "OpenCode",
        }
    }

    /// Short aliases for CLI (e.g., "cc" for "claude")
    pub(crate) fn aliases(self) -> &'static [&'static str] {
        match self {
            SourceKind::Pi => &[],
            SourceKind::Claude => &["cc"],
            SourceKind::Codex => &["cx"],
            SourceKind::OpenCode => &["oc"],
        }
    }

    /// Sessions can be split across several files and need de-duplication
    pub(crate) fn needs_dedup(self) -> bool {
        matches!(self, SourceKind::Claude | SourceKind::OpenCode)
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What one parsed file contributed. An unreadable or abandoned file is
/// simply the empty value.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ParsedFile {
    pub(crate) sessions: Vec<Session>,
    pub(crate) messages: Vec<Message>,
}

impl ParsedFile {
    pub(crate) fn is_empty(&self) -> bool {
        self.sessions.is_empty() && self.messages.is_empty()
    }
}

pub(crate) use loader::collect;
pub(crate) use locator::SourceRoots;
pub(crate) use registry::get_source;
