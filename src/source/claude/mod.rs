//! Claude Code data source
//!
//! Parses JSONL logs from ~/.claude/projects/ directory.

mod parser;

pub(crate) use parser::parse_claude_file;
