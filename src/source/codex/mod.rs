//! OpenAI Codex CLI data source
//!
//! Parses JSONL logs from ~/.codex/sessions/ directory.

mod parser;

pub(crate) use parser::parse_codex_file;
