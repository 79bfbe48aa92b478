//! pi coding agent data source
//!
//! Parses JSONL logs from ~/.pi/agent/sessions/ directory.

mod parser;

pub(crate) use parser::parse_pi_file;
