//! OpenCode data source
//!
//! Parses JSON documents from ~/.local/share/opencode/storage/ directory.

mod parser;

pub(crate) use parser::{
    MESSAGE_SUBDIR, SESSION_SUBDIR, list_documents, parse_message_file, parse_session_file,
};
