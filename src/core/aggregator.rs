//! Project derivation from the session set

use std::collections::HashMap;

use crate::core::types::{Project, Session};

/// Group sessions by working directory, counting sessions per directory.
/// Sessions without a working directory do not form a project.
pub(crate) fn aggregate_projects(sessions: &[Session]) -> Vec<Project> {
    let mut project_map: HashMap<&str, usize> = HashMap::new();

    for session in sessions {
        if session.cwd.is_empty() {
            continue;
        }
        *project_map.entry(session.cwd.as_str()).or_default() += 1;
    }

    let mut projects: Vec<Project> = project_map
        .into_iter()
        .map(|(path, session_count)| Project {
            name: format_project_name(path),
            path: path.to_string(),
            session_count,
        })
        .collect();
    projects.sort_by(|a, b| {
        b.session_count
            .cmp(&a.session_count)
            .then_with(|| a.path.cmp(&b.path))
    });
    projects
}

/// Extract readable project name from a working directory path
pub(crate) fn format_project_name(path: &str) -> String {
    if path.contains('/') || path.contains('\\') {
        let trimmed = path.trim_end_matches(['/', '\\']);
        return std::path::Path::new(trimmed)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(path)
            .to_string();
    }

    path.to_string()
}
