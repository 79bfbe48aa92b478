use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::source::{SourceKind, SourceRoots};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) source: Option<String>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    /// Per-source root overrides, keyed by source name
    #[serde(default)]
    pub(crate) roots: HashMap<String, PathBuf>,
}

impl Config {
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if !path.exists() {
                continue;
            }
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read config");
                    continue;
                }
            };
            match Self::parse(&content) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded config");
                    return config;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse config, ignoring");
                }
            }
        }

        Self::default()
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Config>(content)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/codewrapped/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("codewrapped").join("config.toml"));
        }

        // 2. macOS Application Support: ~/Library/Application Support/codewrapped/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("codewrapped").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.codewrapped.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".codewrapped.toml"));
        }

        paths
    }

    /// Build the root table for every source.
    ///
    /// `[roots]` entries win over environment variables, which win over the
    /// built-in defaults. Unknown keys are warned about and skipped.
    pub(crate) fn source_roots(&self) -> SourceRoots {
        let mut roots = SourceRoots::new();
        for kind in SourceKind::ALL {
            if let Some(path) = default_root(kind) {
                roots.set_root(kind, path);
            }
        }
        for (name, path) in &self.roots {
            match crate::source::get_source(name) {
                Some(kind) => roots.set_root(kind, expand_home(path)),
                None => warn!(source = %name, "ignoring root for unknown source"),
            }
        }
        roots
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Default log root of a source, honoring its environment override
pub(crate) fn default_root(kind: SourceKind) -> Option<PathBuf> {
    let home = dirs::home_dir();
    match kind {
        SourceKind::Pi => env_path("PI_CODING_AGENT_DIR")
            .or_else(|| home.map(|h| h.join(".pi").join("agent")))
            .map(|dir| dir.join("sessions")),
        SourceKind::Claude => env_path("CLAUDE_CONFIG_DIR")
            .or_else(|| home.map(|h| h.join(".claude")))
            .map(|dir| dir.join("projects")),
        SourceKind::Codex => env_path("CODEX_HOME")
            .or_else(|| home.map(|h| h.join(".codex")))
            .map(|dir| dir.join("sessions")),
        SourceKind::OpenCode => env_path("XDG_DATA_HOME")
            .or_else(|| home.map(|h| h.join(".local").join("share")))
            .map(|dir| dir.join("opencode").join("storage")),
    }
}

fn expand_home(path: &std::path::Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
