//! Core data types shared across all data sources
//!
//! These types represent the unified event model that every source parser
//! converts its native log format into, plus the yearly summary built on top.

use indexmap::IndexMap;
use serde::Serialize;

use crate::source::SourceKind;

/// One continuous work session from one source
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Session {
    pub(crate) id: String,
    /// Start time in epoch milliseconds
    pub(crate) timestamp_ms: i64,
    pub(crate) cwd: String,
    pub(crate) provider_id: String,
    pub(crate) model_id: String,
    pub(crate) source: SourceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Role {
    User,
    Assistant,
    Tool,
}

/// Token and cost accounting attached to a message
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Usage {
    pub(crate) input_tokens: i64,
    pub(crate) output_tokens: i64,
    pub(crate) cache_read_tokens: Option<i64>,
    pub(crate) cache_write_tokens: Option<i64>,
    /// Total cost in USD when the tool records it
    pub(crate) cost: Option<f64>,
}

impl Usage {
    pub(crate) fn total_tokens(&self) -> i64 {
        self.input_tokens
            + self.output_tokens
            + self.cache_read_tokens.unwrap_or(0)
            + self.cache_write_tokens.unwrap_or(0)
    }
}

/// One user/assistant/tool turn
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Message {
    /// Owning session; empty when the session record was not seen first
    pub(crate) session_id: String,
    pub(crate) role: Role,
    pub(crate) timestamp_ms: i64,
    pub(crate) provider_id: Option<String>,
    pub(crate) model_id: Option<String>,
    pub(crate) usage: Option<Usage>,
}

/// A distinct working directory with the number of sessions rooted there
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Project {
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) session_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ModelStats {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) provider_id: String,
    pub(crate) count: u64,
    pub(crate) percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ProviderStats {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) count: u64,
    pub(crate) percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct MostActiveDay {
    pub(crate) date: String,
    pub(crate) count: u64,
}

/// Activity per day of week, index 0 = Sunday
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct WeekdayActivity {
    pub(crate) counts: [u64; 7],
    pub(crate) most_active_day: usize,
    pub(crate) most_active_day_name: String,
    pub(crate) most_active_count: u64,
}

/// The yearly summary handed to presenters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct WrappedStats {
    pub(crate) year: i32,
    pub(crate) source: SourceKind,
    pub(crate) first_session_date: String,
    pub(crate) days_since_first_session: i64,
    pub(crate) total_sessions: usize,
    pub(crate) total_messages: usize,
    pub(crate) total_projects: usize,
    pub(crate) total_input_tokens: i64,
    pub(crate) total_output_tokens: i64,
    pub(crate) total_cache_read_tokens: i64,
    pub(crate) total_cache_write_tokens: i64,
    pub(crate) total_tokens: i64,
    pub(crate) total_cost: f64,
    pub(crate) top_models: Vec<ModelStats>,
    pub(crate) top_providers: Vec<ProviderStats>,
    pub(crate) active_days: usize,
    pub(crate) max_streak: usize,
    pub(crate) current_streak: usize,
    pub(crate) max_streak_days: Vec<String>,
    pub(crate) daily_activity: IndexMap<String, u64>,
    pub(crate) most_active_day: Option<MostActiveDay>,
    pub(crate) weekday_activity: WeekdayActivity,
}

impl WrappedStats {
    pub(crate) fn has_activity(&self) -> bool {
        self.total_messages > 0 || self.total_sessions > 0
    }
}

/// Sessions, messages and projects collected from one source
#[derive(Debug, Default, Clone)]
pub(crate) struct Collected {
    pub(crate) sessions: Vec<Session>,
    pub(crate) messages: Vec<Message>,
    pub(crate) projects: Vec<Project>,
}
