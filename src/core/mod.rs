//! Core module - shared types and logic for all data sources

mod aggregator;
mod dedup;
mod stats;
mod streak;
mod types;

pub(crate) use aggregator::aggregate_projects;
pub(crate) use dedup::SessionDedup;
pub(crate) use stats::{StatsContext, compute_wrapped};
pub(crate) use types::{
    Collected, Message, ModelStats, MostActiveDay, Project, ProviderStats, Role, Session, Usage,
    WeekdayActivity, WrappedStats,
};
