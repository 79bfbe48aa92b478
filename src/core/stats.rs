//! Yearly summary computation
//!
//! Everything here is a pure function of its inputs: the clock, calendar and
//! name lookups are passed in through `StatsContext`.

use chrono::{DateTime, Datelike, Utc};
use indexmap::IndexMap;

use crate::catalog::ModelCatalog;
use crate::consts::{TOP_N, WEEKDAY_NAMES};
use crate::core::streak::{current_streak, max_streak};
use crate::core::types::{
    Collected, Message, ModelStats, MostActiveDay, ProviderStats, Role, WeekdayActivity,
    WrappedStats,
};
use crate::source::SourceKind;
use crate::utils::{Timezone, date_key};

pub(crate) struct StatsContext<'a> {
    pub(crate) year: i32,
    pub(crate) source: SourceKind,
    pub(crate) timezone: Timezone,
    pub(crate) now: DateTime<Utc>,
    pub(crate) catalog: &'a dyn ModelCatalog,
}

#[derive(Debug, Default)]
struct Totals {
    input: i64,
    output: i64,
    cache_read: i64,
    cache_write: i64,
    tokens: i64,
    cost: f64,
}

/// Occurrence counter for one model id
#[derive(Debug)]
struct ModelCount {
    count: u64,
    /// Provider seen on the first message that used the model
    provider_id: String,
}

/// Messages per local calendar day, keyed `YYYY-MM-DD` in encounter order
fn daily_counts(messages: &[Message], timezone: Timezone) -> IndexMap<String, u64> {
    let mut daily: IndexMap<String, u64> = IndexMap::new();
    for message in messages {
        if let Some(date) = timezone.local_date(message.timestamp_ms) {
            *daily.entry(date_key(date)).or_default() += 1;
        }
    }
    daily
}

/// Build the summary.
///
/// `lifetime` is the unfiltered collection. It feeds the first-session fields
/// and the current streak, which may run back across the start of the year.
/// Everything else comes from the year-filtered `year` collection.
pub(crate) fn compute_wrapped(
    ctx: &StatsContext<'_>,
    lifetime: &Collected,
    year: &Collected,
) -> WrappedStats {
    let today = ctx.timezone.today(ctx.now);
    let first_date = lifetime
        .sessions
        .iter()
        .map(|s| s.timestamp_ms)
        .min()
        .and_then(|ts| ctx.timezone.local_date(ts))
        .unwrap_or(today);
    let days_since_first_session = (today - first_date).num_days().max(0);

    let mut totals = Totals::default();
    let mut models: IndexMap<&str, ModelCount> = IndexMap::new();
    let mut providers: IndexMap<&str, u64> = IndexMap::new();
    let mut weekday_counts = [0u64; 7];

    for message in &year.messages {
        if let Some(usage) = &message.usage {
            totals.input += usage.input_tokens;
            totals.output += usage.output_tokens;
            totals.cache_read += usage.cache_read_tokens.unwrap_or(0);
            totals.cache_write += usage.cache_write_tokens.unwrap_or(0);
            totals.tokens += usage.total_tokens();
            totals.cost += usage.cost.unwrap_or(0.0);
        }

        if message.role == Role::Assistant {
            let provider = message.provider_id.as_deref().filter(|p| !p.is_empty());
            if let Some(model) = message.model_id.as_deref().filter(|m| !m.is_empty()) {
                models
                    .entry(model)
                    .or_insert_with(|| ModelCount {
                        count: 0,
                        provider_id: provider.unwrap_or_default().to_string(),
                    })
                    .count += 1;
            }
            if let Some(provider) = provider {
                *providers.entry(provider).or_default() += 1;
            }
        }

        if let Some(date) = ctx.timezone.local_date(message.timestamp_ms) {
            weekday_counts[date.weekday().num_days_from_sunday() as usize] += 1;
        }
    }

    let daily_activity = daily_counts(&year.messages, ctx.timezone);
    let (max_streak, max_streak_days) = max_streak(&daily_activity, ctx.year);
    let year_prefix = format!("{}-", ctx.year);
    let active_days = daily_activity
        .keys()
        .filter(|key| key.starts_with(&year_prefix))
        .count();
    let current_streak = current_streak(&daily_counts(&lifetime.messages, ctx.timezone), today);

    WrappedStats {
        year: ctx.year,
        source: ctx.source,
        first_session_date: date_key(first_date),
        days_since_first_session,
        total_sessions: year.sessions.len(),
        total_messages: year.messages.len(),
        total_projects: year.projects.len(),
        total_input_tokens: totals.input,
        total_output_tokens: totals.output,
        total_cache_read_tokens: totals.cache_read,
        total_cache_write_tokens: totals.cache_write,
        total_tokens: totals.tokens,
        total_cost: totals.cost,
        top_models: top_models(&models, ctx.catalog),
        top_providers: top_providers(&providers, ctx.catalog),
        active_days,
        max_streak,
        current_streak,
        max_streak_days,
        most_active_day: most_active_day(&daily_activity),
        weekday_activity: weekday_activity(weekday_counts),
        daily_activity,
    }
}

fn top_models(models: &IndexMap<&str, ModelCount>, catalog: &dyn ModelCatalog) -> Vec<ModelStats> {
    let mut ranked: Vec<(&str, &ModelCount)> = models.iter().map(|(id, c)| (*id, c)).collect();
    // Stable sort: equal counts keep first-seen order
    ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count));
    ranked
        .into_iter()
        .take(TOP_N)
        .map(|(id, counted)| {
            let info = catalog.model(id);
            ModelStats {
                id: id.to_string(),
                name: info.name,
                provider_id: info
                    .provider_id
                    .unwrap_or_else(|| counted.provider_id.clone()),
                count: counted.count,
                percentage: 0.0,
            }
        })
        .collect()
}

fn top_providers(providers: &IndexMap<&str, u64>, catalog: &dyn ModelCatalog) -> Vec<ProviderStats> {
    let mut ranked: Vec<(&str, u64)> = providers.iter().map(|(id, c)| (*id, *c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(TOP_N)
        .map(|(id, count)| ProviderStats {
            id: id.to_string(),
            name: catalog.provider_name(id),
            count,
            percentage: 0.0,
        })
        .collect()
}

/// Day with the strictly highest count; ties keep the first key in map order
fn most_active_day(daily: &IndexMap<String, u64>) -> Option<MostActiveDay> {
    let mut best: Option<(&String, u64)> = None;
    for (date, count) in daily {
        if best.is_none_or(|(_, top)| *count > top) {
            best = Some((date, *count));
        }
    }
    best.map(|(date, count)| MostActiveDay {
        date: date.clone(),
        count,
    })
}

fn weekday_activity(counts: [u64; 7]) -> WeekdayActivity {
    let mut most_active_day = 0;
    for (idx, count) in counts.iter().enumerate() {
        if *count > counts[most_active_day] {
            most_active_day = idx;
        }
    }
    WeekdayActivity {
        counts,
        most_active_day,
        most_active_day_name: WEEKDAY_NAMES[most_active_day].to_string(),
        most_active_count: counts[most_active_day],
    }
}
