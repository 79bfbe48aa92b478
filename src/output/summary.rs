use comfy_table::{Color, Table};

use crate::consts::WEEKDAY_NAMES;
use crate::core::WrappedStats;
use crate::output::format::{NumberFormat, cell, number_cell, summary_table};

#[derive(Debug, Clone, Copy)]
pub(crate) struct SummaryOptions {
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
}

fn count(n: impl TryInto<i64>, fmt: NumberFormat) -> String {
    fmt.integer(n.try_into().unwrap_or(i64::MAX))
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn overview_table(stats: &WrappedStats, opts: SummaryOptions) -> Table {
    let fmt = opts.number_format;
    let accent = opts.use_color.then_some(Color::Yellow);
    let cost_color = opts.use_color.then_some(Color::Green);

    let streak_range = match (stats.max_streak_days.first(), stats.max_streak_days.last()) {
        (Some(first), Some(last)) if first != last => format!(" ({first} to {last})"),
        (Some(first), Some(_)) => format!(" ({first})"),
        _ => String::new(),
    };
    let most_active = stats
        .most_active_day
        .as_ref()
        .map(|day| format!("{} ({} messages)", day.date, count(day.count, fmt)))
        .unwrap_or_else(|| "-".to_string());

    let rows: Vec<(&str, String, Option<Color>)> = vec![
        (
            "First session",
            format!(
                "{} ({} ago)",
                stats.first_session_date,
                plural(stats.days_since_first_session.max(0) as usize, "day")
            ),
            None,
        ),
        ("Sessions", count(stats.total_sessions, fmt), accent),
        ("Messages", count(stats.total_messages, fmt), accent),
        ("Projects", count(stats.total_projects, fmt), None),
        ("Input tokens", fmt.compact(stats.total_input_tokens), None),
        ("Output tokens", fmt.compact(stats.total_output_tokens), None),
        ("Cache read", fmt.compact(stats.total_cache_read_tokens), None),
        ("Cache write", fmt.compact(stats.total_cache_write_tokens), None),
        ("Total tokens", fmt.integer(stats.total_tokens), accent),
        ("Cost", fmt.cost(stats.total_cost), cost_color),
        ("Active days", count(stats.active_days, fmt), None),
        (
            "Longest streak",
            format!("{}{streak_range}", plural(stats.max_streak, "day")),
            accent,
        ),
        ("Current streak", plural(stats.current_streak, "day"), None),
        ("Most active day", most_active, None),
    ];

    let mut table = summary_table(&["Stat", "Value"], opts.use_color);
    for (label, value, color) in rows {
        table.add_row(vec![
            cell(label, None, false),
            number_cell(&value, color, color.is_some()),
        ]);
    }
    table
}

fn models_table(stats: &WrappedStats, opts: SummaryOptions) -> Table {
    let mut table = summary_table(&["#", "Model", "Provider", "Messages"], opts.use_color);
    for (idx, model) in stats.top_models.iter().enumerate() {
        table.add_row(vec![
            cell(&(idx + 1).to_string(), None, false),
            cell(&model.name, None, idx == 0),
            cell(&model.provider_id, None, false),
            number_cell(&count(model.count, opts.number_format), None, false),
        ]);
    }
    table
}

fn providers_table(stats: &WrappedStats, opts: SummaryOptions) -> Table {
    let mut table = summary_table(&["#", "Provider", "Messages"], opts.use_color);
    for (idx, provider) in stats.top_providers.iter().enumerate() {
        table.add_row(vec![
            cell(&(idx + 1).to_string(), None, false),
            cell(&provider.name, None, idx == 0),
            number_cell(&count(provider.count, opts.number_format), None, false),
        ]);
    }
    table
}

fn weekday_table(stats: &WrappedStats, opts: SummaryOptions) -> Table {
    let weekday = &stats.weekday_activity;
    let highlight = opts.use_color.then_some(Color::Yellow);

    let mut table = summary_table(&["Weekday", "Messages"], opts.use_color);
    for (idx, name) in WEEKDAY_NAMES.iter().enumerate() {
        let busiest = idx == weekday.most_active_day && weekday.most_active_count > 0;
        let color = if busiest { highlight } else { None };
        table.add_row(vec![
            cell(name, color, busiest),
            number_cell(
                &count(weekday.counts[idx], opts.number_format),
                color,
                busiest,
            ),
        ]);
    }
    table
}

/// Render every summary section as one block of text
pub(crate) fn render_summary(stats: &WrappedStats, opts: SummaryOptions) -> String {
    let mut out = format!(
        "\n  {} Wrapped {}\n\n{}\n",
        stats.source.display_name(),
        stats.year,
        overview_table(stats, opts)
    );
    if !stats.top_models.is_empty() {
        out.push_str(&format!("\n  Top models\n\n{}\n", models_table(stats, opts)));
    }
    if !stats.top_providers.is_empty() {
        out.push_str(&format!(
            "\n  Top providers\n\n{}\n",
            providers_table(stats, opts)
        ));
    }
    out.push_str(&format!(
        "\n  Activity by weekday\n\n{}\n",
        weekday_table(stats, opts)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuiltinCatalog;
    use crate::core::{Collected, Message, Role, StatsContext, compute_wrapped};
    use crate::source::SourceKind;
    use crate::utils::Timezone;
    use chrono::{DateTime, Utc};

    fn opts() -> SummaryOptions {
        SummaryOptions {
            use_color: false,
            number_format: NumberFormat::default(),
        }
    }

    fn assistant(ts: &str, model: &str) -> Message {
        Message {
            session_id: "s".to_string(),
            role: Role::Assistant,
            timestamp_ms: ts.parse::<DateTime<Utc>>().unwrap().timestamp_millis(),
            provider_id: Some("anthropic".to_string()),
            model_id: Some(model.to_string()),
            usage: None,
        }
    }

    fn stats(messages: &[Message]) -> WrappedStats {
        let ctx = StatsContext {
            year: 2025,
            source: SourceKind::Claude,
            timezone: Timezone::Named(chrono_tz::UTC),
            now: "2025-12-31T12:00:00Z".parse().unwrap(),
            catalog: &BuiltinCatalog,
        };
        let collected = Collected {
            messages: messages.to_vec(),
            ..Default::default()
        };
        compute_wrapped(&ctx, &collected, &collected)
    }

    #[test]
    fn summary_lists_models_and_weekdays() {
        let messages = vec![
            assistant("2025-03-03T10:00:00Z", "claude-sonnet-4-5"),
            assistant("2025-03-04T10:00:00Z", "claude-sonnet-4-5"),
        ];
        let text = render_summary(&stats(&messages), opts());
        assert!(text.contains("Claude Code Wrapped 2025"));
        assert!(text.contains("Claude Sonnet 4.5"));
        assert!(text.contains("Anthropic"));
        assert!(text.contains("Top providers"));
        assert!(text.contains("Saturday"));
        assert!(text.contains("2 days (2025-03-03 to 2025-03-04)"));
    }

    #[test]
    fn empty_summary_skips_rankings() {
        let text = render_summary(&stats(&[]), opts());
        assert!(!text.contains("Top models"));
        assert!(!text.contains("Top providers"));
        assert!(text.contains("Activity by weekday"));
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "day"), "1 day");
        assert_eq!(plural(0, "day"), "0 days");
    }
}
