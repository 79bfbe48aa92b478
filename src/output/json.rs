use crate::core::WrappedStats;
use crate::error::AppError;

/// Pretty-printed JSON document for the summary
pub(crate) fn output_wrapped_json(stats: &WrappedStats) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(stats)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuiltinCatalog;
    use crate::core::{Collected, StatsContext, compute_wrapped};
    use crate::source::SourceKind;
    use crate::utils::Timezone;
    use serde_json::Value;

    #[test]
    fn zero_aggregate_serializes_every_field() {
        let ctx = StatsContext {
            year: 2025,
            source: SourceKind::OpenCode,
            timezone: Timezone::Named(chrono_tz::UTC),
            now: "2025-06-01T00:00:00Z".parse().unwrap(),
            catalog: &BuiltinCatalog,
        };
        let stats = compute_wrapped(&ctx, &Collected::default(), &Collected::default());
        let json: Value = serde_json::from_str(&output_wrapped_json(&stats).unwrap()).unwrap();

        assert_eq!(json["year"], 2025);
        assert_eq!(json["source"], "opencode");
        assert_eq!(json["first_session_date"], "2025-06-01");
        assert_eq!(json["total_messages"], 0);
        assert_eq!(json["max_streak"], 0);
        assert!(json["most_active_day"].is_null());
        assert_eq!(json["top_models"].as_array().unwrap().len(), 0);
        assert_eq!(json["daily_activity"].as_object().unwrap().len(), 0);
        assert_eq!(
            json["weekday_activity"]["counts"].as_array().unwrap().len(),
            7
        );
        assert_eq!(json["weekday_activity"]["most_active_day_name"], "Sunday");
    }
}
